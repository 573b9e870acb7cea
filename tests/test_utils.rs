use gh_rebranch::github::client::GithubClient;
use gh_rebranch::github::repo::Repository;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Repository node as the listing query returns it.
///
/// `default_branch` is `(ref id, branch name, oid)`, `matching_refs` are the
/// `(name, oid)` pairs the branch filter matched.
pub fn repository_node(
    id: &str,
    name: &str,
    default_branch: Option<(&str, &str, &str)>,
    matching_refs: &[(&str, &str)],
) -> Value {
    let default_branch_ref = match default_branch {
        Some((ref_id, branch, oid)) => json!({
            "id": ref_id,
            "name": branch,
            "target": { "oid": oid }
        }),
        None => Value::Null,
    };
    let ref_edges = matching_refs
        .iter()
        .map(|(ref_name, oid)| {
            json!({ "node": { "name": ref_name, "target": { "oid": oid } } })
        })
        .collect::<Vec<_>>();
    json!({
        "id": id,
        "name": name,
        "defaultBranchRef": default_branch_ref,
        "refs": { "edges": ref_edges }
    })
}

/// One page of the repository listing response envelope.
pub fn viewer_page(
    login: &str,
    nodes: Vec<Value>,
    end_cursor: Option<&str>,
    has_next_page: bool,
) -> Value {
    let total = nodes.len();
    let edges = nodes
        .into_iter()
        .map(|node| json!({ "node": node }))
        .collect::<Vec<_>>();
    json!({
        "data": {
            "viewer": {
                "login": login,
                "repositories": {
                    "edges": edges,
                    "totalCount": total,
                    "pageInfo": {
                        "endCursor": end_cursor,
                        "hasNextPage": has_next_page
                    }
                }
            }
        }
    })
}

/// Successful `createRef` response body.
pub fn create_ref_response(ref_id: &str) -> Value {
    json!({ "data": { "createRef": { "ref": { "id": ref_id } } } })
}

/// Successful `deleteRef` response body.
pub fn delete_ref_response() -> Value {
    json!({ "data": { "deleteRef": { "clientMutationId": null } } })
}

/// Parse a repository out of the node JSON the builders produce.
pub fn repository_from(node: Value) -> Repository {
    serde_json::from_value(node).expect("repository node should deserialize")
}

/// Client wired to a mock server for both API surfaces.
pub fn client_for(server: &MockServer) -> GithubClient {
    GithubClient::with_endpoints(
        "test-token",
        format!("{}/graphql", server.uri()),
        server.uri(),
    )
}
