//! GitHub wire types for the repository listing and the branch mutations.
use serde::Deserialize;

/// GraphQL response envelope.
///
/// GitHub reports query-level failures inside a `200` response, so both
/// fields have to be inspected before `data` is trusted.
#[derive(Deserialize, Debug)]
pub(crate) struct GraphqlResponse<T> {
    /// Payload of a successful operation.
    pub(crate) data: Option<T>,

    /// Errors reported by the GraphQL layer.
    pub(crate) errors: Option<Vec<GraphqlError>>,
}

/// Single GraphQL-level error.
#[derive(Deserialize, Debug)]
pub(crate) struct GraphqlError {
    /// Human-readable error message.
    pub(crate) message: String,
}

/// `data` payload of the repository listing query.
#[derive(Deserialize, Debug)]
pub(crate) struct ViewerData {
    /// The authenticated user.
    pub(crate) viewer: Viewer,
}

/// Authenticated user with one page of owned repositories.
#[derive(Deserialize, Debug)]
pub(crate) struct Viewer {
    /// Login of the authenticated user.
    pub(crate) login: String,

    /// One page of owned repositories.
    pub(crate) repositories: RepositoryPage,
}

/// Single page of the repository connection.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryPage {
    /// Repository edges of this page.
    pub(crate) edges: Vec<RepositoryEdge>,

    /// Cursor state of the connection.
    pub(crate) page_info: PageInfo,
}

/// Edge wrapper around a repository node.
#[derive(Deserialize, Debug)]
pub(crate) struct RepositoryEdge {
    /// The repository itself.
    pub(crate) node: Repository,
}

/// Cursor state of a connection page.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    /// Cursor to resume from, absent on an empty connection.
    pub(crate) end_cursor: Option<String>,

    /// Whether another page exists.
    pub(crate) has_next_page: bool,
}

/// Repository as returned by the listing query.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Platform-assigned node id.
    pub id: String,

    /// Repository name, unique per owner.
    pub name: String,

    /// Current default branch, `None` for an empty repository.
    pub default_branch_ref: Option<BranchRef>,

    /// Branches whose name matched the listing filter.
    pub refs: RefConnection,
}

impl Repository {
    /// Whether a branch with exactly this name matched the listing filter.
    ///
    /// The filter is a substring search on the platform side, so the matches
    /// still have to be compared by full name.
    pub fn has_branch(&self, name: &str) -> bool {
        self.refs.edges.iter().any(|edge| edge.node.name == name)
    }
}

/// Branch reference with its own id, distinct from the commit it points to.
#[derive(Deserialize, Debug, Clone)]
pub struct BranchRef {
    /// Reference id, consumed by the deletion mutation.
    pub id: String,

    /// Branch name without the `refs/heads/` prefix.
    pub name: String,

    /// Commit the reference points at.
    pub target: CommitTarget,
}

/// Commit pointed at by a reference.
#[derive(Deserialize, Debug, Clone)]
pub struct CommitTarget {
    /// Opaque commit identifier.
    pub oid: String,
}

/// Branches matched by the listing filter.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RefConnection {
    /// Matched reference edges.
    pub edges: Vec<RefEdge>,
}

/// Edge wrapper around a matched reference.
#[derive(Deserialize, Debug, Clone)]
pub struct RefEdge {
    /// The matched reference.
    pub node: RefMatch,
}

/// Reference matched by the listing filter.
#[derive(Deserialize, Debug, Clone)]
pub struct RefMatch {
    /// Branch name without the `refs/heads/` prefix.
    pub name: String,

    /// Commit the reference points at.
    pub target: CommitTarget,
}

/// Owner login and the flattened list of owned repositories.
#[derive(Debug)]
pub struct OwnedRepositories {
    /// Login of the authenticated user.
    pub owner: String,

    /// All owned repositories in discovery order.
    pub repositories: Vec<Repository>,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_listing_page() {
        let page = json!({
            "data": {
                "viewer": {
                    "login": "octocat",
                    "repositories": {
                        "edges": [
                            {
                                "node": {
                                    "id": "R_1",
                                    "name": "widget",
                                    "defaultBranchRef": {
                                        "id": "REF_1",
                                        "name": "master",
                                        "target": { "oid": "abc123" }
                                    },
                                    "refs": {
                                        "edges": [
                                            {
                                                "node": {
                                                    "name": "main",
                                                    "target": { "oid": "abc123" }
                                                }
                                            }
                                        ]
                                    }
                                }
                            },
                            {
                                "node": {
                                    "id": "R_2",
                                    "name": "empty",
                                    "defaultBranchRef": null,
                                    "refs": { "edges": [] }
                                }
                            }
                        ],
                        "totalCount": 2,
                        "pageInfo": {
                            "endCursor": "Y3Vyc29yOjI=",
                            "hasNextPage": true
                        }
                    }
                }
            }
        });
        let envelope: GraphqlResponse<ViewerData> = serde_json::from_value(page).unwrap();
        assert!(envelope.errors.is_none());
        let viewer = envelope.data.unwrap().viewer;
        assert_eq!(viewer.login, "octocat");
        assert_eq!(viewer.repositories.edges.len(), 2);
        let widget = &viewer.repositories.edges[0].node;
        let default_branch = widget.default_branch_ref.as_ref().unwrap();
        assert_eq!(default_branch.name, "master");
        assert_eq!(default_branch.target.oid, "abc123");
        assert!(viewer.repositories.edges[1].node.default_branch_ref.is_none());
        let page_info = &viewer.repositories.page_info;
        assert_eq!(page_info.end_cursor.as_deref(), Some("Y3Vyc29yOjI="));
        assert!(page_info.has_next_page);
    }

    #[test]
    fn parses_graphql_errors() {
        let body = json!({
            "data": null,
            "errors": [{ "message": "Bad credentials" }]
        });
        let envelope: GraphqlResponse<ViewerData> = serde_json::from_value(body).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors.unwrap()[0].message, "Bad credentials");
    }

    #[test]
    fn branch_matches_compare_by_full_name() {
        let repository: Repository = serde_json::from_value(json!({
            "id": "R_1",
            "name": "widget",
            "defaultBranchRef": {
                "id": "REF_1",
                "name": "master",
                "target": { "oid": "abc123" }
            },
            "refs": {
                "edges": [
                    { "node": { "name": "main-backup", "target": { "oid": "def456" } } }
                ]
            }
        }))
        .unwrap();
        assert!(!repository.has_branch("main"));
        assert!(repository.has_branch("main-backup"));
    }
}
