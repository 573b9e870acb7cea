//! Client for the two GitHub API surfaces used by the migration.
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use urlencoding::encode;

use super::repo::{
    GraphqlResponse, OwnedRepositories, Repository, RepositoryPage, Viewer, ViewerData,
};
use super::{
    GITHUB_ACCEPT, GITHUB_API_HEADER, GITHUB_API_VERSION, GITHUB_GRAPHQL_URL, GITHUB_REST_URL,
    GITHUB_USER_AGENT,
};
use crate::errors::{RebranchError, RebranchErrorKind};

/// One page of owned repositories, annotated with the branches matching the
/// target name.
const REPOSITORIES_QUERY: &str = r#"
query ($branch: String!, $after: String) {
  viewer {
    login
    repositories(first: 100, after: $after, ownerAffiliations: OWNER) {
      edges {
        node {
          id
          name
          defaultBranchRef {
            id
            name
            target {
              oid
            }
          }
          refs(query: $branch, first: 100, refPrefix: "refs/heads/") {
            edges {
              node {
                name
                target {
                  oid
                }
              }
            }
          }
        }
      }
      totalCount
      pageInfo {
        endCursor
        hasNextPage
      }
    }
  }
}
"#;

/// Branch creation mutation.
const CREATE_REF_MUTATION: &str = r#"
mutation ($repositoryId: ID!, $name: String!, $oid: GitObjectID!) {
  createRef(input: {repositoryId: $repositoryId, name: $name, oid: $oid}) {
    ref {
      id
    }
  }
}
"#;

/// Branch deletion mutation.
const DELETE_REF_MUTATION: &str = r#"
mutation ($id: ID!) {
  deleteRef(input: {refId: $id}) {
    clientMutationId
  }
}
"#;

/// GitHub client carrying the token and the endpoint roots.
#[derive(Debug, Clone)]
pub struct GithubClient {
    /// Personal access token.
    token: String,

    /// Shared HTTP client.
    client: reqwest::Client,

    /// GraphQL endpoint.
    graphql_url: String,

    /// REST endpoint root.
    rest_url: String,
}

impl GithubClient {
    /// Create a client against the public GitHub endpoints.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoints(token, GITHUB_GRAPHQL_URL, GITHUB_REST_URL)
    }

    /// Create a client against explicit endpoints.
    pub fn with_endpoints(
        token: impl Into<String>,
        graphql_url: impl Into<String>,
        rest_url: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            client: reqwest::Client::new(),
            graphql_url: graphql_url.into(),
            rest_url: rest_url.into(),
        }
    }

    /// Post a GraphQL document with its variables and decode the `data`
    /// payload, surfacing GraphQL-level errors as `kind` failures.
    async fn graphql<T: DeserializeOwned>(
        &self,
        kind: RebranchErrorKind,
        document: &str,
        variables: Value,
    ) -> Result<T, RebranchError> {
        debug!("POST {} ({:?})", self.graphql_url, kind);
        let request = self
            .client
            .post(&self.graphql_url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(USER_AGENT, GITHUB_USER_AGENT)
            .json(&json!({
                "query": document,
                "variables": variables,
            }))
            .send();
        let response = request.await?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RebranchError::new(kind).with_text(&format!("{status}: {text}")));
        }
        let text = response.text().await?;
        let envelope: GraphqlResponse<T> = serde_json::from_str(&text)?;
        if let Some(errors) = envelope.errors {
            let messages = errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(RebranchError::new(RebranchErrorKind::Graphql).with_text(&messages));
        }
        match envelope.data {
            Some(data) => Ok(data),
            None => Err(RebranchError::new(RebranchErrorKind::Graphql)
                .with_text("response is missing its data payload")),
        }
    }

    /// Enumerate every repository owned by the authenticated user, in
    /// discovery order, together with the branches matching `branch_filter`.
    ///
    /// Pages of 100 are requested until the connection reports no further
    /// page.
    /// # Errors
    /// Error if a page request fails or reports GraphQL-level errors.
    pub async fn list_owned_repositories(
        &self,
        branch_filter: &str,
    ) -> Result<OwnedRepositories, RebranchError> {
        let mut owner = String::new();
        let mut repositories: Vec<Repository> = vec![];
        let mut after: Option<String> = None;
        let mut page: usize = 1;
        loop {
            let data: ViewerData = self
                .graphql(
                    RebranchErrorKind::ListRepositories,
                    REPOSITORIES_QUERY,
                    json!({
                        "branch": branch_filter,
                        "after": after,
                    }),
                )
                .await?;
            let Viewer {
                login,
                repositories: connection,
            } = data.viewer;
            owner = login;
            let RepositoryPage { edges, page_info } = connection;
            debug!("requested github (page {page}): {} repositories", edges.len());
            repositories.extend(edges.into_iter().map(|edge| edge.node));
            if !page_info.has_next_page {
                break;
            }
            match page_info.end_cursor {
                Some(cursor) => after = Some(cursor),
                // No cursor to resume from.
                None => break,
            }
            page += 1;
        }
        Ok(OwnedRepositories {
            owner,
            repositories,
        })
    }

    /// Create a branch named `branch` pointing at the commit `oid`.
    /// # Errors
    /// Error if the mutation fails.
    pub async fn create_branch(
        &self,
        repository_id: &str,
        oid: &str,
        branch: &str,
    ) -> Result<(), RebranchError> {
        let name = format!("refs/heads/{branch}");
        let _: Value = self
            .graphql(
                RebranchErrorKind::BranchCreation,
                CREATE_REF_MUTATION,
                json!({
                    "repositoryId": repository_id,
                    "name": name,
                    "oid": oid,
                }),
            )
            .await?;
        Ok(())
    }

    /// Point the repository's default branch at `branch`.
    ///
    /// The GraphQL API does not expose default-branch updates, so this one
    /// call goes through the REST endpoint.
    /// # Errors
    /// Error if the update fails.
    pub async fn update_default_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<(), RebranchError> {
        let url = format!("{}/repos/{}/{}", self.rest_url, owner, encode(repo));
        debug!("PATCH {url}");
        let request = self
            .client
            .patch(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, GITHUB_USER_AGENT)
            .header(GITHUB_API_HEADER, GITHUB_API_VERSION)
            .json(&json!({
                "default_branch": branch,
            }))
            .send();
        let response = request.await?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RebranchError::new(RebranchErrorKind::DefaultBranchUpdate)
                .with_text(&format!("{status}: {text}")));
        }
        Ok(())
    }

    /// Delete a branch by its reference id.
    /// # Errors
    /// Error if the mutation fails.
    pub async fn delete_branch(&self, ref_id: &str) -> Result<(), RebranchError> {
        let _: Value = self
            .graphql(
                RebranchErrorKind::BranchDeletion,
                DELETE_REF_MUTATION,
                json!({
                    "id": ref_id,
                }),
            )
            .await?;
        Ok(())
    }
}
