//! GitHub API module.
pub mod client;
pub mod repo;

/// GitHub GraphQL API URL
const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// GitHub REST API URL
const GITHUB_REST_URL: &str = "https://api.github.com";

/// GitHub REST Accept header value
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub API Header
const GITHUB_API_HEADER: &str = "X-GitHub-Api-Version";

/// GitHub API Version
const GITHUB_API_VERSION: &str = "2022-11-28";

/// User agent sent with every request
const GITHUB_USER_AGENT: &str = env!("CARGO_PKG_NAME");
