//! Error handling for the gh-rebranch crate.
use std::{error::Error as StdError, fmt};

/// Error type for the gh-rebranch crate.
#[derive(Debug)]
pub struct RebranchError {
    /// Inner error.
    inner: Box<Inner>,
}

impl RebranchError {
    /// Create a new error.
    pub(crate) fn new(kind: RebranchErrorKind) -> Self {
        Self {
            inner: Box::new(Inner { kind, source: None }),
        }
    }

    /// Attach a payload (status line, response body) as the error source.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.inner.source = Some(Box::new(std::io::Error::other(text)));
        self
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the gh-rebranch crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: RebranchErrorKind,

    /// Source error.
    source: Option<BoxError>,
}

/// Error kind for the gh-rebranch crate.
#[derive(Debug)]
pub(crate) enum RebranchErrorKind {
    /// Error related to the reqwest crate.
    Request,

    /// Error related to serde.
    Serde,

    /// Error related to an interactive prompt.
    Prompt,

    /// GraphQL-level error returned inside a successful response.
    Graphql,

    /// Error related to the repository listing query.
    ListRepositories,

    /// Error related to the branch creation mutation.
    BranchCreation,

    /// Error related to the default branch update.
    DefaultBranchUpdate,

    /// Error related to the branch deletion mutation.
    BranchDeletion,

    /// Repository has no default branch to migrate from.
    NoDefaultBranch,
}

impl fmt::Display for RebranchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.inner.kind)?;
        if let Some(source) = &self.inner.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl StdError for RebranchError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<reqwest::Error> for RebranchError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: RebranchErrorKind::Request,
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<serde_json::Error> for RebranchError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: RebranchErrorKind::Serde,
                source: Some(Box::new(e)),
            }),
        }
    }
}

impl From<inquire::InquireError> for RebranchError {
    fn from(e: inquire::InquireError) -> Self {
        Self {
            inner: Box::new(Inner {
                kind: RebranchErrorKind::Prompt,
                source: Some(Box::new(e)),
            }),
        }
    }
}
