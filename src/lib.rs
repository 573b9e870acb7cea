//! # gh-rebranch
//!
//! Rename the default branch across all your GitHub repositories
//!
//! ## Usage
//!
//! ```txt
//! Usage: gh-rebranch [OPTIONS]
//!
//! Options:
//!  -f, --from <FROM>  Current default branch name (skips the prompt)
//!  -t, --to <TO>      Desired default branch name (skips the prompt)
//!  -c, --cleanup      Delete the original default branch after the update (skips the prompt)
//!  -v, --verbose...   Verbose mode (-v, -vv, -vvv)
//!  -h, --help         Print help
//! ```
//!
//! Anything not given on the command line is asked for interactively with a
//! defaulted prompt. Authentication uses the `GH_TOKEN` environment variable
//! (a `.env` file works too).

#![warn(clippy::all, rust_2018_idioms)]
#![deny(
    missing_docs,
    clippy::all,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![warn(clippy::multiple_crate_versions)]

pub(crate) mod cli;
pub(crate) mod errors;
pub(crate) mod utils;

pub mod github;
pub mod migrate;

pub use cli::{gh_rebranch_main, GhRebranchCli};
pub use errors::RebranchError;
pub use utils::{main_rebranch, MigrationIntent};
