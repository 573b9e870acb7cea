//! Command line options for the gh-rebranch tool
use clap::Parser;
use dotenv::dotenv;

use crate::errors::RebranchError;
use crate::github::client::GithubClient;
use crate::utils::{github_token, main_rebranch, offer_token_docs, MigrationIntent};

/// gh-rebranch - Rename the default branch across all your GitHub repositories
#[derive(Parser, Default, Clone, Debug)]
pub struct GhRebranchCli {
    /// Current default branch name (skips the prompt)
    #[arg(short, long)]
    pub from: Option<String>,

    /// Desired default branch name (skips the prompt)
    #[arg(short, long)]
    pub to: Option<String>,

    /// Delete the original default branch after the update (skips the prompt)
    #[arg(short, long)]
    pub cleanup: bool,

    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Run the gh-rebranch tool with the provided command line options
///
/// Without a `GH_TOKEN` in the environment (a `.env` file counts) the run
/// only prints token guidance and returns successfully.
/// # Errors
/// Error if the prompts or the repository listing fail
pub async fn gh_rebranch_main(args: GhRebranchCli) -> Result<(), RebranchError> {
    dotenv().ok();
    let token = match github_token() {
        Some(token) => token,
        None => {
            offer_token_docs();
            return Ok(());
        }
    };
    let intent = MigrationIntent::from_prompts(&args)?;
    let client = GithubClient::new(token);
    main_rebranch(client, intent).await
}
