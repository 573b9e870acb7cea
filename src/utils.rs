//! Prompt helpers and the migration session driver.
use std::sync::Arc;

use inquire::{Confirm, Text};

use crate::cli::GhRebranchCli;
use crate::errors::RebranchError;
use crate::github::client::GithubClient;
use crate::migrate::migrate_repositories;

/// Documentation for creating a personal access token.
pub(crate) const TOKEN_URL: &str = "https://help.github.com/en/github/authenticating-to-github/creating-a-personal-access-token-for-the-command-line";

/// What one run intends to do to every repository.
#[derive(Debug, Clone)]
pub struct MigrationIntent {
    /// Name the default branches are expected to carry today.
    pub from: String,

    /// Name the default branches should carry afterwards.
    pub to: String,

    /// Whether to delete the original default branch after the switch.
    pub cleanup: bool,
}

impl MigrationIntent {
    /// Collect the intent, prompting for whatever the command line did not
    /// pre-seed.
    /// # Errors
    /// Error if a prompt fails (closed stdin, no terminal).
    pub fn from_prompts(args: &GhRebranchCli) -> Result<Self, RebranchError> {
        let from = match &args.from {
            Some(from) => from.clone(),
            None => Text::new("What is the current default branch name?")
                .with_default("master")
                .prompt()?,
        };
        let to = match &args.to {
            Some(to) => to.clone(),
            None => Text::new("What is the desired default branch name?")
                .with_default("main")
                .prompt()?,
        };
        let cleanup = if args.cleanup {
            true
        } else {
            Confirm::new("Would you like to delete the original default branch after update?")
                .with_default(false)
                .prompt()?
        };
        Ok(Self { from, to, cleanup })
    }
}

/// Read the GitHub token from the environment, treating empty as unset.
pub(crate) fn github_token() -> Option<String> {
    std::env::var("GH_TOKEN")
        .ok()
        .filter(|token| !token.is_empty())
}

/// Print token guidance and offer to open the documentation in a browser.
///
/// Best effort on both counts: a failed prompt counts as a refusal and a
/// browser that will not open is only reported.
pub(crate) fn offer_token_docs() {
    eprintln!("\nGH_TOKEN is unspecified in current environment.");
    println!("\n  Create a token:\n  {TOKEN_URL}\n");
    let open_docs = Confirm::new("Would you like to open the link in your browser?")
        .with_default(false)
        .prompt()
        .unwrap_or(false);
    if open_docs {
        if let Err(error) = open::that(TOKEN_URL) {
            eprintln!("Unable to open the browser: {error}");
        }
    }
}

/// Pluralized repository count line.
fn count_line(count: usize) -> String {
    format!(
        "{} repositor{} found.",
        count,
        if count == 1 { "y" } else { "ies" }
    )
}

/// Main function to migrate default branches
/// # Errors
/// Error if the repository listing fails
pub async fn main_rebranch(
    client: GithubClient,
    intent: MigrationIntent,
) -> Result<(), RebranchError> {
    let listing = client.list_owned_repositories(&intent.to).await?;
    let repositories = listing
        .repositories
        .into_iter()
        .filter(|repository| repository.default_branch_ref.is_some())
        .collect::<Vec<_>>();
    println!("{}", count_line(repositories.len()));
    log::debug!(
        "renaming default branches {} -> {} (cleanup: {})",
        intent.from,
        intent.to,
        intent.cleanup
    );
    migrate_repositories(Arc::new(client), listing.owner, repositories, intent).await;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn count_line_pluralizes() {
        assert_eq!(count_line(0), "0 repositories found.");
        assert_eq!(count_line(1), "1 repository found.");
        assert_eq!(count_line(105), "105 repositories found.");
    }
}
