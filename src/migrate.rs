//! Migration of default branches, repository by repository.
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::errors::{RebranchError, RebranchErrorKind};
use crate::github::client::GithubClient;
use crate::github::repo::Repository;
use crate::utils::MigrationIntent;

/// Upper bound on simultaneously in-flight repository migrations.
const MAX_IN_FLIGHT: usize = 8;

/// How a single repository came out of the run.
#[derive(Debug, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The default branch already carries the target name.
    AlreadyCurrent,
    /// The default branch now carries the target name.
    Migrated {
        /// Whether the target branch had to be created.
        branch_created: bool,
        /// Whether the original default branch was deleted.
        cleaned_up: bool,
    },
}

/// Run the migration sequence for one repository.
///
/// The target branch is created (or an existing one reused), the default
/// branch pointer is switched, and the original branch is deleted when the
/// intent asks for it. Progress is reported step by step on stdout.
/// # Errors
/// Error if a step fails. Steps after the failing one are not attempted, so
/// the original branch is never deleted unless the switch went through.
pub async fn migrate_repository(
    client: &GithubClient,
    owner: &str,
    repository: &Repository,
    intent: &MigrationIntent,
) -> Result<MigrationOutcome, RebranchError> {
    let default_branch = repository
        .default_branch_ref
        .as_ref()
        .ok_or_else(|| RebranchError::new(RebranchErrorKind::NoDefaultBranch))?;
    if default_branch.name == intent.to {
        println!("Default branch already up to date for {}.", repository.name);
        return Ok(MigrationOutcome::AlreadyCurrent);
    }
    let branch_created = if repository.has_branch(&intent.to) {
        println!("Branch already exists for {}.", repository.name);
        false
    } else {
        client
            .create_branch(&repository.id, &default_branch.target.oid, &intent.to)
            .await?;
        println!("New branch created for {}.", repository.name);
        true
    };
    client
        .update_default_branch(owner, &repository.name, &intent.to)
        .await?;
    println!("Updated default branch for {}.", repository.name);
    let cleaned_up = if intent.cleanup {
        client.delete_branch(&default_branch.id).await?;
        println!("Deleted original default branch for {}.", repository.name);
        true
    } else {
        false
    };
    Ok(MigrationOutcome::Migrated {
        branch_created,
        cleaned_up,
    })
}

/// Migrate all repositories, a bounded number of them in flight at once.
///
/// A failure is reported on stderr and isolated to its repository, the
/// other migrations keep running. Outcomes are returned per repository name.
pub async fn migrate_repositories(
    client: Arc<GithubClient>,
    owner: String,
    repositories: Vec<Repository>,
    intent: MigrationIntent,
) -> Vec<(String, Result<MigrationOutcome, RebranchError>)> {
    let permits = Arc::new(Semaphore::new(MAX_IN_FLIGHT));
    let mut set = JoinSet::new();
    for repository in repositories {
        let client = Arc::clone(&client);
        let owner = owner.clone();
        let intent = intent.clone();
        let permits = Arc::clone(&permits);
        set.spawn(async move {
            // The semaphore is never closed, so the permit always arrives.
            let _permit = permits.acquire_owned().await;
            let result = migrate_repository(&client, &owner, &repository, &intent).await;
            if let Err(error) = &result {
                eprintln!(
                    "An error occurred while processing repository: {}.",
                    repository.name
                );
                eprintln!("{error}");
            }
            (repository.name, result)
        });
    }
    set.join_all().await
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::github::repo::{BranchRef, CommitTarget, RefConnection};

    /// Client pointed at a closed port, so any request errors out.
    fn unreachable_client() -> GithubClient {
        GithubClient::with_endpoints("token", "http://127.0.0.1:1/graphql", "http://127.0.0.1:1")
    }

    fn repository(name: &str, default_branch: Option<&str>) -> Repository {
        Repository {
            id: format!("R_{name}"),
            name: name.to_string(),
            default_branch_ref: default_branch.map(|branch| BranchRef {
                id: format!("REF_{name}"),
                name: branch.to_string(),
                target: CommitTarget {
                    oid: "abc123".to_string(),
                },
            }),
            refs: RefConnection::default(),
        }
    }

    #[tokio::test]
    async fn already_current_makes_no_requests() {
        let intent = MigrationIntent {
            from: "master".to_string(),
            to: "main".to_string(),
            cleanup: true,
        };
        let outcome = migrate_repository(
            &unreachable_client(),
            "octocat",
            &repository("widget", Some("main")),
            &intent,
        )
        .await
        .unwrap();
        assert_eq!(outcome, MigrationOutcome::AlreadyCurrent);
    }

    #[tokio::test]
    async fn missing_default_branch_is_an_error() {
        let intent = MigrationIntent {
            from: "master".to_string(),
            to: "main".to_string(),
            cleanup: false,
        };
        let result = migrate_repository(
            &unreachable_client(),
            "octocat",
            &repository("empty", None),
            &intent,
        )
        .await;
        assert!(result.is_err());
    }
}
