use async_trait::async_trait;

use crate::domain::commit::{CommitHeader, CommitStats};
use crate::domain::repository::{DayWindow, RepositoryRef};
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Fails when the repository cannot be resolved.
    async fn verify_repository(&self, repo: &RepositoryRef) -> AppResult<()>;

    /// Commits on `branch` inside `window`, in the order the source returns them.
    async fn list_commits(
        &self,
        repo: &RepositoryRef,
        branch: &str,
        window: &DayWindow,
    ) -> AppResult<Vec<CommitHeader>>;

    async fn commit_details(&self, repo: &RepositoryRef, sha: &str) -> AppResult<CommitStats>;
}
