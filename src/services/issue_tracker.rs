use async_trait::async_trait;

use crate::domain::ticket::{TicketKey, TrackedIssue};
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn find_issue(&self, key: &TicketKey) -> AppResult<TrackedIssue>;
}
