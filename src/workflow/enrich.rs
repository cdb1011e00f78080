use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ticket::{IssueMetadata, TicketKey};
use crate::services::IssueTrackerService;

/// Best-effort issue lookups; failures are logged and treated as missing metadata.
pub struct IssueEnricher {
    tracker: Option<Arc<dyn IssueTrackerService>>,
}

impl IssueEnricher {
    pub fn new(tracker: Option<Arc<dyn IssueTrackerService>>) -> Self {
        Self { tracker }
    }

    pub async fn fetch(&self, key: &TicketKey) -> Option<IssueMetadata> {
        let tracker = self.tracker.as_ref()?;
        if key.as_str().is_empty() || key.is_other() {
            return None;
        }

        match tracker.find_issue(key).await {
            Ok(issue) => {
                debug!(ticket = %key, issue = %issue.key, "issue metadata fetched");
                Some(issue.into())
            }
            Err(err) => {
                warn!(ticket = %key, error = %err, "failed to fetch issue metadata");
                None
            }
        }
    }
}
