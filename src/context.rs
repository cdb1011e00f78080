use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{IssueTrackerService, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    /// Absent when the tracker is not configured; enrichment is skipped entirely.
    pub issue_tracker: Option<Arc<dyn IssueTrackerService>>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        issue_tracker: Option<Arc<dyn IssueTrackerService>>,
    ) -> Self {
        Self {
            config,
            version_control,
            issue_tracker,
        }
    }
}
