use tracing::info;

use crate::context::AppContext;
use crate::domain::commit::CommitRecord;
use crate::domain::repository::{DayWindow, RepositoryRef};
use crate::error::{AppError, AppResult};
use crate::workflow::aggregate::aggregate;
use crate::workflow::enrich::IssueEnricher;
use crate::workflow::render::{render_empty, render_report};

pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Clone)]
pub struct ProductionChangesRequest {
    pub repository: String,
    pub branch: Option<String>,
    pub date: Option<String>,
}

/// Builds the production-change report for one branch and one UTC day.
pub async fn production_changes(
    ctx: &AppContext,
    request: ProductionChangesRequest,
) -> AppResult<String> {
    let repo = RepositoryRef::parse(&request.repository)?;
    let branch = request
        .branch
        .map(|branch| branch.trim().to_string())
        .filter(|branch| !branch.is_empty())
        .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
    let window = DayWindow::resolve(request.date.as_deref())?;
    let date = window.label();

    info!(
        %repo,
        %branch,
        %date,
        enrichment = ctx.config.jira.is_some(),
        "collecting production changes"
    );

    ctx.version_control.verify_repository(&repo).await?;
    let headers = ctx
        .version_control
        .list_commits(&repo, &branch, &window)
        .await?;

    if headers.is_empty() {
        info!(%repo, %branch, %date, "no commits in window");
        return Ok(render_empty(&branch, &date, &repo));
    }

    let mut commits = Vec::with_capacity(headers.len());
    for header in headers {
        let stats = ctx
            .version_control
            .commit_details(&repo, &header.sha)
            .await
            .map_err(|err| {
                AppError::VersionControl(format!(
                    "failed to fetch details for commit {}: {err}",
                    header.sha
                ))
            })?;
        commits.push(CommitRecord::from_parts(header, stats));
    }

    let enricher = IssueEnricher::new(ctx.issue_tracker.clone());
    let aggregation = aggregate(&enricher, &commits).await;
    info!(
        commits = aggregation.commit_count,
        tickets = aggregation.summaries.len(),
        "aggregated commits"
    );

    Ok(render_report(&branch, &date, &repo, &aggregation))
}
