use crate::domain::change::dedup_preserving_order;
use crate::domain::repository::RepositoryRef;
use crate::domain::summary::{CommitDetail, CommitSummary};
use crate::workflow::aggregate::Aggregation;

pub fn render_empty(branch: &str, date: &str, repo: &RepositoryRef) -> String {
    format!("No changes pushed to {branch} branch on {date} in {repo}.")
}

/// Renders the full report. Tickets are ordered by impact, ties keep first-seen order.
pub fn render_report(
    branch: &str,
    date: &str,
    repo: &RepositoryRef,
    aggregation: &Aggregation,
) -> String {
    let mut out = format!("Changes pushed to {branch} branch on {date} in {repo}:\n\n");
    out.push_str(&format!(
        "Overall Impact: +{} -{} lines across {} commits\n\n",
        aggregation.total_additions, aggregation.total_deletions, aggregation.commit_count
    ));
    out.push_str("Changes by Feature/Ticket:\n");

    let mut summaries: Vec<&CommitSummary> = aggregation.summaries.iter().collect();
    // `sort_by` is stable.
    summaries.sort_by(|a, b| b.impact().cmp(&a.impact()));

    for summary in summaries {
        out.push('\n');
        render_summary(&mut out, summary);
    }

    out
}

fn render_summary(out: &mut String, summary: &CommitSummary) {
    out.push_str(&format!("{}:\n", summary.ticket));
    if let Some(issue) = &summary.issue {
        let first_line = issue.description.split('\n').next().unwrap_or_default();
        out.push_str(&format!("• JIRA Summary: {}\n", issue.summary));
        out.push_str(&format!("• JIRA Status: {}\n", issue.status));
        out.push_str(&format!("• JIRA Assignee: {}\n", issue.assignee));
        out.push_str(&format!("• JIRA Description: {first_line}...\n"));
    }
    out.push_str(&format!("• Git Summary: {}\n", summary.description));
    out.push_str(&format!(
        "• Impact: +{} -{} lines in {} commit{}\n",
        summary.additions,
        summary.deletions,
        summary.commits,
        if summary.commits > 1 { "s" } else { "" }
    ));
    out.push_str(&format!("• Authors: {}\n", summary.authors.join(", ")));
    if !summary.pull_requests.is_empty() {
        out.push_str(&format!(
            "• Pull Requests: {}\n",
            summary.pull_requests.join(", ")
        ));
    }
    out.push_str("• Changes:\n");
    for detail in &summary.details {
        render_detail(out, detail);
    }
}

fn render_detail(out: &mut String, detail: &CommitDetail) {
    out.push_str(&format!("  - [{}] {}\n", detail.sha, detail.message));
    out.push_str(&format!(
        "    Impact: +{} -{} lines\n",
        detail.additions, detail.deletions
    ));
    if detail.files.is_empty() {
        return;
    }

    let changes = dedup_preserving_order(
        detail
            .files
            .iter()
            .flat_map(|file| file.changes.iter().cloned())
            .collect(),
    );
    out.push_str("    Details:\n");
    for change in changes {
        out.push_str(&format!("      • {change}\n"));
    }
}
