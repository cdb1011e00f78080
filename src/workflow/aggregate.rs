use std::collections::HashMap;
use std::slice;

use tracing::debug;

use crate::domain::change::classify;
use crate::domain::commit::CommitRecord;
use crate::domain::summary::{CommitDetail, CommitSummary, FileChange};
use crate::domain::ticket::{TicketKey, mentions_pull_request, pull_request_reference};
use crate::workflow::enrich::IssueEnricher;

/// Result of one aggregation run. Summaries are kept in first-seen order.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub summaries: Vec<CommitSummary>,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub commit_count: usize,
}

/// Folds commits into per-ticket summaries. Commits must be added in source order.
pub struct CommitAggregator<'a> {
    enricher: &'a IssueEnricher,
    index: HashMap<TicketKey, usize>,
    summaries: Vec<CommitSummary>,
    total_additions: u64,
    total_deletions: u64,
    commit_count: usize,
}

impl<'a> CommitAggregator<'a> {
    pub fn new(enricher: &'a IssueEnricher) -> Self {
        Self {
            enricher,
            index: HashMap::new(),
            summaries: Vec::new(),
            total_additions: 0,
            total_deletions: 0,
            commit_count: 0,
        }
    }

    pub async fn add(&mut self, commit: &CommitRecord) {
        let message = commit.headline().to_string();
        let ticket = TicketKey::extract(&message);
        let files = commit
            .files
            .iter()
            .map(|file| FileChange {
                changes: classify(slice::from_ref(file)),
            })
            .collect();

        let position = match self.index.get(&ticket) {
            Some(&position) => position,
            None => {
                let issue = self.enricher.fetch(&ticket).await;
                debug!(%ticket, enriched = issue.is_some(), "new ticket summary");
                self.summaries
                    .push(CommitSummary::new(ticket.clone(), message.clone(), issue));
                self.index.insert(ticket, self.summaries.len() - 1);
                self.summaries.len() - 1
            }
        };

        self.total_additions += commit.additions;
        self.total_deletions += commit.deletions;
        self.commit_count += 1;

        let summary = &mut self.summaries[position];
        summary.add_author(&commit.author);
        summary.commits += 1;
        summary.additions += commit.additions;
        summary.deletions += commit.deletions;
        summary.details.push(CommitDetail {
            sha: commit.short_sha().to_string(),
            message: message.clone(),
            additions: commit.additions,
            deletions: commit.deletions,
            files,
        });

        if mentions_pull_request(&message) {
            summary.add_pull_request(pull_request_reference(&message));
            summary.description = message;
        }
    }

    pub fn finish(self) -> Aggregation {
        Aggregation {
            summaries: self.summaries,
            total_additions: self.total_additions,
            total_deletions: self.total_deletions,
            commit_count: self.commit_count,
        }
    }
}

pub async fn aggregate(enricher: &IssueEnricher, commits: &[CommitRecord]) -> Aggregation {
    let mut aggregator = CommitAggregator::new(enricher);
    for commit in commits {
        aggregator.add(commit).await;
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::change::FileDiff;
    use crate::workflow::enrich::tests::FakeTracker;

    fn commit(
        sha: &str,
        message: &str,
        author: &str,
        additions: u64,
        deletions: u64,
    ) -> CommitRecord {
        CommitRecord {
            sha: sha.to_string(),
            message: message.to_string(),
            author: author.to_string(),
            additions,
            deletions,
            files: Vec::new(),
        }
    }

    fn find<'a>(aggregation: &'a Aggregation, ticket: &str) -> &'a CommitSummary {
        aggregation
            .summaries
            .iter()
            .find(|summary| summary.ticket.as_str() == ticket)
            .unwrap()
    }

    #[tokio::test]
    async fn groups_commits_by_ticket() {
        let enricher = IssueEnricher::new(None);
        let commits = vec![
            commit("aaaaaaaaaa", "PROJ-1 fix", "Ada", 3, 1),
            commit("bbbbbbbbbb", "PROJ-1 more", "Grace", 2, 0),
            commit("cccccccccc", "#42 misc", "Ada", 1, 1),
        ];

        let aggregation = aggregate(&enricher, &commits).await;

        assert_eq!(aggregation.summaries.len(), 2);
        let proj = find(&aggregation, "PROJ-1");
        assert_eq!(proj.commits, 2);
        assert_eq!(proj.additions, 5);
        assert_eq!(proj.deletions, 1);
        assert_eq!(proj.description, "PROJ-1 fix");
        assert_eq!(proj.authors, vec!["Ada", "Grace"]);
        assert_eq!(
            proj.details.iter().map(|d| d.sha.as_str()).collect::<Vec<_>>(),
            vec!["aaaaaaa", "bbbbbbb"]
        );

        let misc = find(&aggregation, "42");
        assert_eq!(misc.commits, 1);
        assert_eq!(misc.additions, 1);
        assert_eq!(misc.deletions, 1);
    }

    #[tokio::test]
    async fn totals_match_input() {
        let enricher = IssueEnricher::new(None);
        let commits = vec![
            commit("a", "PROJ-1 fix", "Ada", 10, 4),
            commit("b", "unrelated", "Ada", 0, 7),
            commit("c", "CORE-2 add", "Lin", 3, 0),
            commit("d", "PROJ-1 again", "Lin", 1, 1),
        ];

        let aggregation = aggregate(&enricher, &commits).await;

        let input: u64 = commits.iter().map(|c| c.additions + c.deletions).sum();
        let grouped: u64 = aggregation.summaries.iter().map(CommitSummary::impact).sum();
        assert_eq!(grouped, input);
        assert_eq!(aggregation.total_additions, 14);
        assert_eq!(aggregation.total_deletions, 12);
        assert_eq!(aggregation.commit_count, 4);
        let partitioned: usize = aggregation.summaries.iter().map(|s| s.commits).sum();
        assert_eq!(partitioned, commits.len());
        assert_eq!(find(&aggregation, "Other").commits, 1);
    }

    #[tokio::test]
    async fn fetches_metadata_once_per_ticket() {
        let tracker = Arc::new(FakeTracker::default());
        let enricher = IssueEnricher::new(Some(tracker.clone()));
        let commits = vec![
            commit("a", "PROJ-1 fix", "Ada", 1, 0),
            commit("b", "PROJ-1 more", "Ada", 1, 0),
            commit("c", "PROJ-2 other", "Ada", 1, 0),
            commit("d", "PROJ-1 last", "Ada", 1, 0),
            commit("e", "no ticket", "Ada", 1, 0),
        ];

        let aggregation = aggregate(&enricher, &commits).await;

        assert_eq!(tracker.call_count(), 2);
        assert!(find(&aggregation, "PROJ-1").issue.is_some());
        assert!(find(&aggregation, "Other").issue.is_none());
    }

    #[tokio::test]
    async fn failed_lookup_is_not_retried() {
        let tracker = Arc::new(FakeTracker {
            failing: vec!["PROJ-1".to_string()],
            ..FakeTracker::default()
        });
        let enricher = IssueEnricher::new(Some(tracker.clone()));
        let commits = vec![
            commit("a", "PROJ-1 fix", "Ada", 1, 0),
            commit("b", "PROJ-1 more", "Ada", 1, 0),
        ];

        let aggregation = aggregate(&enricher, &commits).await;

        assert_eq!(tracker.call_count(), 1);
        assert!(find(&aggregation, "PROJ-1").issue.is_none());
    }

    #[tokio::test]
    async fn pull_request_merge_replaces_description() {
        let enricher = IssueEnricher::new(None);
        let commits = vec![
            commit("a", "PROJ-7 start work", "Ada", 1, 0),
            commit("b", "Merge pull request #99 from acme/PROJ-7\n\nbody", "Ada", 0, 0),
            commit("c", "PROJ-7 follow up", "Ada", 1, 0),
        ];

        let aggregation = aggregate(&enricher, &commits).await;

        let summary = find(&aggregation, "PROJ-7");
        assert_eq!(summary.description, "Merge pull request #99 from acme/PROJ-7");
        assert_eq!(summary.pull_requests, vec!["#99"]);
    }

    #[tokio::test]
    async fn pull_request_rule_applies_to_first_commit() {
        let enricher = IssueEnricher::new(None);
        let commits = vec![
            commit("a", "PROJ-7 Merge pull request #5", "Ada", 1, 0),
            commit("b", "PROJ-7 follow up", "Lin", 1, 0),
        ];

        let aggregation = aggregate(&enricher, &commits).await;

        let summary = find(&aggregation, "PROJ-7");
        assert_eq!(summary.pull_requests, vec!["#5"]);
        assert_eq!(summary.description, "PROJ-7 Merge pull request #5");
        assert_eq!(summary.commits, 2);
    }

    #[tokio::test]
    async fn pull_request_without_number_adds_empty_reference() {
        let enricher = IssueEnricher::new(None);
        let commits = vec![
            commit("a", "PROJ-7 start work", "Ada", 1, 0),
            commit("b", "PROJ-7 Merge Pull Request from fork", "Ada", 1, 0),
        ];

        let aggregation = aggregate(&enricher, &commits).await;

        let summary = find(&aggregation, "PROJ-7");
        assert_eq!(summary.description, "PROJ-7 Merge Pull Request from fork");
        assert_eq!(summary.pull_requests, vec![String::new()]);
    }

    #[tokio::test]
    async fn classifies_each_file_separately() {
        let enricher = IssueEnricher::new(None);
        let mut record = commit("a", "PROJ-1 fix", "Ada", 4, 0);
        record.files = vec![
            FileDiff {
                filename: "src/a.rs".to_string(),
                additions: 2,
                deletions: 0,
                patch: Some("+use config;".to_string()),
            },
            FileDiff {
                filename: "src/b.rs".to_string(),
                additions: 2,
                deletions: 0,
                patch: None,
            },
        ];

        let aggregation = aggregate(&enricher, &[record]).await;

        let files = &find(&aggregation, "PROJ-1").details[0].files;
        assert_eq!(
            files[0].changes,
            vec!["Updated configuration in src/a.rs", "Modified src/a.rs"]
        );
        assert_eq!(files[1].changes, vec!["Modified src/b.rs"]);
    }
}
