use crate::domain::ticket::{IssueMetadata, TicketKey};

/// Change tags classified from one file of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub changes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDetail {
    pub sha: String,
    pub message: String,
    pub additions: u64,
    pub deletions: u64,
    pub files: Vec<FileChange>,
}

/// Everything one report run learned about a single ticket.
#[derive(Debug, Clone)]
pub struct CommitSummary {
    pub ticket: TicketKey,
    /// First commit message for the ticket, replaced by later pull-request merges.
    pub description: String,
    pub authors: Vec<String>,
    pub commits: usize,
    pub additions: u64,
    pub deletions: u64,
    pub pull_requests: Vec<String>,
    /// Fetched once, when the summary is created.
    pub issue: Option<IssueMetadata>,
    pub details: Vec<CommitDetail>,
}

impl CommitSummary {
    pub fn new(ticket: TicketKey, description: String, issue: Option<IssueMetadata>) -> Self {
        Self {
            ticket,
            description,
            authors: Vec::new(),
            commits: 0,
            additions: 0,
            deletions: 0,
            pull_requests: Vec::new(),
            issue,
            details: Vec::new(),
        }
    }

    pub fn impact(&self) -> u64 {
        self.additions + self.deletions
    }

    pub fn add_author(&mut self, author: &str) {
        if !self.authors.iter().any(|known| known == author) {
            self.authors.push(author.to_string());
        }
    }

    pub fn add_pull_request(&mut self, reference: String) {
        if !self.pull_requests.contains(&reference) {
            self.pull_requests.push(reference);
        }
    }
}
