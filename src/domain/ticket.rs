use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Work-item key inferred from a commit message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketKey(String);

impl TicketKey {
    pub const OTHER: &'static str = "Other";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn other() -> Self {
        Self::new(Self::OTHER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_other(&self) -> bool {
        self.0 == Self::OTHER
    }

    /// Tries each matcher in priority order and falls back to `Other`.
    pub fn extract(message: &str) -> Self {
        TICKET_MATCHERS
            .iter()
            .find_map(|matcher| matcher.capture(message))
            .map(Self)
            .unwrap_or_else(Self::other)
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketPattern {
    /// `PROJ-1234`
    TrackerKey,
    /// `#1234`
    Reference,
}

impl TicketPattern {
    fn source(self) -> &'static str {
        match self {
            TicketPattern::TrackerKey => r"(?-u:\b)([A-Z]+-[0-9]+)(?-u:\b)",
            TicketPattern::Reference => r"#([0-9]+)",
        }
    }
}

struct TicketMatcher {
    regex: Regex,
}

impl TicketMatcher {
    fn new(pattern: TicketPattern) -> Self {
        Self {
            regex: Regex::new(pattern.source()).unwrap(),
        }
    }

    fn capture(&self, message: &str) -> Option<String> {
        self.regex
            .captures(message)
            .and_then(|captures| captures.get(1))
            .map(|found| found.as_str().to_string())
    }
}

static TICKET_MATCHERS: LazyLock<Vec<TicketMatcher>> = LazyLock::new(|| {
    vec![
        TicketMatcher::new(TicketPattern::TrackerKey),
        TicketMatcher::new(TicketPattern::Reference),
    ]
});

static PULL_REQUEST_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9]+").unwrap());

/// Returns the first `#<digits>` token, or an empty string when there is none.
pub fn pull_request_reference(message: &str) -> String {
    PULL_REQUEST_REFERENCE
        .find(message)
        .map(|found| found.as_str().to_string())
        .unwrap_or_default()
}

pub fn mentions_pull_request(message: &str) -> bool {
    message.to_lowercase().contains("pull request")
}

/// Issue fields as the tracker reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedIssue {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueMetadata {
    pub summary: String,
    pub status: String,
    pub assignee: String,
    pub description: String,
}

impl From<TrackedIssue> for IssueMetadata {
    fn from(issue: TrackedIssue) -> Self {
        Self {
            summary: issue.summary,
            status: issue.status,
            assignee: issue.assignee.unwrap_or_else(|| "Unassigned".to_string()),
            description: issue
                .description
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| "No description available".to_string()),
        }
    }
}
