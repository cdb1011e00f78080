use crate::domain::change::FileDiff;

/// A commit as listed by the commit source, before its diff is fetched.
#[derive(Debug, Clone)]
pub struct CommitHeader {
    pub sha: String,
    pub message: String,
    pub author: String,
}

#[derive(Debug, Clone, Default)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub files: Vec<FileDiff>,
}

#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub additions: u64,
    pub deletions: u64,
    pub files: Vec<FileDiff>,
}

impl CommitRecord {
    pub fn from_parts(header: CommitHeader, stats: CommitStats) -> Self {
        Self {
            sha: header.sha,
            message: header.message,
            author: header.author,
            additions: stats.additions,
            deletions: stats.deletions,
            files: stats.files,
        }
    }

    pub fn headline(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}
