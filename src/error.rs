use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
