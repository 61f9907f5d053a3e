use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown task type: {0}")]
    UnknownTaskType(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

/// Delivery failures of the analytics collaborator. Logged, never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("analytics channel closed")]
    Closed,
    #[error("analytics buffer full")]
    Full,
    #[error("analytics rejected event: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
