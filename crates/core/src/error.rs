use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("case file error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("path has no file name: {0}")]
    MissingFileName(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("scoring task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("card view rejected update: {0}")]
    View(String),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
