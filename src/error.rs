use thiserror::Error;

#[derive(Error, Debug)]
pub enum CovsumError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },
}

pub type Result<T> = std::result::Result<T, CovsumError>;
