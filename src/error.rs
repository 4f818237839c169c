use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipsplitError {
    #[error("No talking intervals detected: {0}")]
    NoTalkingContent(String),

    #[error("Silence detection failed: {0}")]
    SilenceDetection(String),

    #[error("Media probe failed: {0}")]
    MediaProbe(String),

    #[error("Clip extraction failed: {0}")]
    ClipExtraction(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClipsplitError>;
