use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkinstricError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cache Miss: no entry for '{0}'")]
    CacheMiss(String),

    #[error("Malformed Payload: {0}")]
    MalformedPayload(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Session Error: {0}")]
    Session(String),
}

pub type SkResult<T> = Result<T, SkinstricError>;
