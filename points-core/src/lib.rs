pub mod codec;
pub mod search;
pub mod repository;
pub mod validation;
pub mod integrity;
pub mod iata;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Malformed flight record: {0}")]
    MalformedRecord(String),
    #[error("Transport failure: {0}")]
    TransportError(String),
    #[error("Upstream returned {status}: {body}")]
    UpstreamError { status: u16, body: String },
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
