// Library error types

use crate::models::ResultKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Label extraction only understands instant vectors.
    #[error("query result is not a vector (got {found})")]
    UnsupportedResultShape { found: ResultKind },
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("prometheus request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("prometheus returned {error_type}: {error}")]
    Api { error_type: String, error: String },
    #[error("decode prometheus response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("load TLS certificate {path}: {message}")]
    Certificate { path: String, message: String },
}
