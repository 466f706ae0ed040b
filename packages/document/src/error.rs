//! Error types for the document model

use thiserror::Error;

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid breakpoint '{0}': expected one of xxs, xs, sm, md, lg, xlg")]
    InvalidBreakpoint(String),

    #[error("Opaque value of type {type_name} cannot be serialized")]
    OpaqueNotSerializable { type_name: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
