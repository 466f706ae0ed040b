use pagekit_schema::SchemaError;
use std::fmt;
use thiserror::Error;

pub type ComposeResult<T> = Result<T, ComposeError>;

/// Fatal composition errors. Problems with contributed fragments are
/// reported as [`Rejection`]s instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposeError {
    #[error("Built-in fragment is invalid: {0}")]
    InvalidBuiltin(#[source] SchemaError),
}

/// Why a contributed fragment was left out of the composite
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RejectReason {
    #[error("fragment id is already taken")]
    Duplicate,

    #[error("fragment id '{0}' is reserved")]
    ReservedId(String),

    #[error("fragment id '{0}' is not a usable field name")]
    InvalidId(String),

    #[error("fragment schema is invalid: {0}")]
    InvalidSchema(#[source] SchemaError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub fragment_id: String,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.fragment_id, self.reason)
    }
}

/// A fragment callback that did not produce output
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Fragment '{fragment_id}' failed to render: {message}")]
    Failed {
        fragment_id: String,
        message: String,
    },

    #[error("Fragment '{fragment_id}' panicked while rendering: {message}")]
    Panicked {
        fragment_id: String,
        message: String,
    },
}

impl RenderError {
    pub fn fragment_id(&self) -> &str {
        match self {
            RenderError::Failed { fragment_id, .. } | RenderError::Panicked { fragment_id, .. } => {
                fragment_id
            }
        }
    }
}
