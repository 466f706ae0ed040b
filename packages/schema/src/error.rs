use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Object field is missing objectFields")]
    MissingObjectFields,

    #[error("Field '{path}' is a slot nested inside an object or array field")]
    NestedSlot { path: String },

    #[error("Field '{path}' is nested deeper than {max} levels")]
    TooDeep { path: String, max: usize },

    #[error("Invalid field name '{name}' at '{path}': {reason}")]
    InvalidFieldName {
        path: String,
        name: String,
        reason: String,
    },

    #[error("Field '{path}' uses the reserved system key 'id'")]
    ReservedField { path: String },

    #[error("Invalid schema JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Json(e.to_string())
    }
}
