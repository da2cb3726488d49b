use thiserror::Error;

use crate::field::ValueError;

/// Errors raised by the form engine.
///
/// A failed validation is not one of these: it is an ordinary outcome,
/// reported through [`ValidationResult`](crate::ValidationResult).

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown schema: {name}")]
    UnknownSchema { name: String },

    #[error("invalid field access: {reason}")]
    InvalidFieldAccess {
        field: Option<String>,
        reason: String,
    },

    #[error("index {index} out of range for store of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    InvalidValue(#[from] ValueError),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("schema document parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("schema document serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn no_active_schema(field: Option<&str>) -> Self {
        Self::InvalidFieldAccess {
            field: field.map(str::to_string),
            reason: "no schema is active".to_string(),
        }
    }

    pub(crate) fn unknown_field(field: &str, schema: &str) -> Self {
        Self::InvalidFieldAccess {
            field: Some(field.to_string()),
            reason: format!("field '{}' is not part of '{}'", field, schema),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
