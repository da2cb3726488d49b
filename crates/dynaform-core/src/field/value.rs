use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// A typed value parsed from raw field input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Password(String),
    Choice(String),
}

impl FieldValue {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) | Self::Choice(s) => f.write_str(s),
            Self::Password(_) => f.write_str("********"),
            Self::Number(n) => write!(f, "{}", n),
            Self::Date(d) => write!(f, "{}", d.format(super::kind::DATE_FORMAT)),
        }
    }
}

/// Raw input rejected by a field's kind before it reaches the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("{field}: '{input}' is not a number")]
    NotANumber { field: String, input: String },

    #[error("{field}: '{input}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate { field: String, input: String },

    #[error("{field}: '{input}' is not one of the allowed options")]
    NotAnOption { field: String, input: String },
}
