use chrono::NaiveDate;
use std::fmt;

use super::value::{FieldValue, ValueError};

/// Input format accepted by [`FieldKind::Date`] fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The kind of a form field.
///
/// Each kind decides which input widget a front-end shows and how raw
/// input text is turned into a typed [`FieldValue`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Password,
    /// A choice among a fixed, non-empty, ordered list of options.
    Choice { options: Vec<String> },
}

impl FieldKind {
    /// Canonical lowercase name used in schema documents.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Password => "password",
            Self::Choice { .. } => "choice",
        }
    }

    /// Parse a kind name as written in a schema document.
    ///
    /// `dropdown` is accepted as an alias of `choice`; the returned choice
    /// carries the given options.
    #[must_use]
    pub fn from_name(name: &str, options: Vec<String>) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "date" => Some(Self::Date),
            "password" => Some(Self::Password),
            "choice" | "dropdown" => Some(Self::Choice { options }),
            _ => None,
        }
    }

    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::Choice { options } => Some(options),
            _ => None,
        }
    }

    /// Whether values of this kind should be hidden when displayed.
    #[must_use]
    pub const fn is_masked(&self) -> bool {
        matches!(self, Self::Password)
    }

    /// Parse raw input for `field` according to this kind.
    ///
    /// The empty string always parses to [`FieldValue::Empty`]; whether an
    /// empty value is acceptable is decided by required-field validation.
    pub fn parse(&self, field: &str, raw: &str) -> Result<FieldValue, ValueError> {
        if raw.is_empty() {
            return Ok(FieldValue::Empty);
        }

        match self {
            Self::Text => Ok(FieldValue::Text(raw.to_string())),
            Self::Password => Ok(FieldValue::Password(raw.to_string())),
            Self::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(FieldValue::Number)
                .ok_or_else(|| ValueError::NotANumber {
                    field: field.to_string(),
                    input: raw.to_string(),
                }),
            Self::Date => NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                .map(FieldValue::Date)
                .map_err(|_| ValueError::InvalidDate {
                    field: field.to_string(),
                    input: raw.to_string(),
                }),
            Self::Choice { options } => {
                if options.iter().any(|o| o == raw) {
                    Ok(FieldValue::Choice(raw.to_string()))
                } else {
                    Err(ValueError::NotAnOption {
                        field: field.to_string(),
                        input: raw.to_string(),
                    })
                }
            }
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> FieldKind {
        FieldKind::Choice {
            options: vec!["Goa".to_string(), "Kerala".to_string()],
        }
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(FieldKind::from_name("text", Vec::new()), Some(FieldKind::Text));
        assert_eq!(FieldKind::from_name("NUMBER", Vec::new()), Some(FieldKind::Number));
        assert_eq!(
            FieldKind::from_name("dropdown", vec!["a".to_string()]),
            Some(FieldKind::Choice {
                options: vec!["a".to_string()]
            })
        );
        assert_eq!(FieldKind::from_name("checkbox", Vec::new()), None);
    }

    #[test]
    fn test_kind_name_round_trips_through_from_name() {
        for kind in [
            FieldKind::Text,
            FieldKind::Number,
            FieldKind::Date,
            FieldKind::Password,
        ] {
            assert_eq!(FieldKind::from_name(kind.name(), Vec::new()), Some(kind));
        }
    }

    #[test]
    fn test_empty_input_is_always_accepted() {
        assert_eq!(FieldKind::Number.parse("age", ""), Ok(FieldValue::Empty));
        assert_eq!(states().parse("state", ""), Ok(FieldValue::Empty));
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(FieldKind::Number.parse("age", "42"), Ok(FieldValue::Number(42.0)));
        assert_eq!(FieldKind::Number.parse("age", " 3.5 "), Ok(FieldValue::Number(3.5)));
        assert!(matches!(
            FieldKind::Number.parse("age", "forty"),
            Err(ValueError::NotANumber { .. })
        ));
        assert!(FieldKind::Number.parse("age", "NaN").is_err());
    }

    #[test]
    fn test_date_parsing() {
        let parsed = FieldKind::Date.parse("expiryDate", "2027-03-01");
        assert_eq!(
            parsed,
            Ok(FieldValue::Date(NaiveDate::from_ymd_opt(2027, 3, 1).unwrap()))
        );
        assert!(matches!(
            FieldKind::Date.parse("expiryDate", "03/2027"),
            Err(ValueError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!(
            states().parse("state", "Goa"),
            Ok(FieldValue::Choice("Goa".to_string()))
        );
        assert!(matches!(
            states().parse("state", "goa"),
            Err(ValueError::NotAnOption { .. })
        ));
    }

    #[test]
    fn test_password_is_masked() {
        assert!(FieldKind::Password.is_masked());
        assert!(!FieldKind::Text.is_masked());
        assert_eq!(
            FieldKind::Password.parse("cvv", "123"),
            Ok(FieldValue::Password("123".to_string()))
        );
    }
}
