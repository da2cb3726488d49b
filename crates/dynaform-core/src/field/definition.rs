use serde::{Deserialize, Serialize};

use super::kind::FieldKind;
use super::value::{FieldValue, ValueError};
use crate::error::Error;

/// A single field of a form schema.
///
/// Definitions are immutable once part of a [`Schema`](crate::Schema).
/// In schema documents a field is written as a flat table:
///
/// ```toml
/// [[schema.field]]
/// name = "state"
/// type = "choice"
/// label = "State"
/// required = true
/// options = ["Goa", "Kerala"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub struct FieldDefinition {
    name: String,
    kind: FieldKind,
    label: String,
    required: bool,
}

impl FieldDefinition {
    /// Create an optional field of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSchema`] if the name is empty, or if the
    /// kind is a choice with no options.
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        label: impl Into<String>,
    ) -> Result<Self, Error> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidSchema("field name must not be empty".to_string()));
        }
        if kind.options().is_some_and(<[String]>::is_empty) {
            return Err(Error::InvalidSchema(format!(
                "choice field '{}' must have at least one option",
                name
            )));
        }
        Ok(Self {
            name,
            kind,
            label: label.into(),
            required: false,
        })
    }

    /// Optional text field.
    #[must_use]
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::plain(name, FieldKind::Text, label)
    }

    /// Optional number field.
    #[must_use]
    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::plain(name, FieldKind::Number, label)
    }

    /// Optional date field.
    #[must_use]
    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::plain(name, FieldKind::Date, label)
    }

    /// Optional password field.
    #[must_use]
    pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::plain(name, FieldKind::Password, label)
    }

    /// Optional choice field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSchema`] if `options` is empty.
    pub fn choice<I, S>(
        name: impl Into<String>,
        label: impl Into<String>,
        options: I,
    ) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect();
        Self::new(name, FieldKind::Choice { options }, label)
    }

    // Kinds without options have nothing to check beyond the name, which
    // `Schema::new` validates.
    fn plain(name: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            label: label.into(),
            required: false,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &FieldKind {
        &self.kind
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        self.kind.options()
    }

    /// The message reported when this field is required but left empty.
    #[must_use]
    pub fn required_message(&self) -> String {
        format!("{} is required.", self.label)
    }

    /// Parse raw input with this field's kind.
    pub fn parse_value(&self, raw: &str) -> Result<FieldValue, ValueError> {
        self.kind.parse(&self.name, raw)
    }
}

/// Flat on-disk shape of a field, as found in schema documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    label: String,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
}

impl TryFrom<RawField> for FieldDefinition {
    type Error = Error;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let is_choice = matches!(raw.kind.to_ascii_lowercase().as_str(), "choice" | "dropdown");
        if !is_choice && raw.options.is_some() {
            return Err(Error::InvalidSchema(format!(
                "field '{}' of type '{}' cannot have options",
                raw.name, raw.kind
            )));
        }

        let kind = FieldKind::from_name(&raw.kind, raw.options.unwrap_or_default()).ok_or_else(
            || {
                Error::InvalidSchema(format!(
                    "field '{}' has unknown type '{}'",
                    raw.name, raw.kind
                ))
            },
        )?;

        let field = Self::new(raw.name, kind, raw.label)?;
        Ok(if raw.required { field.required() } else { field })
    }
}

impl From<FieldDefinition> for RawField {
    fn from(field: FieldDefinition) -> Self {
        let kind = field.kind.name().to_string();
        let options = match field.kind {
            FieldKind::Choice { options } => Some(options),
            _ => None,
        };
        Self {
            name: field.name,
            kind,
            label: field.label,
            required: field.required,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_new() {
        let field = FieldDefinition::new("age", FieldKind::Number, "Age").unwrap();
        assert_eq!(field.name(), "age");
        assert_eq!(field.label(), "Age");
        assert_eq!(field.kind(), &FieldKind::Number);
        assert!(!field.is_required());
        assert!(field.options().is_none());
    }

    #[test]
    fn test_field_required_builder() {
        let field = FieldDefinition::text("firstName", "First Name").required();
        assert!(field.is_required());
        assert_eq!(field.required_message(), "First Name is required.");
    }

    #[test]
    fn test_field_empty_name_rejected() {
        let result = FieldDefinition::new("  ", FieldKind::Text, "Blank");
        assert!(matches!(result, Err(Error::InvalidSchema(_))));
    }

    #[test]
    fn test_choice_without_options_rejected() {
        let result = FieldDefinition::new(
            "state",
            FieldKind::Choice {
                options: Vec::new(),
            },
            "State",
        );
        assert!(matches!(result, Err(Error::InvalidSchema(_))));
    }

    #[test]
    fn test_choice_constructor() {
        let field = FieldDefinition::choice("state", "State", ["Goa", "Kerala"]).unwrap();
        assert_eq!(field.kind().name(), "choice");
        assert_eq!(field.options().map(<[String]>::len), Some(2));
        assert!(FieldDefinition::choice("state", "State", Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_parse_value_uses_kind() {
        let field = FieldDefinition::new("age", FieldKind::Number, "Age").unwrap();
        assert_eq!(field.parse_value("7"), Ok(FieldValue::Number(7.0)));
        assert!(field.parse_value("seven").is_err());
    }

    #[test]
    fn test_deserialize_dropdown_alias() {
        let toml = r#"
            name = "state"
            type = "dropdown"
            label = "State"
            required = true
            options = ["Goa", "Kerala"]
        "#;
        let field: FieldDefinition = toml::from_str(toml).unwrap();
        assert!(field.is_required());
        assert_eq!(
            field.options(),
            Some(&["Goa".to_string(), "Kerala".to_string()][..])
        );
    }

    #[test]
    fn test_deserialize_required_defaults_to_false() {
        let field: FieldDefinition =
            toml::from_str("name = \"zipCode\"\ntype = \"text\"\nlabel = \"Zip Code\"").unwrap();
        assert!(!field.is_required());
        assert_eq!(field.kind(), &FieldKind::Text);
    }

    #[test]
    fn test_deserialize_rejects_options_on_text() {
        let toml = "name = \"x\"\ntype = \"text\"\nlabel = \"X\"\noptions = [\"a\"]";
        assert!(toml::from_str::<FieldDefinition>(toml).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_type() {
        let toml = "name = \"x\"\ntype = \"checkbox\"\nlabel = \"X\"";
        assert!(toml::from_str::<FieldDefinition>(toml).is_err());
    }

    #[test]
    fn test_serialize_writes_flat_table() {
        let field = FieldDefinition::new("cvv", FieldKind::Password, "CVV")
            .unwrap()
            .required();
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "password");
        assert_eq!(json["required"], true);
        assert!(json.get("options").is_none());
    }
}
