//! Form schemas and the providers that serve them.

pub mod builtin;
pub mod registry;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::field::FieldDefinition;

pub use registry::{SchemaProvider, StaticRegistry};

/// A named, ordered list of field definitions describing one form type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchema", into = "RawSchema")]
pub struct Schema {
    name: String,
    fields: Vec<FieldDefinition>,
}

impl Schema {
    /// Build a schema, checking that its name is non-empty and its field
    /// names are non-empty and unique.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidSchema("schema name must not be empty".to_string()));
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.name().trim().is_empty() {
                return Err(Error::InvalidSchema(format!(
                    "schema '{}' has a field with an empty name",
                    name
                )));
            }
            if !seen.insert(field.name()) {
                return Err(Error::InvalidSchema(format!(
                    "schema '{}' defines field '{}' more than once",
                    name,
                    field.name()
                )));
            }
        }

        Ok(Self { name, fields })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name() == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.is_required())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSchema {
    name: String,
    #[serde(default, rename = "field")]
    fields: Vec<FieldDefinition>,
}

impl TryFrom<RawSchema> for Schema {
    type Error = Error;

    fn try_from(raw: RawSchema) -> Result<Self> {
        Self::new(raw.name, raw.fields)
    }
}

impl From<Schema> for RawSchema {
    fn from(schema: Schema) -> Self {
        Self {
            name: schema.name,
            fields: schema.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::text("firstName", "First Name").required(),
            FieldDefinition::text("lastName", "Last Name").required(),
            FieldDefinition::number("age", "Age"),
        ]
    }

    #[test]
    fn test_schema_new() {
        let schema = Schema::new("User Information", user_fields()).unwrap();
        assert_eq!(schema.name(), "User Information");
        assert_eq!(schema.fields().len(), 3);
        assert_eq!(schema.required_fields().count(), 2);
    }

    #[test]
    fn test_schema_field_lookup() {
        let schema = Schema::new("User Information", user_fields()).unwrap();
        assert_eq!(schema.field("age").map(FieldDefinition::label), Some("Age"));
        assert!(schema.contains("lastName"));
        assert!(!schema.contains("email"));
    }

    #[test]
    fn test_schema_preserves_field_order() {
        let schema = Schema::new("User Information", user_fields()).unwrap();
        let names: Vec<&str> = schema.fields().iter().map(FieldDefinition::name).collect();
        assert_eq!(names, ["firstName", "lastName", "age"]);
    }

    #[test]
    fn test_schema_duplicate_field_rejected() {
        let fields = vec![
            FieldDefinition::text("city", "City"),
            FieldDefinition::text("city", "Town"),
        ];
        let err = Schema::new("Address", fields).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_schema_empty_name_rejected() {
        assert!(Schema::new("", user_fields()).is_err());
        assert!(Schema::new("Blank", vec![FieldDefinition::text("", "Blank")]).is_err());
    }

    #[test]
    fn test_schema_without_fields_is_allowed() {
        let schema = Schema::new("Empty", Vec::new()).unwrap();
        assert_eq!(schema.required_fields().count(), 0);
    }
}
