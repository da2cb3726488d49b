//! Schema lookup by form-type name.
//!
//! The engine only ever talks to a [`SchemaProvider`]. [`StaticRegistry`]
//! is the in-memory provider shipped with the crate; it is populated either
//! from the bundled form types or from a TOML schema document:
//!
//! ```toml
//! [[schema]]
//! name = "User Information"
//!
//! [[schema.field]]
//! name = "firstName"
//! type = "text"
//! label = "First Name"
//! required = true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::{builtin, Schema};
use crate::error::{Error, Result};

/// Source of form schemas, looked up by form-type name.
pub trait SchemaProvider {
    /// Names of all available form types, in display order.
    fn list_form_types(&self) -> Vec<String>;

    /// Look up the schema for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSchema`] if no schema is registered under `name`.
    fn get_schema(&self, name: &str) -> Result<Schema>;
}

/// Read-only, in-memory schema registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRegistry {
    schemas: Vec<Schema>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SchemaDocument {
    #[serde(default, rename = "schema")]
    schemas: Vec<Schema>,
}

impl StaticRegistry {
    /// Build a registry, rejecting duplicate schema names.
    pub fn new(schemas: Vec<Schema>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(schemas.len());
        for schema in &schemas {
            if !seen.insert(schema.name()) {
                return Err(Error::InvalidSchema(format!(
                    "schema '{}' is defined more than once",
                    schema.name()
                )));
            }
        }
        Ok(Self { schemas })
    }

    /// The bundled User, Address, and Payment information forms.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin::schemas()?)
    }

    /// Parse a registry from a TOML schema document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let document: SchemaDocument = toml::from_str(content)?;
        Self::new(document.schemas)
    }

    /// Load a registry from a TOML schema document on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// describes an invalid schema.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let registry = Self::from_toml_str(&content)?;
        log::debug!(
            "Loaded {} schema(s) from {}",
            registry.schemas.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Serialize the registry back into a TOML schema document.
    pub fn to_toml_string(&self) -> Result<String> {
        let document = SchemaDocument {
            schemas: self.schemas.clone(),
        };
        Ok(toml::to_string_pretty(&document)?)
    }

    #[must_use]
    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaProvider for StaticRegistry {
    fn list_form_types(&self) -> Vec<String> {
        self.schemas.iter().map(|s| s.name().to_string()).collect()
    }

    fn get_schema(&self, name: &str) -> Result<Schema> {
        self.schemas
            .iter()
            .find(|s| s.name() == name)
            .cloned()
            .ok_or_else(|| Error::UnknownSchema {
                name: name.to_string(),
            })
    }
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for Box<P> {
    fn list_form_types(&self) -> Vec<String> {
        (**self).list_form_types()
    }

    fn get_schema(&self, name: &str) -> Result<Schema> {
        (**self).get_schema(name)
    }
}
