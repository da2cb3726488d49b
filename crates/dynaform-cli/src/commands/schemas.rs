use anyhow::{Context, Result};
use dynaform_core::{SchemaProvider, StaticRegistry};
use std::fs;
use std::path::PathBuf;

use crate::config;

/// Write the bundled form types to the default schema file.
pub fn init_schemas() -> Result<()> {
    let path = config::default_schema_path();

    if path.exists() {
        println!("✓ Schema file already exists at: {}", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = StaticRegistry::builtin()?.to_toml_string()?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✓ Created schema file at: {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit the form types in that file");
    println!("  2. Check it: dynaform schemas validate");
    println!(
        "  3. Use it: dynaform config set schema_file {}",
        path.display()
    );

    Ok(())
}

/// Show the default schema file path.
pub fn show_path() {
    println!("{}", config::default_schema_path().display());
}

/// Validate a schema document and summarise what it defines.
pub fn validate_schemas(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(config::default_schema_path);

    if !path.exists() {
        println!("Schema file not found: {}", path.display());
        println!("\nRun 'dynaform schemas init' to create it first.");
        return Ok(());
    }

    let registry = StaticRegistry::load(&path)
        .with_context(|| format!("Failed to load schemas from {}", path.display()))?;

    println!("✓ Schema file is valid: {}", path.display());
    println!("\nForm types:");
    for name in registry.list_form_types() {
        let schema = registry.get_schema(&name)?;
        println!(
            "  - {} ({} fields, {} required)",
            name,
            schema.fields().len(),
            schema.required_fields().count()
        );
    }

    Ok(())
}

/// Print the bundled form types as a schema document.
pub fn show_example() -> Result<()> {
    print!("{}", StaticRegistry::builtin()?.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_missing_file_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_schemas(Some(temp_dir.path().join("absent.toml"))).is_ok());
    }

    #[test]
    fn test_validate_bad_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("schemas.toml");
        fs::write(&path, "[[schema]]\nname = \"\"\n").unwrap();
        assert!(validate_schemas(Some(path)).is_err());
    }

    #[test]
    fn test_validate_builtin_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("schemas.toml");
        fs::write(&path, StaticRegistry::builtin().unwrap().to_toml_string().unwrap()).unwrap();
        assert!(validate_schemas(Some(path)).is_ok());
    }
}
