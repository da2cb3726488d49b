pub mod config;
pub mod forms;
pub mod schemas;

use anyhow::{Context, Result};
use dynaform_core::StaticRegistry;

use crate::config::Config;

/// The configured schema document, or the bundled form types if none is set.
pub fn load_registry(config: &Config) -> Result<StaticRegistry> {
    match &config.schema_file {
        Some(path) => StaticRegistry::load(path)
            .with_context(|| format!("Failed to load schemas from {}", path.display())),
        None => StaticRegistry::builtin().context("Bundled schemas are invalid"),
    }
}
