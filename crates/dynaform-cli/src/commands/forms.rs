use anyhow::{Context, Result};
use dynaform_core::{FormEngine, Record, SchemaProvider, SubmitOutcome};

use super::load_registry;
use crate::config::Config;

/// Parse a `name=value` assignment given to `--set`.
pub fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}

/// List the available form types.
pub fn list(config: &Config) -> Result<()> {
    let registry = load_registry(config)?;
    for name in registry.list_form_types() {
        println!("{}", name);
    }
    Ok(())
}

/// Show the fields of one form type.
pub fn show(config: &Config, form: &str) -> Result<()> {
    let registry = load_registry(config)?;
    let schema = registry.get_schema(form)?;

    println!("{}", schema.name());
    println!("{}\n", "=".repeat(schema.name().len()));

    let width = schema
        .fields()
        .iter()
        .map(|f| f.name().len())
        .max()
        .unwrap_or(0);

    for field in schema.fields() {
        let marker = if field.is_required() { "*" } else { " " };
        println!(
            "{} {:<width$}  {:<8}  {}",
            marker,
            field.name(),
            field.kind().name(),
            field.label(),
            width = width
        );
        if let Some(options) = field.options() {
            println!("  {:<width$}  options: {}", "", options.join(", "), width = width + 8);
        }
    }

    println!("\n* required");
    Ok(())
}

/// Fill a form from `name=value` assignments and submit it.
///
/// Prints the submitted record as JSON on success. A rejected submission
/// prints each field error and returns an error so the process exits
/// non-zero.
pub fn fill(config: &Config, form: &str, sets: Vec<(String, String)>) -> Result<()> {
    let mut engine = FormEngine::new(load_registry(config)?);
    engine.select_schema(form)?;

    for (name, value) in sets {
        engine
            .set_parsed_value(&name, &value)
            .with_context(|| format!("Cannot set '{}' on '{}'", name, form))?;
    }

    match engine.submit()? {
        SubmitOutcome::Accepted { index } => {
            let record = submitted_record(&engine, index)?;
            println!("{}", serde_json::to_string_pretty(record)?);
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => {
            for (field, message) in &errors {
                eprintln!("✗ {}: {}", field, message);
            }
            anyhow::bail!("{} field(s) failed validation", errors.len())
        }
    }
}

fn submitted_record<P: SchemaProvider>(engine: &FormEngine<P>, index: usize) -> Result<&Record> {
    engine
        .submissions()
        .and_then(|store| store.get(index))
        .map(|submission| &submission.record)
        .context("Submitted record is missing from the store")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("firstName=Ann"),
            Ok(("firstName".to_string(), "Ann".to_string()))
        );
        assert_eq!(
            parse_assignment("note=a=b"),
            Ok(("note".to_string(), "a=b".to_string()))
        );
        assert_eq!(
            parse_assignment("age="),
            Ok(("age".to_string(), String::new()))
        );
    }

    #[test]
    fn test_parse_assignment_errors() {
        assert!(parse_assignment("firstName").is_err());
        assert!(parse_assignment("=Ann").is_err());
    }

    #[test]
    fn test_fill_accepts_complete_form() {
        let sets = vec![
            ("firstName".to_string(), "Ann".to_string()),
            ("lastName".to_string(), "Lee".to_string()),
            ("age".to_string(), "34".to_string()),
        ];
        assert!(fill(&Config::default(), "User Information", sets).is_ok());
    }

    #[test]
    fn test_submitted_record_is_the_record_alone() {
        let mut engine = FormEngine::new(load_registry(&Config::default()).unwrap());
        engine.select_schema("User Information").unwrap();
        engine.set_field_value("firstName", "Ann").unwrap();
        engine.set_field_value("lastName", "Lee").unwrap();
        let SubmitOutcome::Accepted { index } = engine.submit().unwrap() else {
            panic!("complete form was rejected");
        };

        let record = submitted_record(&engine, index).unwrap();
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json, serde_json::json!({"firstName": "Ann", "lastName": "Lee"}));
    }

    #[test]
    fn test_fill_rejects_missing_required() {
        let sets = vec![("firstName".to_string(), "Ann".to_string())];
        let err = fill(&Config::default(), "User Information", sets).unwrap_err();
        assert!(err.to_string().contains("1 field(s) failed validation"));
    }

    #[test]
    fn test_fill_rejects_malformed_number() {
        let sets = vec![("age".to_string(), "old".to_string())];
        let err = fill(&Config::default(), "User Information", sets).unwrap_err();
        assert!(format!("{:#}", err).contains("'old' is not a number"));
    }

    #[test]
    fn test_fill_rejects_unknown_field_and_form() {
        let sets = vec![("email".to_string(), "a@b.c".to_string())];
        assert!(fill(&Config::default(), "User Information", sets).is_err());
        assert!(fill(&Config::default(), "Shipping", Vec::new()).is_err());
    }
}
