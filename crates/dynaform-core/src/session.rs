//! The form session state machine.
//!
//! A [`FormSession`] is either `Empty` (no schema selected) or `Active`
//! (a schema is loaded and a record is being filled in). Submitting is a
//! synchronous step inside [`FormSession::submit`]: it validates, hands the
//! record to a [`SubmissionStore`] on success, and resets the session.
//!
//! Progress is recomputed on every mutation, never lazily.

use crate::error::{Error, Result};
use crate::field::{FieldDefinition, FieldValue};
use crate::record::{Record, ValidationResult};
use crate::schema::{Schema, SchemaProvider};
use crate::store::SubmissionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Active,
}

/// Result of [`FormSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum SubmitOutcome {
    /// The record passed validation and was appended at `index`.
    Accepted { index: usize },
    /// Validation failed; the session keeps its record and now shows these errors.
    Rejected(ValidationResult),
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormSession {
    schema: Option<Schema>,
    record: Record,
    errors: ValidationResult,
    progress: f64,
}

impl FormSession {
    /// A session with no active schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh active session for `schema`.
    #[must_use]
    pub fn for_schema(schema: Schema) -> Self {
        Self {
            schema: Some(schema),
            record: Record::new(),
            errors: ValidationResult::new(),
            progress: 0.0,
        }
    }

    /// Replace this session with a fresh one for the schema called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSchema`] if the provider has no such schema;
    /// the session is unchanged in that case.
    pub fn select_schema<P>(&mut self, provider: &P, name: &str) -> Result<()>
    where
        P: SchemaProvider + ?Sized,
    {
        let schema = provider.get_schema(name)?;
        log::info!("Selected form type '{}' ({} fields)", name, schema.fields().len());
        *self = Self::for_schema(schema);
        Ok(())
    }

    /// Set a single field's value.
    ///
    /// Clears that field's error, if any, and recomputes progress.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldAccess`] if no schema is active or the
    /// field is not part of it.
    pub fn set_field_value(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let schema = self.active_schema(Some(field))?;
        if !schema.contains(field) {
            return Err(Error::unknown_field(field, schema.name()));
        }

        self.record.set(field, value);
        self.errors.clear_field(field);
        self.recompute_progress();
        Ok(())
    }

    /// Parse `raw` with the field's kind and set it only if it parses.
    ///
    /// Returns the typed value. Malformed input leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if the kind rejects `raw`, or
    /// [`Error::InvalidFieldAccess`] as for [`Self::set_field_value`].
    pub fn set_parsed_value(&mut self, field: &str, raw: &str) -> Result<FieldValue> {
        let schema = self.active_schema(Some(field))?;
        let definition = schema
            .field(field)
            .ok_or_else(|| Error::unknown_field(field, schema.name()))?;
        let value = definition.parse_value(raw)?;
        self.set_field_value(field, raw)?;
        Ok(value)
    }

    /// Validate the current record and store the result as this session's errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldAccess`] if no schema is active.
    pub fn validate(&mut self) -> Result<ValidationResult> {
        let schema = self.active_schema(None)?;
        let result = validate_record(schema, &self.record);
        self.errors = result.clone();
        Ok(result)
    }

    /// Validate and, if the record is valid, append it to `store` and reset.
    ///
    /// A failed validation is not an error: it is reported as
    /// [`SubmitOutcome::Rejected`] and leaves record and progress as they were.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldAccess`] if no schema is active or
    /// `store` belongs to a different schema.
    pub fn submit(&mut self, store: &mut SubmissionStore) -> Result<SubmitOutcome> {
        let schema = self.active_schema(None)?;
        if store.schema_name() != schema.name() {
            return Err(Error::InvalidFieldAccess {
                field: None,
                reason: format!(
                    "store for '{}' cannot take a '{}' record",
                    store.schema_name(),
                    schema.name()
                ),
            });
        }

        let result = self.validate()?;
        if !result.is_valid() {
            log::debug!("Submission rejected with {} error(s)", result.len());
            return Ok(SubmitOutcome::Rejected(result));
        }

        self.progress = 100.0;
        let index = store.append(std::mem::take(&mut self.record));
        self.reset();
        log::info!(
            "Accepted submission #{} for '{}'",
            index,
            store.schema_name()
        );
        Ok(SubmitOutcome::Accepted { index })
    }

    /// Replace the record wholesale, as when recalling a submission for editing.
    ///
    /// Keys that are not fields of the active schema are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldAccess`] if no schema is active.
    pub fn load_record(&mut self, mut record: Record) -> Result<()> {
        let schema = self.active_schema(None)?;
        let dropped = record.retain_fields(|name| schema.contains(name));
        if !dropped.is_empty() {
            log::warn!(
                "Dropped fields not in '{}' while loading record: {}",
                schema.name(),
                dropped.join(", ")
            );
        }

        self.record = record;
        self.errors = ValidationResult::new();
        self.recompute_progress();
        Ok(())
    }

    /// Clear the record and errors, keeping the active schema.
    pub fn reset(&mut self) {
        self.record = Record::new();
        self.errors = ValidationResult::new();
        self.progress = 0.0;
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.schema.is_some() {
            SessionState::Active
        } else {
            SessionState::Empty
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.schema.is_some()
    }

    #[must_use]
    pub const fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    #[must_use]
    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_ref().map(Schema::name)
    }

    /// Fields of the active schema; empty when no schema is active.
    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        self.schema.as_ref().map_or(&[][..], |s| s.fields())
    }

    #[must_use]
    pub const fn record(&self) -> &Record {
        &self.record
    }

    #[must_use]
    pub const fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    /// Percentage of required fields currently filled, in `[0, 100]`.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    fn active_schema(&self, field: Option<&str>) -> Result<&Schema> {
        self.schema
            .as_ref()
            .ok_or_else(|| Error::no_active_schema(field))
    }

    fn recompute_progress(&mut self) {
        if let Some(schema) = &self.schema {
            self.progress = compute_progress(schema, &self.record);
            log::debug!("Progress for '{}' is now {:.0}%", schema.name(), self.progress);
        }
    }
}

/// Error for every required field of `schema` left empty in `record`.
#[must_use]
pub fn validate_record(schema: &Schema, record: &Record) -> ValidationResult {
    schema
        .required_fields()
        .filter(|field| !record.is_filled(field.name()))
        .map(|field| (field.name(), field.required_message()))
        .collect()
}

/// Share of required fields filled, as a percentage; 0 with no required fields.
#[must_use]
pub fn compute_progress(schema: &Schema, record: &Record) -> f64 {
    let (required, filled) = schema
        .required_fields()
        .fold((0usize, 0usize), |(required, filled), field| {
            (required + 1, filled + usize::from(record.is_filled(field.name())))
        });

    if required == 0 {
        0.0
    } else {
        filled as f64 / required as f64 * 100.0
    }
}
