//! The engine facade: one provider, one session, and per-schema stores.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::field::FieldValue;
use crate::record::{Record, ValidationResult};
use crate::schema::SchemaProvider;
use crate::session::{FormSession, SubmitOutcome};
use crate::store::{Submission, SubmissionStore};
use crate::view::{EventOutcome, FormEvent, FormView, TableView};

/// Drives a [`FormSession`] against a [`SchemaProvider`] and keeps the
/// submissions for every schema that has been active.
///
/// Stores are keyed by schema name, so switching form types never drops
/// or misaligns earlier submissions. The "current" submission list is the
/// store of the active schema.
///
/// Every command either succeeds or fails without changing any state.
#[derive(Debug)]
pub struct FormEngine<P> {
    provider: P,
    session: FormSession,
    stores: BTreeMap<String, SubmissionStore>,
}

impl<P: SchemaProvider> FormEngine<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            session: FormSession::new(),
            stores: BTreeMap::new(),
        }
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub fn form_types(&self) -> Vec<String> {
        self.provider.list_form_types()
    }

    pub const fn session(&self) -> &FormSession {
        &self.session
    }

    /// Start a fresh session for the form type `name`.
    pub fn select_schema(&mut self, name: &str) -> Result<()> {
        let mut session = FormSession::new();
        session.select_schema(&self.provider, name)?;
        self.session = session;
        self.stores
            .entry(name.to_string())
            .or_insert_with(|| SubmissionStore::new(name));
        Ok(())
    }

    pub fn set_field_value(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        self.session.set_field_value(field, value)
    }

    /// Set a field from raw input, rejecting text its kind cannot parse.
    pub fn set_parsed_value(&mut self, field: &str, raw: &str) -> Result<FieldValue> {
        self.session.set_parsed_value(field, raw)
    }

    pub fn validate(&mut self) -> Result<ValidationResult> {
        self.session.validate()
    }

    /// Submit the current record into the active schema's store.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let name = self
            .session
            .schema_name()
            .ok_or_else(|| Error::no_active_schema(None))?
            .to_string();
        let store = self
            .stores
            .entry(name)
            .or_insert_with_key(|name| SubmissionStore::new(name.as_str()));
        self.session.submit(store)
    }

    /// Delete the submission at `index` from the active schema's store.
    pub fn remove_at(&mut self, index: usize) -> Result<Submission> {
        let submission = self.active_store_mut(index)?.remove_at(index)?;
        log::info!("Deleted submission #{} ({})", index, submission.id);
        Ok(submission)
    }

    /// Remove the submission at `index` and load its record into the session.
    ///
    /// The session's in-progress record is replaced. Returns a copy of the
    /// recalled record.
    pub fn recall_at(&mut self, index: usize) -> Result<Record> {
        let record = self.active_store_mut(index)?.recall_at(index)?;
        self.session.load_record(record.clone())?;
        log::info!("Recalled submission #{} for editing", index);
        Ok(record)
    }

    /// Submissions of the active schema, if a schema is active.
    pub fn submissions(&self) -> Option<&SubmissionStore> {
        self.session
            .schema_name()
            .and_then(|name| self.stores.get(name))
    }

    pub fn submissions_for(&self, schema_name: &str) -> Option<&SubmissionStore> {
        self.stores.get(schema_name)
    }

    /// Every store that has been created, ordered by schema name.
    pub fn stores(&self) -> impl Iterator<Item = &SubmissionStore> {
        self.stores.values()
    }

    pub fn form_view(&self) -> Option<FormView> {
        FormView::from_session(&self.session)
    }

    pub fn table_view(&self) -> Option<TableView> {
        let schema = self.session.schema()?;
        let store = self.stores.get(schema.name())?;
        Some(TableView::new(schema, store))
    }

    /// Route a front-end event to the matching command.
    pub fn dispatch(&mut self, event: FormEvent) -> Result<EventOutcome> {
        match event {
            FormEvent::SelectSchema(name) => {
                self.select_schema(&name)?;
                Ok(EventOutcome::SchemaSelected(name))
            }
            FormEvent::Input { field, value } => {
                self.set_parsed_value(&field, &value)?;
                Ok(EventOutcome::ValueSet(field))
            }
            FormEvent::Submit => Ok(match self.submit()? {
                SubmitOutcome::Accepted { index } => EventOutcome::Submitted { index },
                SubmitOutcome::Rejected(errors) => EventOutcome::Rejected(errors),
            }),
            FormEvent::Edit(index) => {
                self.recall_at(index)?;
                Ok(EventOutcome::Recalled { index })
            }
            FormEvent::Delete(index) => {
                self.remove_at(index)?;
                Ok(EventOutcome::Deleted { index })
            }
        }
    }

    // With no active schema the current list is empty, so any index is
    // out of range.
    fn active_store_mut(&mut self, index: usize) -> Result<&mut SubmissionStore> {
        let out_of_range = Error::IndexOutOfRange { index, len: 0 };
        match self.session.schema_name() {
            Some(name) => self.stores.get_mut(name).ok_or(out_of_range),
            None => Err(out_of_range),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StaticRegistry;

    fn engine() -> FormEngine<StaticRegistry> {
        FormEngine::new(StaticRegistry::builtin().unwrap())
    }

    fn submit_user(engine: &mut FormEngine<StaticRegistry>, first: &str, last: &str) {
        engine.set_field_value("firstName", first).unwrap();
        engine.set_field_value("lastName", last).unwrap();
        assert!(engine.submit().unwrap().is_accepted());
    }

    #[test]
    fn test_form_types() {
        assert_eq!(engine().form_types().len(), 3);
    }

    #[test]
    fn test_select_schema_creates_empty_store() {
        let mut engine = engine();
        assert!(engine.submissions().is_none());
        engine.select_schema("User Information").unwrap();
        assert_eq!(engine.submissions().map(SubmissionStore::len), Some(0));
    }

    #[test]
    fn test_select_unknown_schema_keeps_session() {
        let mut engine = engine();
        engine.select_schema("User Information").unwrap();
        engine.set_field_value("firstName", "Ann").unwrap();

        assert!(engine.select_schema("Shipping").is_err());
        assert_eq!(engine.session().schema_name(), Some("User Information"));
        assert_eq!(engine.session().record().get("firstName"), "Ann");
        assert!(engine.submissions_for("Shipping").is_none());
    }

    #[test]
    fn test_submit_without_schema() {
        let mut engine = engine();
        assert!(matches!(
            engine.submit(),
            Err(Error::InvalidFieldAccess { .. })
        ));
    }

    #[test]
    fn test_stores_are_kept_per_schema() {
        let mut engine = engine();
        engine.select_schema("User Information").unwrap();
        submit_user(&mut engine, "Ann", "Lee");

        engine.select_schema("Address Information").unwrap();
        assert_eq!(engine.submissions().map(SubmissionStore::len), Some(0));

        engine.select_schema("User Information").unwrap();
        assert_eq!(engine.submissions().map(SubmissionStore::len), Some(1));
        assert_eq!(engine.stores().count(), 2);
    }

    #[test]
    fn test_recall_reloads_session() {
        let mut engine = engine();
        engine.select_schema("User Information").unwrap();
        submit_user(&mut engine, "Ann", "Lee");
        submit_user(&mut engine, "Bob", "Ray");

        let record = engine.recall_at(0).unwrap();
        assert_eq!(record.get("firstName"), "Ann");
        assert_eq!(engine.session().record(), &record);
        assert_eq!(engine.session().progress(), 100.0);

        let store = engine.submissions().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).map(|s| s.record.get("firstName")), Some("Bob"));
    }

    #[test]
    fn test_recall_out_of_range_changes_nothing() {
        let mut engine = engine();
        engine.select_schema("User Information").unwrap();
        submit_user(&mut engine, "Ann", "Lee");
        engine.set_field_value("firstName", "Cy").unwrap();

        let err = engine.recall_at(5).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 5, len: 1 }));
        assert_eq!(engine.session().record().get("firstName"), "Cy");
        assert_eq!(engine.submissions().map(SubmissionStore::len), Some(1));
    }

    #[test]
    fn test_store_commands_without_schema() {
        let mut engine = engine();
        assert!(matches!(
            engine.remove_at(0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
        assert!(matches!(
            engine.recall_at(0),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut engine = engine();
        assert_eq!(
            engine
                .dispatch(FormEvent::SelectSchema("User Information".to_string()))
                .unwrap(),
            EventOutcome::SchemaSelected("User Information".to_string())
        );
        assert_eq!(
            engine
                .dispatch(FormEvent::Input {
                    field: "firstName".to_string(),
                    value: "Ann".to_string(),
                })
                .unwrap(),
            EventOutcome::ValueSet("firstName".to_string())
        );

        let rejected = engine.dispatch(FormEvent::Submit).unwrap();
        assert!(matches!(rejected, EventOutcome::Rejected(ref e) if e.len() == 1));

        engine
            .dispatch(FormEvent::Input {
                field: "lastName".to_string(),
                value: "Lee".to_string(),
            })
            .unwrap();
        assert_eq!(
            engine.dispatch(FormEvent::Submit).unwrap(),
            EventOutcome::Submitted { index: 0 }
        );
        assert_eq!(
            engine.dispatch(FormEvent::Edit(0)).unwrap(),
            EventOutcome::Recalled { index: 0 }
        );
        engine.dispatch(FormEvent::Submit).unwrap();
        assert_eq!(
            engine.dispatch(FormEvent::Delete(0)).unwrap(),
            EventOutcome::Deleted { index: 0 }
        );
        assert!(engine.dispatch(FormEvent::Delete(0)).is_err());
    }

    #[test]
    fn test_dispatch_input_checks_field_kind() {
        let mut engine = engine();
        engine.select_schema("User Information").unwrap();
        engine.set_field_value("age", "34").unwrap();

        let err = engine
            .dispatch(FormEvent::Input {
                field: "age".to_string(),
                value: "forty".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue(_)));
        assert_eq!(engine.session().record().get("age"), "34");

        engine.select_schema("Payment Information").unwrap();
        assert_eq!(
            engine.set_parsed_value("expiryDate", "2030-04-01").unwrap().to_string(),
            "2030-04-01"
        );
        assert!(engine.set_parsed_value("expiryDate", "04/30").is_err());
        assert_eq!(engine.session().record().get("expiryDate"), "2030-04-01");
    }

    #[test]
    fn test_table_view_follows_active_schema() {
        let mut engine = engine();
        assert!(engine.table_view().is_none());

        engine.select_schema("User Information").unwrap();
        submit_user(&mut engine, "Ann", "Lee");
        let table = engine.table_view().unwrap();
        assert_eq!(table.headers, ["First Name", "Last Name", "Age"]);
        assert_eq!(table.rows.len(), 1);

        engine.select_schema("Address Information").unwrap();
        assert!(engine.table_view().unwrap().is_empty());
    }
}
