//! Renderable snapshots of engine state, and the events front-ends send back.
//!
//! Views are plain data: a front-end draws them however it likes and
//! routes user actions back as [`FormEvent`]s through
//! [`FormEngine::dispatch`](crate::FormEngine::dispatch).

use serde::{Deserialize, Serialize};

use crate::record::ValidationResult;
use crate::schema::Schema;
use crate::session::FormSession;
use crate::store::SubmissionStore;

const MASK: &str = "********";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub kind: String,
    pub required: bool,
    pub value: String,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// The active form: one entry per field, in schema order, plus progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormView {
    pub schema_name: String,
    pub fields: Vec<FieldView>,
    pub progress: f64,
}

impl FormView {
    /// Snapshot of `session`, or `None` if no schema is active.
    #[must_use]
    pub fn from_session(session: &FormSession) -> Option<Self> {
        let schema = session.schema()?;
        let record = session.record();
        let errors = session.errors();

        let fields = schema
            .fields()
            .iter()
            .map(|field| FieldView {
                name: field.name().to_string(),
                label: field.label().to_string(),
                kind: field.kind().name().to_string(),
                required: field.is_required(),
                value: record.get(field.name()).to_string(),
                error: errors.get(field.name()).map(str::to_string),
                options: field.options().map(<[String]>::to_vec).unwrap_or_default(),
            })
            .collect();

        Some(Self {
            schema_name: schema.name().to_string(),
            fields,
            progress: session.progress(),
        })
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Submitted records laid out as a table, one column per schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Columns come from `schema`; password values are masked.
    #[must_use]
    pub fn new(schema: &Schema, store: &SubmissionStore) -> Self {
        let headers = schema
            .fields()
            .iter()
            .map(|f| f.label().to_string())
            .collect();

        let rows = store
            .records()
            .map(|record| {
                schema
                    .fields()
                    .iter()
                    .map(|field| {
                        let value = record.get(field.name());
                        if field.kind().is_masked() && !value.is_empty() {
                            MASK.to_string()
                        } else {
                            value.to_string()
                        }
                    })
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A user action routed from a front-end into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormEvent {
    SelectSchema(String),
    Input { field: String, value: String },
    Submit,
    /// Recall the submission at this index into the form.
    Edit(usize),
    Delete(usize),
}

/// What a dispatched [`FormEvent`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    SchemaSelected(String),
    ValueSet(String),
    Submitted { index: usize },
    Rejected(ValidationResult),
    Recalled { index: usize },
    Deleted { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::schema::builtin;

    #[test]
    fn test_form_view_none_without_schema() {
        assert!(FormView::from_session(&FormSession::new()).is_none());
    }

    #[test]
    fn test_form_view_reflects_session() {
        let mut session = FormSession::for_schema(builtin::user_information().unwrap());
        session.set_field_value("firstName", "Ann").unwrap();
        session.validate().unwrap();

        let view = FormView::from_session(&session).unwrap();
        assert_eq!(view.schema_name, "User Information");
        assert_eq!(view.fields.len(), 3);
        assert_eq!(view.progress, 50.0);

        let first = view.field("firstName").unwrap();
        assert_eq!(first.value, "Ann");
        assert!(first.error.is_none());

        let last = view.field("lastName").unwrap();
        assert_eq!(last.error.as_deref(), Some("Last Name is required."));
        assert!(last.required);
        assert_eq!(view.field("age").map(|f| f.kind.as_str()), Some("number"));
    }

    #[test]
    fn test_form_view_includes_choice_options() {
        let session = FormSession::for_schema(builtin::address_information().unwrap());
        let view = FormView::from_session(&session).unwrap();
        assert_eq!(view.field("state").map(|f| f.options.len()), Some(32));
        assert!(view.field("city").unwrap().options.is_empty());
    }

    #[test]
    fn test_table_view_columns_and_masking() {
        let schema = builtin::payment_information().unwrap();
        let mut store = SubmissionStore::new(schema.name());
        store.append(
            Record::new()
                .with("cardNumber", "4111")
                .with("expiryDate", "2027-03-01")
                .with("cvv", "123")
                .with("cardholderName", "Ann Lee"),
        );

        let table = TableView::new(&schema, &store);
        assert_eq!(
            table.headers,
            ["Card Number", "Expiry Date", "CVV", "Cardholder Name"]
        );
        assert_eq!(table.rows, [["4111", "2027-03-01", MASK, "Ann Lee"]]);
    }

    #[test]
    fn test_table_view_blank_cells_for_missing_values() {
        let schema = builtin::user_information().unwrap();
        let mut store = SubmissionStore::new(schema.name());
        store.append(Record::new().with("firstName", "Ann").with("lastName", "Lee"));

        let table = TableView::new(&schema, &store);
        assert_eq!(table.rows, [["Ann", "Lee", ""]]);
    }
}
