//! Core form engine for dynaform.
//!
//! This crate defines the schema registry, the typed field model, the
//! form session state machine, the submission store, and the thin
//! presentation views that front-ends render.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod engine;
pub mod error;
pub mod field;
pub mod ids;
pub mod record;
pub mod schema;
pub mod session;
pub mod store;
pub mod view;

pub use engine::FormEngine;
pub use error::{Error, Result};
pub use field::{FieldDefinition, FieldKind, FieldValue, ValueError};
pub use ids::SubmissionId;
pub use record::{Record, ValidationResult};
pub use schema::{Schema, SchemaProvider, StaticRegistry};
pub use session::{FormSession, SessionState, SubmitOutcome};
pub use store::{Submission, SubmissionStore};
pub use view::{EventOutcome, FieldView, FormEvent, FormView, TableView};
