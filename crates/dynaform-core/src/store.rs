use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::SubmissionId;
use crate::record::Record;

/// A record accepted by a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub record: Record,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    #[must_use]
    pub fn new(record: Record) -> Self {
        Self {
            id: SubmissionId::new(),
            record,
            submitted_at: Utc::now(),
        }
    }
}

/// Ordered submissions for a single schema.
///
/// Indices are positions in submission order; removing an entry shifts
/// every later entry down by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionStore {
    schema_name: String,
    entries: Vec<Submission>,
}

impl SubmissionStore {
    #[must_use]
    pub fn new(schema_name: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Append a record, returning its index.
    pub fn append(&mut self, record: Record) -> usize {
        self.entries.push(Submission::new(record));
        self.entries.len() - 1
    }

    /// Remove the submission at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`; the store is
    /// left untouched.
    pub fn remove_at(&mut self, index: usize) -> Result<Submission> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    /// Remove the submission at `index` and hand back its record for editing.
    ///
    /// # Errors
    ///
    /// Same conditions as [`remove_at`](Self::remove_at).
    pub fn recall_at(&mut self, index: usize) -> Result<Record> {
        self.remove_at(index).map(|submission| submission.record)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Submission> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Submission> {
        self.entries.iter()
    }

    /// Records of all submissions, in order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|s| &s.record)
    }
}
