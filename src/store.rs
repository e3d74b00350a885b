//! Record store boundary.
//!
//! The engine never talks to a spreadsheet, database, or network API.
//! It sees records through this trait; the surrounding system supplies
//! the real adapter. `MemoryStore` is the Vec-backed reference adapter
//! used by tests and demos.
//!
//! Adapters must guarantee read-your-writes within a single engine
//! invocation. Deletion is identity-keyed on purpose: an ordered backing
//! store (sheet rows addressed by position) must translate this to
//! positional deletes applied in descending-position order within one
//! commit, since removing a lower position shifts all subsequent ones.

use crate::error::ReconcileError;
use crate::record::Record;

/// Typed access to rows keyed by the identity field. Single-writer,
/// synchronous.
pub trait RecordStore {
    /// Snapshot of all live records.
    fn list(&self) -> Vec<Record>;

    /// Look up one record by its identity key.
    fn get_by_identity(&self, id: &str) -> Option<Record>;

    /// Write the given fields into the row with this identity.
    /// `NotFound` when the id does not resolve.
    fn write_fields(&mut self, id: &str, fields: &Record) -> Result<(), ReconcileError>;

    /// Remove the row with this identity. `NotFound` when absent.
    fn delete_by_identity(&mut self, id: &str) -> Result<(), ReconcileError>;

    /// Append a fresh row (upsert's no-match path).
    fn append(&mut self, record: Record) -> Result<(), ReconcileError>;
}

/// In-memory reference adapter. Keeps insertion order, like the
/// sheet-backed production store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    identity_field: String,
    rows: Vec<Record>,
}

impl MemoryStore {
    pub fn new(identity_field: impl Into<String>) -> Self {
        Self {
            identity_field: identity_field.into(),
            rows: Vec::new(),
        }
    }

    /// Build a store pre-seeded with records.
    pub fn with_records(
        identity_field: impl Into<String>,
        records: impl IntoIterator<Item = Record>,
    ) -> Self {
        Self {
            identity_field: identity_field.into(),
            rows: records.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.get(&self.identity_field) == id)
    }
}

impl RecordStore for MemoryStore {
    fn list(&self) -> Vec<Record> {
        self.rows.clone()
    }

    fn get_by_identity(&self, id: &str) -> Option<Record> {
        self.position(id).map(|i| self.rows[i].clone())
    }

    fn write_fields(&mut self, id: &str, fields: &Record) -> Result<(), ReconcileError> {
        let pos = self.position(id).ok_or_else(|| ReconcileError::NotFound {
            id: id.to_string(),
        })?;
        for (field, value) in fields.iter() {
            self.rows[pos].set(field, value);
        }
        Ok(())
    }

    fn delete_by_identity(&mut self, id: &str) -> Result<(), ReconcileError> {
        let pos = self.position(id).ok_or_else(|| ReconcileError::NotFound {
            id: id.to_string(),
        })?;
        self.rows.remove(pos);
        Ok(())
    }

    fn append(&mut self, record: Record) -> Result<(), ReconcileError> {
        self.rows.push(record);
        Ok(())
    }
}
