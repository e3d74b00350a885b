//! Error types for the reconciliation engine.
//!
//! Only `NotFound` is fatal to an operation: a commit aborts with no
//! partial write when either participating id is missing. Parse problems
//! (malformed structured fields, non-numeric fees, unreadable dates) are
//! never errors — they degrade to textual fallbacks inside the merge
//! policy instead.

use thiserror::Error;

/// Errors surfaced by the engine's store-mutating entry points.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// An identity lookup failed during commit or upsert.
    #[error("record not found: {id}")]
    NotFound { id: String },

    /// A store adapter failed below the engine (IO, backend quota, ...).
    /// The engine never retries; the caller decides whether to rerun
    /// the whole operation.
    #[error("store error: {0}")]
    Store(String),
}
