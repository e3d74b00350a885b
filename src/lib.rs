//! Record deduplication & reconciliation engine for speaking-engagement
//! bookings.
//!
//! Booking records are extracted from email threads into a tabular store;
//! the same negotiation surfaces across threads and repeated extraction
//! runs, so the table accumulates near-duplicates. This crate decides,
//! from noisy partially-structured text and dates, whether two pieces of
//! data describe the same real-world event, and combines them without
//! losing information:
//!
//! - [`candidates`]: pairwise fuzzy duplicate detection over the table.
//! - [`merge`]: deterministic field-level merge policy for a confirmed pair.
//! - [`disambiguate`]: reclassifies a video-conference-only record into a
//!   negotiation/briefing milestone of the performance it belongs to.
//! - [`commit`]: applies a confirmed merge to the store (apply-and-remove).
//! - [`upsert`]: reconciles freshly extracted records against the table
//!   when no reliable primary key matches.
//!
//! Heuristic false negatives are acceptable; destructive false positives
//! are not, which is why every matcher gates conservatively (AND over the
//! cheap signals unless a strong one is present). The engine is
//! synchronous and single-writer; mail retrieval, generative extraction,
//! storage backends, dashboards, and scheduling live outside it.

pub mod candidates;
pub mod commit;
pub mod config;
pub mod dates;
pub mod disambiguate;
pub mod error;
pub mod merge;
pub mod record;
pub mod schema;
pub mod similarity;
pub mod store;
pub mod structured;
pub mod upsert;

pub use candidates::{find_candidates, DuplicateCandidate};
pub use commit::commit;
pub use config::EngineConfig;
pub use disambiguate::disambiguate;
pub use error::ReconcileError;
pub use merge::{merge, MergeResult};
pub use record::Record;
pub use schema::{FieldSpec, MergeStrategy, Schema, ValueShape};
pub use store::{MemoryStore, RecordStore};
pub use structured::{Contact, Entity, EntityType, Location, StructuredValue};
pub use upsert::{upsert, UpsertOutcome};
