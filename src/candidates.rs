//! Duplicate candidate finder.
//!
//! Pairwise scan over the live record set. A pair is flagged iff the
//! titles are similar AND the reference dates fall inside the window —
//! the conjunctive gate is what keeps false positives out of the
//! human-reviewed merge queue. Pairs where either side lacks a
//! resolvable date are never flagged; dateless partial records are an
//! extraction gap the finder deliberately does not guess about.
//!
//! O(n²) string comparisons. Fine at hundreds of rows; a date-bucketed
//! pre-filter would be needed before this scales further.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::record::Record;
use crate::schema::Schema;
use crate::similarity::similarity_percent;

/// A pair of records flagged as possibly duplicate, pending confirmation.
/// Derived, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateCandidate {
    pub id_a: String,
    pub id_b: String,
    pub title_a: String,
    pub title_b: String,
    /// Title similarity, 0-100.
    pub similarity: u32,
    pub date_a: NaiveDate,
    pub date_b: NaiveDate,
}

/// Scan all unordered pairs and return likely duplicates, ordered by
/// similarity descending.
pub fn find_candidates(
    records: &[Record],
    schema: &Schema,
    config: &EngineConfig,
) -> Vec<DuplicateCandidate> {
    let mut candidates = Vec::new();

    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let a = &records[i];
            let b = &records[j];

            // Only live rows with an identity on both sides
            if !a.has_value(&schema.identity_field) || !b.has_value(&schema.identity_field) {
                continue;
            }

            let similarity = similarity_percent(a.title(schema), b.title(schema));
            if similarity < config.duplicate_similarity_min {
                continue;
            }

            let (date_a, date_b) = match (a.reference_day(schema), b.reference_day(schema)) {
                (Some(da), Some(db)) => (da, db),
                // No resolvable date on one side: never a candidate
                _ => continue,
            };

            let days_apart = (date_a - date_b).num_days().abs();
            if days_apart > config.duplicate_date_window_days {
                continue;
            }

            log::debug!(
                "duplicate candidate {} / {} (similarity {}, {} days apart)",
                a.identity(schema),
                b.identity(schema),
                similarity,
                days_apart
            );

            candidates.push(DuplicateCandidate {
                id_a: a.identity(schema).to_string(),
                id_b: b.identity(schema).to_string(),
                title_a: a.title(schema).to_string(),
                title_b: b.title(schema).to_string(),
                similarity,
                date_a,
                date_b,
            });
        }
    }

    // Highest similarity first; stable sort keeps scan order among ties
    candidates.sort_by(|a, b| b.similarity.cmp(&a.similarity));
    candidates
}
