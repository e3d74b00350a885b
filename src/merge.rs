//! Merge policy engine.
//!
//! Collapses two records into one, field by field, per the schema's
//! declared strategies. Inputs are never mutated; which operand is
//! "primary" is the caller's call (by convention the first), not derived
//! from the data. `today` is passed in explicitly so the concatenation
//! marker is deterministic under test.

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::dates;
use crate::record::Record;
use crate::schema::{MergeStrategy, Schema};

/// The merged record. The disambiguator may inject additional milestone
/// fields on top of what the per-field strategies produced.
pub type MergeResult = Record;

/// Merge `secondary` into `primary` per the schema's field strategies.
pub fn merge(
    schema: &Schema,
    config: &EngineConfig,
    primary: &Record,
    secondary: &Record,
    today: NaiveDate,
) -> MergeResult {
    // Performance dates decide which side is "later" for latest-wins
    // fields and for the reschedule rule.
    let primary_day = dates::parse_day(primary.get(&schema.date_field));
    let secondary_day = dates::parse_day(secondary.get(&schema.date_field));

    // Default to primary when neither side is dated, or dates tie.
    let secondary_is_later = match (primary_day, secondary_day) {
        (Some(p), Some(s)) => s > p,
        (None, Some(_)) => true,
        _ => false,
    };

    let mut merged = Record::new();

    for field in &schema.fields {
        let name = field.name.as_str();
        let value = match field.strategy {
            MergeStrategy::Identity => primary.get(name).to_string(),
            MergeStrategy::LatestWins => {
                let (later, earlier) = if secondary_is_later {
                    (secondary, primary)
                } else {
                    (primary, secondary)
                };
                non_empty(later.get(name), earlier.get(name))
            }
            MergeStrategy::RescheduleDate => {
                match (primary_day, secondary_day) {
                    // Both known: the later booking supersedes the slot
                    (Some(_), Some(_)) => {
                        if secondary_is_later {
                            secondary.get(name).to_string()
                        } else {
                            primary.get(name).to_string()
                        }
                    }
                    _ => non_empty(primary.get(name), secondary.get(name)),
                }
            }
            MergeStrategy::MinNumeric => merge_min_numeric(primary.get(name), secondary.get(name)),
            MergeStrategy::PriorityRank => {
                // Ties favor primary
                if config.status_rank(primary.get(name)) >= config.status_rank(secondary.get(name))
                {
                    primary.get(name).to_string()
                } else {
                    secondary.get(name).to_string()
                }
            }
            MergeStrategy::ConcatenateTagged => {
                merge_concatenate(primary.get(name), secondary.get(name), today)
            }
            MergeStrategy::NonEmptyWins => non_empty(primary.get(name), secondary.get(name)),
        };
        merged.set(name, value);
    }

    log::debug!(
        "merged {} <- {} ({} fields)",
        primary.identity(schema),
        secondary.identity(schema),
        merged.len()
    );

    merged
}

fn non_empty(first: &str, second: &str) -> String {
    if first.trim().is_empty() {
        second.to_string()
    } else {
        first.to_string()
    }
}

/// Commercial floor policy: both sides numeric → keep the lower fee,
/// reusing the winning side's original text. A single parseable side
/// wins over garbage text; neither parseable falls back to
/// non-empty-wins. A bad fee is never a hard failure.
fn merge_min_numeric(primary: &str, secondary: &str) -> String {
    let p: Result<f64, _> = primary.trim().parse();
    let s: Result<f64, _> = secondary.trim().parse();
    match (p, s) {
        (Ok(pn), Ok(sn)) => {
            if sn < pn {
                secondary.to_string()
            } else {
                primary.to_string()
            }
        }
        (Ok(_), Err(_)) => primary.to_string(),
        (Err(_), Ok(_)) => secondary.to_string(),
        (Err(_), Err(_)) => non_empty(primary, secondary),
    }
}

/// Keep both sides, tagged, with a dated merge marker appended.
fn merge_concatenate(primary: &str, secondary: &str, today: NaiveDate) -> String {
    let mut parts = Vec::new();
    if !primary.trim().is_empty() {
        parts.push(format!("[A]: {}", primary));
    }
    if !secondary.trim().is_empty() {
        parts.push(format!("[B]: {}", secondary));
    }
    parts.push(format!("--- merged on {} ---", today.format("%Y-%m-%d")));
    parts.join("\n")
}
