//! Upsert matcher.
//!
//! Freshly extracted records carry the source thread id as identity, but
//! the same negotiation often resurfaces in a new thread, so an exact
//! identity hit is only the first attempt. The fallback is a heuristic
//! scan: when the sender identity (contact e-mail, else organisation)
//! matches, title similarity OR same-day reference date is enough; when
//! the sender is unknown or different, BOTH are required, since the
//! cheap sender signal is unavailable. The first match in scan order
//! wins; no ranking beyond the boolean gate.

use crate::config::EngineConfig;
use crate::dates;
use crate::error::ReconcileError;
use crate::record::Record;
use crate::schema::Schema;
use crate::similarity::similarity_ratio;
use crate::store::RecordStore;
use crate::structured::sender_identity;

/// Result of reconciling one extracted record against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The record matched an existing row and was merged into it.
    Merged { id: String },
    /// No match; the record became a fresh row.
    Inserted { id: String },
}

/// Insert-or-merge-on-match for one extracted record.
pub fn upsert(
    store: &mut dyn RecordStore,
    new_record: Record,
    schema: &Schema,
    config: &EngineConfig,
) -> Result<UpsertOutcome, ReconcileError> {
    let new_id = new_record.identity(schema).to_string();

    // 1. Exact identity lookup
    let matched = match store.get_by_identity(&new_id) {
        Some(existing) => Some(existing),
        // 2. Heuristic fallback across all existing rows
        None => find_heuristic_match(store, &new_record, schema, config),
    };

    match matched {
        Some(existing) => {
            let existing_id = existing.identity(schema).to_string();
            let merged = merge_into_existing(&existing, &new_record, schema, config);
            store.write_fields(&existing_id, &merged)?;
            log::info!("upsert merged extracted record into {}", existing_id);
            Ok(UpsertOutcome::Merged { id: existing_id })
        }
        None => {
            log::info!("upsert inserted fresh record {}", new_id);
            store.append(new_record)?;
            Ok(UpsertOutcome::Inserted { id: new_id })
        }
    }
}

/// Scan existing rows for the first one passing the match gate.
fn find_heuristic_match(
    store: &dyn RecordStore,
    new_record: &Record,
    schema: &Schema,
    config: &EngineConfig,
) -> Option<Record> {
    let new_sender = sender_identity(new_record.get("Event_Entities"));
    let new_day = dates::parse_day(new_record.get(&schema.date_field));

    for existing in store.list() {
        let old_sender = sender_identity(existing.get("Event_Entities"));

        let sender_match = matches!(
            (&new_sender, &old_sender),
            (Some(a), Some(b)) if a == b
        );

        let title_match = similarity_ratio(new_record.title(schema), existing.title(schema))
            >= config.upsert_title_threshold;

        let old_day = dates::parse_day(existing.get(&schema.date_field));
        let date_match = matches!((new_day, old_day), (Some(a), Some(b)) if a == b);

        let matched = if sender_match {
            // Sender agrees: name OR date is enough
            title_match || date_match
        } else {
            // Sender unknown or different: name AND date required
            title_match && date_match
        };

        if matched {
            log::debug!(
                "upsert heuristic match on {} (sender={}, title={}, date={})",
                existing.identity(schema),
                sender_match,
                title_match,
                date_match
            );
            return Some(existing);
        }
    }

    None
}

/// Field-level merge of new extraction data into an existing row: the
/// new value wins when non-empty, the identity always stays with the
/// existing row, and accumulating fields append instead of overwriting.
fn merge_into_existing(
    existing: &Record,
    new_record: &Record,
    schema: &Schema,
    config: &EngineConfig,
) -> Record {
    let mut merged = Record::new();

    for field in &schema.fields {
        let name = field.name.as_str();
        let old_val = existing.get(name);
        let new_val = new_record.get(name);

        let value = if name == schema.identity_field {
            if old_val.trim().is_empty() {
                new_val.to_string()
            } else {
                old_val.to_string()
            }
        } else if field.accumulate {
            accumulate(old_val, new_val, &config.accumulate_delimiter)
        } else if new_val.trim().is_empty() {
            old_val.to_string()
        } else {
            new_val.to_string()
        };

        merged.set(name, value);
    }

    merged
}

/// Append `new_val` to a delimiter-separated list, deduplicated,
/// preserving the old order.
fn accumulate(old_val: &str, new_val: &str, delimiter: &str) -> String {
    let mut items: Vec<String> = old_val
        .split(delimiter.trim())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let new_val = new_val.trim();
    if !new_val.is_empty() && !items.iter().any(|i| i == new_val) {
        items.push(new_val.to_string());
    }

    items.join(delimiter)
}
