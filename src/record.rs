//! The booking record: field name → textual value.
//!
//! Field order is not stored on the record itself; the shared `Schema`
//! fixes it, and `to_row` projects a record into that order for
//! positional backends. Missing and empty fields are indistinguishable
//! on read, which matches how sheet-backed rows behave.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::schema::Schema;

/// One booking/negotiation row with schema-defined fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field value, or "" when the field is absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// True when the field holds a non-whitespace value.
    pub fn has_value(&self, field: &str) -> bool {
        !self.get(field).trim().is_empty()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Builder-style `set`, convenient for fixtures.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// The record's identity key (unique across live records).
    pub fn identity<'a>(&'a self, schema: &Schema) -> &'a str {
        self.get(&schema.identity_field)
    }

    /// The title used for fuzzy duplicate matching.
    pub fn title<'a>(&'a self, schema: &Schema) -> &'a str {
        self.get(&schema.title_field)
    }

    /// Reference day: the primary date field, falling back to the
    /// documented fallback field when the primary is absent or unreadable.
    pub fn reference_day(&self, schema: &Schema) -> Option<NaiveDate> {
        dates::parse_day(self.get(&schema.date_field))
            .or_else(|| dates::parse_day(self.get(&schema.date_fallback_field)))
    }

    /// Iterate over present (field, value) pairs. Order is unspecified;
    /// use `to_row` for schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Project into the schema's declared field order. Fields the record
    /// does not carry become empty cells.
    pub fn to_row(&self, schema: &Schema) -> Vec<String> {
        schema
            .field_names()
            .map(|name| self.get(name).to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
