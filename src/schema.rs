//! Shared schema definition.
//!
//! The ordered field list is the contract between the extraction
//! collaborator, the reconciliation engine, and the record store: both
//! sides agree on field names, and the order drives positional writes in
//! sheet-like backends. Every field carries exactly one merge strategy;
//! fields the schema does not know default to non-empty-wins.

use serde::{Deserialize, Serialize};

/// How a field is combined when two records collapse into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Keep the primary's value always (the identity key).
    Identity,
    /// The record with the later reference date supplies the value.
    LatestWins,
    /// For the performance date itself: the later booking supersedes an
    /// earlier slot.
    RescheduleDate,
    /// Commercial floor policy: both numeric → take the minimum.
    MinNumeric,
    /// Keep the side whose status ranks higher in the ordinal table.
    PriorityRank,
    /// Keep both values, tagged per side, with a merge marker appended.
    ConcatenateTagged,
    /// Primary's value if non-empty, else secondary's.
    NonEmptyWins,
}

/// Whether a field holds a scalar text value or a serialized structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueShape {
    Scalar,
    Structured,
}

/// One declared field: name, merge strategy, value shape, and whether
/// upsert appends to it instead of overwriting (source-link lists).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    pub strategy: MergeStrategy,
    pub shape: ValueShape,
    #[serde(default)]
    pub accumulate: bool,
}

impl FieldSpec {
    fn scalar(name: &str, strategy: MergeStrategy) -> Self {
        Self {
            name: name.to_string(),
            strategy,
            shape: ValueShape::Scalar,
            accumulate: false,
        }
    }

    fn structured(name: &str, strategy: MergeStrategy) -> Self {
        Self {
            name: name.to_string(),
            strategy,
            shape: ValueShape::Structured,
            accumulate: false,
        }
    }
}

/// Ordered field list plus the well-known roles the engine navigates by:
/// the identity key, the title used for fuzzy matching, and the reference
/// date (with fallback) used for candidate gating and latest-wins merges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
    pub identity_field: String,
    pub title_field: String,
    pub date_field: String,
    pub date_fallback_field: String,
}

impl Schema {
    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Merge strategy for a field; unmapped fields get non-empty-wins.
    pub fn strategy_for(&self, name: &str) -> MergeStrategy {
        self.field(name)
            .map(|f| f.strategy)
            .unwrap_or(MergeStrategy::NonEmptyWins)
    }

    /// Ordered field names (positional write order).
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// The speaking-engagement booking schema, mirroring the table the
    /// extraction pipeline writes into.
    pub fn bookings() -> Self {
        use MergeStrategy::*;

        let fields = vec![
            FieldSpec::scalar("threadId", Identity),
            FieldSpec::scalar("Contact_Date", NonEmptyWins),
            FieldSpec::scalar("Request_Date", NonEmptyWins),
            FieldSpec::scalar("Offer_Date", NonEmptyWins),
            FieldSpec::scalar("Negotiation_Date", NonEmptyWins),
            FieldSpec::structured("Negotiation_Location", NonEmptyWins),
            FieldSpec::scalar("Decision_Date", NonEmptyWins),
            FieldSpec::scalar("Briefing_Date", NonEmptyWins),
            FieldSpec::structured("Briefing_Location", NonEmptyWins),
            FieldSpec::scalar("Tech_Check_Date", NonEmptyWins),
            FieldSpec::structured("Tech_Check_Location", NonEmptyWins),
            FieldSpec::scalar("Talk_Date", RescheduleDate),
            FieldSpec::structured("Talk_Location", NonEmptyWins),
            FieldSpec::scalar("Duration", NonEmptyWins),
            FieldSpec::scalar("Billing_Date", NonEmptyWins),
            FieldSpec::scalar("Payment_Date", NonEmptyWins),
            FieldSpec::scalar("Status", PriorityRank),
            FieldSpec::scalar("Language", NonEmptyWins),
            FieldSpec::scalar("Netto_Fee", MinNumeric),
            FieldSpec::scalar("Payment_Details", NonEmptyWins),
            FieldSpec::scalar("Event", LatestWins),
            FieldSpec::scalar("Theme", LatestWins),
            FieldSpec::scalar("Audience_Composition", NonEmptyWins),
            FieldSpec::scalar("Audience_Size", NonEmptyWins),
            FieldSpec::scalar("Expections_of_Speaker", NonEmptyWins),
            FieldSpec::scalar("AI_Analysis", NonEmptyWins),
            FieldSpec::scalar("Title_Suggestions", NonEmptyWins),
            FieldSpec::scalar("Final_Title", LatestWins),
            FieldSpec::scalar("About_Talk", NonEmptyWins),
            FieldSpec::scalar("About_Speaker", NonEmptyWins),
            FieldSpec::scalar("For_Moderator", NonEmptyWins),
            FieldSpec::scalar("Event_Invite", NonEmptyWins),
            FieldSpec::scalar("Tech_Requirement", NonEmptyWins),
            FieldSpec::scalar("Handout", NonEmptyWins),
            FieldSpec::structured("Event_Location", NonEmptyWins),
            FieldSpec::structured("Hotel", NonEmptyWins),
            FieldSpec::scalar("Travel_Plan", NonEmptyWins),
            FieldSpec::structured("Event_Entities", NonEmptyWins),
            FieldSpec::scalar("Referer", NonEmptyWins),
            FieldSpec::scalar("Kampagne", NonEmptyWins),
            FieldSpec::scalar("ToDoList", NonEmptyWins),
            FieldSpec::scalar("Notes", ConcatenateTagged),
            FieldSpec {
                name: "Sources".to_string(),
                strategy: NonEmptyWins,
                shape: ValueShape::Scalar,
                accumulate: true,
            },
        ];

        Self {
            fields,
            identity_field: "threadId".to_string(),
            title_field: "Event".to_string(),
            date_field: "Talk_Date".to_string(),
            date_fallback_field: "Request_Date".to_string(),
        }
    }
}
