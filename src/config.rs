//! Engine configuration.
//!
//! Thresholds, keyword lists, and the status priority table are passed
//! explicitly into every entry point instead of being read from ambient
//! constants, so tests can vary them freely.

use serde::{Deserialize, Serialize};

/// Tunables for duplicate detection, merging, and upsert matching.
///
/// `Default` mirrors the production values the booking table runs with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Minimum title similarity (0-100) for a pair to become a duplicate
    /// candidate.
    #[serde(default = "default_similarity_min")]
    pub duplicate_similarity_min: u32,
    /// Maximum absolute day difference between the pair's reference dates.
    #[serde(default = "default_date_window")]
    pub duplicate_date_window_days: i64,
    /// Minimum title similarity (0.0-1.0) for the upsert fallback lookup.
    #[serde(default = "default_upsert_threshold")]
    pub upsert_title_threshold: f64,
    /// Case-insensitive keywords that mark a record as a video-conference
    /// touchpoint rather than a real performance.
    #[serde(default = "default_vc_keywords")]
    pub video_conference_keywords: Vec<String>,
    /// Status ordinal table, highest rank first. Unknown statuses rank 0.
    #[serde(default = "default_status_priority")]
    pub status_priority: Vec<(String, f64)>,
    /// Delimiter for accumulating fields (e.g. the source-link list).
    #[serde(default = "default_accumulate_delimiter")]
    pub accumulate_delimiter: String,
}

fn default_similarity_min() -> u32 {
    80
}

fn default_date_window() -> i64 {
    7
}

fn default_upsert_threshold() -> f64 {
    0.8
}

fn default_vc_keywords() -> Vec<String> {
    ["videokonferenz", "video call", "video conference"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_status_priority() -> Vec<(String, f64)> {
    [
        ("PAYED", 6.0),
        ("BILLABLE", 5.0),
        ("FIX", 4.0),
        ("RESERVED", 3.0),
        ("OFFER", 2.5),
        ("OPTION", 2.0),
        ("REQUEST", 1.5),
        ("LEAD", 1.0),
    ]
    .iter()
    .map(|(s, r)| (s.to_string(), *r))
    .collect()
}

fn default_accumulate_delimiter() -> String {
    ", ".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            duplicate_similarity_min: default_similarity_min(),
            duplicate_date_window_days: default_date_window(),
            upsert_title_threshold: default_upsert_threshold(),
            video_conference_keywords: default_vc_keywords(),
            status_priority: default_status_priority(),
            accumulate_delimiter: default_accumulate_delimiter(),
        }
    }
}

impl EngineConfig {
    /// Ordinal rank for a status value, case-insensitive. Unknown → 0.
    pub fn status_rank(&self, status: &str) -> f64 {
        let status = status.trim().to_uppercase();
        self.status_priority
            .iter()
            .find(|(name, _)| *name == status)
            .map(|(_, rank)| *rank)
            .unwrap_or(0.0)
    }

    /// True when a title marks a video-conference touchpoint.
    pub fn is_video_conference_title(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.video_conference_keywords
            .iter()
            .any(|kw| title.contains(&kw.to_lowercase()))
    }
}
