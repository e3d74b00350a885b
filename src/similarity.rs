//! Normalized string similarity.
//!
//! Two variants over the same Levenshtein core: a 0-100 percentage used
//! by the duplicate candidate finder, and a 0.0-1.0 ratio used by the
//! upsert matcher. The ratio variant short-circuits to 0.9 when one
//! normalized string contains the other, a cheap high-confidence signal
//! for partial titles ("AI Keynote" vs "AI Keynote - Day 2").

/// Case-fold and trim before comparison.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Similarity percentage between two strings.
///
/// Equal (post-normalization) → 100. Either side empty → 0. Otherwise
/// `round((1 - distance / max_len) * 100)`.
pub fn similarity_percent(a: &str, b: &str) -> u32 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let distance = strsim::levenshtein(&a, &b);
    let max_len = a.chars().count().max(b.chars().count());
    ((1.0 - distance as f64 / max_len as f64) * 100.0).round() as u32
}

/// Similarity ratio between two strings, with substring short-circuit.
///
/// The substring check is intentionally asymmetric-tolerant: it fires
/// regardless of which side is the longer one.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return 0.9;
    }

    let distance = strsim::levenshtein(&a, &b);
    let max_len = a.chars().count().max(b.chars().count());
    (max_len - distance) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(similarity_percent("AI Konferenz Wien", "AI Konferenz Wien"), 100);
        assert_eq!(similarity_ratio("AI Konferenz Wien", "AI Konferenz Wien"), 1.0);
    }

    #[test]
    fn test_case_and_whitespace_normalized() {
        assert_eq!(similarity_percent("  Keynote  ", "keynote"), 100);
        assert_eq!(similarity_ratio("KEYNOTE", "keynote"), 1.0);
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(similarity_percent("Keynote", ""), 0);
        assert_eq!(similarity_percent("", "Keynote"), 0);
        assert_eq!(similarity_ratio("Keynote", "   "), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("Zukunftstag 2025", "Zukunftstag 25"),
            ("Digital Summit", "Digital Sumit"),
            ("abc", "xyz"),
        ];
        for (a, b) in pairs {
            assert_eq!(similarity_percent(a, b), similarity_percent(b, a));
        }
    }

    #[test]
    fn test_close_titles_score_high() {
        // One substitution across 14 chars
        let score = similarity_percent("Digital Summit", "Digital Sumitt");
        assert!(score >= 80, "got {}", score);
    }

    #[test]
    fn test_unrelated_titles_score_low() {
        let score = similarity_percent("Digital Summit", "Rotary Club Abend");
        assert!(score < 50, "got {}", score);
    }

    #[test]
    fn test_substring_short_circuit() {
        assert_eq!(similarity_ratio("AI Keynote", "AI Keynote - Day 2"), 0.9);
        assert_eq!(similarity_ratio("AI Keynote - Day 2", "AI Keynote"), 0.9);
    }

    #[test]
    fn test_ratio_falls_back_to_edit_distance() {
        let r = similarity_ratio("Digital Summit", "Digital Sumit");
        assert!(r > 0.9, "got {}", r);
        let r = similarity_ratio("abc", "xyz");
        assert!(r < 0.4, "got {}", r);
    }
}
