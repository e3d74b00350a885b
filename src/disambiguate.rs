//! Meeting role disambiguator.
//!
//! Some merged candidate pairs are really one performance plus a
//! video-conference touchpoint that the extraction turned into its own
//! event. When exactly one side of the pair carries a video-conference
//! title, the call's date is placed inside the performance's milestone
//! timeline and recorded as a negotiation or briefing milestone on the
//! merge result. Fields are only ever added, never removed.

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::dates;
use crate::merge::MergeResult;
use crate::record::Record;
use crate::schema::Schema;

/// Location text written for the injected milestone.
const VIDEO_CONFERENCE_LOCATION: &str = "Video Conference";

/// Refine a merge result by classifying a video-conference-only record
/// as a milestone of the other record. No-op when neither or both
/// records look like a video conference, or when the call is undated.
pub fn disambiguate(
    mut result: MergeResult,
    a: &Record,
    b: &Record,
    schema: &Schema,
    config: &EngineConfig,
) -> MergeResult {
    let a_is_vc = config.is_video_conference_title(a.title(schema));
    let b_is_vc = config.is_video_conference_title(b.title(schema));

    let (vc, perf) = match (a_is_vc, b_is_vc) {
        (true, false) => (a, b),
        (false, true) => (b, a),
        _ => return result,
    };

    let vc_day = match dates::parse_day(vc.get(&schema.date_field)) {
        Some(d) => d,
        None => return result,
    };

    let inquiry = dates::parse_day(perf.get("Request_Date"));
    let offer = dates::parse_day(perf.get("Offer_Date"));
    let talk = dates::parse_day(perf.get(&schema.date_field));

    let after = |bound: Option<NaiveDate>| bound.is_some_and(|d| vc_day > d);
    let before_or_unknown = |bound: Option<NaiveDate>| bound.is_none_or(|d| vc_day < d);

    if after(inquiry) && before_or_unknown(offer) {
        // Inquiry < call < offer (or offer unknown): they were negotiating
        set_milestone(&mut result, "Negotiation", vc_day);
    } else if after(offer) && before_or_unknown(talk) {
        // Offer < call < talk: pre-performance briefing
        set_milestone(&mut result, "Briefing", vc_day);
    } else if offer.is_none() || after(inquiry) {
        // Incomplete timeline: negotiation is the conservative default
        set_milestone(&mut result, "Negotiation", vc_day);
    }

    result
}

fn set_milestone(result: &mut MergeResult, kind: &str, day: NaiveDate) {
    log::debug!("classified video conference on {} as {}", day, kind.to_lowercase());
    result.set(format!("{}_Date", kind), day.format("%Y-%m-%d").to_string());
    result.set(format!("{}_Location", kind), VIDEO_CONFERENCE_LOCATION);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;

    fn schema() -> Schema {
        Schema::bookings()
    }

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn perf_record() -> Record {
        Record::new()
            .with("threadId", "t-perf")
            .with("Event", "Leadership Kongress")
            .with("Request_Date", "2025-01-01")
            .with("Offer_Date", "2025-02-01")
            .with("Talk_Date", "2025-03-01")
    }

    fn vc_record(talk_date: &str) -> Record {
        Record::new()
            .with("threadId", "t-vc")
            .with("Event", "Video Call")
            .with("Talk_Date", talk_date)
    }

    fn merged(a: &Record, b: &Record) -> MergeResult {
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        merge(&schema(), &config(), a, b, today)
    }

    #[test]
    fn test_call_between_inquiry_and_offer_is_negotiation() {
        let perf = perf_record();
        let vc = vc_record("2025-01-15");
        let result = disambiguate(merged(&perf, &vc), &perf, &vc, &schema(), &config());
        assert_eq!(result.get("Negotiation_Date"), "2025-01-15");
        assert_eq!(result.get("Negotiation_Location"), "Video Conference");
        assert_eq!(result.get("Briefing_Date"), "");
    }

    #[test]
    fn test_call_between_offer_and_talk_is_briefing() {
        let perf = perf_record();
        let vc = vc_record("2025-02-15");
        let result = disambiguate(merged(&perf, &vc), &perf, &vc, &schema(), &config());
        assert_eq!(result.get("Briefing_Date"), "2025-02-15");
        assert_eq!(result.get("Briefing_Location"), "Video Conference");
        assert_eq!(result.get("Negotiation_Date"), "");
    }

    #[test]
    fn test_operand_order_does_not_matter() {
        let perf = perf_record();
        let vc = vc_record("2025-01-15");
        let result = disambiguate(merged(&perf, &vc), &vc, &perf, &schema(), &config());
        assert_eq!(result.get("Negotiation_Date"), "2025-01-15");
    }

    #[test]
    fn test_offer_unknown_defaults_to_negotiation() {
        let perf = Record::new()
            .with("threadId", "t-perf")
            .with("Event", "Leadership Kongress")
            .with("Request_Date", "2025-01-01")
            .with("Talk_Date", "2025-03-01");
        let vc = vc_record("2025-02-10");
        let result = disambiguate(merged(&perf, &vc), &perf, &vc, &schema(), &config());
        assert_eq!(result.get("Negotiation_Date"), "2025-02-10");
    }

    #[test]
    fn test_undated_call_produces_no_classification() {
        let perf = perf_record();
        let vc = vc_record("");
        let result = disambiguate(merged(&perf, &vc), &perf, &vc, &schema(), &config());
        assert_eq!(result.get("Negotiation_Date"), "");
        assert_eq!(result.get("Briefing_Date"), "");
    }

    #[test]
    fn test_neither_side_video_conference_is_noop() {
        let a = perf_record();
        let b = Record::new()
            .with("threadId", "t-b")
            .with("Event", "Leadership Kongress Tag 2")
            .with("Talk_Date", "2025-03-02");
        let before = merged(&a, &b);
        let after = disambiguate(before.clone(), &a, &b, &schema(), &config());
        assert_eq!(before, after);
    }

    #[test]
    fn test_both_sides_video_conference_is_noop() {
        let a = vc_record("2025-01-10").with("threadId", "t-a");
        let b = vc_record("2025-01-12").with("threadId", "t-b");
        let before = merged(&a, &b);
        let after = disambiguate(before.clone(), &a, &b, &schema(), &config());
        assert_eq!(before, after);
    }

    #[test]
    fn test_existing_fields_never_removed() {
        let perf = perf_record().with("Notes", "wichtig");
        let vc = vc_record("2025-01-15");
        let before = merged(&perf, &vc);
        let after = disambiguate(before.clone(), &perf, &vc, &schema(), &config());
        for (field, value) in before.iter() {
            if field != "Negotiation_Date" && field != "Negotiation_Location" {
                assert_eq!(after.get(field), value, "field {} changed", field);
            }
        }
    }
}
