//! Table tests for relative "viewed at" labels.
//!
//! Covers each bucket, the exclusive thresholds between them, and the
//! absolute-date fallback in both locales.

use chrono::{DateTime, Duration, TimeZone, Utc};
use recent_sidebar::services::localization_engine::LocalizationEngine;
use recent_sidebar::services::relative_time::{classify, format_viewed_at, zone_from_minutes, RelativeTime};
use recent_sidebar::types::settings::Locale;
use rstest::rstest;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn english(elapsed: Duration) -> String {
    let engine = LocalizationEngine::bundled(Locale::En).unwrap();
    format_viewed_at(now() - elapsed, now(), zone_from_minutes(0), &engine)
}

#[rstest]
#[case::thirty_seconds(Duration::seconds(30), "just now")]
#[case::just_under_a_minute(Duration::milliseconds(59_999), "just now")]
#[case::one_minute(Duration::minutes(1), "1 minutes ago")]
#[case::forty_five_minutes(Duration::minutes(45), "45 minutes ago")]
#[case::fifty_nine_minutes(Duration::seconds(59 * 60 + 59), "59 minutes ago")]
#[case::exactly_an_hour(Duration::minutes(60), "1 hours ago")]
#[case::ninety_minutes(Duration::minutes(90), "1 hours ago")]
#[case::twenty_three_hours(Duration::minutes(23 * 60 + 59), "23 hours ago")]
#[case::exactly_a_day(Duration::minutes(1440), "1 days ago")]
#[case::three_days(Duration::days(3), "3 days ago")]
#[case::almost_a_week(Duration::days(7) - Duration::milliseconds(1), "6 days ago")]
#[case::exactly_a_week(Duration::days(7), "6/8/2024")]
#[case::ten_days(Duration::days(10), "6/5/2024")]
fn test_english_labels(#[case] elapsed: Duration, #[case] expected: &str) {
    assert_eq!(english(elapsed), expected);
}

#[rstest]
#[case(Duration::seconds(10), "방금 전")]
#[case(Duration::minutes(45), "45분 전")]
#[case(Duration::minutes(90), "1시간 전")]
#[case(Duration::days(3), "3일 전")]
#[case(Duration::days(10), "2024. 6. 5.")]
fn test_korean_labels(#[case] elapsed: Duration, #[case] expected: &str) {
    let engine = LocalizationEngine::bundled(Locale::Ko).unwrap();
    let label = format_viewed_at(now() - elapsed, now(), zone_from_minutes(540), &engine);
    assert_eq!(label, expected);
}

/// Exactly 60 minutes is in the hours bucket, not "60 minutes ago".
#[test]
fn test_sixty_minutes_is_hours_bucket() {
    assert_eq!(
        classify(now() - Duration::minutes(60), now(), zone_from_minutes(0)),
        RelativeTime::Hours(1)
    );
}

/// The input timestamp is taken by value and the result depends only on "now".
#[test]
fn test_deterministic_for_fixed_now() {
    let viewed = now() - Duration::minutes(30);
    let engine = LocalizationEngine::bundled(Locale::En).unwrap();
    let first = format_viewed_at(viewed, now(), zone_from_minutes(0), &engine);
    let second = format_viewed_at(viewed, now(), zone_from_minutes(0), &engine);
    assert_eq!(first, second);
    assert_eq!(viewed, now() - Duration::minutes(30));
}
