//! Relative "viewed at" labels.
//!
//! Elapsed time is bucketed by magnitude, smallest unit first, with every
//! magnitude floor-truncated. Each threshold is exclusive, so a boundary
//! value lands in the larger unit: exactly 60 minutes is "1 hours ago",
//! exactly 24 hours is "1 days ago", exactly 7 days prints the date.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use super::localization_engine::{LocalizationEngine, LocalizationEngineTrait};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// Bucket a viewed-at timestamp falls into relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTime {
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
    /// Seven days or older: the calendar date in the display zone.
    Date(NaiveDate),
}

impl RelativeTime {
    /// Ordinal of the bucket, smallest unit first.
    pub fn rank(&self) -> u8 {
        match self {
            RelativeTime::JustNow => 0,
            RelativeTime::Minutes(_) => 1,
            RelativeTime::Hours(_) => 2,
            RelativeTime::Days(_) => 3,
            RelativeTime::Date(_) => 4,
        }
    }
}

/// Classifies `viewed` against `now`. Timestamps in the future count as
/// "just now".
pub fn classify(viewed: DateTime<Utc>, now: DateTime<Utc>, zone: FixedOffset) -> RelativeTime {
    let diff_ms = (now - viewed).num_milliseconds();
    let minutes = diff_ms.div_euclid(MS_PER_MINUTE);
    let hours = diff_ms.div_euclid(MS_PER_HOUR);
    let days = diff_ms.div_euclid(MS_PER_DAY);

    if minutes < 1 {
        RelativeTime::JustNow
    } else if minutes < 60 {
        RelativeTime::Minutes(minutes)
    } else if hours < 24 {
        RelativeTime::Hours(hours)
    } else if days < 7 {
        RelativeTime::Days(days)
    } else {
        RelativeTime::Date(viewed.with_timezone(&zone).date_naive())
    }
}

/// Renders a bucket with the engine's current locale.
pub fn describe(relative: RelativeTime, localization: &LocalizationEngine) -> String {
    match relative {
        RelativeTime::JustNow => localization.t("time.just_now", None),
        RelativeTime::Minutes(n) => localization.t_count("time.minutes_ago", n),
        RelativeTime::Hours(n) => localization.t_count("time.hours_ago", n),
        RelativeTime::Days(n) => localization.t_count("time.days_ago", n),
        RelativeTime::Date(date) => localization.format_date(date),
    }
}

/// Formats how long ago `viewed` was, e.g. "45 minutes ago" or "2024. 1. 5.".
pub fn format_viewed_at(
    viewed: DateTime<Utc>,
    now: DateTime<Utc>,
    zone: FixedOffset,
    localization: &LocalizationEngine,
) -> String {
    describe(classify(viewed, now, zone), localization)
}

/// Display zone for a minute offset east of UTC. Out-of-range offsets fall back to UTC.
pub fn zone_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(utc_zone)
}

fn utc_zone() -> FixedOffset {
    Utc.fix()
}
