//! Human-readable durations
//!
//! Durations are approximate and expressed in a single unit: a month is a
//! fixed 30-day bucket, not a calendar month.

use chrono::{DateTime, Utc};

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;
const DAYS_PER_WEEK: i64 = 7;
const DAYS_PER_MONTH: i64 = 30;

/// Whole minutes between `start` and `end`, floored, never negative
pub fn whole_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_minutes().max(0)
}

/// Label for the time a task took, using the largest unit that is at least 1
pub fn elapsed_label(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let minutes = whole_minutes(start, end);
    let hours = minutes / MINUTES_PER_HOUR;
    let days = minutes / MINUTES_PER_DAY;
    let weeks = days / DAYS_PER_WEEK;
    let months = days / DAYS_PER_MONTH;

    if months > 0 {
        format!("{months} mês(es)")
    } else if weeks > 0 {
        format!("{weeks} semana(s)")
    } else if days > 0 {
        format!("{days} dia(s)")
    } else if hours > 0 {
        format!("{hours} hora(s)")
    } else if minutes > 0 {
        format!("{minutes} minuto(s)")
    } else {
        "Menos de 1 minuto".to_string()
    }
}

/// Label for an average completion time, capped at days
pub fn average_label(minutes: i64) -> String {
    if minutes >= MINUTES_PER_DAY {
        format!("{} dia(s)", minutes / MINUTES_PER_DAY)
    } else if minutes >= MINUTES_PER_HOUR {
        format!("{} hora(s)", minutes / MINUTES_PER_HOUR)
    } else {
        format!("{minutes} minuto(s)")
    }
}
