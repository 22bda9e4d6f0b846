//! Renewal date arithmetic.
//!
//! Every function here is a pure function of the supplied date string and
//! `today`; callers obtain `today` from the injected clock. Unparseable
//! renewal dates never propagate an error: the functions log a warning and
//! substitute the documented fallback ("due today" for day counts, one year
//! out for the anniversary date), since these values feed user-facing
//! screens that must keep rendering on dirty records.

use crate::models::{ButtonRule, ButtonState, RenewalStatus};
use chrono::{DateTime, Datelike, NaiveDate};

/// Parse a calendar date from `YYYY-MM-DD`, or from the date part of an
/// RFC 3339 timestamp.
fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Build a date, clamping the day to the last valid day of the target month
/// (a Feb 29 anchor becomes Feb 28 in non-leap years).
fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    (day.saturating_sub(3)..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
}

/// Whole calendar days from `today` until the renewal date. Negative when
/// the date has passed.
pub fn days_remaining(renewal_date: &str, today: NaiveDate) -> i64 {
    match parse_calendar_date(renewal_date) {
        Some(date) => (date - today).num_days(),
        None => {
            tracing::warn!(
                renewal_date = %renewal_date,
                "Unparseable renewal date, treating as due today"
            );
            0
        }
    }
}

/// Classify a day count into a lifecycle status.
pub fn status_for_days(days: i64) -> RenewalStatus {
    if days >= 15 {
        RenewalStatus::Active
    } else if days >= 0 {
        RenewalStatus::RenewalRequired
    } else if days > -25 {
        RenewalStatus::Expired
    } else {
        RenewalStatus::Cancelled
    }
}

pub fn renewal_status(renewal_date: &str, today: NaiveDate) -> RenewalStatus {
    status_for_days(days_remaining(renewal_date, today))
}

/// Renew-button state for a day count under the configured rule.
pub fn button_state_for_days(days: i64, rule: ButtonRule) -> ButtonState {
    let enabled = match rule {
        // Shipped condition, reproduced as written; the second clause is
        // implied by the first and never fires.
        ButtonRule::Legacy => days >= 15 && days >= -25,
        ButtonRule::Windowed => days >= -25,
    };
    ButtonState {
        is_visible: enabled,
        is_enabled: enabled,
    }
}

pub fn button_state(renewal_date: &str, today: NaiveDate, rule: ButtonRule) -> ButtonState {
    button_state_for_days(days_remaining(renewal_date, today), rule)
}

/// Next renewal date preserving the original month/day anniversary.
///
/// A company incorporated on September 21st renews on September 21st every
/// year, no matter when the renewal transaction is processed.
pub fn smart_renewal_date(original_renewal_date: &str, today: NaiveDate) -> NaiveDate {
    let Some(anchor) = parse_calendar_date(original_renewal_date) else {
        tracing::warn!(
            renewal_date = %original_renewal_date,
            "Unparseable renewal date, falling back to one year from today"
        );
        return clamped_date(today.year() + 1, today.month(), today.day()).unwrap_or(today);
    };

    let candidate =
        clamped_date(today.year() + 1, anchor.month(), anchor.day()).unwrap_or(today);
    if candidate < today {
        // Guard for renewal processing landing after next year's
        // anniversary; unreachable while the candidate year is today's
        // year plus one, but kept in case the candidate rule changes.
        return clamped_date(today.year() + 2, anchor.month(), anchor.day()).unwrap_or(today);
    }
    candidate
}
