//! Schedule projection from a weekly plan onto calendar dates.
//!
//! Two week conventions coexist here:
//! - Plans are indexed Monday-first (0 = Monday … 6 = Sunday)
//! - The calendar strip returned by [`week_view`] runs Sunday-first

use crate::{DayPlan, Error, Result, WeeklyPlan};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Marker shown in place of a workout letter on rest days
pub const REST_DAY_MARKER: char = '-';

/// One column of the calendar strip
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct WeekDay {
    pub date: NaiveDate,
    /// Short day name ("Sun", "Mon", ...)
    pub day_name: String,
    /// Label of the workout scheduled that day
    pub label: String,
    pub is_rest_day: bool,
    pub is_today: bool,
    pub display_letter: char,
}

/// Monday-first plan index of a date
pub fn plan_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| Error::Validation(format!("invalid date '{}': {}", s, e)))
}

/// What to train on `date`
///
/// Without a plan the needs-setup sentinel is returned; with a plan, empty
/// weekdays yield the rest-day sentinel.
pub fn today(plan: Option<&WeeklyPlan>, date: NaiveDate) -> DayPlan {
    match plan {
        None => DayPlan::needs_setup(),
        Some(plan) => plan
            .day(plan_index(date))
            .cloned()
            .unwrap_or_else(DayPlan::rest_day),
    }
}

/// The Sunday-first week containing `anchor`, with `anchor` marked as today
///
/// Without a plan every day is shown as a rest day.
pub fn week_view(plan: Option<&WeeklyPlan>, anchor: NaiveDate) -> Vec<WeekDay> {
    let days_since_sunday = anchor.weekday().num_days_from_sunday() as i64;
    let sunday = anchor - Duration::days(days_since_sunday);

    (0..7)
        .map(|offset| {
            let date = sunday + Duration::days(offset);
            let day = plan
                .and_then(|p| p.day(plan_index(date)))
                .cloned()
                .unwrap_or_else(DayPlan::rest_day);
            let is_rest_day = day.is_rest_day();
            let display_letter = if is_rest_day {
                REST_DAY_MARKER
            } else {
                day.label.chars().next().unwrap_or(REST_DAY_MARKER)
            };

            WeekDay {
                date,
                day_name: date.format("%a").to_string(),
                label: day.label,
                is_rest_day,
                is_today: date == anchor,
                display_letter,
            }
        })
        .collect()
}
