//! Session history summaries.
//!
//! Sessions are grouped by calendar date: several records on one date count
//! as a single training day.

use crate::SessionRecord;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One training day in the history list
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub exercise_count: usize,
}

/// Exercise volume on one day of the activity window
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub exercise_count: usize,
}

/// Training days, newest first, at most `limit` entries
pub fn summarize(sessions: &[SessionRecord], limit: usize) -> Vec<HistoryEntry> {
    let mut by_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for session in sessions {
        *by_date.entry(session.date).or_default() += session.exercise_names.len();
    }

    by_date
        .into_iter()
        .rev()
        .take(limit)
        .map(|(date, exercise_count)| HistoryEntry {
            date,
            exercise_count,
        })
        .collect()
}

/// Number of distinct dates with at least one session
pub fn total_workouts(sessions: &[SessionRecord]) -> usize {
    sessions.iter().map(|s| s.date).collect::<BTreeSet<_>>().len()
}

/// Per-day exercise counts for the `days` days ending `today`, oldest first
pub fn activity(sessions: &[SessionRecord], today: NaiveDate, days: u32) -> Vec<ActivityDay> {
    (0..days as i64)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let exercise_count = sessions
                .iter()
                .filter(|s| s.date == date)
                .map(|s| s.exercise_names.len())
                .sum();
            ActivityDay {
                date,
                exercise_count,
            }
        })
        .collect()
}
