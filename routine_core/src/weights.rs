//! Body weight log.
//!
//! At most one entry per calendar date; logging again on a date replaces
//! that day's value.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body weight measured on one day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub kg: f64,
}

impl WeightEntry {
    /// Validated entry; the weight must be a positive, finite number
    pub fn new(date: NaiveDate, kg: f64) -> Result<Self> {
        if !kg.is_finite() || kg <= 0.0 {
            return Err(Error::Validation(format!(
                "weight must be a positive number of kilograms, got {}",
                kg
            )));
        }
        Ok(Self { date, kg })
    }
}

/// Insert `entry`, replacing any entry on the same date
///
/// Returns true when an existing entry was replaced. The log is left
/// ordered by date, oldest first.
pub fn upsert(entries: &mut Vec<WeightEntry>, entry: WeightEntry) -> bool {
    let before = entries.len();
    entries.retain(|e| e.date != entry.date);
    let replaced = entries.len() != before;

    entries.push(entry);
    entries.sort_by_key(|e| e.date);
    replaced
}

/// The most recently dated weight, if any was logged
pub fn current_weight(entries: &[WeightEntry]) -> Option<f64> {
    entries.iter().max_by_key(|e| e.date).map(|e| e.kg)
}
