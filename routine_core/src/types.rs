//! Core domain types for the routine system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Training profiles and their enumerated choices
//! - Exercise prescriptions, day plans and weekly plans
//! - Progression state and completed session records
//! - User identifiers

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Number of weekday slots in a plan
pub const DAYS_PER_WEEK: usize = 7;

/// Label of the rest-day sentinel
pub const REST_DAY_LABEL: &str = "Rest Day";

/// Label of the sentinel returned when a user has no plan yet
pub const NEEDS_SETUP_LABEL: &str = "Welcome! (Set up Plan)";

// ============================================================================
// Profile Types
// ============================================================================

/// Self-reported training experience
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Primary training goal
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Goal {
    Muscle,
    #[serde(rename = "Fat Loss")]
    FatLoss,
    Strength,
}

/// Equipment the user has access to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Equipment {
    Gym,
    Home,
    Bodyweight,
}

/// Lowercase and strip separators so "Fat Loss", "fat-loss" and "FATLOSS" agree
fn normalize_token(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for ExperienceLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_token(s).as_str() {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            _ => Err(Error::Validation(format!("unknown experience level '{}'", s))),
        }
    }
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_token(s).as_str() {
            "muscle" => Ok(Goal::Muscle),
            "fatloss" => Ok(Goal::FatLoss),
            "strength" => Ok(Goal::Strength),
            _ => Err(Error::Validation(format!("unknown goal '{}'", s))),
        }
    }
}

impl FromStr for Equipment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_token(s).as_str() {
            "gym" => Ok(Equipment::Gym),
            "home" => Ok(Equipment::Home),
            "bodyweight" => Ok(Equipment::Bodyweight),
            _ => Err(Error::Validation(format!("unknown equipment '{}'", s))),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExperienceLevel::Beginner => "Beginner",
            ExperienceLevel::Intermediate => "Intermediate",
            ExperienceLevel::Advanced => "Advanced",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Goal::Muscle => "Muscle",
            Goal::FatLoss => "Fat Loss",
            Goal::Strength => "Strength",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Equipment::Gym => "Gym",
            Equipment::Home => "Home",
            Equipment::Bodyweight => "Bodyweight",
        };
        f.write_str(s)
    }
}

/// Input to program generation, replaced wholesale on re-onboarding
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainingProfile {
    /// Training days per week (3 or 4)
    pub frequency: u8,
    pub experience_level: ExperienceLevel,
    pub goal: Goal,
    pub equipment: Equipment,
}

// ============================================================================
// Plan Types
// ============================================================================

/// A single prescribed exercise within a day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExercisePrescription {
    pub name: String,
    pub sets: u32,
    /// Rep range ("8-12") or a duration token ("30-60s")
    pub rep_range: String,
    /// Resolved through the catalog on every read, never persisted
    pub media_ref: String,
}

/// A named workout for one day
///
/// Rest days and the needs-setup signal are ordinary values of this type,
/// distinguished by their label and an empty exercise list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPlan {
    pub label: String,
    pub exercises: Vec<ExercisePrescription>,
}

impl DayPlan {
    pub fn new(label: impl Into<String>, exercises: Vec<ExercisePrescription>) -> Self {
        Self {
            label: label.into(),
            exercises,
        }
    }

    /// The rest-day sentinel
    pub fn rest_day() -> Self {
        Self::new(REST_DAY_LABEL, Vec::new())
    }

    /// The sentinel shown to users who have not been onboarded
    pub fn needs_setup() -> Self {
        Self::new(NEEDS_SETUP_LABEL, Vec::new())
    }

    pub fn is_rest_day(&self) -> bool {
        self.exercises.is_empty() && self.label == REST_DAY_LABEL
    }

    pub fn is_needs_setup(&self) -> bool {
        self.exercises.is_empty() && self.label == NEEDS_SETUP_LABEL
    }

    /// Names of the prescribed exercises in order
    pub fn exercise_names(&self) -> Vec<String> {
        self.exercises.iter().map(|e| e.name.clone()).collect()
    }
}

/// A recurring weekly plan indexed 0 (Monday) through 6 (Sunday)
///
/// Empty slots are rest days.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeeklyPlan {
    days: [Option<DayPlan>; DAYS_PER_WEEK],
}

impl WeeklyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a workout to a weekday index
    pub fn set_day(&mut self, index: usize, day: DayPlan) -> Result<()> {
        let slot = self.days.get_mut(index).ok_or_else(|| {
            Error::Validation(format!(
                "weekday index {} out of range 0..{}",
                index, DAYS_PER_WEEK
            ))
        })?;
        *slot = Some(day);
        Ok(())
    }

    /// The workout scheduled for an index, `None` for rest days
    pub fn day(&self, index: usize) -> Option<&DayPlan> {
        self.days.get(index).and_then(|d| d.as_ref())
    }

    /// Populated (index, workout) pairs in index order
    pub fn training_days(&self) -> impl Iterator<Item = (usize, &DayPlan)> {
        self.days
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.as_ref().map(|d| (i, d)))
    }

    /// Number of populated weekday slots
    pub fn training_day_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_some()).count()
    }
}

// ============================================================================
// Progress and Session Types
// ============================================================================

/// Cumulative experience and level for one user
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressState {
    pub experience: u32,
    pub level: u32,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            experience: 0,
            level: 1,
        }
    }
}

/// A completed training day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub exercise_names: Vec<String>,
}

impl SessionRecord {
    pub fn new(date: NaiveDate, exercise_names: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            exercise_names,
        }
    }
}

// ============================================================================
// User Identity
// ============================================================================

/// Maximum length of a user identifier
pub const MAX_USER_ID_LEN: usize = 64;

/// Opaque identifier of a user, safe to use as a directory name
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() || id.len() > MAX_USER_ID_LEN {
            return Err(Error::Validation(format!(
                "user id must be 1-{} characters",
                MAX_USER_ID_LEN
            )));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Error::Validation(format!(
                "user id '{}' may only contain letters, digits, '_' and '-'",
                id
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_tokens_parse_loosely() {
        assert_eq!("fat loss".parse::<Goal>().unwrap(), Goal::FatLoss);
        assert_eq!("Fat-Loss".parse::<Goal>().unwrap(), Goal::FatLoss);
        assert_eq!("BODYWEIGHT".parse::<Equipment>().unwrap(), Equipment::Bodyweight);
        assert_eq!(
            "intermediate".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::Intermediate
        );
        assert!("crossfit".parse::<Equipment>().unwrap_err().is_validation());
    }

    #[test]
    fn test_goal_serializes_with_display_name() {
        let json = serde_json::to_string(&Goal::FatLoss).unwrap();
        assert_eq!(json, "\"Fat Loss\"");
    }

    #[test]
    fn test_sentinels() {
        assert!(DayPlan::rest_day().is_rest_day());
        assert!(!DayPlan::rest_day().is_needs_setup());
        assert!(DayPlan::needs_setup().is_needs_setup());
        assert!(!DayPlan::new("Legs", vec![]).is_rest_day());
    }

    #[test]
    fn test_weekly_plan_slots() {
        let mut plan = WeeklyPlan::new();
        plan.set_day(2, DayPlan::new("Pull", vec![])).unwrap();
        assert_eq!(plan.training_day_count(), 1);
        assert_eq!(plan.day(2).unwrap().label, "Pull");
        assert!(plan.day(3).is_none());
        assert!(plan.day(9).is_none());
        assert!(plan.set_day(7, DayPlan::rest_day()).is_err());
    }

    #[test]
    fn test_default_progress() {
        let p = ProgressState::default();
        assert_eq!(p.experience, 0);
        assert_eq!(p.level, 1);
    }

    #[test]
    fn test_user_id_validation() {
        assert!(UserId::new("alex_01").is_ok());
        assert!(UserId::new("").is_err());
        assert!(UserId::new("../etc").is_err());
        assert!(UserId::new("a".repeat(65)).is_err());
    }
}
