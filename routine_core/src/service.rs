//! Per-user operations tying the engine to its stores.
//!
//! Every write to a user's records happens while holding that user's lock,
//! so two sessions completed at the same moment cannot both read the same
//! experience total.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::history::{self, ActivityDay, HistoryEntry};
use crate::progression::{current_streak, SessionOutcome};
use crate::schedule::{self, WeekDay};
use crate::store::{
    PlanStore, ProfileStore, ProgressStore, SessionStore, UserLocking, WeightStore,
};
use crate::weights::{self, WeightEntry};
use crate::{generate, DayPlan, Error, ProgressState, Result, SessionRecord, TrainingProfile, UserId, WeeklyPlan};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

/// Progress overview for one user
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Stats {
    pub progress: ProgressState,
    pub streak: u32,
    pub total_workouts: usize,
    pub recent: Vec<HistoryEntry>,
    pub activity: Vec<ActivityDay>,
    pub current_weight: Option<f64>,
    /// Every logged weight, oldest first
    pub weights: Vec<WeightEntry>,
}

/// Entry point for all per-user operations
pub struct Trainer<S> {
    store: S,
    catalog: Catalog,
    config: Config,
}

impl<S> Trainer<S>
where
    S: ProfileStore + PlanStore + SessionStore + ProgressStore + WeightStore + UserLocking,
{
    pub fn new(store: S, catalog: Catalog, config: Config) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a profile and the plan generated from it
    ///
    /// Nothing is written if generation fails.
    pub fn onboard(&self, user: &UserId, profile: &TrainingProfile) -> Result<WeeklyPlan> {
        let plan = generate(&self.catalog, profile)?;

        let _guard = self.store.lock_user(user)?;
        self.store.save_profile(user, profile)?;
        self.store.save_plan(user, &plan)?;

        tracing::info!("Onboarded {} with a {}-day plan", user, profile.frequency);
        Ok(plan)
    }

    /// Rebuild the plan from the stored profile
    pub fn regenerate(&self, user: &UserId) -> Result<WeeklyPlan> {
        let profile = self.store.load_profile(user)?.ok_or_else(|| {
            Error::Validation(format!("user {} has no training profile yet", user))
        })?;
        self.onboard(user, &profile)
    }

    /// What to train on `date`
    pub fn today(&self, user: &UserId, date: NaiveDate) -> Result<DayPlan> {
        let plan = self.store.load_plan(user)?;
        Ok(schedule::today(plan.as_ref(), date))
    }

    /// The Sunday-first week around `anchor`
    pub fn week(&self, user: &UserId, anchor: NaiveDate) -> Result<Vec<WeekDay>> {
        let plan = self.store.load_plan(user)?;
        Ok(schedule::week_view(plan.as_ref(), anchor))
    }

    /// Record a completed session and apply progression
    ///
    /// An empty `exercise_names` records the exercises planned for `date`.
    pub fn complete_session(
        &self,
        user: &UserId,
        date: NaiveDate,
        exercise_names: Vec<String>,
    ) -> Result<SessionOutcome> {
        let _guard = self.store.lock_user(user)?;

        let exercise_names = if exercise_names.is_empty() {
            let planned = schedule::today(self.store.load_plan(user)?.as_ref(), date);
            if planned.exercises.is_empty() {
                return Err(Error::Validation(format!(
                    "nothing is planned for {} ({}); name the exercises completed",
                    date, planned.label
                )));
            }
            planned.exercise_names()
        } else {
            if exercise_names.iter().any(|name| name.trim().is_empty()) {
                return Err(Error::Validation(
                    "exercise names must not be blank".to_string(),
                ));
            }
            exercise_names
        };

        // Unreadable progress must fail before anything is appended
        let mut progress = self.store.load_progress(user)?;

        let record = SessionRecord::new(date, exercise_names);
        self.store.append_session(user, &record)?;

        let outcome = progress.record_session(&self.config.progression);
        if let Err(e) = self.store.save_progress(user, &progress) {
            // The session and its experience are recorded together or not at all
            if let Err(undo) = self.store.remove_session(user, record.id) {
                tracing::error!(
                    "Failed to roll back session {} for {}: {}",
                    record.id,
                    user,
                    undo
                );
            }
            return Err(e);
        }

        tracing::info!(
            "Logged {} exercise(s) for {} on {}",
            record.exercise_names.len(),
            user,
            date
        );
        Ok(outcome)
    }

    /// Remove the sessions recorded on `date`
    ///
    /// Experience and level are left untouched.
    pub fn delete_session(&self, user: &UserId, date: NaiveDate) -> Result<usize> {
        let _guard = self.store.lock_user(user)?;
        self.store.delete_session(user, date)
    }

    /// Record body weight for `date`, replacing an earlier entry that day
    pub fn log_weight(&self, user: &UserId, date: NaiveDate, kg: f64) -> Result<WeightEntry> {
        let entry = WeightEntry::new(date, kg)?;

        let _guard = self.store.lock_user(user)?;
        self.store.save_weight(user, &entry)?;
        Ok(entry)
    }

    /// Training days, newest first
    pub fn history(&self, user: &UserId, limit: usize) -> Result<Vec<HistoryEntry>> {
        let sessions = self.store.list_sessions(user, None)?;
        Ok(history::summarize(&sessions, limit))
    }

    /// Progress, streak and recent activity as of `today`
    pub fn stats(&self, user: &UserId, today: NaiveDate) -> Result<Stats> {
        let sessions = self.store.list_sessions(user, None)?;
        let progress = self.store.load_progress(user)?;
        let weight_log = self.store.load_weights(user)?;

        Ok(Stats {
            progress,
            streak: current_streak(&sessions, today),
            total_workouts: history::total_workouts(&sessions),
            recent: history::summarize(&sessions, self.config.history.recent_limit),
            activity: history::activity(&sessions, today, self.config.history.activity_days),
            current_weight: weights::current_weight(&weight_log),
            weights: weight_log,
        })
    }

    /// Write the full session history to a CSV file
    pub fn export(&self, user: &UserId, path: &Path) -> Result<usize> {
        let sessions = self.store.list_sessions(user, None)?;
        crate::export::export_csv(&sessions, path)
    }
}
