//! Persistence collaborators for per-user state.
//!
//! The engine only talks to storage through the traits here. [`FileStore`]
//! implements all of them on a directory tree:
//!
//! ```text
//! <data_dir>/users/<user_id>/
//!     .lock            per-user mutual exclusion
//!     profile.json     TrainingProfile
//!     plan.json        PlanDocument (no media references)
//!     progress.json    ProgressState
//!     sessions.jsonl   SessionRecord per line
//!     weights.json     WeightEntry list, one per date
//! ```

use crate::catalog::Catalog;
use crate::sessions::SessionLog;
use crate::state::{read_json, write_json_atomic, PlanDocument};
use crate::weights::{self, WeightEntry};
use crate::{Error, ProgressState, Result, SessionRecord, TrainingProfile, UserId, WeeklyPlan};
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores the profile a user onboarded with
pub trait ProfileStore {
    fn load_profile(&self, user: &UserId) -> Result<Option<TrainingProfile>>;
    fn save_profile(&self, user: &UserId, profile: &TrainingProfile) -> Result<()>;
}

/// Stores the single live weekly plan of a user
pub trait PlanStore {
    /// `None` means the user still needs setup
    fn load_plan(&self, user: &UserId) -> Result<Option<WeeklyPlan>>;
    /// Full overwrite
    fn save_plan(&self, user: &UserId, plan: &WeeklyPlan) -> Result<()>;
}

/// Stores completed sessions
pub trait SessionStore {
    fn append_session(&self, user: &UserId, record: &SessionRecord) -> Result<()>;
    /// Sessions ordered by date, oldest first, optionally limited to a range
    fn list_sessions(
        &self,
        user: &UserId,
        range: Option<RangeInclusive<NaiveDate>>,
    ) -> Result<Vec<SessionRecord>>;
    /// Remove all sessions on `date`, returning how many were removed
    fn delete_session(&self, user: &UserId, date: NaiveDate) -> Result<usize>;
    /// Remove one session by id, returning whether it existed
    fn remove_session(&self, user: &UserId, id: Uuid) -> Result<bool>;
}

/// Stores experience and level
pub trait ProgressStore {
    /// Defaults to experience 0, level 1 when nothing is stored
    fn load_progress(&self, user: &UserId) -> Result<ProgressState>;
    fn save_progress(&self, user: &UserId, progress: &ProgressState) -> Result<()>;
}

/// Stores the body weight log
pub trait WeightStore {
    /// Entries ordered by date, oldest first
    fn load_weights(&self, user: &UserId) -> Result<Vec<WeightEntry>>;
    /// Insert or replace the entry for `entry.date`
    fn save_weight(&self, user: &UserId, entry: &WeightEntry) -> Result<()>;
}

/// Serializes writers of one user's records
pub trait UserLocking {
    type Guard;
    fn lock_user(&self, user: &UserId) -> Result<Self::Guard>;
}

/// Exclusive hold on a user's records, released on drop
pub struct UserLock {
    file: File,
    user: UserId,
}

impl Drop for UserLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to release lock for {}: {}", self.user, e);
        }
    }
}

/// Filesystem-backed store for all per-user records
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
    catalog: Catalog,
}

impl FileStore {
    /// Create a store rooted at `data_dir`
    ///
    /// Plans read back from disk have their media resolved through `catalog`.
    pub fn new(data_dir: impl Into<PathBuf>, catalog: Catalog) -> Self {
        Self {
            root: data_dir.into(),
            catalog,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one user's files
    pub fn user_dir(&self, user: &UserId) -> PathBuf {
        self.root.join("users").join(user.as_str())
    }

    fn profile_path(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("profile.json")
    }

    fn plan_path(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("plan.json")
    }

    fn progress_path(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("progress.json")
    }

    fn weights_path(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("weights.json")
    }

    fn session_log(&self, user: &UserId) -> SessionLog {
        SessionLog::new(self.user_dir(user).join("sessions.jsonl"))
    }
}

impl UserLocking for FileStore {
    type Guard = UserLock;

    fn lock_user(&self, user: &UserId) -> Result<UserLock> {
        let dir = self.user_dir(user);
        std::fs::create_dir_all(&dir)?;

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(dir.join(".lock"))?;
        file.lock_exclusive()
            .map_err(|e| Error::Storage(format!("unable to lock user {}: {}", user, e)))?;

        tracing::debug!("Acquired lock for {}", user);
        Ok(UserLock {
            file,
            user: user.clone(),
        })
    }
}

impl ProfileStore for FileStore {
    fn load_profile(&self, user: &UserId) -> Result<Option<TrainingProfile>> {
        read_json(&self.profile_path(user))
    }

    fn save_profile(&self, user: &UserId, profile: &TrainingProfile) -> Result<()> {
        write_json_atomic(&self.profile_path(user), profile)
    }
}

impl PlanStore for FileStore {
    fn load_plan(&self, user: &UserId) -> Result<Option<WeeklyPlan>> {
        match read_json::<PlanDocument>(&self.plan_path(user))? {
            Some(doc) => WeeklyPlan::from_document(&doc, &self.catalog)
                .map(Some)
                .map_err(|e| Error::Storage(format!("stored plan for {} is invalid: {}", user, e))),
            None => Ok(None),
        }
    }

    fn save_plan(&self, user: &UserId, plan: &WeeklyPlan) -> Result<()> {
        write_json_atomic(&self.plan_path(user), &plan.to_document())?;
        tracing::info!(
            "Saved {}-day plan for {}",
            plan.training_day_count(),
            user
        );
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn append_session(&self, user: &UserId, record: &SessionRecord) -> Result<()> {
        self.session_log(user).append(record)
    }

    fn list_sessions(
        &self,
        user: &UserId,
        range: Option<RangeInclusive<NaiveDate>>,
    ) -> Result<Vec<SessionRecord>> {
        let mut records = self.session_log(user).read_all()?;
        if let Some(range) = range {
            records.retain(|r| range.contains(&r.date));
        }
        // Stable sort keeps append order within a day
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    fn delete_session(&self, user: &UserId, date: NaiveDate) -> Result<usize> {
        self.session_log(user).remove_date(date)
    }

    fn remove_session(&self, user: &UserId, id: Uuid) -> Result<bool> {
        self.session_log(user).remove_id(id)
    }
}

impl ProgressStore for FileStore {
    fn load_progress(&self, user: &UserId) -> Result<ProgressState> {
        Ok(read_json(&self.progress_path(user))?.unwrap_or_default())
    }

    fn save_progress(&self, user: &UserId, progress: &ProgressState) -> Result<()> {
        write_json_atomic(&self.progress_path(user), progress)
    }
}

impl WeightStore for FileStore {
    fn load_weights(&self, user: &UserId) -> Result<Vec<WeightEntry>> {
        let mut entries: Vec<WeightEntry> =
            read_json(&self.weights_path(user))?.unwrap_or_default();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    fn save_weight(&self, user: &UserId, entry: &WeightEntry) -> Result<()> {
        let mut entries = self.load_weights(user)?;
        let replaced = weights::upsert(&mut entries, *entry);
        write_json_atomic(&self.weights_path(user), &entries)?;

        tracing::info!(
            "{} weight {} kg for {} on {}",
            if replaced { "Updated" } else { "Logged" },
            entry.kg,
            user,
            entry.date
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_default_catalog, generate, Equipment, ExperienceLevel, Goal};

    fn store() -> (tempfile::TempDir, FileStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp_dir.path(), build_default_catalog());
        (temp_dir, store)
    }

    fn user() -> UserId {
        UserId::new("alex").unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_missing_state_defaults() {
        let (_dir, store) = store();
        assert!(store.load_profile(&user()).unwrap().is_none());
        assert!(store.load_plan(&user()).unwrap().is_none());
        assert_eq!(store.load_progress(&user()).unwrap(), ProgressState::default());
        assert!(store.list_sessions(&user(), None).unwrap().is_empty());
    }

    #[test]
    fn test_profile_and_plan_persist() {
        let (_dir, store) = store();
        let profile = TrainingProfile {
            frequency: 3,
            experience_level: ExperienceLevel::Advanced,
            goal: Goal::Strength,
            equipment: Equipment::Bodyweight,
        };
        let plan = generate(&build_default_catalog(), &profile).unwrap();

        store.save_profile(&user(), &profile).unwrap();
        store.save_plan(&user(), &plan).unwrap();

        assert_eq!(store.load_profile(&user()).unwrap(), Some(profile));
        assert_eq!(store.load_plan(&user()).unwrap(), Some(plan));
    }

    #[test]
    fn test_corrupt_plan_is_storage_error() {
        let (_dir, store) = store();
        let path = store.user_dir(&user()).join("plan.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"9": {"name": "Legs", "exercises": []}}"#).unwrap();

        assert!(store.load_plan(&user()).unwrap_err().is_storage());
    }

    #[test]
    fn test_sessions_listed_by_date_and_range() {
        let (_dir, store) = store();
        for d in [19, 15, 17] {
            store
                .append_session(&user(), &SessionRecord::new(date(d), vec!["Plank".into()]))
                .unwrap();
        }

        let all: Vec<_> = store
            .list_sessions(&user(), None)
            .unwrap()
            .iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(all, vec![date(15), date(17), date(19)]);

        let ranged = store
            .list_sessions(&user(), Some(date(16)..=date(19)))
            .unwrap();
        assert_eq!(ranged.len(), 2);
    }

    #[test]
    fn test_users_are_isolated() {
        let (_dir, store) = store();
        let other = UserId::new("sam").unwrap();
        store
            .save_progress(&user(), &ProgressState { experience: 50, level: 1 })
            .unwrap();
        assert_eq!(store.load_progress(&other).unwrap(), ProgressState::default());
    }

    #[test]
    fn test_lock_is_reentrant_after_drop() {
        let (_dir, store) = store();
        let guard = store.lock_user(&user()).unwrap();
        drop(guard);
        let _again = store.lock_user(&user()).unwrap();
    }

    #[test]
    fn test_weights_upsert_per_date() {
        let (_dir, store) = store();
        assert!(store.load_weights(&user()).unwrap().is_empty());

        for (d, kg) in [(19, 81.0), (12, 82.5), (19, 80.8)] {
            store
                .save_weight(&user(), &WeightEntry::new(date(d), kg).unwrap())
                .unwrap();
        }

        let entries = store.load_weights(&user()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, date(12));
        assert_eq!(entries[1].kg, 80.8);
    }

    #[test]
    fn test_remove_session_by_id() {
        let (_dir, store) = store();
        let record = SessionRecord::new(date(19), vec!["Plank".into()]);
        store.append_session(&user(), &record).unwrap();

        assert!(store.remove_session(&user(), record.id).unwrap());
        assert!(store.list_sessions(&user(), None).unwrap().is_empty());
    }
}
