//! Persisted document forms and atomic JSON file IO.
//!
//! Documents are read under a shared lock and written atomically by:
//! 1. Writing to a temp file in the destination directory
//! 2. Syncing to disk
//! 3. Renaming over the original

use crate::catalog::Catalog;
use crate::{DayPlan, Error, ExercisePrescription, Result, WeeklyPlan};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Stored form of a weekly plan: weekday index (as a string) to workout
pub type PlanDocument = BTreeMap<String, PersistedDay>;

/// Stored form of a day's workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedDay {
    pub name: String,
    pub exercises: Vec<PersistedExercise>,
}

/// Stored form of a prescription; media references are never stored
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedExercise {
    pub name: String,
    pub sets: u32,
    pub reps: String,
}

impl WeeklyPlan {
    /// Encode into the stored document shape
    pub fn to_document(&self) -> PlanDocument {
        self.training_days()
            .map(|(index, day)| {
                let exercises = day
                    .exercises
                    .iter()
                    .map(|e| PersistedExercise {
                        name: e.name.clone(),
                        sets: e.sets,
                        reps: e.rep_range.clone(),
                    })
                    .collect();
                (
                    index.to_string(),
                    PersistedDay {
                        name: day.label.clone(),
                        exercises,
                    },
                )
            })
            .collect()
    }

    /// Decode a stored document, resolving media through `catalog`
    pub fn from_document(doc: &PlanDocument, catalog: &Catalog) -> Result<Self> {
        let mut plan = WeeklyPlan::new();
        for (key, day) in doc {
            // Canonical spelling only; "0" and "00" would both map to Monday
            let index = key
                .parse::<usize>()
                .ok()
                .filter(|index| index.to_string() == *key)
                .ok_or_else(|| {
                    Error::Validation(format!("stored plan has invalid weekday key '{}'", key))
                })?;
            let exercises = day
                .exercises
                .iter()
                .map(|e| ExercisePrescription {
                    name: e.name.clone(),
                    sets: e.sets,
                    rep_range: e.reps.clone(),
                    media_ref: catalog.resolve_media(&e.name),
                })
                .collect();
            plan.set_day(index, DayPlan::new(day.name.clone(), exercises))?;
        }
        Ok(plan)
    }
}

/// Read a JSON document, `None` if the file doesn't exist
///
/// Unreadable or unparsable files are storage errors; callers never get a
/// silently defaulted value for a document that exists.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)?;

    // Acquire shared lock for reading
    file.lock_shared()
        .map_err(|e| Error::Storage(format!("unable to lock {:?}: {}", path, e)))?;

    let mut contents = String::new();
    let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
    file.unlock()?;
    read?;

    let value = serde_json::from_str::<T>(&contents)
        .map_err(|e| Error::Storage(format!("corrupt document {:?}: {}", path, e)))?;
    tracing::debug!("Loaded {:?}", path);
    Ok(Some(value))
}

/// Write a JSON document atomically
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::Storage(format!("path {:?} has no parent directory", path)))?;
    std::fs::create_dir_all(parent)?;

    // Unique temp file in the same directory for atomic rename
    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(value)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved {:?}", path);
    Ok(())
}
