//! Append-only log of completed sessions.
//!
//! Records are stored as JSON Lines with file locking so concurrent
//! appenders never interleave partial lines.

use crate::{Error, Result, SessionRecord};
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// JSONL-backed session log for one user
pub struct SessionLog {
    path: PathBuf,
}

impl SessionLog {
    /// Create a log handle for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append one record
    pub fn append(&self, record: &SessionRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended session {} for {}", record.id, record.date);
        Ok(())
    }

    /// Read every parsable record in file order
    ///
    /// Corrupt lines are skipped with a warning.
    pub fn read_all(&self) -> Result<Vec<SessionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let reader = BufReader::new(&file);
        let mut records = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<SessionRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(
                        "Skipping corrupt session at {:?} line {}: {}",
                        self.path,
                        line_num + 1,
                        e
                    );
                }
            }
        }

        file.unlock()?;
        tracing::debug!("Read {} sessions from {:?}", records.len(), self.path);
        Ok(records)
    }

    /// Remove every record dated `date`, returning how many were removed
    ///
    /// The log is rewritten atomically; callers must hold the user's lock.
    pub fn remove_date(&self, date: NaiveDate) -> Result<usize> {
        let removed = self.remove_where(|r| r.date == date)?;
        if removed > 0 {
            tracing::info!("Removed {} session(s) dated {}", removed, date);
        }
        Ok(removed)
    }

    /// Remove the record with `id`, returning whether it was present
    pub fn remove_id(&self, id: Uuid) -> Result<bool> {
        let removed = self.remove_where(|r| r.id == id)?;
        if removed > 0 {
            tracing::debug!("Removed session {}", id);
        }
        Ok(removed > 0)
    }

    fn remove_where(&self, matches: impl Fn(&SessionRecord) -> bool) -> Result<usize> {
        let records = self.read_all()?;
        let (removed, kept): (Vec<_>, Vec<_>) = records.into_iter().partition(|r| matches(r));

        if removed.is_empty() {
            return Ok(0);
        }

        let parent = self.path.parent().ok_or_else(|| {
            Error::Storage(format!("path {:?} has no parent directory", self.path))
        })?;
        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            for record in &kept {
                serde_json::to_writer(&mut writer, record)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        Ok(removed.len())
    }
}
