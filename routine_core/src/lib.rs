#![forbid(unsafe_code)]

//! Core domain model and business logic for the routine system.
//!
//! This crate provides:
//! - Domain types (profiles, plans, progress, sessions)
//! - The exercise catalog and media resolution
//! - Program generation and schedule projection
//! - Progression (experience, levels, streaks) and the body weight log
//! - Persistence (file store with per-user locking, session log, CSV export)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod generator;
pub mod schedule;
pub mod progression;
pub mod state;
pub mod sessions;
pub mod store;
pub mod history;
pub mod weights;
pub mod export;
pub mod service;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, Catalog};
pub use config::Config;
pub use generator::generate;
pub use progression::{current_streak, Notification, SessionOutcome};
pub use schedule::{parse_date, today, week_view, WeekDay};
pub use store::{
    FileStore, PlanStore, ProfileStore, ProgressStore, SessionStore, UserLocking, WeightStore,
};
pub use weights::WeightEntry;
pub use service::{Stats, Trainer};
