//! Progression logic for experience, levels and streaks.
//!
//! Every completed session grants a fixed amount of experience. When the new
//! total reaches `level * level_xp_step` the user advances one level; the
//! experience total is cumulative and never reset. At most one level is
//! gained per session, even if the total would satisfy two thresholds.

use crate::config::ProgressionConfig;
use crate::{ProgressState, SessionRecord};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

/// Message emitted to the presentation layer after a session is recorded
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    SessionLogged { xp_gained: u32 },
    LevelUp { level: u32 },
}

/// Result of applying one completed session to a progress state
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SessionOutcome {
    pub xp_gained: u32,
    pub leveled_up_to: Option<u32>,
    pub progress: ProgressState,
    pub notifications: Vec<Notification>,
}

impl ProgressState {
    /// Experience needed to leave the current level
    pub fn threshold(&self, config: &ProgressionConfig) -> u32 {
        self.level.saturating_mul(config.level_xp_step)
    }

    /// Apply one completed session
    pub fn record_session(&mut self, config: &ProgressionConfig) -> SessionOutcome {
        let xp_gained = config.xp_per_session;
        let threshold = self.threshold(config);

        self.experience = self.experience.saturating_add(xp_gained);

        let mut notifications = vec![Notification::SessionLogged { xp_gained }];
        let leveled_up_to = if self.experience >= threshold {
            self.level += 1;
            notifications.push(Notification::LevelUp { level: self.level });
            tracing::info!(
                "Level up: now level {} with {} xp",
                self.level,
                self.experience
            );
            Some(self.level)
        } else {
            tracing::debug!(
                "Session recorded: {} / {} xp at level {}",
                self.experience,
                threshold,
                self.level
            );
            None
        };

        SessionOutcome {
            xp_gained,
            leveled_up_to,
            progress: *self,
            notifications,
        }
    }
}

/// Count consecutive training days ending today
///
/// Walks backward from `today`, counting days with at least one session and
/// stopping at the first empty day. If today itself is empty the walk still
/// checks yesterday, so an ongoing streak isn't zeroed before today's session
/// is logged.
pub fn current_streak(sessions: &[SessionRecord], today: NaiveDate) -> u32 {
    let trained: HashSet<NaiveDate> = sessions.iter().map(|s| s.date).collect();

    let mut streak = 0;
    let mut check_date = today;
    loop {
        if trained.contains(&check_date) {
            streak += 1;
        } else if !(streak == 0 && check_date == today) {
            break;
        }
        check_date = match check_date.checked_sub_signed(Duration::days(1)) {
            Some(d) => d,
            None => break,
        };
    }
    streak
}
