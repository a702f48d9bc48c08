//! Daily activity streaks.
//!
//! Streak state is an explicit value. [`StreakTracker`] reads it from an
//! injected [`KeyValueStore`], advances it, and writes it back.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::AthleteId;
use crate::config::StreakConfig;

/// Consecutive-day activity counter for one athlete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current: u32,
    pub longest: u32,
    pub last_active: Option<NaiveDate>,
}

impl StreakState {
    /// Registers activity on `today`.
    ///
    /// Repeated activity on the same day leaves the state unchanged and dates
    /// earlier than the last recorded activity are ignored.
    pub fn record(self, today: NaiveDate) -> Self {
        let current = match self.last_active {
            Some(last) if today <= last => return self,
            Some(last) if last.succ_opt() == Some(today) => self.current.saturating_add(1),
            _ => 1,
        };

        Self {
            current,
            longest: self.longest.max(current),
            last_active: Some(today),
        }
    }

    /// Streak length as seen on `today`; a missed day breaks it.
    pub fn current_as_of(&self, today: NaiveDate) -> u32 {
        match self.last_active {
            Some(last) if last == today || last.succ_opt() == Some(today) => self.current,
            _ => 0,
        }
    }
}

/// Minimal durable key/value storage the tracker persists through.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Key/value store failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("key/value store unavailable: {0}")]
    Unavailable(String),
}

/// Error raised while recording or reading a streak.
#[derive(Debug, thiserror::Error)]
pub enum StreakError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode streak state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Read-advance-write wrapper around a [`KeyValueStore`].
pub struct StreakTracker<S> {
    store: Arc<S>,
    key_prefix: String,
}

impl<S> StreakTracker<S>
where
    S: KeyValueStore,
{
    pub fn new(store: Arc<S>, config: &StreakConfig) -> Self {
        Self {
            store,
            key_prefix: config.key_prefix.clone(),
        }
    }

    pub fn key_for(&self, athlete_id: &AthleteId) -> String {
        format!("{}:{}", self.key_prefix, athlete_id)
    }

    /// Stored state, or an empty streak when nothing readable is stored.
    pub fn load(&self, athlete_id: &AthleteId) -> Result<StreakState, StreakError> {
        let key = self.key_for(athlete_id);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(StreakState::default());
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Ok(state),
            Err(error) => {
                warn!(%key, %error, "discarding unreadable streak state");
                Ok(StreakState::default())
            }
        }
    }

    pub fn record_activity(
        &self,
        athlete_id: &AthleteId,
        today: NaiveDate,
    ) -> Result<StreakState, StreakError> {
        let previous = self.load(athlete_id)?;
        let next = previous.record(today);

        if next != previous {
            let encoded = serde_json::to_string(&next)?;
            self.store.set(&self.key_for(athlete_id), encoded)?;
            debug!(athlete = %athlete_id, current = next.current, longest = next.longest, "streak advanced");
        }

        Ok(next)
    }
}
