use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::utils::clock::Clock;

use super::{
    date_math,
    entities::{DailyProgress, LifeProgress, Profile},
};

/// Everything the presentation layer needs, computed for one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub life: LifeProgress,
    pub daily: DailyProgress,
    pub computed_at: DateTime<Utc>,
}

/// Keeps the current [ProgressSnapshot] consistent with the profile and wall-clock time, and
/// notifies subscribers every time a new snapshot is published. Cloning produces another handle
/// to the same engine.
#[derive(Clone)]
pub struct ProgressEngine {
    inner: Arc<EngineState>,
}

struct EngineState {
    profile: Mutex<Profile>,
    snapshot: watch::Sender<ProgressSnapshot>,
    clock: Arc<dyn Clock>,
}

impl ProgressEngine {
    pub fn new(profile: Profile, clock: Arc<dyn Clock>) -> Self {
        let initial = Self::recompute(&profile, &clock.local_time());
        let (snapshot, _) = watch::channel(initial);
        Self {
            inner: Arc::new(EngineState {
                profile: Mutex::new(profile),
                snapshot,
                clock,
            }),
        }
    }

    /// Pure computation of both snapshots. Same input always yields the same output.
    pub fn recompute<Tz: TimeZone>(profile: &Profile, now: &DateTime<Tz>) -> ProgressSnapshot {
        ProgressSnapshot {
            life: date_math::life_progress(profile, now),
            daily: date_math::daily_progress(now),
            computed_at: now.with_timezone(&Utc),
        }
    }

    /// Recomputes for the current time and publishes the result.
    #[instrument(skip(self))]
    pub fn refresh(&self) -> ProgressSnapshot {
        let profile = self.lock_profile();
        self.publish(&profile)
    }

    /// Replaces the profile and immediately publishes a snapshot computed from it.
    pub fn on_profile_changed(&self, profile: Profile) -> ProgressSnapshot {
        let mut current = self.lock_profile();
        *current = profile;
        self.publish(&current)
    }

    pub fn profile(&self) -> Profile {
        self.lock_profile().clone()
    }

    fn lock_profile(&self) -> MutexGuard<'_, Profile> {
        self.inner
            .profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Must be called with the profile lock held, so a snapshot of an older profile can never
    /// replace one of a newer profile.
    fn publish(&self, profile: &Profile) -> ProgressSnapshot {
        let snapshot = Self::recompute(profile, &self.inner.clock.local_time());
        debug!(
            "Refreshed progress: {} of life, {} of today",
            snapshot.life.progress_percentage, snapshot.daily.today_progress
        );
        self.inner.snapshot.send_replace(snapshot);
        snapshot
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        *self.inner.snapshot.borrow()
    }

    /// Receiver that always holds the newest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.inner.snapshot.subscribe()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.inner.clock.clone()
    }
}
