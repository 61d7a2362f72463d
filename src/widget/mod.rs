//! The widget surface. It runs as a separate, read-only process: it loads the profile from the
//! shared area, computes a [WidgetData] snapshot and renders it in one of three sizes. The next
//! render is requested for the following midnight.

pub mod args;
pub mod render;

use std::{fmt::Display, time::Duration};

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    progress::{
        date_math,
        entities::{LifeProgress, Profile, Theme},
    },
    storage::profile_store::ProfileStore,
    utils::{clock::Clock, percentage::Percentage},
};

/// Everything a widget shows. Serialized the same way as the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetData {
    pub progress_percentage: Percentage,
    pub passed_days: i64,
    pub total_days: i64,
    pub remaining_days: i64,
    pub display_name: String,
    pub theme: Theme,
}

impl WidgetData {
    pub fn new(profile: &Profile, life: &LifeProgress) -> Self {
        Self {
            progress_percentage: life.progress_percentage,
            passed_days: life.passed_days,
            total_days: life.total_days,
            remaining_days: life.remaining_days,
            display_name: profile.display_name.clone(),
            theme: profile.theme,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WidgetFamily {
    #[default]
    Small,
    Medium,
    Large,
}

impl Display for WidgetFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetFamily::Small => write!(f, "small"),
            WidgetFamily::Medium => write!(f, "medium"),
            WidgetFamily::Large => write!(f, "large"),
        }
    }
}

/// Data for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetEntry {
    pub date: DateTime<Utc>,
    pub data: WidgetData,
}

impl WidgetEntry {
    /// Computes fresh data from the stored profile. Without a profile the first-run defaults are
    /// shown.
    pub fn load(store: &ProfileStore, now: DateTime<Utc>) -> Self {
        let profile = store.load().unwrap_or_else(|| {
            info!("Rendering widget from default profile");
            Profile::new_default(now)
        });
        let life = date_math::life_progress(&profile, &now);
        Self {
            date: now,
            data: WidgetData::new(&profile, &life),
        }
    }
}

/// A single entry plus the moment the host should ask for the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetTimeline<Tz: TimeZone> {
    pub entry: WidgetEntry,
    pub refresh_after: DateTime<Tz>,
}

impl<Tz: TimeZone> WidgetTimeline<Tz> {
    pub fn build(store: &ProfileStore, now: &DateTime<Tz>) -> Self {
        Self {
            entry: WidgetEntry::load(store, now.with_timezone(&Utc)),
            refresh_after: date_math::next_midnight(now),
        }
    }
}

/// Hands a fresh timeline to `emit`. In watch mode this repeats every time the previous
/// timeline asks for a refresh, until `shutdown` is cancelled. Never writes to `store`.
pub async fn run_widget<Tz: TimeZone>(
    store: &ProfileStore,
    clock: &dyn Clock,
    zone: &Tz,
    watch: bool,
    shutdown: CancellationToken,
    mut emit: impl FnMut(&WidgetTimeline<Tz>) -> Result<()>,
) -> Result<()> {
    loop {
        let timeline = WidgetTimeline::build(store, &clock.time().with_timezone(zone));
        emit(&timeline)?;
        if !watch {
            return Ok(());
        }

        let wait = (timeline.refresh_after.with_timezone(&Utc) - clock.time())
            .to_std()
            .unwrap_or(Duration::ZERO);
        debug!("Next widget refresh in {wait:?}");

        select! {
            _ = shutdown.cancelled() => {
                info!("Widget stopped");
                return Ok(());
            }
            _ = clock.sleep(wait) => ()
        }
    }
}
