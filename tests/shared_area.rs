use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use lifeprogress::{
    progress::entities::{Profile, Theme, DEFAULT_DISPLAY_NAME},
    session::LifeSession,
    storage::profile_store::ProfileStore,
    utils::clock::Clock,
    widget::{WidgetEntry, WidgetTimeline},
};
use tempfile::tempdir;
use tokio::time::Instant;

struct StoppedClock(DateTime<Utc>);

#[async_trait]
impl Clock for StoppedClock {
    fn time(&self) -> DateTime<Utc> {
        self.0
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    async fn sleep_until(&self, instant: Instant) {
        tokio::time::sleep_until(instant).await;
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap()
}

#[test]
fn widget_process_sees_application_changes() -> Result<()> {
    let dir = tempdir()?;
    let mut session = LifeSession::open(
        ProfileStore::open(dir.path()),
        Arc::new(StoppedClock(now())),
    );
    session.complete_onboarding(Profile {
        birth_date: Utc.with_ymd_and_hms(1990, 6, 15, 18, 0, 0).unwrap(),
        display_name: "Integration".into(),
        theme: Theme::WarmOrange,
        ..Profile::new_default(now())
    })?;

    // Opened independently, the way the widget binary does.
    let widget_store = ProfileStore::open(dir.path());
    let timeline = WidgetTimeline::build(&widget_store, &now());
    assert_eq!(timeline.entry.data, session.widget_data());
    assert_eq!(timeline.entry.data.passed_days, 12_419);
    assert_eq!(
        timeline.refresh_after,
        Utc.with_ymd_and_hms(2024, 6, 16, 0, 0, 0).unwrap()
    );
    assert_eq!(widget_store.load_widget_data(), Some(session.widget_data()));

    session.update_life_expectancy(100)?;
    let entry = WidgetEntry::load(&widget_store, now());
    assert_eq!(entry.data.total_days, 36_500);
    assert_eq!(entry.data.theme, Theme::WarmOrange);

    session.reset();
    let entry = WidgetEntry::load(&widget_store, now());
    assert_eq!(entry.data.display_name, DEFAULT_DISPLAY_NAME);
    assert_eq!(entry.data.passed_days, 0);
    assert!(!widget_store.load_onboarding_completed());
    Ok(())
}

#[test]
fn profile_survives_restart() -> Result<()> {
    let dir = tempdir()?;
    let profile = Profile {
        birth_date: Utc.with_ymd_and_hms(1985, 1, 31, 0, 0, 0).unwrap(),
        life_expectancy: 95,
        ..Profile::new_default(now())
    };
    {
        let mut session = LifeSession::open(
            ProfileStore::open(dir.path()),
            Arc::new(StoppedClock(now())),
        );
        session.complete_onboarding(profile.clone())?;
    }

    let session = LifeSession::open(
        ProfileStore::open(dir.path()),
        Arc::new(StoppedClock(now())),
    );
    assert!(session.is_onboarding_completed());
    assert_eq!(session.profile(), profile);
    assert_eq!(session.engine().snapshot().life.total_days, 95 * 365);
    Ok(())
}
