//! Application state shared by every front end command.
//!
//! A [LifeSession] owns the store and the engine. Every accepted change goes through the same
//! path: the engine publishes a new snapshot, the profile is written back and the widget snapshot
//! is refreshed. Storage failures are logged and the session keeps the in-memory profile.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};

use crate::{
    error::ProfileError,
    progress::{
        date_math,
        engine::ProgressEngine,
        entities::{
            validate_birth_date, validate_display_name, validate_life_expectancy, Profile,
            ProgressStyle, Theme,
        },
    },
    storage::profile_store::ProfileStore,
    utils::{clock::Clock, time::Age},
    widget::WidgetData,
};

pub struct LifeSession {
    store: ProfileStore,
    engine: ProgressEngine,
    onboarding_completed: bool,
}

impl LifeSession {
    /// Loads the stored profile, or creates the first-run defaults when there is none.
    pub fn open(store: ProfileStore, clock: Arc<dyn Clock>) -> Self {
        let profile = store
            .load()
            .unwrap_or_else(|| Profile::new_default(clock.time()));
        let onboarding_completed = store.load_onboarding_completed();
        info!("Opened session, onboarding completed: {onboarding_completed}");

        Self {
            store,
            engine: ProgressEngine::new(profile, clock),
            onboarding_completed,
        }
    }

    pub fn is_onboarding_completed(&self) -> bool {
        self.onboarding_completed
    }

    pub fn profile(&self) -> Profile {
        self.engine.profile()
    }

    pub fn engine(&self) -> &ProgressEngine {
        &self.engine
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn update_birth_date(&mut self, birth_date: DateTime<Utc>) -> Result<(), ProfileError> {
        validate_birth_date(birth_date, &self.engine.clock().local_time())?;
        self.modify(|profile| profile.birth_date = birth_date);
        Ok(())
    }

    pub fn update_life_expectancy(&mut self, years: u32) -> Result<(), ProfileError> {
        validate_life_expectancy(years)?;
        self.modify(|profile| profile.life_expectancy = years);
        Ok(())
    }

    pub fn update_display_name(&mut self, name: &str) -> Result<(), ProfileError> {
        validate_display_name(name)?;
        self.modify(|profile| profile.display_name = name.trim().to_owned());
        Ok(())
    }

    pub fn update_theme(&mut self, theme: Theme) {
        self.modify(|profile| profile.theme = theme);
    }

    pub fn update_progress_style(&mut self, style: ProgressStyle) {
        self.modify(|profile| profile.progress_style = style);
    }

    /// Replaces the whole profile and marks onboarding as done.
    pub fn complete_onboarding(&mut self, mut profile: Profile) -> Result<(), ProfileError> {
        profile.validate(&self.engine.clock().local_time())?;
        profile.display_name = profile.display_name.trim().to_owned();
        self.commit(profile);

        if let Err(e) = self.store.save_onboarding_completed(true) {
            error!("Failed to persist onboarding flag {e:?}");
        }
        self.onboarding_completed = true;
        info!("Onboarding completed");
        Ok(())
    }

    /// Wipes storage and starts over with the first-run defaults.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.reset_all() {
            error!("Failed to wipe stored data {e:?}");
        }
        let profile = Profile::new_default(self.engine.clock().time());
        self.engine.on_profile_changed(profile);
        self.onboarding_completed = false;
        info!("Session reset");
    }

    pub fn widget_data(&self) -> WidgetData {
        WidgetData::new(&self.profile(), &self.engine.snapshot().life)
    }

    pub fn age(&self) -> Age {
        date_math::age(self.profile().birth_date, &self.engine.clock().local_time())
    }

    fn modify(&mut self, change: impl FnOnce(&mut Profile)) {
        let mut profile = self.profile();
        change(&mut profile);
        self.commit(profile);
    }

    #[instrument(skip_all)]
    fn commit(&mut self, profile: Profile) {
        let snapshot = self.engine.on_profile_changed(profile.clone());

        if let Err(e) = self.store.save(&profile) {
            error!("Failed to persist profile, the change only lives in this session {e:?}");
        }

        let widget = WidgetData::new(&profile, &snapshot.life);
        if let Err(e) = self.store.save_widget_data(&widget) {
            warn!("Failed to persist widget snapshot {e:?}");
        }
    }
}
