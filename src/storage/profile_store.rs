use std::path::Path;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info, warn};

use crate::{progress::entities::Profile, widget::WidgetData};

use super::{
    key_value::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore},
    LOCAL_AREA_DIR, ONBOARDING_COMPLETED_KEY, PROFILE_KEY, SHARED_AREA_ID, WIDGET_DATA_KEY,
};

/// Reads and writes the single profile plus the onboarding flag.
///
/// Values are written into the shared area, which the widget process reads too, and into the
/// process-local area. Reads prefer the shared area.
pub struct ProfileStore {
    shared: Option<Box<dyn KeyValueStore>>,
    local: Box<dyn KeyValueStore>,
}

impl ProfileStore {
    pub fn new(shared: Option<Box<dyn KeyValueStore>>, local: Box<dyn KeyValueStore>) -> Self {
        Self { shared, local }
    }

    /// Opens both areas inside `app_dir`. A missing shared area only produces a warning.
    pub fn open(app_dir: &Path) -> Self {
        let shared = match FileKeyValueStore::new(app_dir.join(SHARED_AREA_ID)) {
            Ok(store) => Some(Box::new(store) as Box<dyn KeyValueStore>),
            Err(e) => {
                warn!(
                    "Couldn't open shared storage area {SHARED_AREA_ID}, the widget won't see updates: {e}"
                );
                None
            }
        };

        let local: Box<dyn KeyValueStore> =
            match FileKeyValueStore::new(app_dir.join(LOCAL_AREA_DIR)) {
                Ok(store) => Box::new(store),
                Err(e) => {
                    warn!("Couldn't open local storage area, changes won't survive a restart: {e}");
                    Box::new(MemoryKeyValueStore::new())
                }
            };

        Self::new(shared, local)
    }

    pub fn has_shared_area(&self) -> bool {
        self.shared.is_some()
    }

    fn areas(&self) -> impl Iterator<Item = &dyn KeyValueStore> {
        self.shared
            .as_deref()
            .into_iter()
            .chain(std::iter::once(self.local.as_ref()))
    }

    /// Returns raw bytes from the first area that has `key`.
    fn read(&self, key: &str) -> Option<Vec<u8>> {
        for area in self.areas() {
            match area.get(key) {
                Ok(Some(bytes)) => return Some(bytes),
                Ok(None) => {}
                Err(e) => error!("Failed to read {key}: {e:?}"),
            }
        }
        None
    }

    /// Tries every area and reports the first failure.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let mut first_error = None;
        for area in self.areas() {
            if let Err(e) = area.set(key, bytes) {
                error!("Failed to write {key}: {e:?}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut first_error = None;
        for area in self.areas() {
            if let Err(e) = area.remove(key) {
                error!("Failed to remove {key}: {e:?}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Undecodable values are logged and treated as missing.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = self.read(key)?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Failed to decode {key}: {e}");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)
            .inspect_err(|e| error!("Failed to encode {key}: {e}"))?;
        self.write(key, &bytes)
    }

    /// `None` on first run.
    pub fn load(&self) -> Option<Profile> {
        let profile = self.read_json(PROFILE_KEY);
        if profile.is_none() {
            info!("No stored profile found");
        }
        profile
    }

    pub fn save(&self, profile: &Profile) -> Result<()> {
        self.write_json(PROFILE_KEY, profile)?;
        info!("Saved profile");
        Ok(())
    }

    pub fn delete_profile(&self) -> Result<()> {
        self.remove(PROFILE_KEY)?;
        info!("Deleted profile");
        Ok(())
    }

    pub fn load_onboarding_completed(&self) -> bool {
        self.read_json(ONBOARDING_COMPLETED_KEY).unwrap_or(false)
    }

    pub fn save_onboarding_completed(&self, completed: bool) -> Result<()> {
        self.write_json(ONBOARDING_COMPLETED_KEY, &completed)
    }

    pub fn load_widget_data(&self) -> Option<WidgetData> {
        self.read_json(WIDGET_DATA_KEY)
    }

    pub fn save_widget_data(&self, data: &WidgetData) -> Result<()> {
        self.write_json(WIDGET_DATA_KEY, data)
    }

    /// Wipes the profile and the widget snapshot and clears the onboarding flag. Every step is
    /// attempted even if an earlier one fails.
    pub fn reset_all(&self) -> Result<()> {
        let profile = self.delete_profile();
        let widget = self.remove(WIDGET_DATA_KEY);
        let onboarding = self.save_onboarding_completed(false);
        info!("Reset all stored data");
        profile.and(widget).and(onboarding)
    }

    /// Human readable description of what is stored. Debugging aid.
    pub fn dump(&self) -> String {
        let shared = if self.has_shared_area() { "available" } else { "missing" };
        let profile = match self.load() {
            Some(profile) => format!(
                "profile:\n  birth date: {}\n  life expectancy: {} years\n  display name: {}\n  \
                 theme: {}\n  progress style: {}",
                profile.birth_date,
                profile.life_expectancy,
                profile.display_name,
                profile.theme,
                profile.progress_style
            ),
            None => "profile: none".to_string(),
        };
        let widget = match self.load_widget_data() {
            Some(data) => format!(
                "widget snapshot: {} of {} days passed ({})",
                data.passed_days, data.total_days, data.progress_percentage
            ),
            None => "widget snapshot: none".to_string(),
        };
        format!(
            "shared area: {shared}\n{profile}\nonboarding completed: {}\n{widget}\n",
            self.load_onboarding_completed()
        )
    }
}
