//!  Storage is organized through [profile_store::ProfileStore].
//!  The basic idea is:
//!   - There are two key-value areas: a shared one, read by the widget process as well, and a
//!     local one private to the application.
//!   - Every key is a separate JSON file, so single-key writes are atomic and there is no
//!     transaction across keys. The last writer wins.
//!   - Only the application writes; the widget process only reads.

pub mod key_value;
pub mod profile_store;

/// Identifier of the area shared between the application and the widget process.
pub const SHARED_AREA_ID: &str = "group.com.lifeprogress.app";
/// Directory of the application-private area.
pub const LOCAL_AREA_DIR: &str = "local";

pub const PROFILE_KEY: &str = "user_life_data";
pub const ONBOARDING_COMPLETED_KEY: &str = "is_onboarding_completed";
pub const WIDGET_DATA_KEY: &str = "widget_data";
