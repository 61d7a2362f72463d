//! Shows how much of an expected lifetime, and of the current day, week, month and year, has
//! already passed. A command line front end keeps the profile up to date while a separate,
//! read-only widget process draws the same numbers from the shared storage area.

pub mod cli;
pub mod error;
pub mod progress;
pub mod session;
pub mod storage;
pub mod utils;
pub mod widget;
