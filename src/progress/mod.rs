//! Progress computations.
//!  - [date_math] turns a profile and a point in time into numbers.
//!  - [engine::ProgressEngine] owns the latest snapshot and publishes changes.
//!  - [refresh::RefreshTask] keeps the engine current while the application is visible.

pub mod cells;
pub mod date_math;
pub mod engine;
pub mod entities;
pub mod refresh;
