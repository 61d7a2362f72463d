//! Validation errors. Everything else in the crate propagates [anyhow::Error].

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Reasons a profile mutation is rejected. A rejected mutation leaves the stored profile
/// untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Birth date {0} is in the future")]
    BirthDateInFuture(DateTime<Utc>),

    #[error("Birth date {0} is more than {years} years ago", years = crate::progress::entities::MAX_AGE_YEARS)]
    BirthDateTooEarly(DateTime<Utc>),

    #[error("Life expectancy {value} is outside of {min}..={max}", min = .range.start(), max = .range.end())]
    LifeExpectancyOutOfRange {
        value: u32,
        range: RangeInclusive<u32>,
    },

    #[error("Display name can't be empty")]
    EmptyDisplayName,
}
