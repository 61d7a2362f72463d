use std::{fmt::Display, ops::RangeInclusive};

use chrono::{DateTime, TimeZone, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{error::ProfileError, utils::percentage::Percentage};

use super::date_math;

pub const DEFAULT_LIFE_EXPECTANCY: u32 = 80;
pub const LIFE_EXPECTANCY_RANGE: RangeInclusive<u32> = 50..=120;
pub const DEFAULT_DISPLAY_NAME: &str = "My Life";
/// Birth dates further back than this are rejected.
pub const MAX_AGE_YEARS: u32 = 150;

/// The persisted user configuration. Exactly one exists per installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub birth_date: DateTime<Utc>,
    pub life_expectancy: u32,
    pub display_name: String,
    pub theme: Theme,
    pub progress_style: ProgressStyle,
}

impl Profile {
    /// Profile used on first run, before the user went through setup.
    pub fn new_default(now: DateTime<Utc>) -> Self {
        Self {
            birth_date: now,
            life_expectancy: DEFAULT_LIFE_EXPECTANCY,
            display_name: DEFAULT_DISPLAY_NAME.into(),
            theme: Theme::default(),
            progress_style: ProgressStyle::default(),
        }
    }

    pub fn validate<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<(), ProfileError> {
        validate_birth_date(self.birth_date, now)?;
        validate_life_expectancy(self.life_expectancy)?;
        validate_display_name(&self.display_name)?;
        Ok(())
    }
}

pub fn validate_birth_date<Tz: TimeZone>(
    birth_date: DateTime<Utc>,
    now: &DateTime<Tz>,
) -> Result<(), ProfileError> {
    if birth_date > now.with_timezone(&Utc) {
        return Err(ProfileError::BirthDateInFuture(birth_date));
    }
    if !date_math::is_valid_birth_date(birth_date, now) {
        return Err(ProfileError::BirthDateTooEarly(birth_date));
    }
    Ok(())
}

pub fn validate_life_expectancy(years: u32) -> Result<(), ProfileError> {
    if LIFE_EXPECTANCY_RANGE.contains(&years) {
        Ok(())
    } else {
        Err(ProfileError::LifeExpectancyOutOfRange {
            value: years,
            range: LIFE_EXPECTANCY_RANGE,
        })
    }
}

pub fn validate_display_name(name: &str) -> Result<(), ProfileError> {
    if name.trim().is_empty() {
        Err(ProfileError::EmptyDisplayName)
    } else {
        Ok(())
    }
}

/// Colour scheme applied to grids and bars.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    ClassicBlue,
    WarmOrange,
    ForestGreen,
    MinimalBlackWhite,
}

/// The four colours every theme carries, as `#RRGGBB` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub passed: &'static str,
    pub future: &'static str,
    pub gradient_start: &'static str,
    pub gradient_end: &'static str,
}

impl Theme {
    pub fn palette(self) -> ThemePalette {
        match self {
            Theme::ClassicBlue => ThemePalette {
                passed: "#1E3A8A",
                future: "#DBEAFE",
                gradient_start: "#3B82F6",
                gradient_end: "#1E40AF",
            },
            Theme::WarmOrange => ThemePalette {
                passed: "#C2410C",
                future: "#FED7AA",
                gradient_start: "#F97316",
                gradient_end: "#EA580C",
            },
            Theme::ForestGreen => ThemePalette {
                passed: "#065F46",
                future: "#D1FAE5",
                gradient_start: "#10B981",
                gradient_end: "#059669",
            },
            Theme::MinimalBlackWhite => ThemePalette {
                passed: "#000000",
                future: "#F3F4F6",
                gradient_start: "#6B7280",
                gradient_end: "#374151",
            },
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::ClassicBlue => write!(f, "classic-blue"),
            Theme::WarmOrange => write!(f, "warm-orange"),
            Theme::ForestGreen => write!(f, "forest-green"),
            Theme::MinimalBlackWhite => write!(f, "minimal-black-white"),
        }
    }
}

/// Parses `#RGB`, `#RRGGBB` and `#AARRGGBB` (alpha ignored). Anything else is black.
pub fn parse_hex_color(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim().trim_start_matches('#');
    let Ok(value) = u32::from_str_radix(hex, 16) else {
        return (0, 0, 0);
    };
    match hex.len() {
        3 => (
            ((value >> 8) & 0xF) as u8 * 17,
            ((value >> 4) & 0xF) as u8 * 17,
            (value & 0xF) as u8 * 17,
        ),
        6 | 8 => (
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        ),
        _ => (0, 0, 0),
    }
}

/// How progress bars are drawn. Purely a rendering hint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum ProgressStyle {
    #[default]
    Classic,
    Charging,
    Gradient,
}

impl Display for ProgressStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressStyle::Classic => write!(f, "classic"),
            ProgressStyle::Charging => write!(f, "charging"),
            ProgressStyle::Gradient => write!(f, "gradient"),
        }
    }
}

/// Progress through the whole expected lifespan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeProgress {
    pub total_days: i64,
    pub passed_days: i64,
    /// Goes negative once the expected lifespan is exceeded.
    pub remaining_days: i64,
    pub progress_percentage: Percentage,
}

/// Progress through the current day, week, month and year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub today_progress: Percentage,
    pub week_progress: Percentage,
    pub month_progress: Percentage,
    pub year_progress: Percentage,
    pub days_in_month: u32,
    pub days_in_year: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Today, Period::Week, Period::Month, Period::Year];

    pub fn display_name(self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Week => "This week",
            Period::Month => "This month",
            Period::Year => "This year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Hours(i64),
    Days(i64),
}

impl Display for Remaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Remaining::Hours(hours) => write!(f, "{hours} hours left"),
            Remaining::Days(days) => write!(f, "{days} days left"),
        }
    }
}

impl DailyProgress {
    pub fn progress(&self, period: Period) -> Percentage {
        match period {
            Period::Today => self.today_progress,
            Period::Week => self.week_progress,
            Period::Month => self.month_progress,
            Period::Year => self.year_progress,
        }
    }

    pub fn remaining(&self, period: Period) -> Remaining {
        match period {
            Period::Today => Remaining::Hours(date_math::today_remaining_hours(self.today_progress)),
            Period::Week => Remaining::Days(date_math::week_remaining_days(self.week_progress)),
            Period::Month => Remaining::Days(date_math::month_remaining_days(
                self.month_progress,
                self.days_in_month,
            )),
            Period::Year => Remaining::Days(date_math::year_remaining_days(
                self.year_progress,
                self.days_in_year,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::error::ProfileError;

    use super::{parse_hex_color, Profile, Theme};

    #[test]
    fn profile_json_uses_camel_case() -> anyhow::Result<()> {
        let profile = Profile::new_default(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap());
        let json = serde_json::to_value(&profile)?;
        assert_eq!(json["lifeExpectancy"], 80);
        assert_eq!(json["displayName"], "My Life");
        assert_eq!(json["theme"], "classicBlue");
        assert_eq!(json["progressStyle"], "classic");
        assert!(json["birthDate"].as_str().unwrap().starts_with("2024-06-15"));
        Ok(())
    }

    #[test]
    fn validation_rejects_each_field() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let valid = Profile {
            birth_date: now - Duration::days(365 * 30),
            ..Profile::new_default(now)
        };
        assert_eq!(valid.validate(&now), Ok(()));

        let future = Profile {
            birth_date: now + Duration::days(1),
            ..valid.clone()
        };
        assert!(matches!(
            future.validate(&now),
            Err(ProfileError::BirthDateInFuture(_))
        ));

        let ancient = Profile {
            birth_date: now - Duration::days(365 * 200),
            ..valid.clone()
        };
        assert!(matches!(
            ancient.validate(&now),
            Err(ProfileError::BirthDateTooEarly(_))
        ));

        let short = Profile {
            life_expectancy: 49,
            ..valid.clone()
        };
        assert!(matches!(
            short.validate(&now),
            Err(ProfileError::LifeExpectancyOutOfRange { value: 49, .. })
        ));

        let unnamed = Profile {
            display_name: "   ".into(),
            ..valid
        };
        assert_eq!(unnamed.validate(&now), Err(ProfileError::EmptyDisplayName));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color(Theme::ClassicBlue.palette().passed), (0x1E, 0x3A, 0x8A));
        assert_eq!(parse_hex_color("#fff"), (255, 255, 255));
        assert_eq!(parse_hex_color("80102030"), (0x10, 0x20, 0x30));
        assert_eq!(parse_hex_color("nope"), (0, 0, 0));
    }
}
