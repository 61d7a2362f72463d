//! Calendar arithmetic behind every number the application shows.
//!
//! Life totals use a fixed 365 day year. Everything inside a year (today, week, month, year)
//! follows the local calendar of `now`, so changing time zones can move those numbers backwards.

use chrono::{DateTime, Datelike, Months, TimeZone, Utc};

use crate::utils::{
    percentage::Percentage,
    time::{days_in_month, days_in_year, detailed_age, start_of_day, Age},
};

use super::entities::{DailyProgress, LifeProgress, Profile, MAX_AGE_YEARS};

pub use crate::utils::time::next_day_start as next_midnight;

const SECONDS_PER_DAY: f64 = 86_400.;
const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_WEEK: f64 = 7.;
const HOURS_PER_DAY: f64 = 24.;

pub fn total_days(life_expectancy: u32) -> i64 {
    i64::from(life_expectancy) * DAYS_PER_YEAR
}

/// Whole days between birth and now. Never negative.
pub fn passed_days(birth_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - birth_date).num_days().max(0)
}

pub fn remaining_days(total_days: i64, passed_days: i64) -> i64 {
    total_days - passed_days
}

pub fn progress_percentage(passed_days: i64, total_days: i64) -> Percentage {
    Percentage::ratio(passed_days as f64, total_days as f64)
}

/// Share of the local day that has passed, clamped to `[0, 100]` so 25 hour days stay in range.
pub fn today_progress<Tz: TimeZone>(now: &DateTime<Tz>) -> Percentage {
    let elapsed = now.clone() - start_of_day(now);
    let seconds = elapsed.num_milliseconds() as f64 / 1000.;
    Percentage::ratio(seconds, SECONDS_PER_DAY).clamped()
}

/// Monday counts as day 1 and Sunday as day 7, regardless of locale.
pub fn week_progress<Tz: TimeZone>(now: &DateTime<Tz>) -> Percentage {
    let weekday = now.weekday().number_from_monday();
    Percentage::ratio(weekday.into(), DAYS_PER_WEEK)
}

pub fn month_progress<Tz: TimeZone>(now: &DateTime<Tz>) -> Percentage {
    let date = now.date_naive();
    Percentage::ratio(date.day().into(), days_in_month(date).into())
}

pub fn year_progress<Tz: TimeZone>(now: &DateTime<Tz>) -> Percentage {
    let date = now.date_naive();
    Percentage::ratio(date.ordinal().into(), days_in_year(date.year()).into())
}

pub fn today_remaining_hours(today_progress: Percentage) -> i64 {
    today_progress.remaining_units(HOURS_PER_DAY)
}

pub fn week_remaining_days(week_progress: Percentage) -> i64 {
    week_progress.remaining_units(DAYS_PER_WEEK)
}

pub fn month_remaining_days(month_progress: Percentage, days_in_month: u32) -> i64 {
    month_progress.remaining_units(days_in_month.into())
}

pub fn year_remaining_days(year_progress: Percentage, days_in_year: u32) -> i64 {
    year_progress.remaining_units(days_in_year.into())
}

/// A birth date is valid if it isn't in the future and isn't more than 150 calendar years
/// back. When the lower bound can't be represented only the upper bound is checked.
pub fn is_valid_birth_date<Tz: TimeZone>(date: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    if date > now.with_timezone(&Utc) {
        return false;
    }
    match earliest_birth_date(now) {
        Some(earliest) => date >= earliest,
        None => true,
    }
}

/// The local wall time 150 years back can be repeated or skipped by a transition. A repeated
/// time resolves to its earlier instant, a skipped one falls back to UTC calendar arithmetic.
fn earliest_birth_date<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
    let span = Months::new(MAX_AGE_YEARS * 12);
    now.naive_local()
        .checked_sub_months(span)
        .and_then(|local| now.timezone().from_local_datetime(&local).earliest())
        .map(|earliest| earliest.with_timezone(&Utc))
        .or_else(|| now.with_timezone(&Utc).checked_sub_months(span))
}

/// Age on the local calendar of `now`.
pub fn age<Tz: TimeZone>(birth_date: DateTime<Utc>, now: &DateTime<Tz>) -> Age {
    let birth = birth_date.with_timezone(&now.timezone()).date_naive();
    detailed_age(birth, now.date_naive())
}

/// Completed years.
pub fn age_years<Tz: TimeZone>(birth_date: DateTime<Utc>, now: &DateTime<Tz>) -> i32 {
    age(birth_date, now).years
}

pub fn life_progress<Tz: TimeZone>(profile: &Profile, now: &DateTime<Tz>) -> LifeProgress {
    let total_days = total_days(profile.life_expectancy);
    let passed_days = passed_days(profile.birth_date, now.with_timezone(&Utc));
    LifeProgress {
        total_days,
        passed_days,
        remaining_days: remaining_days(total_days, passed_days),
        progress_percentage: progress_percentage(passed_days, total_days),
    }
}

pub fn daily_progress<Tz: TimeZone>(now: &DateTime<Tz>) -> DailyProgress {
    let date = now.date_naive();
    DailyProgress {
        today_progress: today_progress(now),
        week_progress: week_progress(now),
        month_progress: month_progress(now),
        year_progress: year_progress(now),
        days_in_month: days_in_month(date),
        days_in_year: days_in_year(date.year()),
    }
}
