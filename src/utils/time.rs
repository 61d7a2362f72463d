use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike};

/// Returns the first instant of the day `date` falls in. When midnight doesn't exist locally (a
/// DST gap at 00:00) the wall-clock seconds since midnight are subtracted instead.
pub fn start_of_day<Tz: TimeZone>(date: &DateTime<Tz>) -> DateTime<Tz> {
    date.with_time(NaiveTime::MIN)
        .earliest()
        .unwrap_or_else(|| date.clone() - Duration::seconds(date.num_seconds_from_midnight().into()))
}

/// Returns start of the next day.
pub fn next_day_start<Tz: TimeZone>(date: &DateTime<Tz>) -> DateTime<Tz> {
    let timezone = date.timezone();
    date.date_naive()
        .succ_opt()
        .and_then(|tomorrow| {
            timezone
                .from_local_datetime(&tomorrow.and_time(NaiveTime::MIN))
                .earliest()
        })
        .unwrap_or_else(|| start_of_day(date) + Duration::days(1))
}

/// Number of days in the month `date` belongs to.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_first
        .map(|next| (next - first).num_days() as u32)
        .unwrap_or(31)
}

/// Number of days in `year`, 366 for leap years.
pub fn days_in_year(year: i32) -> u32 {
    match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year + 1, 1, 1),
    ) {
        (Some(start), Some(end)) => (end - start).num_days() as u32,
        _ => 365,
    }
}

/// Calendar distance between two dates, with the usual borrowing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub years: i32,
    pub months: u32,
    pub days: u32,
}

/// Full years, months and days from `birth` to `today`. Days borrow from the month preceding
/// `today`, months borrow from years. Returns all zeros when `today` precedes `birth`.
pub fn detailed_age(birth: NaiveDate, today: NaiveDate) -> Age {
    if today < birth {
        return Age {
            years: 0,
            months: 0,
            days: 0,
        };
    }

    let mut years = today.year() - birth.year();
    let mut months = today.month() as i32 - birth.month() as i32;
    let mut days = today.day() as i32 - birth.day() as i32;

    if days < 0 {
        months -= 1;
        let previous_month = today.with_day(1).and_then(|v| v.pred_opt()).unwrap_or(today);
        days += days_in_month(previous_month) as i32;
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    Age {
        years,
        months: months as u32,
        days: days as u32,
    }
}
