//! Day-cell windows used by the calendar grids. Day `0` is the birth day, day `passed_days` is
//! today.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    Passed,
    Today,
    Future,
}

/// Cells shown in the medium widget: the trailing year.
pub const TRAILING_WINDOW_DAYS: i64 = 365;
/// Cells shown in the large widget: 30 weeks centred on today.
pub const CENTERED_WINDOW_DAYS: i64 = 210;

/// One cell per day of the expected lifespan.
pub fn life_cells(passed_days: i64, total_days: i64) -> Vec<DayCell> {
    (0..total_days.max(0))
        .map(|day| {
            if day < passed_days {
                DayCell::Passed
            } else if day == passed_days {
                DayCell::Today
            } else {
                DayCell::Future
            }
        })
        .collect()
}

/// Folds days into weeks. A week containing today shows as today, a week that is entirely over
/// shows as passed.
pub fn group_weeks(cells: &[DayCell]) -> Vec<DayCell> {
    cells
        .chunks(7)
        .map(|week| {
            if week.contains(&DayCell::Today) {
                DayCell::Today
            } else if week.iter().all(|v| *v == DayCell::Passed) {
                DayCell::Passed
            } else {
                DayCell::Future
            }
        })
        .collect()
}

/// The 365 days before today. Days before birth show as future.
pub fn trailing_year_cells(passed_days: i64) -> Vec<DayCell> {
    (0..TRAILING_WINDOW_DAYS)
        .map(|index| {
            let day = passed_days - (TRAILING_WINDOW_DAYS - index);
            if day >= 0 && day < passed_days {
                DayCell::Passed
            } else {
                DayCell::Future
            }
        })
        .collect()
}

/// 105 days on either side of today, today in the middle.
pub fn centered_cells(passed_days: i64) -> Vec<DayCell> {
    let center = CENTERED_WINDOW_DAYS / 2;
    (0..CENTERED_WINDOW_DAYS)
        .map(|index| {
            let offset = index - center;
            let day = passed_days + offset;
            if offset == 0 {
                DayCell::Today
            } else if day >= 0 && day <= passed_days {
                DayCell::Passed
            } else {
                DayCell::Future
            }
        })
        .collect()
}
