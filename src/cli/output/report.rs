use chrono::Local;

use crate::{
    progress::{
        cells::{group_weeks, life_cells},
        engine::ProgressSnapshot,
        entities::{LifeProgress, Period, Profile},
    },
    utils::time::Age,
};

use super::{format_number, Painter};

const LIFE_BAR_WIDTH: usize = 40;
const PERIOD_BAR_WIDTH: usize = 24;
/// One row of the life grid is one year of weeks.
const WEEKS_PER_ROW: usize = 52;

/// Full overview printed by `show`.
pub fn progress_report(
    profile: &Profile,
    snapshot: &ProgressSnapshot,
    age: Age,
    painter: &Painter,
) -> String {
    let life = &snapshot.life;
    let periods = Period::ALL
        .iter()
        .map(|period| period_line(snapshot, *period, painter))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n{} {}\n{}\nAge {} years, {} months, {} days {}\n\n{periods}\n",
        painter.accent(&profile.display_name),
        painter.bar(life.progress_percentage, LIFE_BAR_WIDTH),
        painter.accent(format!("{:.2}", life.progress_percentage)),
        life_summary(life),
        age.years,
        age.months,
        age.days,
        painter.dimmed(format!(
            "(born {}, expecting {} years)",
            profile.birth_date.with_timezone(&Local).format("%Y-%m-%d"),
            profile.life_expectancy
        ))
    )
}

pub fn life_summary(life: &LifeProgress) -> String {
    format!(
        "{} days passed, {} days left of {}",
        format_number(life.passed_days),
        format_number(life.remaining_days),
        format_number(life.total_days)
    )
}

fn period_line(snapshot: &ProgressSnapshot, period: Period, painter: &Painter) -> String {
    let progress = snapshot.daily.progress(period);
    format!(
        "{:<11}{} {:>7} {}",
        period.display_name(),
        painter.bar(progress, PERIOD_BAR_WIDTH),
        format!("{progress:.1}"),
        painter.dimmed(snapshot.daily.remaining(period))
    )
}

/// Whole expected lifespan, one cell per week and one row per year.
pub fn life_grid(life: &LifeProgress, painter: &Painter) -> String {
    let weeks = group_weeks(&life_cells(life.passed_days, life.total_days));
    painter.grid(&weeks, WEEKS_PER_ROW)
}

/// Compact single line printed by `watch` on every refresh.
pub fn snapshot_line(snapshot: &ProgressSnapshot, painter: &Painter) -> String {
    format!(
        "{} life {}  today {:.1}  week {:.1}  month {:.1}  year {:.1}",
        snapshot
            .computed_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M"),
        painter.accent(format!("{:.4}", snapshot.life.progress_percentage)),
        snapshot.daily.today_progress,
        snapshot.daily.week_progress,
        snapshot.daily.month_progress,
        snapshot.daily.year_progress,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::{
        cli::output::Painter,
        progress::{
            engine::ProgressEngine,
            entities::{Profile, ProgressStyle, Theme},
        },
        utils::time::Age,
    };

    use super::{life_grid, life_summary, progress_report, snapshot_line};

    fn profile() -> Profile {
        Profile {
            birth_date: Utc.with_ymd_and_hms(1990, 6, 15, 0, 0, 0).unwrap(),
            display_name: "Report".into(),
            ..Profile::new_default(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap())
        }
    }

    fn painter() -> Painter {
        Painter::new(Theme::ClassicBlue, ProgressStyle::Classic, false)
    }

    #[test]
    fn report_lists_life_and_periods() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        let snapshot = ProgressEngine::recompute(&profile(), &now);
        let report = progress_report(
            &profile(),
            &snapshot,
            Age {
                years: 34,
                months: 0,
                days: 0,
            },
            &painter(),
        );

        assert!(report.starts_with("Report\n"));
        assert!(report.contains("42.53%"));
        assert!(report.contains("12,419 days passed, 16,781 days left of 29,200"));
        assert!(report.contains("Age 34 years, 0 months, 0 days"));
        for period in ["Today", "This week", "This month", "This year"] {
            assert!(report.contains(period), "missing {period}");
        }

        let lines = report.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4 + 1 + 4);
        assert!(lines[3].starts_with("Age 34 years"));
        assert_eq!(lines[4], "");
        assert!(lines[5].contains("Today"));
        assert!(lines[8].contains("This year"));
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn summary_keeps_negative_remaining() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        let mut profile = profile();
        profile.birth_date = Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap();
        profile.life_expectancy = 50;
        let snapshot = ProgressEngine::recompute(&profile, &now);
        assert!(life_summary(&snapshot.life).contains("days left of 18,250"));
        assert!(snapshot.life.remaining_days < 0);
        assert!(life_summary(&snapshot.life).contains(", -"));
    }

    #[test]
    fn grid_has_a_row_per_year() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        let snapshot = ProgressEngine::recompute(&profile(), &now);
        let grid = life_grid(&snapshot.life, &painter());
        // 29200 days are 4172 weeks (the last one partial), 81 rows.
        assert_eq!(grid.lines().count(), 81);
        assert_eq!(grid.matches('@').count(), 1);
        assert!(grid.lines().all(|row| row.chars().count() <= 52));
    }

    #[test]
    fn watch_line_mentions_every_period() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        let snapshot = ProgressEngine::recompute(&profile(), &now);
        let line = snapshot_line(&snapshot, &painter());
        assert!(line.contains("life 42.5308%"));
        assert!(line.contains("week"));
        assert!(line.contains("year"));
    }
}
