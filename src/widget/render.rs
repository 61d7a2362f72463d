use crate::{
    cli::output::{format_number, Painter},
    progress::cells::{centered_cells, trailing_year_cells, DayCell},
};

use super::{WidgetData, WidgetEntry, WidgetFamily};

const SMALL_BAR_WIDTH: usize = 16;
const LARGE_BAR_WIDTH: usize = 30;

pub fn render(family: WidgetFamily, entry: &WidgetEntry, painter: &Painter) -> String {
    match family {
        WidgetFamily::Small => render_small(&entry.data, painter),
        WidgetFamily::Medium => render_medium(&entry.data, painter),
        WidgetFamily::Large => render_large(&entry.data, painter),
    }
}

fn render_small(data: &WidgetData, painter: &Painter) -> String {
    format!(
        "{}\n{}\n{}\n{} days passed\n",
        painter.accent(&data.display_name),
        painter.accent(format!("{:.1}", data.progress_percentage)),
        painter.bar(data.progress_percentage, SMALL_BAR_WIDTH),
        format_number(data.passed_days)
    )
}

fn stats(data: &WidgetData, painter: &Painter) -> String {
    format!(
        "{} {}\n{} passed  {} left  {} total",
        painter.accent(&data.display_name),
        painter.accent(format!("{:.1}", data.progress_percentage)),
        format_number(data.passed_days),
        format_number(data.remaining_days),
        painter.dimmed(format_number(data.total_days)),
    )
}

/// Stats and the trailing year, one column per week.
fn render_medium(data: &WidgetData, painter: &Painter) -> String {
    let cells = trailing_year_cells(data.passed_days);
    format!(
        "{}\n{}\n",
        stats(data, painter),
        painter.week_grid(&cells)
    )
}

/// Stats, a bar and thirty weeks centred on today.
fn render_large(data: &WidgetData, painter: &Painter) -> String {
    let cells = centered_cells(data.passed_days);
    format!(
        "{}\n{}\n{}\n{} passed  {} today  {} ahead\n",
        stats(data, painter),
        painter.bar(data.progress_percentage, LARGE_BAR_WIDTH),
        painter.week_grid(&cells),
        painter.cell(DayCell::Passed),
        painter.cell(DayCell::Today),
        painter.cell(DayCell::Future),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::{
        cli::output::Painter,
        progress::entities::{ProgressStyle, Theme},
        utils::percentage::Percentage,
        widget::{WidgetData, WidgetEntry, WidgetFamily},
    };

    use super::render;

    fn entry(passed_days: i64) -> WidgetEntry {
        WidgetEntry {
            date: Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap(),
            data: WidgetData {
                progress_percentage: Percentage::ratio(passed_days as f64, 29_200.),
                passed_days,
                total_days: 29_200,
                remaining_days: 29_200 - passed_days,
                display_name: "Widget".into(),
                theme: Theme::ClassicBlue,
            },
        }
    }

    fn painter() -> Painter {
        Painter::new(Theme::ClassicBlue, ProgressStyle::Classic, false)
    }

    #[test]
    fn small_shows_one_decimal() {
        let out = render(WidgetFamily::Small, &entry(12_419), &painter());
        assert_eq!(
            out,
            "Widget\n42.5%\n[#######---------]\n12,419 days passed\n"
        );
    }

    #[test]
    fn medium_shows_trailing_year() {
        let out = render(WidgetFamily::Medium, &entry(100), &painter());
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Widget 0.3%");
        assert_eq!(lines[1], "100 passed  29,100 left  29,200 total");
        // 365 days make 53 week columns over 7 rows.
        assert_eq!(lines.len(), 2 + 7);
        assert_eq!(lines[2].chars().count(), 53);
        assert_eq!(out.matches('#').count(), 100);
        assert_eq!(out.matches('@').count(), 0);
    }

    #[test]
    fn large_marks_today() {
        let out = render(WidgetFamily::Large, &entry(12_419), &painter());
        let grid = out.lines().skip(3).take(7).collect::<String>();
        assert_eq!(grid.chars().count(), 210);
        assert_eq!(grid.matches('@').count(), 1);
        assert_eq!(grid.matches('#').count(), 105);
        assert!(out.ends_with("# passed  @ today  . ahead\n"));
    }
}
