pub mod report;

use std::fmt::Display;

use ansi_term::{Colour, Style};

use crate::{
    progress::{
        cells::DayCell,
        entities::{parse_hex_color, ProgressStyle, Theme},
    },
    utils::percentage::Percentage,
};

/// Rows used when cells are laid out week by week.
const DAYS_PER_COLUMN: usize = 7;

/// Draws bars, cells and highlights in the colours of a [Theme]. Without colour every glyph falls
/// back to plain ASCII so the output can be piped.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    theme: Theme,
    style: ProgressStyle,
    colored: bool,
}

impl Painter {
    pub fn new(theme: Theme, style: ProgressStyle, colored: bool) -> Self {
        Self {
            theme,
            style,
            colored,
        }
    }

    pub fn accent(&self, text: impl Display) -> String {
        if !self.colored {
            return text.to_string();
        }
        colour(self.theme.palette().gradient_start)
            .bold()
            .paint(text.to_string())
            .to_string()
    }

    pub fn dimmed(&self, text: impl Display) -> String {
        if !self.colored {
            return text.to_string();
        }
        Style::new().dimmed().paint(text.to_string()).to_string()
    }

    /// `width` glyphs wide, not counting the brackets.
    pub fn bar(&self, percentage: Percentage, width: usize) -> String {
        let filled = ((percentage.fraction() * width as f64).round() as usize).min(width);
        let empty = width - filled;

        if !self.colored {
            let (full, blank) = match self.style {
                ProgressStyle::Charging => ('=', ' '),
                ProgressStyle::Classic | ProgressStyle::Gradient => ('#', '-'),
            };
            return format!(
                "[{}{}]",
                full.to_string().repeat(filled),
                blank.to_string().repeat(empty)
            );
        }

        let palette = self.theme.palette();
        let passed = colour(palette.passed);
        let future = colour(palette.future);
        let (full_glyph, blank_glyph) = match self.style {
            ProgressStyle::Charging => ("▰", "▱"),
            ProgressStyle::Classic | ProgressStyle::Gradient => ("█", "░"),
        };

        let full = match self.style {
            ProgressStyle::Gradient => {
                let start = parse_hex_color(palette.gradient_start);
                let end = parse_hex_color(palette.gradient_end);
                (0..filled)
                    .map(|i| {
                        let t = if width > 1 {
                            i as f64 / (width - 1) as f64
                        } else {
                            0.
                        };
                        lerp(start, end, t).paint(full_glyph).to_string()
                    })
                    .collect::<String>()
            }
            ProgressStyle::Classic | ProgressStyle::Charging => {
                passed.paint(full_glyph.repeat(filled)).to_string()
            }
        };
        format!("[{full}{}]", future.paint(blank_glyph.repeat(empty)))
    }

    pub fn cell(&self, cell: DayCell) -> String {
        if !self.colored {
            return match cell {
                DayCell::Passed => "#",
                DayCell::Today => "@",
                DayCell::Future => ".",
            }
            .into();
        }
        let palette = self.theme.palette();
        match cell {
            DayCell::Passed => colour(palette.passed).paint("■").to_string(),
            DayCell::Today => colour(palette.gradient_start).bold().paint("◆").to_string(),
            DayCell::Future => colour(palette.future).paint("■").to_string(),
        }
    }

    /// Lays cells out left to right, `columns` per row.
    pub fn grid(&self, cells: &[DayCell], columns: usize) -> String {
        cells
            .chunks(columns.max(1))
            .map(|row| row.iter().map(|v| self.cell(*v)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Lays cells out top to bottom, one column per week, the way contribution calendars do.
    pub fn week_grid(&self, cells: &[DayCell]) -> String {
        let columns = cells.len().div_ceil(DAYS_PER_COLUMN);
        (0..DAYS_PER_COLUMN.min(cells.len()))
            .map(|row| {
                (0..columns)
                    .filter_map(|column| cells.get(column * DAYS_PER_COLUMN + row))
                    .map(|v| self.cell(*v))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn colour(hex: &str) -> Colour {
    let (r, g, b) = parse_hex_color(hex);
    Colour::RGB(r, g, b)
}

fn lerp(start: (u8, u8, u8), end: (u8, u8, u8), t: f64) -> Colour {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Colour::RGB(mix(start.0, end.0), mix(start.1, end.1), mix(start.2, end.2))
}

/// `12419` becomes `12,419`.
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
