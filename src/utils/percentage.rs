use std::{fmt::Display, ops::Deref};

use serde::{Deserialize, Serialize};

/// A non-negative percentage. Values above 100 are allowed, since life progress keeps growing
/// after the expected lifespan is reached.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(f, "{:.*}%", precision, self.0)
    }
}

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.);
    pub const FULL: Percentage = Percentage(100.);

    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }

    /// `part / whole * 100`. A non-positive whole yields zero, as does a negative part.
    pub fn ratio(part: f64, whole: f64) -> Percentage {
        if whole <= 0. {
            return Percentage::ZERO;
        }
        Percentage::new_opt(part / whole * 100.).unwrap_or(Percentage::ZERO)
    }

    pub fn clamped(self) -> Percentage {
        Percentage(self.0.min(100.))
    }

    /// Converts what is left until 100% back into whole units of a period that is
    /// `period` units long. Truncates toward zero, so 99.9% of a 24 hour day leaves 0 hours.
    pub fn remaining_units(self, period: f64) -> i64 {
        ((100. - self.0) * period / 100.) as i64
    }

    /// Share of this percentage as a fraction in `[0, 1]`. Used for sizing bars.
    pub fn fraction(self) -> f64 {
        (self.0 / 100.).clamp(0., 1.)
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
