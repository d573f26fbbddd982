//! Forecast result types.

use serde::{Deserialize, Serialize};

/// Predicted solar power output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Predicted generated power in kilowatts
    pub kilowatts: f64,

    /// When the prediction was computed
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Forecast {
    #[must_use]
    pub fn new(kilowatts: f64) -> Self {
        Self {
            kilowatts,
            created_at: chrono::Utc::now(),
        }
    }

    /// Display form, e.g. `1,234.57 KW`.
    #[must_use]
    pub fn display(&self) -> String {
        format_kilowatts(self.kilowatts)
    }
}

impl std::fmt::Display for Forecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Format a power value with two decimals, thousands separators and the `KW` unit.
#[must_use]
pub fn format_kilowatts(value: f64) -> String {
    format!("{} KW", group_thousands(&format!("{value:.2}")))
}

fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    // inf / NaN pass through untouched
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return fixed.to_string();
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
