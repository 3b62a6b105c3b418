//! Display unit conversion
//!
//! Desktop coordinates are CSS pixels (96 per inch). Status text converts
//! lengths into the unit the user picked for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PX_PER_INCH: f64 = 96.0;

/// Unit used when formatting lengths for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    /// CSS pixels
    #[default]
    Px,
    /// Millimeters
    Mm,
    /// Inches
    In,
    /// Points (1/72 inch)
    Pt,
}

impl DisplayUnit {
    /// Number of pixels in one of this unit
    pub fn px_per_unit(self) -> f64 {
        match self {
            Self::Px => 1.0,
            Self::Mm => PX_PER_INCH / 25.4,
            Self::In => PX_PER_INCH,
            Self::Pt => PX_PER_INCH / 72.0,
        }
    }

    /// Convert a pixel length into this unit
    pub fn from_px(self, value_px: f64) -> f64 {
        value_px / self.px_per_unit()
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Mm => "mm",
            Self::In => "in",
            Self::Pt => "pt",
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for DisplayUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "px" => Ok(Self::Px),
            "mm" => Ok(Self::Mm),
            "in" | "inch" => Ok(Self::In),
            "pt" => Ok(Self::Pt),
            _ => Err(format!("Unknown display unit: {}", s)),
        }
    }
}

/// Format a pixel length for display
///
/// * `value_px` - Value in desktop pixels
/// * `unit` - Target display unit
pub fn format_length(value_px: f64, unit: DisplayUnit) -> String {
    format!("{:.3} {}", unit.from_px(value_px), unit)
}
