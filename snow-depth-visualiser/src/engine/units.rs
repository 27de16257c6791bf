use serde::{Deserialize, Serialize};

/// Length units accepted for snow depth input and display.
///
/// Canonical depth is always held in centimetres; the unit only decides how a
/// value is read in and how it is printed back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "cm")]
    Centimetres,
    #[serde(rename = "inches")]
    Inches,
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "m")]
    Metres,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Centimetres, Unit::Inches, Unit::Feet, Unit::Metres];

    /// Centimetres in one of this unit.
    pub const fn cm_factor(&self) -> f64 {
        match self {
            Self::Centimetres => 1.0,
            Self::Inches => 2.54,
            Self::Feet => 30.48,
            Self::Metres => 100.0,
        }
    }

    /// Identifier shared with the host page and shown next to values.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Centimetres => "cm",
            Self::Inches => "inches",
            Self::Feet => "ft",
            Self::Metres => "m",
        }
    }

    /// Parse a unit identifier, tolerating the usual abbreviations.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimetres" | "centimeters" => Some(Self::Centimetres),
            "in" | "inch" | "inches" => Some(Self::Inches),
            "ft" | "foot" | "feet" => Some(Self::Feet),
            "m" | "metres" | "meters" => Some(Self::Metres),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Convert a depth in `unit` to canonical centimetres.
pub fn to_canonical(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Centimetres => value,
        _ => value * unit.cm_factor(),
    }
}

/// Convert canonical centimetres to `unit` without rounding.
pub fn from_canonical_value(depth_cm: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Centimetres => depth_cm,
        _ => depth_cm / unit.cm_factor(),
    }
}

/// Convert canonical centimetres to `unit`, formatted to two decimals.
pub fn from_canonical(depth_cm: f64, unit: Unit) -> String {
    format_fixed(from_canonical_value(depth_cm, unit), 2)
}

// Digits inspected past the last printed place when looking for an exact half
const TIE_DIGITS: usize = 40;

/// Fixed-point formatting where an exact half rounds away from zero.
///
/// `{:.N}` rounds exact halves to even, so 1.125 would print as "1.12". Values
/// that only look like halves in decimal (1.005 is stored just below) still
/// round the way their binary value says.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals, value);
    }

    let expanded = format!("{:.*}", decimals + TIE_DIGITS, value.abs());
    let tail = &expanded[expanded.len() - TIE_DIGITS..];
    let is_half = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if !is_half {
        return format!("{:.*}", decimals, value);
    }

    let scale = 10f64.powi(decimals as i32);
    let rounded = ((value.abs() * scale).floor() + 1.0) / scale;
    format!("{:.*}", decimals, rounded.copysign(value))
}
