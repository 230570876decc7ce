//! Display units and the translation of canonical quantities into them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnitError;

use super::quantity::{QuantityAngle, QuantityArea, QuantityLength};

/// Unit used to display lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "cm")]
    Centimeter,
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "in")]
    Inch,
    #[serde(rename = "ft")]
    Foot,
    #[serde(rename = "yd")]
    Yard,
}

impl LengthUnit {
    /// All length units, in selector order.
    pub const ALL: [Self; 6] = [
        Self::Millimeter,
        Self::Centimeter,
        Self::Meter,
        Self::Inch,
        Self::Foot,
        Self::Yard,
    ];

    /// Returns the short token shown after values.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Inch => "in",
            Self::Foot => "ft",
            Self::Yard => "yd",
        }
    }

    /// Number of millimeters in one unit.
    #[must_use]
    pub fn millimeters(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Centimeter => 10.0,
            Self::Meter => 1000.0,
            Self::Inch => 25.4,
            Self::Foot => 304.8,
            Self::Yard => 914.4,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for LengthUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(Self::Millimeter)
            }
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(Self::Centimeter)
            }
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meter),
            "in" | "inch" | "inches" | "\"" => Ok(Self::Inch),
            "ft" | "foot" | "feet" | "'" => Ok(Self::Foot),
            "yd" | "yard" | "yards" => Ok(Self::Yard),
            _ => Err(UnitError {
                kind: "length",
                token: s.to_string(),
            }),
        }
    }
}

/// Unit used to display angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AngleUnit {
    #[serde(rename = "rad")]
    Radian,
    #[default]
    #[serde(rename = "deg")]
    Degree,
}

impl AngleUnit {
    /// Returns the short token shown after values.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Radian => "rad",
            Self::Degree => "deg",
        }
    }

    /// Number of radians in one unit.
    #[must_use]
    pub fn radians(self) -> f64 {
        match self {
            Self::Radian => 1.0,
            Self::Degree => std::f64::consts::PI / 180.0,
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for AngleUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rad" | "radian" | "radians" => Ok(Self::Radian),
            "deg" | "degree" | "degrees" | "°" => Ok(Self::Degree),
            _ => Err(UnitError {
                kind: "angle",
                token: s.to_string(),
            }),
        }
    }
}

/// Unit used to display areas: the square of a length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AreaUnit(pub LengthUnit);

impl AreaUnit {
    /// Returns the short token shown after values, e.g. `mm²`.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self.0 {
            LengthUnit::Millimeter => "mm²",
            LengthUnit::Centimeter => "cm²",
            LengthUnit::Meter => "m²",
            LengthUnit::Inch => "in²",
            LengthUnit::Foot => "ft²",
            LengthUnit::Yard => "yd²",
        }
    }

    /// Number of square millimeters in one unit.
    #[must_use]
    pub fn square_millimeters(self) -> f64 {
        self.0.millimeters().powi(2)
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A canonical value expressed in a display unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslateResult {
    /// The value in the display unit.
    pub value: f64,
    /// Token of the display unit.
    pub unit: &'static str,
    /// Canonical units per display unit; `value = canonical / factor`.
    pub factor: f64,
}

/// Translates canonical quantities into display units.
pub struct UnitSystem;

impl UnitSystem {
    #[must_use]
    pub fn translate_length(length: QuantityLength, unit: LengthUnit) -> TranslateResult {
        translate(length.value(), unit.token(), unit.millimeters())
    }

    #[must_use]
    pub fn translate_angle(angle: QuantityAngle, unit: AngleUnit) -> TranslateResult {
        translate(angle.value(), unit.token(), unit.radians())
    }

    #[must_use]
    pub fn translate_area(area: QuantityArea, unit: AreaUnit) -> TranslateResult {
        translate(area.value(), unit.token(), unit.square_millimeters())
    }
}

fn translate(canonical: f64, unit: &'static str, factor: f64) -> TranslateResult {
    TranslateResult {
        value: canonical / factor,
        unit,
        factor,
    }
}
