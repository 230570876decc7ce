use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::unit::{AngleUnit, AreaUnit, LengthUnit};

/// Number formatting used in measurement texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Maximum number of decimals; trailing zeros are trimmed.
    pub decimal_count: u8,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self { decimal_count: 3 }
    }
}

impl TextOptions {
    /// Formats a number with at most `decimal_count` decimals.
    ///
    /// `1.000` renders as `1`, `2.50` as `2.5`, and negative zero as `0`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let mut text = format!("{:.*}", usize::from(self.decimal_count), value);
        if text.contains('.') {
            let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
            text.truncate(trimmed);
        }
        if text == "-0" {
            text.remove(0);
        }
        text
    }
}

/// The units and formatting measurements are displayed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    pub length_unit: LengthUnit,
    pub angle_unit: AngleUnit,
    pub text: TextOptions,
}

impl MeasureConfig {
    /// Returns the area unit derived from the length unit.
    #[must_use]
    pub fn area_unit(&self) -> AreaUnit {
        AreaUnit(self.length_unit)
    }

    /// Reads a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or names an unknown unit.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the configuration as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MeasureConfig::default();
        assert_eq!(config.length_unit, LengthUnit::Millimeter);
        assert_eq!(config.angle_unit, AngleUnit::Degree);
        assert_eq!(config.text.decimal_count, 3);
    }

    #[test]
    fn number_formatting_trims_zeros() {
        let text = TextOptions::default();
        assert_eq!(text.format(1.0), "1");
        assert_eq!(text.format(2.5), "2.5");
        assert_eq!(text.format(3.14159), "3.142");
        assert_eq!(text.format(-0.0001), "0");
        assert_eq!(text.format(100.0), "100");
        assert_eq!(TextOptions { decimal_count: 0 }.format(2.6), "3");
    }

    #[test]
    fn json_uses_unit_tokens() {
        let config = MeasureConfig {
            length_unit: LengthUnit::Inch,
            angle_unit: AngleUnit::Radian,
            text: TextOptions { decimal_count: 2 },
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"in\""));
        assert!(json.contains("\"rad\""));
        assert_eq!(MeasureConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MeasureConfig::from_json(r#"{"length_unit":"cm"}"#).unwrap();
        assert_eq!(config.length_unit, LengthUnit::Centimeter);
        assert_eq!(config.angle_unit, AngleUnit::Degree);
        assert_eq!(config.text.decimal_count, 3);
    }

    #[test]
    fn unknown_unit_in_json_fails() {
        assert!(MeasureConfig::from_json(r#"{"length_unit":"furlong"}"#).is_err());
    }
}
