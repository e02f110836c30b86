//! Unit conversion utilities
//!
//! Handles conversion between real-world length units and centimeters, the
//! canonical unit for furniture dimensions. Scale factors are expressed in
//! pixels per centimeter throughout the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Real-world length unit accepted by scale and import inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Centimeters (canonical)
    Centimeters,
    /// Meters (1 m = 100 cm)
    Meters,
    /// Feet (1 ft = 30.48 cm)
    Feet,
    /// Millimeters (1 mm = 0.1 cm)
    Millimeters,
}

impl Unit {
    /// Exact multiplier from this unit to centimeters.
    pub fn cm_multiplier(&self) -> f64 {
        match self {
            Self::Centimeters => 1.0,
            Self::Meters => 100.0,
            Self::Feet => 30.48,
            Self::Millimeters => 0.1,
        }
    }

    /// Converts a value in this unit to centimeters.
    pub fn to_centimeters(&self, value: f64) -> f64 {
        value * self.cm_multiplier()
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::Centimeters
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Centimeters => write!(f, "cm"),
            Self::Meters => write!(f, "m"),
            Self::Feet => write!(f, "ft"),
            Self::Millimeters => write!(f, "mm"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeters),
            "m" | "meter" | "meters" => Ok(Self::Meters),
            "ft" | "foot" | "feet" => Ok(Self::Feet),
            "mm" | "millimeter" | "millimeters" => Ok(Self::Millimeters),
            _ => Err(format!("Unknown unit: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multipliers() {
        assert_eq!(Unit::Meters.to_centimeters(1.0), 100.0);
        assert_eq!(Unit::Feet.to_centimeters(1.0), 30.48);
        assert_eq!(Unit::Millimeters.to_centimeters(1.0), 0.1);
        assert_eq!(Unit::Centimeters.to_centimeters(1.0), 1.0);
    }

    #[test]
    fn test_conversion_scaling() {
        assert_eq!(Unit::Meters.to_centimeters(2.5), 250.0);
        assert_eq!(Unit::Feet.to_centimeters(10.0), 304.8);
        assert_eq!(Unit::Millimeters.to_centimeters(250.0), 25.0);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("m".parse::<Unit>().unwrap(), Unit::Meters);
        assert_eq!("Feet".parse::<Unit>().unwrap(), Unit::Feet);
        assert_eq!("mm".parse::<Unit>().unwrap(), Unit::Millimeters);
        assert_eq!("cm".parse::<Unit>().unwrap(), Unit::Centimeters);
        assert!("furlong".parse::<Unit>().is_err());

        assert_eq!(Unit::Meters.to_string(), "m");
        assert_eq!(Unit::Feet.to_string(), "ft");
    }
}
