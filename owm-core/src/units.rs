use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, WeatherError};

/// Measurement system understood by the OpenWeatherMap `units` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Metric,
    Imperial,
    Standard,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
            Unit::Standard => "standard",
        }
    }

    /// Tokens accepted for this unit, short form first.
    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            Unit::Metric => &["c", "metric"],
            Unit::Imperial => &["f", "imperial"],
            Unit::Standard => &["k", "standard"],
        }
    }

    /// Lookup order used by [`UnitMatch::resolve`].
    pub const fn all() -> &'static [Unit] {
        &[Unit::Metric, Unit::Imperial, Unit::Standard]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a requested unit string is compared against the registered tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitMatch {
    /// The lower-cased input only has to contain a token ("fahrenheit" is imperial).
    #[default]
    Substring,
    /// The lower-cased input must equal a token.
    Exact,
}

/// A validated unit together with the label shown next to temperatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitChoice {
    pub unit: Unit,
    pub label: String,
}

impl UnitMatch {
    pub fn resolve(self, requested: &str) -> Result<UnitChoice> {
        let label = requested.to_lowercase();

        let matches = |token: &str| match self {
            UnitMatch::Substring => label.contains(token),
            UnitMatch::Exact => label == token,
        };

        Unit::all()
            .iter()
            .find(|unit| unit.tokens().iter().any(|t| matches(*t)))
            .map(|unit| UnitChoice { unit: *unit, label: label.clone() })
            .ok_or_else(|| WeatherError::UnsupportedUnit(requested.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letter_units_resolve() {
        let m = UnitMatch::Substring;
        assert_eq!(m.resolve("c").unwrap().unit, Unit::Metric);
        assert_eq!(m.resolve("F").unwrap().unit, Unit::Imperial);
        assert_eq!(m.resolve("k").unwrap().unit, Unit::Standard);
    }

    #[test]
    fn label_is_lowercased_input() {
        let choice = UnitMatch::Substring.resolve("F").unwrap();
        assert_eq!(choice.label, "f");
    }

    #[test]
    fn substring_accepts_inputs_containing_a_token() {
        let m = UnitMatch::Substring;
        assert_eq!(m.resolve("Fahrenheit").unwrap().unit, Unit::Imperial);
        assert_eq!(m.resolve("celsius").unwrap().unit, Unit::Metric);
        assert_eq!(m.resolve("kelvin").unwrap().unit, Unit::Standard);
        assert_eq!(m.resolve("imperial").unwrap().unit, Unit::Imperial);
        assert_eq!(m.resolve("standard").unwrap().unit, Unit::Standard);
    }

    #[test]
    fn substring_takes_first_unit_in_lookup_order() {
        // contains both "c" and "f"
        let choice = UnitMatch::Substring.resolve("cf").unwrap();
        assert_eq!(choice.unit, Unit::Metric);
    }

    #[test]
    fn exact_rejects_loose_matches() {
        let m = UnitMatch::Exact;
        assert!(m.resolve("fahrenheit").is_err());
        assert_eq!(m.resolve("F").unwrap().unit, Unit::Imperial);
        assert_eq!(m.resolve("metric").unwrap().unit, Unit::Metric);
    }

    #[test]
    fn unknown_units_are_rejected() {
        for input in ["x", "", "z", "bogus"] {
            let err = UnitMatch::Substring.resolve(input).unwrap_err();
            assert!(matches!(err, WeatherError::UnsupportedUnit(ref s) if s == input));
        }
    }

    #[test]
    fn every_token_resolves_to_its_unit_exactly() {
        for unit in Unit::all() {
            for token in unit.tokens() {
                assert_eq!(UnitMatch::Exact.resolve(token).unwrap().unit, *unit);
            }
        }
    }

    #[test]
    fn unit_match_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            m: UnitMatch,
        }
        let w: Wrapper = toml::from_str("m = \"exact\"").unwrap();
        assert_eq!(w.m, UnitMatch::Exact);
    }
}
