//! Configuration for the demo binary
//!
//! Supports a TOML configuration file plus environment-variable overrides:
//!
//! - `MAMDANI_CONJUNCTION` - `min` or `product`
//! - `MAMDANI_DISJUNCTION` - `max` or `probabilistic_sum`
//! - `MAMDANI_DEFUZZIFIER` - `centroid`, `bisector` or `mean_of_maximum`
//! - `MAMDANI_LOW_MAX` / `MAMDANI_MODERATE_MAX` - category boundaries
//!
//! # Example configuration
//!
//! ```toml
//! [engine]
//! conjunction = "min"
//! disjunction = "max"
//! defuzzifier = "centroid"
//!
//! [thresholds]
//! low_max = 20.0
//! moderate_max = 70.0
//! ```

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::EngineOptions;
use crate::error::{FisError, FisResult};
use crate::ops::{Conjunction, Defuzzifier, Disjunction};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Operator configuration for the engine
    pub engine: EngineSection,
    /// Risk-category boundaries
    pub thresholds: ThresholdSection,
}

/// Engine operator settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EngineSection {
    /// Fuzzy AND operator
    pub conjunction: Conjunction,
    /// Fuzzy OR operator
    pub disjunction: Disjunction,
    /// Defuzzification method
    pub defuzzifier: Defuzzifier,
}

/// Boundaries mapping a crisp risk score to a category.
///
/// One consistent rule with inclusive upper bounds:
/// `score <= low_max` is Low, `score <= moderate_max` is Moderate,
/// anything above is High.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThresholdSection {
    /// Upper bound of the Low band
    pub low_max: f64,
    /// Upper bound of the Moderate band
    pub moderate_max: f64,
}

impl Default for ThresholdSection {
    fn default() -> Self {
        Self {
            low_max: 20.0,
            moderate_max: 70.0,
        }
    }
}

/// Textual risk category derived from a crisp score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
        };
        write!(f, "{}", label)
    }
}

impl ThresholdSection {
    /// Map a crisp score to its category
    pub fn categorize(&self, score: f64) -> RiskCategory {
        if score <= self.low_max {
            RiskCategory::Low
        } else if score <= self.moderate_max {
            RiskCategory::Moderate
        } else {
            RiskCategory::High
        }
    }

    /// The boundaries must be ordered for the bands to be well defined
    pub fn validate(&self) -> FisResult<()> {
        if !(self.low_max < self.moderate_max) {
            return Err(FisError::invalid_config(format!(
                "thresholds require low_max < moderate_max, got {} and {}",
                self.low_max, self.moderate_max
            )));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> FisResult<Self> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| FisError::invalid_config(e.to_string()))?;
        config.thresholds.validate()?;
        Ok(config)
    }

    /// Load configuration: the given file if any, defaults otherwise,
    /// then environment-variable overrides on top
    pub fn load(path: Option<&Path>) -> FisResult<Self> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    FisError::invalid_config(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.thresholds.validate()?;
        Ok(config)
    }

    /// Apply `MAMDANI_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("MAMDANI_CONJUNCTION") {
            if let Ok(op) = val.parse() {
                self.engine.conjunction = op;
            }
        }

        if let Ok(val) = env::var("MAMDANI_DISJUNCTION") {
            if let Ok(op) = val.parse() {
                self.engine.disjunction = op;
            }
        }

        if let Ok(val) = env::var("MAMDANI_DEFUZZIFIER") {
            if let Ok(op) = val.parse() {
                self.engine.defuzzifier = op;
            }
        }

        if let Ok(val) = env::var("MAMDANI_LOW_MAX") {
            if let Ok(bound) = val.parse::<f64>() {
                self.thresholds.low_max = bound;
            }
        }

        if let Ok(val) = env::var("MAMDANI_MODERATE_MAX") {
            if let Ok(bound) = val.parse::<f64>() {
                self.thresholds.moderate_max = bound;
            }
        }
    }

    /// The engine options this configuration selects
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            conjunction: self.engine.conjunction,
            disjunction: self.engine.disjunction,
            defuzzifier: self.engine.defuzzifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.engine.conjunction, Conjunction::Min);
        assert_eq!(config.engine.disjunction, Disjunction::Max);
        assert_eq!(config.engine.defuzzifier, Defuzzifier::Centroid);
        assert_eq!(config.thresholds.low_max, 20.0);
        assert_eq!(config.thresholds.moderate_max, 70.0);
    }

    #[test]
    fn test_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            [engine]
            conjunction = "product"
            disjunction = "probabilistic_sum"
            defuzzifier = "mean_of_maximum"

            [thresholds]
            low_max = 25.0
            moderate_max = 75.0
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.conjunction, Conjunction::Product);
        assert_eq!(config.engine.disjunction, Disjunction::ProbabilisticSum);
        assert_eq!(config.engine.defuzzifier, Defuzzifier::MeanOfMaximum);
        assert_eq!(config.thresholds.low_max, 25.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [thresholds]
            low_max = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.conjunction, Conjunction::Min);
        assert_eq!(config.thresholds.low_max, 10.0);
        assert_eq!(config.thresholds.moderate_max, 70.0);
    }

    #[test]
    fn test_malformed_toml_is_invalid_config() {
        let err = AppConfig::from_toml("engine = 3").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidConfig);

        let err = AppConfig::from_toml(
            r#"
            [engine]
            conjunction = "fuzzy-feelings"
            "#,
        )
        .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidConfig);
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let err = AppConfig::from_toml(
            r#"
            [thresholds]
            low_max = 80.0
            moderate_max = 70.0
            "#,
        )
        .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::InvalidConfig);
    }

    #[test]
    fn test_categorize_consistent_boundaries() {
        let thresholds = ThresholdSection::default();

        assert_eq!(thresholds.categorize(0.0), RiskCategory::Low);
        assert_eq!(thresholds.categorize(20.0), RiskCategory::Low);
        assert_eq!(thresholds.categorize(20.001), RiskCategory::Moderate);
        assert_eq!(thresholds.categorize(70.0), RiskCategory::Moderate);
        assert_eq!(thresholds.categorize(70.001), RiskCategory::High);
        assert_eq!(thresholds.categorize(100.0), RiskCategory::High);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(RiskCategory::Low.to_string(), "Low");
        assert_eq!(RiskCategory::Moderate.to_string(), "Moderate");
        assert_eq!(RiskCategory::High.to_string(), "High");
    }

    #[test]
    fn test_engine_options_roundtrip() {
        let mut config = AppConfig::default();
        config.engine.conjunction = Conjunction::Product;

        let options = config.engine_options();
        assert_eq!(options.conjunction, Conjunction::Product);
        assert_eq!(options.disjunction, Disjunction::Max);
    }
}
