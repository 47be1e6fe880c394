//! Threshold configuration for the matching engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::mapping::MappingAction;

/// Two-tier confidence cutoffs for one class of canonical column.
///
/// - At or above `auto_map_threshold`: [`MappingAction::AutoMap`]
/// - At or above `review_threshold`: [`MappingAction::Review`]
/// - Below: [`MappingAction::ManualMap`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Minimum confidence for an automatic mapping (default: 0.85).
    pub auto_map_threshold: f64,
    /// Minimum confidence for a mapping that needs review (default: 0.70).
    pub review_threshold: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            auto_map_threshold: 0.85,
            review_threshold: 0.70,
        }
    }
}

impl ThresholdConfig {
    pub fn new(auto_map_threshold: f64, review_threshold: f64) -> Self {
        Self {
            auto_map_threshold,
            review_threshold,
        }
    }

    /// Default cutoffs for required columns.
    #[must_use]
    pub fn required() -> Self {
        Self::new(0.90, 0.75)
    }

    /// Default cutoffs for optional columns.
    #[must_use]
    pub fn optional() -> Self {
        Self::default()
    }

    /// Classifies a confidence score into a recommended action.
    #[must_use]
    pub fn action_for(&self, confidence: f64) -> MappingAction {
        if confidence >= self.auto_map_threshold {
            MappingAction::AutoMap
        } else if confidence >= self.review_threshold {
            MappingAction::Review
        } else {
            MappingAction::ManualMap
        }
    }

    fn validate(&self, tier: &'static str) -> Result<()> {
        for (field, value) in [
            ("auto-map threshold", self.auto_map_threshold),
            ("review threshold", self.review_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { tier, field, value });
            }
        }
        if self.auto_map_threshold < self.review_threshold {
            return Err(ConfigError::ThresholdOrder {
                tier,
                auto_map: self.auto_map_threshold,
                review: self.review_threshold,
            });
        }
        Ok(())
    }
}

/// Configuration for header matching behavior.
///
/// Required columns conventionally carry stricter thresholds than optional
/// ones; that ordering is left to the configuration author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum fuzzy score (0-100) for a fuzzy candidate to be accepted.
    pub fuzzy_min_threshold: u32,
    pub required_thresholds: ThresholdConfig,
    pub optional_thresholds: ThresholdConfig,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_min_threshold: 60,
            required_thresholds: ThresholdConfig::required(),
            optional_thresholds: ThresholdConfig::optional(),
        }
    }
}

impl MatchingConfig {
    /// Set the fuzzy acceptance floor.
    #[must_use]
    pub fn with_fuzzy_min_threshold(mut self, threshold: u32) -> Self {
        self.fuzzy_min_threshold = threshold;
        self
    }

    /// Reads a TOML config file. Missing fields take their defaults.
    ///
    /// The result is validated before it is returned.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges and ordering of every threshold.
    pub fn validate(&self) -> Result<()> {
        if self.fuzzy_min_threshold > 100 {
            return Err(ConfigError::FuzzyFloorOutOfRange(self.fuzzy_min_threshold));
        }
        self.required_thresholds.validate("required")?;
        self.optional_thresholds.validate("optional")?;
        Ok(())
    }

    /// Thresholds that apply to a column with the given `required` flag.
    #[must_use]
    pub fn thresholds_for(&self, is_required: bool) -> &ThresholdConfig {
        if is_required {
            &self.required_thresholds
        } else {
            &self.optional_thresholds
        }
    }

    /// Recommended action for a confidence score.
    #[must_use]
    pub fn determine_action(&self, confidence: f64, is_required: bool) -> MappingAction {
        self.thresholds_for(is_required).action_for(confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_cutoffs() {
        let config = MatchingConfig::default();
        assert_eq!(config.fuzzy_min_threshold, 60);
        assert_eq!(config.required_thresholds, ThresholdConfig::new(0.90, 0.75));
        assert_eq!(config.optional_thresholds, ThresholdConfig::new(0.85, 0.70));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn action_boundaries_are_inclusive() {
        let config = MatchingConfig::default();
        assert_eq!(config.determine_action(0.90, true), MappingAction::AutoMap);
        assert_eq!(config.determine_action(0.89, true), MappingAction::Review);
        assert_eq!(config.determine_action(0.75, true), MappingAction::Review);
        assert_eq!(config.determine_action(0.74, true), MappingAction::ManualMap);
        assert_eq!(config.determine_action(0.85, false), MappingAction::AutoMap);
        assert_eq!(config.determine_action(0.70, false), MappingAction::Review);
        assert_eq!(config.determine_action(0.69, false), MappingAction::ManualMap);
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = MatchingConfig {
            required_thresholds: ThresholdConfig::new(0.5, 0.8),
            ..MatchingConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ThresholdOrder {
                tier: "required",
                ..
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = MatchingConfig {
            optional_thresholds: ThresholdConfig::new(1.2, 0.7),
            ..MatchingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange {
                tier: "optional",
                ..
            })
        ));

        let config = MatchingConfig::default().with_fuzzy_min_threshold(101);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FuzzyFloorOutOfRange(101))
        ));
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let config = MatchingConfig {
            optional_thresholds: ThresholdConfig::new(f64::NAN, 0.7),
            ..MatchingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: MatchingConfig = toml::from_str(
            "fuzzy_min_threshold = 40\n\n[required_thresholds]\nauto_map_threshold = 0.95\n",
        )
        .expect("parse toml");
        assert_eq!(config.fuzzy_min_threshold, 40);
        assert_eq!(config.required_thresholds.auto_map_threshold, 0.95);
        assert_eq!(config.required_thresholds.review_threshold, 0.70);
        assert_eq!(config.optional_thresholds, ThresholdConfig::optional());
    }
}
