// ============================================================
// PREPARATION CONFIGURATION
// ============================================================
// Paths, columns and sampling parameters for both transforms

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// A list-valued column and the prefix of its indicator columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListColumn {
    pub name: String,
    pub prefix: String,
}

impl ListColumn {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
        }
    }

    /// Parse `name:prefix`; the last colon separates the two
    pub fn parse_spec(spec: &str) -> Result<Self> {
        match spec.rsplit_once(':') {
            Some((name, prefix)) if !name.is_empty() && !prefix.is_empty() => {
                Ok(Self::new(name, prefix))
            }
            _ => Err(AppError::InvalidConfig(format!(
                "column spec '{}' must look like NAME:PREFIX",
                spec
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,

    /// Encoded in this order; blocks are appended in the same order
    pub columns: Vec<ListColumn>,

    /// Encoded columns whose value counts are printed after a run
    pub preview_columns: Vec<String>,

    /// Leading rows shown in the console summary
    pub preview_rows: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/test_data.csv"),
            output_path: PathBuf::from("data/encoded_test_data.csv"),
            columns: vec![
                ListColumn::new("feature1", "f1"),
                ListColumn::new("feature2", "f2"),
            ],
            preview_columns: vec!["f1_modality".to_string(), "f2_polar".to_string()],
            preview_rows: 5,
        }
    }
}

/// How proportional targets are turned into whole row counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingRule {
    /// Floor every quota, hand the leftover rows to the largest remainders.
    /// Targets always sum to the requested total.
    #[default]
    LargestRemainder,

    /// Round each quota to nearest, ties to even. Targets may miss the
    /// requested total by up to one row per group.
    Nearest,
}

pub const DEFAULT_TOTAL_SAMPLES: usize = 500;

fn default_total_samples() -> usize {
    DEFAULT_TOTAL_SAMPLES
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SamplingPolicy {
    /// Draw `total_samples` rows split by original group frequency
    Proportional {
        #[serde(default = "default_total_samples")]
        total_samples: usize,
        #[serde(default)]
        rounding: RoundingRule,
    },

    /// Undersample every group to the size of the smallest one
    EqualFloor,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        SamplingPolicy::Proportional {
            total_samples: default_total_samples(),
            rounding: RoundingRule::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancerConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub group_column: String,
    pub policy: SamplingPolicy,
    pub seed: u64,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/filtered_questions.csv"),
            output_path: PathBuf::from("data/test_data.csv"),
            group_column: "language".to_string(),
            policy: SamplingPolicy::default(),
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub encoder: EncoderConfig,
    pub balancer: BalancerConfig,
}

impl AppConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.encoder.validate()?;
        self.balancer.validate()
    }
}

impl EncoderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(AppError::InvalidConfig(
                "encoder needs at least one list column".to_string(),
            ));
        }
        let mut prefixes = HashSet::new();
        for column in &self.columns {
            if column.name.is_empty() || column.prefix.is_empty() {
                return Err(AppError::InvalidConfig(
                    "list column name and prefix must not be empty".to_string(),
                ));
            }
            if !prefixes.insert(column.prefix.as_str()) {
                return Err(AppError::InvalidConfig(format!(
                    "prefix '{}' is used by more than one column",
                    column.prefix
                )));
            }
        }
        Ok(())
    }
}

impl BalancerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.group_column.is_empty() {
            return Err(AppError::InvalidConfig(
                "group_column must not be empty".to_string(),
            ));
        }
        if let SamplingPolicy::Proportional { total_samples: 0, .. } = self.policy {
            return Err(AppError::InvalidConfig(
                "total_samples must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.balancer.seed, 42);
        assert_eq!(
            config.balancer.policy,
            SamplingPolicy::Proportional {
                total_samples: 500,
                rounding: RoundingRule::LargestRemainder
            }
        );
    }

    #[test]
    fn test_parse_column_spec() {
        assert_eq!(
            ListColumn::parse_spec("feature1:f1").unwrap(),
            ListColumn::new("feature1", "f1")
        );
        assert_eq!(
            ListColumn::parse_spec("ns:tags:t").unwrap(),
            ListColumn::new("ns:tags", "t")
        );
        assert!(ListColumn::parse_spec("feature1").is_err());
        assert!(ListColumn::parse_spec("feature1:").is_err());
    }

    #[test]
    fn test_duplicate_prefix_rejected() {
        let config = EncoderConfig {
            columns: vec![ListColumn::new("a", "f"), ListColumn::new("b", "f")],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_total_samples_rejected() {
        let config = BalancerConfig {
            policy: SamplingPolicy::Proportional {
                total_samples: 0,
                rounding: RoundingRule::Nearest,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_policy_serde_shape() {
        let json = serde_json::to_value(SamplingPolicy::EqualFloor).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "equal_floor" }));

        let policy: SamplingPolicy =
            serde_json::from_str(r#"{ "kind": "proportional", "total_samples": 50 }"#).unwrap();
        assert_eq!(
            policy,
            SamplingPolicy::Proportional {
                total_samples: 50,
                rounding: RoundingRule::LargestRemainder
            }
        );
    }
}
