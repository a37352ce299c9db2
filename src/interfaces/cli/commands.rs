//! CLI command implementations

use tracing::info;

use super::report;
use super::{BalanceArgs, EncodeArgs};
use crate::application::{ClassBalancer, MultiLabelEncoder};
use crate::domain::error::Result;
use crate::domain::prep_config::{
    BalancerConfig, EncoderConfig, ListColumn, RoundingRule, SamplingPolicy,
    DEFAULT_TOTAL_SAMPLES,
};

pub fn encode(config: EncoderConfig, args: EncodeArgs) -> Result<()> {
    let json = args.json;
    let config = apply_encode_args(config, args)?;
    info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        columns = config.columns.len(),
        "Starting multi-label encoding"
    );

    let encoded = MultiLabelEncoder::from_config(&config)
        .encode_file(&config.input_path, &config.output_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&encoded.report)?);
    } else {
        print!("{}", report::encoding_summary(&encoded, &config));
    }
    Ok(())
}

pub fn balance(config: BalancerConfig, args: BalanceArgs) -> Result<()> {
    let json = args.json;
    let config = apply_balance_args(config, args)?;
    info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        group_column = %config.group_column,
        policy = ?config.policy,
        seed = config.seed,
        "Starting class balancing"
    );

    let balanced = ClassBalancer::from_config(&config)
        .balance_file(&config.input_path, &config.output_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&balanced.report)?);
    } else {
        print!(
            "{}",
            report::balance_summary(&balanced.report, &config.output_path)
        );
    }
    Ok(())
}

/// Command-line flags win over the loaded configuration
pub fn apply_encode_args(mut config: EncoderConfig, args: EncodeArgs) -> Result<EncoderConfig> {
    if let Some(input) = args.input {
        config.input_path = input;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if !args.columns.is_empty() {
        config.columns = args
            .columns
            .iter()
            .map(|spec| ListColumn::parse_spec(spec))
            .collect::<Result<Vec<_>>>()?;
    }
    if !args.previews.is_empty() {
        config.preview_columns = args.previews;
    }
    config.validate()?;
    Ok(config)
}

pub fn apply_balance_args(mut config: BalancerConfig, args: BalanceArgs) -> Result<BalancerConfig> {
    if let Some(input) = args.input {
        config.input_path = input;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if let Some(group_column) = args.group_column {
        config.group_column = group_column;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    if args.equal_floor {
        config.policy = SamplingPolicy::EqualFloor;
    } else if args.total_samples.is_some() || args.rounding.is_some() {
        let (total, rule) = match config.policy {
            SamplingPolicy::Proportional {
                total_samples,
                rounding,
            } => (total_samples, rounding),
            SamplingPolicy::EqualFloor => (DEFAULT_TOTAL_SAMPLES, RoundingRule::default()),
        };
        config.policy = SamplingPolicy::Proportional {
            total_samples: args.total_samples.unwrap_or(total),
            rounding: args.rounding.map(RoundingRule::from).unwrap_or(rule),
        };
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::interfaces::cli::RoundingArg;
    use std::path::PathBuf;

    #[test]
    fn test_encode_args_override_config() {
        let args = EncodeArgs {
            input: Some(PathBuf::from("in.csv")),
            columns: vec!["tags:t".to_string()],
            previews: vec!["t_rust".to_string()],
            ..Default::default()
        };
        let config = apply_encode_args(EncoderConfig::default(), args).unwrap();
        assert_eq!(config.input_path, PathBuf::from("in.csv"));
        assert_eq!(config.output_path, PathBuf::from("data/encoded_test_data.csv"));
        assert_eq!(config.columns, vec![ListColumn::new("tags", "t")]);
        assert_eq!(config.preview_columns, vec!["t_rust"]);
    }

    #[test]
    fn test_bad_column_spec_rejected() {
        let args = EncodeArgs {
            columns: vec!["tags".to_string()],
            ..Default::default()
        };
        let err = apply_encode_args(EncoderConfig::default(), args).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn test_equal_floor_flag() {
        let args = BalanceArgs {
            equal_floor: true,
            seed: Some(9),
            ..Default::default()
        };
        let config = apply_balance_args(BalancerConfig::default(), args).unwrap();
        assert_eq!(config.policy, SamplingPolicy::EqualFloor);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_rounding_flag_keeps_configured_total() {
        let base = BalancerConfig {
            policy: SamplingPolicy::Proportional {
                total_samples: 80,
                rounding: RoundingRule::LargestRemainder,
            },
            ..Default::default()
        };
        let args = BalanceArgs {
            rounding: Some(RoundingArg::Nearest),
            ..Default::default()
        };
        let config = apply_balance_args(base, args).unwrap();
        assert_eq!(
            config.policy,
            SamplingPolicy::Proportional {
                total_samples: 80,
                rounding: RoundingRule::Nearest
            }
        );
    }

    #[test]
    fn test_total_samples_switches_from_equal_floor() {
        let base = BalancerConfig {
            policy: SamplingPolicy::EqualFloor,
            ..Default::default()
        };
        let args = BalanceArgs {
            total_samples: Some(12),
            ..Default::default()
        };
        let config = apply_balance_args(base, args).unwrap();
        assert_eq!(
            config.policy,
            SamplingPolicy::Proportional {
                total_samples: 12,
                rounding: RoundingRule::LargestRemainder
            }
        );
    }

    #[test]
    fn test_zero_total_samples_flag_rejected() {
        let args = BalanceArgs {
            total_samples: Some(0),
            ..Default::default()
        };
        assert!(apply_balance_args(BalancerConfig::default(), args).is_err());
    }

    #[test]
    fn test_balance_command_fails_on_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sampled.csv");
        let args = BalanceArgs {
            input: Some(dir.path().join("absent.csv")),
            output: Some(output.clone()),
            ..Default::default()
        };

        let err = balance(BalancerConfig::default(), args).unwrap_err();
        assert!(matches!(err, AppError::FileNotReadable { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_encode_command_fails_on_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("questions.csv");
        std::fs::write(&input, "question,feature1\nWhy?,[]\n").unwrap();
        let args = EncodeArgs {
            input: Some(input),
            output: Some(dir.path().join("encoded.csv")),
            ..Default::default()
        };

        let err = encode(EncoderConfig::default(), args).unwrap_err();
        assert_eq!(err, AppError::MissingColumn("feature2".to_string()));
    }
}
