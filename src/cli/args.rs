//! Command line argument parsing for the ujaran CLI using clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::TrainingConfig;
use crate::error::{Result, UjaranError};

/// ujaran - Indonesian hate speech classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "ujaran")]
#[command(about = "Train and run an Indonesian hate speech classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct UjaranArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl UjaranArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model from a labeled CSV file
    Train(TrainArgs),

    /// Classify texts with a trained model
    Predict(PredictArgs),

    /// Show the dataset counters and metrics stored in a model
    Info(InfoArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Dataset file (`id;text;class`, no header)
    #[arg(value_name = "CSV_FILE")]
    pub dataset: PathBuf,

    /// Where to write the model artifact
    #[arg(short, long, value_name = "MODEL_FILE", default_value = "model.json")]
    pub output: PathBuf,

    /// Training configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Smoothing constant of the classifier
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Vocabulary cap of the vectorizer
    #[arg(long)]
    pub max_features: Option<usize>,

    /// Keep every term in the vocabulary
    #[arg(long, conflicts_with = "max_features")]
    pub no_max_features: bool,

    /// Seed of the split and the cross-validation permutation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of cross-validation folds
    #[arg(long)]
    pub folds: Option<usize>,

    /// Fraction of each class used for training
    #[arg(long)]
    pub train_fraction: Option<f64>,

    /// Disable spelling correction
    #[arg(long)]
    pub no_spelling: bool,

    /// Abort training after this many seconds (fractions allowed)
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<f64>,
}

impl TrainArgs {
    /// Build the training configuration: file values, then flag overrides.
    pub fn training_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_json_file(path)?,
            None => TrainingConfig::default(),
        };

        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(max_features) = self.max_features {
            config.max_features = Some(max_features);
        }
        if self.no_max_features {
            config.max_features = None;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(folds) = self.folds {
            config.cv_folds = folds;
        }
        if let Some(train_fraction) = self.train_fraction {
            config.train_fraction = train_fraction;
        }
        if self.no_spelling {
            config.spelling_correction = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// Wall-clock limit of the training run, if any.
    pub fn timeout(&self) -> Result<Option<Duration>> {
        self.timeout_secs
            .map(|secs| {
                Duration::try_from_secs_f64(secs).map_err(|e| {
                    UjaranError::invalid_config(format!("invalid timeout {secs}: {e}"))
                })
            })
            .transpose()
    }
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Model artifact produced by `train`
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Texts to classify
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,
}

/// Arguments for model information
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Model artifact produced by `train`
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Human,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_command() {
        let args = UjaranArgs::try_parse_from([
            "ujaran",
            "train",
            "data.csv",
            "-o",
            "out.json",
            "--alpha",
            "1.5",
            "--folds",
            "3",
            "--no-spelling",
            "--timeout-secs",
            "60",
        ])
        .unwrap();

        if let Command::Train(train_args) = args.command {
            assert_eq!(train_args.dataset, PathBuf::from("data.csv"));
            assert_eq!(train_args.output, PathBuf::from("out.json"));
            assert_eq!(train_args.timeout_secs, Some(60.0));
            assert_eq!(train_args.timeout().unwrap(), Some(Duration::from_secs(60)));

            let config = train_args.training_config().unwrap();
            assert_eq!(config.alpha, 1.5);
            assert_eq!(config.cv_folds, 3);
            assert!(!config.spelling_correction);
            assert_eq!(config.seed, 42);
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_train_defaults() {
        let args = UjaranArgs::try_parse_from(["ujaran", "train", "data.csv"]).unwrap();
        if let Command::Train(train_args) = args.command {
            assert_eq!(train_args.output, PathBuf::from("model.json"));
            assert_eq!(train_args.training_config().unwrap(), TrainingConfig::default());
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_timeout_parsing() {
        let args = UjaranArgs::try_parse_from([
            "ujaran",
            "train",
            "data.csv",
            "--timeout-secs",
            "0.25",
        ])
        .unwrap();
        let Command::Train(train_args) = args.command else {
            panic!("Expected Train command");
        };
        assert_eq!(train_args.timeout().unwrap(), Some(Duration::from_millis(250)));

        let negative = TrainArgs {
            timeout_secs: Some(-1.0),
            ..train_args.clone()
        };
        assert!(matches!(negative.timeout(), Err(UjaranError::InvalidConfig(_))));

        let unlimited = TrainArgs {
            timeout_secs: None,
            ..train_args
        };
        assert_eq!(unlimited.timeout().unwrap(), None);
    }

    #[test]
    fn test_train_rejects_invalid_override() {
        let args =
            UjaranArgs::try_parse_from(["ujaran", "train", "data.csv", "--alpha", "0"]).unwrap();
        if let Command::Train(train_args) = args.command {
            assert!(train_args.training_config().is_err());
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_predict_command() {
        let args = UjaranArgs::try_parse_from([
            "ujaran",
            "-f",
            "json",
            "predict",
            "model.json",
            "teks pertama",
            "teks kedua",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.texts.len(), 2);
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_predict_requires_text() {
        assert!(UjaranArgs::try_parse_from(["ujaran", "predict", "model.json"]).is_err());
    }

    #[test]
    fn test_verbosity() {
        let args = UjaranArgs::try_parse_from(["ujaran", "info", "m.json"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = UjaranArgs::try_parse_from(["ujaran", "-vvv", "info", "m.json"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = UjaranArgs::try_parse_from(["ujaran", "-q", "-vv", "info", "m.json"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
