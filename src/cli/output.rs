//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, UjaranArgs};
use crate::error::Result;
use crate::model::{CvMetrics, Metrics, ModelArtifact, Prediction};

/// Results that know how to print themselves for a terminal.
pub trait HumanOutput {
    /// Print in human-readable form.
    fn print_human(&self);
}

/// Result structure for a training run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub info: ModelInfo,
}

/// Summary of a stored model.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub total_data: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub train_ratio: f64,
    pub test_ratio: f64,
    pub alpha: f64,
    pub max_features: Option<usize>,
    pub n_features: usize,
    pub spelling_vocabulary: usize,
    pub classes: Vec<String>,
    pub training_metrics: Metrics,
    pub testing_metrics: Metrics,
    pub cv_metrics: CvMetrics,
}

impl From<&ModelArtifact> for ModelInfo {
    fn from(artifact: &ModelArtifact) -> Self {
        ModelInfo {
            total_data: artifact.total_data,
            train_size: artifact.train_size,
            test_size: artifact.test_size,
            train_ratio: artifact.train_ratio,
            test_ratio: artifact.test_ratio,
            alpha: artifact.alpha,
            max_features: artifact.max_features,
            n_features: artifact.vectorizer.n_features(),
            spelling_vocabulary: artifact.vocab.len(),
            classes: artifact
                .model
                .classes()
                .iter()
                .map(|c| artifact.reverse.get(c).cloned().unwrap_or_else(|| c.to_string()))
                .collect(),
            training_metrics: artifact.training_metrics,
            testing_metrics: artifact.testing_metrics,
            cv_metrics: artifact.cv_metrics.clone(),
        }
    }
}

/// One classified text.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub text: String,
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// Result structure for prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResults {
    pub predictions: Vec<PredictionOutput>,
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &UjaranArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_json<T: Serialize>(result: &T, args: &UjaranArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn print_metrics(title: &str, metrics: &Metrics) {
    println!("{title}:");
    println!("  Accuracy:  {:.4}", metrics.accuracy);
    println!("  Precision: {:.4}", metrics.precision);
    println!("  Recall:    {:.4}", metrics.recall);
    println!("  F1:        {:.4}", metrics.f1);
    println!("  AUC:       {:.4}", metrics.auc);
}

fn format_probabilities(proba: &BTreeMap<String, f64>) -> String {
    proba
        .iter()
        .map(|(label, p)| format!("{label}={:.1}%", p * 100.0))
        .collect::<Vec<_>>()
        .join("  ")
}

impl HumanOutput for ModelInfo {
    fn print_human(&self) {
        println!("Dataset:");
        println!("  Total rows:   {}", self.total_data);
        println!(
            "  Training:     {} ({:.0}%)",
            self.train_size,
            self.train_ratio * 100.0
        );
        println!(
            "  Testing:      {} ({:.0}%)",
            self.test_size,
            self.test_ratio * 100.0
        );
        println!("Model:");
        println!("  Classes:      {}", self.classes.join(", "));
        println!("  Alpha:        {}", self.alpha);
        match self.max_features {
            Some(cap) => println!("  Features:     {} (max {cap})", self.n_features),
            None => println!("  Features:     {}", self.n_features),
        }
        println!("  Spelling vocabulary: {} words", self.spelling_vocabulary);
        println!();
        print_metrics("Training metrics", &self.training_metrics);
        print_metrics("Testing metrics", &self.testing_metrics);
        println!(
            "Cross validation: {:.4} ± {:.4}",
            self.cv_metrics.accuracy, self.cv_metrics.std
        );
    }
}

impl HumanOutput for TrainingResult {
    fn print_human(&self) {
        println!("Model written to: {}", self.model_path);
        println!("Training took {} ms", self.duration_ms);
        println!();
        self.info.print_human();
    }
}

impl HumanOutput for PredictionResults {
    fn print_human(&self) {
        for (i, output) in self.predictions.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("Text:  {}", output.text);
            println!(
                "Label: {} ({:.1}%)",
                output.prediction.label,
                output.prediction.confidence() * 100.0
            );
            println!("Probabilities: {}", format_probabilities(&output.prediction.proba));
        }
    }
}
