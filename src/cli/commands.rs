//! Command implementations for the ujaran CLI.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossbeam_channel::{RecvTimeoutError, bounded};
use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::TrainingConfig;
use crate::dataset::Dataset;
use crate::error::{Result, UjaranError};
use crate::model::{ModelArtifact, Predictor, TrainedModel, Trainer};

/// Execute a CLI command.
pub fn execute_command(args: UjaranArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args.clone(), &args),
        Command::Predict(predict_args) => predict(predict_args.clone(), &args),
        Command::Info(info_args) => show_info(info_args.clone(), &args),
    }
}

/// Train a model and write its artifact.
fn train_model(args: TrainArgs, cli_args: &UjaranArgs) -> Result<()> {
    let config = args.training_config()?;
    let timeout = args.timeout()?;
    let dataset = Dataset::from_csv_path(&args.dataset)
        .with_context(|| format!("failed to load dataset {}", args.dataset.display()))?;
    info!(
        "Loaded {} of {} rows from {}",
        dataset.len(),
        dataset.total_rows(),
        args.dataset.display()
    );

    let start_time = Instant::now();
    let trained = train_with_timeout(config, dataset, timeout)?;
    let duration = start_time.elapsed();

    trained
        .artifact()
        .write_json(&args.output)
        .with_context(|| format!("failed to write model {}", args.output.display()))?;

    output_result(
        "Training completed",
        &TrainingResult {
            model_path: args.output.to_string_lossy().to_string(),
            duration_ms: duration.as_millis() as u64,
            info: ModelInfo::from(trained.artifact()),
        },
        cli_args,
    )
}

/// Run training, giving up after `timeout`.
///
/// A timed-out run returns [`UjaranError::Timeout`] and nothing is written.
pub fn train_with_timeout(
    config: TrainingConfig,
    dataset: Dataset,
    timeout: Option<Duration>,
) -> Result<TrainedModel> {
    let trainer = Trainer::new(config)?;
    match timeout {
        Some(timeout) => run_with_timeout("training", timeout, move || trainer.train(&dataset)),
        None => trainer.train(&dataset),
    }
}

/// Run `job` on a worker thread and wait at most `timeout` for its result.
///
/// After a timeout the worker is left to finish in the background and its
/// result is discarded.
pub fn run_with_timeout<T, F>(name: &str, timeout: Duration, job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (sender, receiver) = bounded(1);
    thread::Builder::new()
        .name(format!("ujaran-{name}"))
        .spawn(move || {
            // The receiver is gone after a timeout
            let _ = sender.send(job());
        })?;

    match receiver.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            warn!("{name} exceeded {timeout:?}; discarding the run");
            Err(UjaranError::timeout(format!(
                "{name} did not finish within {timeout:?}"
            )))
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err(anyhow::anyhow!("{name} worker stopped without a result").into())
        }
    }
}

/// Classify texts with a stored model.
fn predict(args: PredictArgs, cli_args: &UjaranArgs) -> Result<()> {
    let predictor = Predictor::load(&args.model)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;
    let predictions = predictor.predict_batch(&args.texts)?;

    let results = PredictionResults {
        predictions: args
            .texts
            .into_iter()
            .zip(predictions)
            .map(|(text, prediction)| PredictionOutput { text, prediction })
            .collect(),
    };

    output_result("Predictions", &results, cli_args)
}

/// Show what a stored model contains.
fn show_info(args: InfoArgs, cli_args: &UjaranArgs) -> Result<()> {
    let artifact = ModelArtifact::read_json(&args.model)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;
    output_result(
        &format!("Model: {}", args.model.display()),
        &ModelInfo::from(&artifact),
        cli_args,
    )
}
