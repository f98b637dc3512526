//! Training orchestration, the portable artifact and inference.

pub mod artifact;
pub mod label;
pub mod predictor;
pub mod trainer;

pub use artifact::{CvMetrics, Metrics, ModelArtifact};
pub use label::{Label, map_target, reverse_map};
pub use predictor::{Prediction, Predictor};
pub use trainer::{TrainedModel, Trainer};
