//! Pipeline orchestration: acquire → encode → infer → decode.
//!
//! A [`Classifier`] pairs one loaded backend with one label set for the
//! lifetime of the process. Every call runs the full chain synchronously
//! and returns either a [`Prediction`] or the specific stage failure —
//! nothing is retried, nothing is defaulted, and a caller can always tell
//! a bad input file from a model-packaging bug.

use crate::acquire::{self, AcquireError};
use crate::engine::{EngineError, InferenceBackend};
use crate::labels::LabelSet;
use crate::tensor::{
    DecodeError, EncodeError, Prediction, ScoreVector, TensorLayout, decode, encode,
};
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

/// Any failure along the classification chain, tagged by stage.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("could not read image: {0}")]
    Acquire(#[from] AcquireError),
    #[error("could not encode image: {0}")]
    Encode(#[from] EncodeError),
    #[error("inference engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("could not decode scores: {0}")]
    Decode(#[from] DecodeError),
}

/// A loaded model plus its index-aligned label set.
pub struct Classifier<B: InferenceBackend> {
    backend: B,
    labels: LabelSet,
}

impl<B: InferenceBackend> Classifier<B> {
    pub fn new(backend: B, labels: LabelSet) -> Self {
        Self { backend, labels }
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn layout(&self) -> TensorLayout {
        self.backend.input_layout()
    }

    /// Encode an exact-size bitmap and run the model on it.
    pub fn scores_for(&self, image: &DynamicImage) -> Result<ScoreVector, ClassifyError> {
        let input = encode(image, &self.backend.input_layout())?;
        let scores = self.backend.infer(&input)?;
        Ok(scores)
    }

    /// Classify an already-resampled bitmap.
    pub fn classify(&self, image: &DynamicImage) -> Result<Prediction, ClassifyError> {
        let scores = self.scores_for(image)?;
        let prediction = decode(&scores, &self.labels)?;
        log::info!(
            "predicted '{}' (index {}, score {}/255)",
            prediction.label,
            prediction.index,
            prediction.score
        );
        Ok(prediction)
    }

    /// Decode, resample and classify an image file.
    pub fn classify_file(&self, path: &Path) -> Result<Prediction, ClassifyError> {
        let image = acquire::acquire(path, &self.backend.input_layout())?;
        self.classify(&image)
    }
}
