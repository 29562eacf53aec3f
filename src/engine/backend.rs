//! Inference backend trait and error types.
//!
//! The [`InferenceBackend`] trait is the seam between the deterministic
//! tensor pipeline and the opaque interpreter. Any engine that can load an
//! artifact, bind fixed-shape tensors, run once and hand back the output
//! buffer satisfies it. The production implementation is
//! [`TractBackend`](super::tract_backend::TractBackend).
//!
//! Releasing interpreter state is RAII: dropping a backend frees it exactly
//! once, and the type system rules out use-after-release.

use crate::tensor::{InputTensor, ScoreVector, TensorLayout};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to load model: {0}")]
    ModelLoad(String),
    #[error("input tensor holds {actual} bytes, model expects {expected}")]
    InputLength { expected: usize, actual: usize },
    #[error("inference failed: {0}")]
    Inference(String),
}

/// A loaded model ready to run single synchronous inferences.
///
/// `Sync` so one loaded handle can be shared read-only across threads; the
/// handle itself is written once (at load) and only read afterwards. The
/// trait offers no batching, no streaming and no cancellation — `infer`
/// runs to completion or fails.
pub trait InferenceBackend: Sync {
    /// The input shape the loaded artifact was compiled for.
    fn input_layout(&self) -> TensorLayout;

    /// Number of entries in the output vector (one per category).
    fn output_len(&self) -> usize;

    /// Run the model once on an encoded input buffer.
    ///
    /// The input byte length must equal `input_layout().byte_len()`, else
    /// [`EngineError::InputLength`] — misaligned data never reaches the
    /// interpreter.
    fn infer(&self, input: &InputTensor) -> Result<ScoreVector, EngineError>;
}
