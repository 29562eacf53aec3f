//! # Leafscan
//!
//! On-device plant leaf disease classification. A photo of a leaf goes in,
//! a disease label comes out, and nothing ever leaves the machine: the
//! quantized TFLite model runs locally through tract.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! Every classification runs the same synchronous chain:
//!
//! ```text
//! 1. Acquire   file      →  bitmap        (decode + bilinear resample)
//! 2. Encode    bitmap    →  InputTensor   (224×224×3 uint8, row-major HWC)
//! 3. Infer     tensor    →  ScoreVector   (opaque model, raw quantized bytes)
//! 4. Decode    scores    →  Prediction    (argmax over unsigned bytes + label)
//! ```
//!
//! The stages are separate modules with typed boundaries for two reasons:
//!
//! - **Attributable failures**: every error names its stage, so a bad photo
//!   is never confused with a mispackaged model.
//! - **Testability**: encode and decode are pure functions, and the engine
//!   sits behind a trait, so the whole pipeline runs under test without a
//!   real model file.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`acquire`] | File decoding and bilinear resampling to the model's input size |
//! | [`tensor`] | The two pure transforms: bitmap → input tensor, score bytes → prediction |
//! | [`engine`] | The [`engine::InferenceBackend`] trait and its tract-tflite binding |
//! | [`labels`] | Ordered category names, index-aligned with the model output |
//! | [`classify`] | Pipeline orchestration: one backend + one label set = one classifier |
//! | [`config`] | `leafscan.toml` bundle config: model path, labels, expected input size |
//! | [`output`] | CLI output formatting, split into pure `format_*` and `print_*` |
//!
//! # Design Decisions
//!
//! ## Raw Quantized Scores, No Dequantization
//!
//! The model's output bytes are compared as unsigned integers and reported
//! as `n/255`. Argmax is invariant under the affine dequantization the model
//! would otherwise need, so converting to floats would add a dependency on
//! quantization parameters without changing a single answer. The one trap is
//! sign: a runtime may surface the bytes as signed, and `0xFF` must read as
//! 255, not -1. [`tensor::ScoreVector::from_signed`] handles exactly that.
//!
//! ## The Artifact Is the Source of Truth
//!
//! The model file declares its own input shape and dtype; both are validated
//! once at load and the declared shape drives resampling and encoding. The
//! config's input size is only an expectation to cross-check against, so a
//! swapped model with a different geometry fails loudly at startup instead
//! of producing garbage scores.
//!
//! ## Trait-Seamed Engine
//!
//! Everything above the engine programs against [`engine::InferenceBackend`]
//! rather than tract types. Tests substitute a mock that records the exact
//! bytes it was handed, which is how the encoder's pixel ordering is pinned
//! down end to end.

pub mod acquire;
pub mod classify;
pub mod config;
pub mod engine;
pub mod labels;
pub mod output;
pub mod tensor;

#[cfg(test)]
pub(crate) mod test_helpers;
