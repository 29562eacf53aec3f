//! The opaque inference engine behind a narrow trait.
//!
//! [`InferenceBackend`] is the capability the rest of the crate programs
//! against: load once, run synchronously, drop to release. The production
//! binding is [`TractBackend`] (tract-tflite); tests use the mock in
//! [`backend::tests`].

pub mod backend;
mod tract_backend;

pub use backend::{EngineError, InferenceBackend};
pub use tract_backend::TractBackend;
