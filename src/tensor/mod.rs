//! Tensor encoding and decoding — the deterministic halves of the pipeline.
//!
//! | Stage | Function | Contract |
//! |---|---|---|
//! | **Encode** | [`encode`] | exact-size bitmap → row-major R,G,B byte buffer |
//! | **Decode** | [`decode`] | quantized score bytes + labels → [`Prediction`] |
//! | **Layout** | [`TensorLayout`] | pure dimension math, no I/O |
//!
//! Both halves are pure functions; the opaque inference call between them
//! lives in [`crate::engine`].

mod encode;
mod layout;
mod scores;

pub use encode::{EncodeError, InputTensor, encode};
pub use layout::TensorLayout;
pub use scores::{DecodeError, Prediction, ScoreVector, decode};
