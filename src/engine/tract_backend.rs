//! tract-based TFLite backend — pure Rust, statically linked.
//!
//! The bundled artifact is an opaque quantized graph. tract translates the
//! flatbuffer into a typed model once at load; every `infer` is then a
//! single plan execution with no per-call allocation beyond the tensors.
//!
//! ## Load-time validation
//!
//! The artifact's declared facts are checked against the contract this
//! crate is written for:
//!
//! - input: rank-4 NHWC, batch 1, 3 channels, uint8 (plain or quantized)
//! - output: uint8-family vector
//!
//! A float-input or float-output model is rejected as incompatible rather
//! than fed misinterpreted bytes. Raw 0–255 input bytes are passed through
//! untouched; when the artifact declares quantization parameters the tensor
//! is tagged with them (same bits, annotated dtype) so tract's type checks
//! accept it.

use super::backend::{EngineError, InferenceBackend};
use crate::tensor::{InputTensor, ScoreVector, TensorLayout};
use std::path::Path;
use tract_core::internal::tract_ndarray;
use tract_core::prelude::*;
use tract_tflite::Tflite;

/// A loaded, optimized, runnable TFLite model.
#[derive(Debug)]
pub struct TractBackend {
    plan: TypedRunnableModel<TypedModel>,
    input_dt: DatumType,
    layout: TensorLayout,
    output_len: usize,
}

impl TractBackend {
    /// Load an artifact from disk.
    pub fn load_path(path: &Path) -> Result<Self, EngineError> {
        let artifact = std::fs::read(path)?;
        log::info!(
            "loading model {} ({} bytes)",
            path.display(),
            artifact.len()
        );
        Self::load_bytes(&artifact)
    }

    /// Load an artifact already in memory.
    pub fn load_bytes(artifact: &[u8]) -> Result<Self, EngineError> {
        let tflite = Tflite::default();
        let mut reader = std::io::Cursor::new(artifact);
        let proto = tflite
            .proto_model_for_read(&mut reader)
            .map_err(|e| EngineError::ModelLoad(format!("unreadable artifact: {e:#}")))?;
        let model = tflite
            .model_for_proto_model(&proto)
            .map_err(|e| EngineError::ModelLoad(format!("untranslatable graph: {e:#}")))?;

        let (input_dt, layout) = validate_input_fact(&model)?;
        let output_len = validate_output_fact(&model)?;

        let plan = model
            .into_optimized()
            .and_then(|m| m.into_runnable())
            .map_err(|e| EngineError::ModelLoad(format!("optimizer rejected graph: {e:#}")))?;

        log::info!(
            "model ready: input {layout} ({input_dt:?}), output vector of {output_len}"
        );

        Ok(Self {
            plan,
            input_dt,
            layout,
            output_len,
        })
    }
}

/// Check the declared input fact and derive the tensor layout from it.
fn validate_input_fact(model: &TypedModel) -> Result<(DatumType, TensorLayout), EngineError> {
    let fact = model
        .input_fact(0)
        .map_err(|e| EngineError::ModelLoad(format!("no input fact: {e:#}")))?;

    let dt = fact.datum_type;
    if dt.unquantized() != DatumType::U8 {
        return Err(EngineError::ModelLoad(format!(
            "model input is {dt:?}, this build only supports uint8 inputs"
        )));
    }

    let shape = fact.shape.as_concrete().ok_or_else(|| {
        EngineError::ModelLoad("model input shape is not concrete".to_string())
    })?;
    match *shape {
        [1, h, w, 3] => Ok((dt, TensorLayout::rgb(w as u32, h as u32))),
        _ => Err(EngineError::ModelLoad(format!(
            "model input shape {shape:?} is not NHWC [1, h, w, 3]"
        ))),
    }
}

/// Check the declared output fact and return the score vector length.
fn validate_output_fact(model: &TypedModel) -> Result<usize, EngineError> {
    let fact = model
        .output_fact(0)
        .map_err(|e| EngineError::ModelLoad(format!("no output fact: {e:#}")))?;

    let dt = fact.datum_type;
    if !matches!(dt.unquantized(), DatumType::U8 | DatumType::I8) {
        return Err(EngineError::ModelLoad(format!(
            "model output is {dt:?}, this build only supports quantized byte scores"
        )));
    }

    let shape = fact.shape.as_concrete().ok_or_else(|| {
        EngineError::ModelLoad("model output shape is not concrete".to_string())
    })?;
    let len: usize = shape.iter().product();
    if len == 0 {
        return Err(EngineError::ModelLoad(format!(
            "model output shape {shape:?} is empty"
        )));
    }
    Ok(len)
}

impl InferenceBackend for TractBackend {
    fn input_layout(&self) -> TensorLayout {
        self.layout
    }

    fn output_len(&self) -> usize {
        self.output_len
    }

    fn infer(&self, input: &InputTensor) -> Result<ScoreVector, EngineError> {
        let expected = self.layout.byte_len();
        if input.len() != expected {
            return Err(EngineError::InputLength {
                expected,
                actual: input.len(),
            });
        }

        let (h, w) = (self.layout.height as usize, self.layout.width as usize);
        let array =
            tract_ndarray::Array4::from_shape_vec((1, h, w, 3), input.as_bytes().to_vec())
                .map_err(|e| EngineError::Inference(format!("input reshape: {e}")))?;
        let mut tensor: Tensor = array.into();
        if self.input_dt.is_quantized() {
            // Same bytes, annotated with the artifact's zero-point/scale.
            tensor = tensor
                .cast_to_dt(self.input_dt)
                .map_err(|e| EngineError::Inference(format!("input dtype tag: {e:#}")))?
                .into_owned();
        }

        let mut outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| EngineError::Inference(format!("{e:#}")))?;
        if outputs.is_empty() {
            return Err(EngineError::Inference(
                "model produced no outputs".to_string(),
            ));
        }
        let output = outputs.remove(0).into_tensor();

        extract_scores(output)
    }
}

/// Pull raw score bytes out of the output tensor.
///
/// uint8 outputs are taken verbatim; int8 outputs are reinterpreted
/// bit-for-bit into the 0–255 range. Quantization annotations are stripped
/// (same storage) before reading the slice.
fn extract_scores(output: Tensor) -> Result<ScoreVector, EngineError> {
    let dt = output.datum_type();
    match dt.unquantized() {
        DatumType::U8 => {
            let plain = output
                .cast_to_dt(DatumType::U8)
                .map_err(|e| EngineError::Inference(format!("output read: {e:#}")))?;
            let bytes = plain
                .as_slice::<u8>()
                .map_err(|e| EngineError::Inference(format!("output read: {e:#}")))?;
            Ok(ScoreVector::from_unsigned(bytes.to_vec()))
        }
        DatumType::I8 => {
            let plain = output
                .cast_to_dt(DatumType::I8)
                .map_err(|e| EngineError::Inference(format!("output read: {e:#}")))?;
            let bytes = plain
                .as_slice::<i8>()
                .map_err(|e| EngineError::Inference(format!("output read: {e:#}")))?;
            Ok(ScoreVector::from_signed(bytes.to_vec()))
        }
        other => Err(EngineError::Inference(format!(
            "unsupported output type {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_is_io_error() {
        let err = TractBackend::load_path(Path::new("/nonexistent/model.tflite")).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }

    #[test]
    fn garbage_bytes_fail_as_model_load() {
        let err = TractBackend::load_bytes(b"definitely not a flatbuffer").unwrap_err();
        assert!(matches!(err, EngineError::ModelLoad(_)));
    }

    #[test]
    fn empty_artifact_fails_as_model_load() {
        let err = TractBackend::load_bytes(&[]).unwrap_err();
        assert!(matches!(err, EngineError::ModelLoad(_)));
    }
}
