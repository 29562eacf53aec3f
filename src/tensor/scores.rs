//! Output vector → prediction decoding.
//!
//! The model emits one quantized score byte per label. Decoding is a plain
//! arg-max with a first-occurrence tie-break; the scores are *not* a
//! probability distribution — the scale and zero-point needed to turn them
//! into one never reach this layer, so no softmax and no percentage is ever
//! derived from them.
//!
//! The one subtle point is signedness. The winning score of a confident
//! model routinely exceeds 127, and interpreters that hand scores back as
//! signed bytes (TFLite int8 outputs, JVM byte arrays) would make such a
//! score compare as negative. [`ScoreVector::from_signed`] exists for those
//! sources and reinterprets the bit pattern, never sign-extends.

use crate::labels::LabelSet;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("model produced an empty score vector")]
    EmptyScores,
    #[error("{scores} scores but {labels} labels — model and label list are out of sync")]
    LabelCountMismatch { scores: usize, labels: usize },
    #[error("no score satisfied the arg-max scan")]
    NoPrediction,
}

/// Raw quantized confidence scores, one unsigned byte per label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreVector(Vec<u8>);

impl ScoreVector {
    pub fn from_unsigned(scores: Vec<u8>) -> Self {
        Self(scores)
    }

    /// Reinterpret signed storage bytes as their unsigned bit patterns.
    ///
    /// `-1i8` (bits 0xFF) becomes 255, not -1: an `as` cast on `i8` keeps
    /// the bits, which is exactly the widening this data needs.
    pub fn from_signed(scores: Vec<i8>) -> Self {
        Self(scores.into_iter().map(|b| b as u8).collect())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single classification result: the winning label and its raw score.
///
/// `score` is the untouched 0–255 quantized byte. It orders candidates but
/// is not a calibrated confidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub label: String,
    pub index: usize,
    pub score: u8,
}

/// Select the winning label for a score vector.
///
/// Scans from index 0 with strict greater-than, so the smallest index wins
/// among ties. Fails when the vector is empty or its length disagrees with
/// the label list — both indicate a packaging bug (model swapped without
/// updating labels) and are reported rather than papered over.
pub fn decode(scores: &ScoreVector, labels: &LabelSet) -> Result<Prediction, DecodeError> {
    if scores.is_empty() {
        return Err(DecodeError::EmptyScores);
    }
    if scores.len() != labels.len() {
        return Err(DecodeError::LabelCountMismatch {
            scores: scores.len(),
            labels: labels.len(),
        });
    }

    // Sentinel below the 0–255 range so the first real score always wins.
    let mut best: i32 = -1;
    let mut best_index: Option<usize> = None;

    for (i, &score) in scores.as_bytes().iter().enumerate() {
        log::debug!(
            "score[{i}] {} = {}",
            labels.get(i).unwrap_or("<unknown>"),
            score
        );
        if i32::from(score) > best {
            best = i32::from(score);
            best_index = Some(i);
        }
    }

    // Unreachable with a non-empty vector; kept as a guard rather than an
    // unwrap so a logic regression surfaces as an error.
    let index = best_index.ok_or(DecodeError::NoPrediction)?;
    let label = labels
        .get(index)
        .ok_or(DecodeError::NoPrediction)?
        .to_string();

    Ok(Prediction {
        label,
        index,
        score: best as u8,
    })
}
