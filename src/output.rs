//! CLI output formatting.
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! Scores are always shown as `n/255` raw quantized values, never as a
//! percentage: without the model's scale and zero-point a percentage would
//! be a made-up number, and we don't print made-up numbers.

use crate::labels::LabelSet;
use crate::tensor::{Prediction, ScoreVector, TensorLayout};
use serde::Serialize;
use std::path::Path;

/// Machine-readable result for `--json`.
#[derive(Debug, Serialize)]
pub struct PredictionReport<'a> {
    pub image: String,
    pub label: &'a str,
    pub index: usize,
    pub score: u8,
}

impl<'a> PredictionReport<'a> {
    pub fn new(image: &Path, prediction: &'a Prediction) -> Self {
        Self {
            image: image.display().to_string(),
            label: &prediction.label,
            index: prediction.index,
            score: prediction.score,
        }
    }
}

/// Single-prediction display: label first, score as context.
pub fn format_prediction(prediction: &Prediction, show_score: bool) -> Vec<String> {
    let mut lines = vec![prediction.label.clone()];
    if show_score {
        lines.push(format!(
            "    Score: {}/255 (raw quantized, index {})",
            prediction.score, prediction.index
        ));
    }
    lines
}

/// Full per-label score table, winner marked with `>`.
pub fn format_score_table(scores: &ScoreVector, labels: &LabelSet) -> Vec<String> {
    let winner = scores
        .as_bytes()
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(i, _)| i);

    let mut lines = vec!["Scores (raw 0-255)".to_string()];
    for (i, &score) in scores.as_bytes().iter().enumerate() {
        let marker = if Some(i) == winner { '>' } else { ' ' };
        let label = labels.get(i).unwrap_or("<no label>");
        lines.push(format!("{marker} {score:>3}  {label}"));
    }
    lines
}

/// One line per batch entry: path, then label or failure.
pub fn format_batch_line(path: &Path, outcome: &Result<Prediction, String>) -> String {
    match outcome {
        Ok(prediction) => format!(
            "{} -> {} ({}/255)",
            path.display(),
            prediction.label,
            prediction.score
        ),
        Err(reason) => format!("{} -> FAILED: {}", path.display(), reason),
    }
}

/// `inspect` display: artifact facts next to the configured expectation.
pub fn format_inspect(
    model_path: &Path,
    artifact_layout: TensorLayout,
    expected_layout: TensorLayout,
    output_len: usize,
    labels: &LabelSet,
) -> Vec<String> {
    let mut lines = vec![
        format!("Model: {}", model_path.display()),
        format!("    Input: {artifact_layout} (uint8, NHWC)"),
        format!("    Output: {output_len} scores"),
    ];

    if artifact_layout != expected_layout {
        lines.push(format!(
            "    WARNING: config expects input {expected_layout}"
        ));
    }

    lines.push(format!("Labels: {}", labels.len()));
    for (i, label) in labels.iter().enumerate() {
        lines.push(format!("    {i:>3}  {label}"));
    }

    if output_len == labels.len() {
        lines.push("Label alignment: OK".to_string());
    } else {
        lines.push(format!(
            "Label alignment: MISMATCH — model emits {output_len} scores for {} labels",
            labels.len()
        ));
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::Prediction;

    fn labels(names: &[&str]) -> LabelSet {
        LabelSet::new(names.iter().map(|s| s.to_string()).collect())
    }

    fn prediction() -> Prediction {
        Prediction {
            label: "Potato Late/Early Blight".to_string(),
            index: 1,
            score: 201,
        }
    }

    #[test]
    fn prediction_without_score_is_just_the_label() {
        let lines = format_prediction(&prediction(), false);
        assert_eq!(lines, vec!["Potato Late/Early Blight".to_string()]);
    }

    #[test]
    fn prediction_with_score_adds_context_line() {
        let lines = format_prediction(&prediction(), true);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("201/255"));
        assert!(lines[1].contains("index 1"));
    }

    #[test]
    fn score_table_marks_first_occurrence_winner() {
        let scores = ScoreVector::from_unsigned(vec![10, 90, 90]);
        let lines = format_score_table(&scores, &labels(&["a", "b", "c"]));
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with(' '));
        assert!(lines[2].starts_with('>'), "winner line: {}", lines[2]);
        assert!(lines[3].starts_with(' '));
    }

    #[test]
    fn score_table_survives_missing_labels() {
        let scores = ScoreVector::from_unsigned(vec![1, 2]);
        let lines = format_score_table(&scores, &labels(&["only"]));
        assert!(lines[2].contains("<no label>"));
    }

    #[test]
    fn batch_line_for_failure_names_the_reason() {
        let line = format_batch_line(
            Path::new("leaf.jpg"),
            &Err("could not read image".to_string()),
        );
        assert_eq!(line, "leaf.jpg -> FAILED: could not read image");
    }

    #[test]
    fn inspect_reports_alignment_mismatch() {
        let lines = format_inspect(
            Path::new("model.tflite"),
            TensorLayout::rgb(224, 224),
            TensorLayout::rgb(224, 224),
            5,
            &labels(&["a", "b", "c", "d", "e", "f", "g"]),
        );
        assert!(lines.last().unwrap().contains("MISMATCH"));
    }

    #[test]
    fn inspect_warns_on_layout_disagreement() {
        let lines = format_inspect(
            Path::new("model.tflite"),
            TensorLayout::rgb(96, 96),
            TensorLayout::rgb(224, 224),
            2,
            &labels(&["a", "b"]),
        );
        assert!(lines.iter().any(|l| l.contains("WARNING")));
        assert!(lines.last().unwrap().contains("OK"));
    }

    #[test]
    fn report_serializes_flat() {
        let pred = prediction();
        let report = PredictionReport::new(Path::new("leaf.jpg"), &pred);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["label"], "Potato Late/Early Blight");
        assert_eq!(json["score"], 201);
        assert_eq!(json["image"], "leaf.jpg");
    }
}
