//! Bundle configuration: which model, which labels, which input size.
//!
//! The model artifact and its label list ship as a matched pair. A
//! `leafscan.toml` next to them lets a deployment swap the pair without
//! recompiling; with no file present the built-in bundle (224×224 uint8
//! model, seven disease labels) applies.
//!
//! The input size recorded here is the *expectation* — the artifact's own
//! declared shape is the source of truth at load time, and a disagreement
//! between the two is reported before any inference runs.

use crate::labels::{DEFAULT_LABELS, LabelSet};
use crate::tensor::TensorLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Default file name looked up in the working directory.
pub const CONFIG_FILE: &str = "leafscan.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSize {
    pub width: u32,
    pub height: u32,
}

impl Default for InputSize {
    fn default() -> Self {
        Self {
            width: 224,
            height: 224,
        }
    }
}

/// The model bundle description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleConfig {
    /// Path to the TFLite artifact.
    #[serde(default = "default_model_path")]
    pub model: PathBuf,
    /// Category names, index-aligned with the model's output vector.
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,
    /// Expected model input size.
    #[serde(default)]
    pub input: InputSize,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.tflite")
}

fn default_labels() -> Vec<String> {
    DEFAULT_LABELS.iter().map(|s| s.to_string()).collect()
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            model: default_model_path(),
            labels: default_labels(),
            input: InputSize::default(),
        }
    }
}

impl BundleConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that could only fail later with worse messages.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.labels.is_empty() {
            return Err(ConfigError::Invalid("label list is empty".to_string()));
        }
        if let Some(i) = self.labels.iter().position(|l| l.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("label {i} is blank")));
        }
        if self.input.width == 0 || self.input.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "input size {}x{} has a zero dimension",
                self.input.width, self.input.height
            )));
        }
        Ok(())
    }

    pub fn label_set(&self) -> LabelSet {
        LabelSet::new(self.labels.clone())
    }

    pub fn layout(&self) -> TensorLayout {
        TensorLayout::rgb(self.input.width, self.input.height)
    }
}

/// A documented stock config, printed by `leafscan gen-config`.
pub fn stock_config_toml() -> String {
    let labels = DEFAULT_LABELS
        .iter()
        .map(|l| format!("    \"{l}\","))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"# leafscan bundle configuration
#
# The model artifact and the label list are a matched pair: index i of
# `labels` names position i of the model's output vector. Replace them
# together or classification will fail with a count mismatch.

# Path to the quantized TFLite artifact.
model = "model.tflite"

# Ordered category names, one per model output.
labels = [
{labels}
]

# Input size the model was compiled for. Checked against the artifact's
# declared shape at load.
[input]
width = 224
height = 224
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bundle_is_valid() {
        let config = BundleConfig::default();
        config.validate().unwrap();
        assert_eq!(config.labels.len(), 7);
        assert_eq!(config.layout(), TensorLayout::rgb(224, 224));
    }

    #[test]
    fn stock_config_parses_back_to_default() {
        let parsed: BundleConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(parsed, BundleConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: BundleConfig = toml::from_str(r#"model = "custom.tflite""#).unwrap();
        assert_eq!(config.model, PathBuf::from("custom.tflite"));
        assert_eq!(config.labels.len(), 7);
        assert_eq!(config.input, InputSize::default());
    }

    #[test]
    fn empty_labels_rejected() {
        let config: BundleConfig = toml::from_str("labels = []").unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn blank_label_rejected() {
        let config: BundleConfig = toml::from_str(r#"labels = ["ok", "  "]"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_dimension_rejected() {
        let config: BundleConfig = toml::from_str("[input]\nwidth = 0\nheight = 224").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<BundleConfig, _> = toml::from_str("modle = \"typo.tflite\"");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "labels = [\"one\", \"two\"]\n").unwrap();

        let config = BundleConfig::load(&path).unwrap();
        assert_eq!(config.label_set().len(), 2);
        assert_eq!(config.model, PathBuf::from("model.tflite"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = BundleConfig::load(Path::new("/nonexistent/leafscan.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
