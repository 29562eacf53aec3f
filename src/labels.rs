//! The ordered disease-category label list.
//!
//! Index `i` of the label list corresponds to position `i` of the model's
//! output vector — the two are a matched pair shipped together. Nothing
//! here enforces the pairing at load time; [`crate::tensor::decode`] checks
//! the lengths agree before any label is read.

use serde::{Deserialize, Serialize};

/// Labels for the bundled model, index-aligned with its output vector.
///
/// Changing the model's output cardinality requires changing this list in
/// the same release.
pub const DEFAULT_LABELS: [&str; 7] = [
    "Rice rusted bacterial smut",
    "Potato Late/Early Blight",
    "Tomato Powdery Mildew",
    "Tomato Gray/Bacterial spot",
    "Pumpkin Mosaic Disease",
    "Pumpkin Powdery Mildew",
    "Eggplant (Brinjal) Mosaic Virus",
];

/// An ordered set of human-readable category names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for LabelSet {
    fn default() -> Self {
        Self(DEFAULT_LABELS.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_seven_entries() {
        let labels = LabelSet::default();
        assert_eq!(labels.len(), 7);
        assert_eq!(labels.get(0), Some("Rice rusted bacterial smut"));
        assert_eq!(labels.get(6), Some("Eggplant (Brinjal) Mosaic Virus"));
    }

    #[test]
    fn get_out_of_range_is_none() {
        assert_eq!(LabelSet::default().get(7), None);
    }

    #[test]
    fn iter_preserves_order() {
        let labels = LabelSet::new(vec!["x".into(), "y".into()]);
        let collected: Vec<&str> = labels.iter().collect();
        assert_eq!(collected, vec!["x", "y"]);
    }
}
