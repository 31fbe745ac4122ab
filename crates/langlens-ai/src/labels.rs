//! Label decoding: classifier outputs back to language names.
//!
//! `labels.json` is a JSON array of language names in the order the label
//! encoder assigned during training. A class index is a position in that
//! array.

use std::path::Path;

use tracing::info;

use crate::error::DetectError;

/// Ordered set of language names the trained classifier can emit.
#[derive(Debug, Clone)]
pub struct LabelMap {
    classes: Vec<String>,
}

impl LabelMap {
    /// Build a label map from an ordered list of class names.
    pub fn new(classes: Vec<String>) -> Result<Self, DetectError> {
        if classes.is_empty() {
            return Err(DetectError::EmptyLabelMap);
        }
        Ok(Self { classes })
    }

    /// Load a label map from a JSON artifact on disk.
    pub fn load(path: &Path) -> Result<Self, DetectError> {
        if !path.exists() {
            return Err(DetectError::ArtifactMissing(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| DetectError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        let classes: Vec<String> =
            serde_json::from_str(&raw).map_err(|source| DetectError::ArtifactParse {
                name: "labels.json",
                source,
            })?;
        let map = Self::new(classes)?;
        info!(classes = map.len(), "loaded label map");
        Ok(map)
    }

    /// Decode a class index into its language name.
    ///
    /// Returns `None` for negative or out-of-range indices.
    pub fn decode(&self, index: i64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
    }

    /// All known language names, in class-index order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
