//! The three-artifact detection pipeline: vectorize → predict → decode.

use std::path::Path;

use langlens_core::Prediction;
use tracing::{debug, info};

use crate::classifier::{Classifier, OnnxClassifier};
use crate::error::DetectError;
use crate::labels::LabelMap;
use crate::vectorizer::Vectorizer;

/// File names expected inside the models directory.
pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const CLASSIFIER_FILE: &str = "classifier.onnx";
pub const LABELS_FILE: &str = "labels.json";

/// A loaded artifact set: vectorizer, classifier, and label map.
///
/// Built once at startup and shared read-only for the life of the process.
pub struct Detector {
    vectorizer: Vectorizer,
    classifier: Box<dyn Classifier>,
    labels: LabelMap,
}

impl Detector {
    /// Load all three artifacts from `models_dir`.
    ///
    /// Fails on the first missing or malformed artifact; there is no
    /// fallback and no partially-loaded state.
    pub fn load(models_dir: &Path) -> Result<Self, DetectError> {
        info!(dir = %models_dir.display(), "loading model artifacts");

        let vectorizer = Vectorizer::load(&models_dir.join(VECTORIZER_FILE))?;
        let classifier = OnnxClassifier::load(&models_dir.join(CLASSIFIER_FILE))?;
        let labels = LabelMap::load(&models_dir.join(LABELS_FILE))?;

        Ok(Self::new(vectorizer, Box::new(classifier), labels))
    }

    /// Assemble a detector from already-loaded parts.
    pub fn new(vectorizer: Vectorizer, classifier: Box<dyn Classifier>, labels: LabelMap) -> Self {
        Self {
            vectorizer,
            classifier,
            labels,
        }
    }

    /// Detect the programming language of one snippet.
    ///
    /// Empty or whitespace-only input is rejected before the pipeline runs.
    pub fn detect(&self, code: &str) -> Result<Prediction, DetectError> {
        if code.trim().is_empty() {
            return Err(DetectError::EmptySnippet);
        }

        let features = self.vectorizer.transform(code);
        debug!(features = features.len(), "vectorized snippet");

        let class_index = self.classifier.predict(&features)?;

        let language = self
            .labels
            .decode(class_index)
            .ok_or(DetectError::UnknownClassIndex(class_index))?;

        info!(language = %language, "detected language");
        Ok(Prediction::new(language))
    }

    /// Languages the label map can produce, in class-index order.
    pub fn known_languages(&self) -> &[String] {
        self.labels.classes()
    }
}
