//! AI inference layer: TF-IDF vectorization and ONNX Runtime classification.

mod classifier;
mod detector;
mod error;
mod labels;
mod vectorizer;

pub use classifier::{Classifier, OnnxClassifier};
pub use detector::{CLASSIFIER_FILE, Detector, LABELS_FILE, VECTORIZER_FILE};
pub use error::DetectError;
pub use labels::LabelMap;
pub use vectorizer::Vectorizer;
