//! ONNX Runtime classification over TF-IDF feature vectors.
//!
//! Loads the exported model (`classifier.onnx`) and maps a dense feature
//! vector to a class index. Tree-ensemble exports emit an integer label
//! tensor, sometimes alongside per-class probabilities; plain exports emit
//! only the probabilities. Both shapes are handled here.

use std::path::Path;
use std::sync::Mutex;

use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use tracing::{debug, info};

use crate::error::DetectError;

/// Maps a feature vector to a class index.
///
/// The seam between the pipeline and the serialized model; tests substitute
/// a fixed implementation.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &[f32]) -> Result<i64, DetectError>;
}

/// Trained classifier backed by an ONNX Runtime session.
///
/// Session runs take `&mut self`, so the session sits behind a mutex and
/// inference serialises across requests. Everything else is read-only
/// after load.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_name: String,
}

impl OnnxClassifier {
    /// Load a classifier from an ONNX file.
    pub fn load(path: &Path) -> Result<Self, DetectError> {
        if !path.exists() {
            return Err(DetectError::ArtifactMissing(path.to_path_buf()));
        }

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(1)?
            .commit_from_file(path)?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        info!(input = %input_name, model = %path.display(), "loaded classifier");
        Ok(Self {
            session: Mutex::new(session),
            input_name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &[f32]) -> Result<i64, DetectError> {
        // Single-row input: shape [1, num_features].
        let shape = [1_i64, features.len() as i64];
        let tensor = Tensor::from_array((shape, features.to_vec().into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| DetectError::SessionPoisoned)?;
        let outputs = session.run(ort::inputs![&self.input_name => tensor])?;

        // Prefer an integer label output; fall back to argmax over a float
        // probability tensor. Non-tensor outputs (seq/map probabilities from
        // some exporters) are skipped.
        for (name, value) in outputs.iter() {
            if let Ok((_, data)) = value.try_extract_tensor::<i64>() {
                if let Some(&label) = data.first() {
                    debug!(output = %name, label, "label output");
                    return Ok(label);
                }
            }
            if let Ok((_, data)) = value.try_extract_tensor::<f32>() {
                if let Some(index) = argmax(data) {
                    debug!(output = %name, index, "probability output");
                    return Ok(index as i64);
                }
            }
        }

        Err(DetectError::NoModelOutput)
    }
}

/// Index of the largest value, first one on ties.
fn argmax(values: &[f32]) -> Option<usize> {
    let mut best_idx = None;
    let mut best_val = f32::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best_idx = Some(i);
        }
    }
    best_idx
}
