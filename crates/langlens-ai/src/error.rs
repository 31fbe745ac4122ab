use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("code snippet cannot be empty")]
    EmptySnippet,

    #[error("artifact not found: {0}")]
    ArtifactMissing(std::path::PathBuf),

    #[error("failed to read {path}: {source}")]
    ArtifactRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {name}: {source}")]
    ArtifactParse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid vectorizer: {0}")]
    InvalidVectorizer(String),

    #[error("label map is empty")]
    EmptyLabelMap,

    #[error("onnx runtime error: {0}")]
    Onnx(#[from] ort::Error),

    #[error("classifier produced no usable output")]
    NoModelOutput,

    #[error("class index {0} not present in label map")]
    UnknownClassIndex(i64),

    #[error("classifier session lock poisoned")]
    SessionPoisoned,
}
