//! TF-IDF vectorization of source code snippets.
//!
//! Reimplements the transform half of a fitted TF-IDF vectorizer from its
//! exported state (`vectorizer.json`): vocabulary, per-column IDF weights,
//! analyzer kind, and n-gram range. Fitting happens offline; this module
//! only maps text into the fixed feature space the classifier was trained on.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::DetectError;

/// Which unit of text the analyzer counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Analyzer {
    Word,
    Char,
}

/// A fitted TF-IDF vectorizer restored from `vectorizer.json`.
///
/// `transform` produces an L2-normalized dense feature vector with one
/// column per vocabulary term. Terms outside the vocabulary contribute
/// nothing, so fully out-of-vocabulary input yields the zero vector.
#[derive(Debug, Clone, Deserialize)]
pub struct Vectorizer {
    analyzer: Analyzer,
    ngram_range: (usize, usize),
    #[serde(default = "default_true")]
    lowercase: bool,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl Vectorizer {
    /// Load a vectorizer from a JSON artifact on disk.
    pub fn load(path: &Path) -> Result<Self, DetectError> {
        if !path.exists() {
            return Err(DetectError::ArtifactMissing(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| DetectError::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;
        let vectorizer = Self::from_json(&raw)?;
        info!(
            terms = vectorizer.vocabulary.len(),
            features = vectorizer.n_features(),
            "loaded vectorizer"
        );
        Ok(vectorizer)
    }

    /// Parse and validate a vectorizer from its JSON representation.
    pub fn from_json(raw: &str) -> Result<Self, DetectError> {
        let vectorizer: Self =
            serde_json::from_str(raw).map_err(|source| DetectError::ArtifactParse {
                name: "vectorizer.json",
                source,
            })?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Number of columns in the feature space.
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Map a snippet into the trained feature space.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut features = vec![0.0f32; self.idf.len()];

        // Term frequency: raw counts over the analyzer's n-grams.
        for gram in self.analyze(text) {
            if let Some(&col) = self.vocabulary.get(gram.as_str()) {
                features[col] += 1.0;
            }
        }

        // Weight by IDF, then normalize to unit length.
        for (value, idf) in features.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        normalize(&mut features);
        features
    }

    /// Produce the n-grams the fitted analyzer would count for `text`.
    fn analyze(&self, text: &str) -> Vec<String> {
        let text: Cow<'_, str> = if self.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };
        let (lo, hi) = self.ngram_range;
        let mut grams = Vec::new();

        match self.analyzer {
            Analyzer::Word => {
                let tokens = word_tokens(&text);
                for n in lo..=hi {
                    if n <= tokens.len() {
                        grams.extend(tokens.windows(n).map(|window| window.join(" ")));
                    }
                }
            }
            Analyzer::Char => {
                let chars: Vec<char> = text.chars().collect();
                for n in lo..=hi {
                    if n <= chars.len() {
                        grams.extend(
                            chars
                                .windows(n)
                                .map(|window| window.iter().collect::<String>()),
                        );
                    }
                }
            }
        }
        grams
    }

    fn validate(&self) -> Result<(), DetectError> {
        let (lo, hi) = self.ngram_range;
        if lo == 0 || lo > hi {
            return Err(DetectError::InvalidVectorizer(format!(
                "bad ngram_range ({lo}, {hi})"
            )));
        }
        if self.vocabulary.is_empty() {
            return Err(DetectError::InvalidVectorizer(
                "empty vocabulary".to_string(),
            ));
        }
        if let Some((term, &col)) = self
            .vocabulary
            .iter()
            .find(|(_, &col)| col >= self.idf.len())
        {
            return Err(DetectError::InvalidVectorizer(format!(
                "term {term:?} maps to column {col}, but the idf table has {} entries",
                self.idf.len()
            )));
        }
        Ok(())
    }
}

/// Word tokens: runs of word characters (alphanumeric or `_`) at least two
/// characters long, the `\w\w+` token pattern.
fn word_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    let mut count = 0usize;
    for (i, ch) in text.char_indices() {
        if ch.is_alphanumeric() || ch == '_' {
            if start.is_none() {
                start = Some(i);
                count = 0;
            }
            count += 1;
        } else if let Some(s) = start.take() {
            if count >= 2 {
                tokens.push(&text[s..i]);
            }
        }
    }
    if let Some(s) = start {
        if count >= 2 {
            tokens.push(&text[s..]);
        }
    }
    tokens
}

/// L2-normalize a vector in place.
fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn word_vectorizer() -> Vectorizer {
        Vectorizer::from_json(
            r#"{
                "analyzer": "word",
                "ngram_range": [1, 1],
                "lowercase": true,
                "vocabulary": {"fn": 0, "let": 1, "def": 2, "println": 3},
                "idf": [1.0, 1.5, 2.0, 3.0]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn tokens_are_word_runs_of_two_or_more() {
        let tokens = word_tokens("fn main() { x } my_var2");
        assert_eq!(tokens, vec!["fn", "main", "my_var2"]);
    }

    #[test]
    fn transform_weights_and_normalizes() {
        let vectorizer = word_vectorizer();
        let features = vectorizer.transform("fn fn let");

        // tf·idf = [2.0, 1.5, 0, 0], L2 norm 2.5.
        assert_eq!(features.len(), 4);
        assert!((features[0] - 0.8).abs() < 1e-6, "got {}", features[0]);
        assert!((features[1] - 0.6).abs() < 1e-6, "got {}", features[1]);
        assert_eq!(features[2], 0.0);
        assert_eq!(features[3], 0.0);
    }

    #[test]
    fn unknown_terms_give_zero_vector() {
        let vectorizer = word_vectorizer();
        let features = vectorizer.transform("foo bar baz");
        assert_eq!(features.len(), 4);
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn uppercase_input_is_lowercased() {
        let vectorizer = word_vectorizer();
        let features = vectorizer.transform("FN LET");
        assert!(features[0] > 0.0);
        assert!(features[1] > 0.0);
    }

    #[test]
    fn lowercase_defaults_to_true_when_omitted() {
        let vectorizer = Vectorizer::from_json(
            r#"{
                "analyzer": "word",
                "ngram_range": [1, 1],
                "vocabulary": {"fn": 0},
                "idf": [1.0]
            }"#,
        )
        .unwrap();
        assert!(vectorizer.transform("FN")[0] > 0.0);
    }

    #[test]
    fn word_bigrams_join_adjacent_tokens() {
        let vectorizer = Vectorizer::from_json(
            r#"{
                "analyzer": "word",
                "ngram_range": [1, 2],
                "lowercase": true,
                "vocabulary": {"fn": 0, "main": 1, "fn main": 2},
                "idf": [1.0, 1.0, 1.0]
            }"#,
        )
        .unwrap();
        let grams = vectorizer.analyze("fn main");
        assert_eq!(grams, vec!["fn", "main", "fn main"]);
    }

    #[test]
    fn char_ngrams_slide_over_text() {
        let vectorizer = Vectorizer::from_json(
            r#"{
                "analyzer": "char",
                "ngram_range": [2, 3],
                "lowercase": true,
                "vocabulary": {"ab": 0},
                "idf": [1.0]
            }"#,
        )
        .unwrap();
        let grams = vectorizer.analyze("abc");
        assert_eq!(grams, vec!["ab", "bc", "abc"]);
    }

    #[test]
    fn char_ngrams_include_whitespace() {
        let vectorizer = Vectorizer::from_json(
            r#"{
                "analyzer": "char",
                "ngram_range": [2, 2],
                "lowercase": true,
                "vocabulary": {"a ": 0, " b": 1},
                "idf": [1.0, 1.0]
            }"#,
        )
        .unwrap();
        let grams = vectorizer.analyze("a b");
        assert_eq!(grams, vec!["a ", " b"]);
    }

    #[test]
    fn char_transform_normalizes_to_unit_length() {
        let vectorizer = Vectorizer::from_json(
            r#"{
                "analyzer": "char",
                "ngram_range": [2, 2],
                "lowercase": true,
                "vocabulary": {"ab": 0, "bc": 1},
                "idf": [1.0, 1.0]
            }"#,
        )
        .unwrap();
        let features = vectorizer.transform("abc");
        for &f in &features {
            assert!(
                (f - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6,
                "expected 1/sqrt(2), got {f}"
            );
        }
    }

    #[test]
    fn empty_input_gives_zero_vector() {
        let vectorizer = word_vectorizer();
        let features = vectorizer.transform("");
        assert_eq!(features.len(), 4);
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn rejects_zero_ngram_range() {
        let err = Vectorizer::from_json(
            r#"{"analyzer": "word", "ngram_range": [0, 1], "vocabulary": {"fn": 0}, "idf": [1.0]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DetectError::InvalidVectorizer(_)));
    }

    #[test]
    fn rejects_inverted_ngram_range() {
        let err = Vectorizer::from_json(
            r#"{"analyzer": "word", "ngram_range": [2, 1], "vocabulary": {"fn": 0}, "idf": [1.0]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DetectError::InvalidVectorizer(_)));
    }

    #[test]
    fn rejects_empty_vocabulary() {
        let err = Vectorizer::from_json(
            r#"{"analyzer": "word", "ngram_range": [1, 1], "vocabulary": {}, "idf": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DetectError::InvalidVectorizer(_)));
    }

    #[test]
    fn rejects_column_outside_idf_table() {
        let err = Vectorizer::from_json(
            r#"{"analyzer": "word", "ngram_range": [1, 1], "vocabulary": {"fn": 5}, "idf": [1.0]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DetectError::InvalidVectorizer(_)));
    }

    #[test]
    fn load_reports_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = Vectorizer::load(&dir.path().join("vectorizer.json")).unwrap_err();
        assert!(matches!(err, DetectError::ArtifactMissing(_)));
    }

    #[test]
    fn load_reports_malformed_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectorizer.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not json").unwrap();

        let err = Vectorizer::load(&path).unwrap_err();
        assert!(matches!(
            err,
            DetectError::ArtifactParse {
                name: "vectorizer.json",
                ..
            }
        ));
    }

    #[test]
    fn load_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectorizer.json");
        std::fs::write(
            &path,
            r#"{
                "analyzer": "word",
                "ngram_range": [1, 1],
                "lowercase": true,
                "vocabulary": {"fn": 0, "def": 1},
                "idf": [1.0, 2.0]
            }"#,
        )
        .unwrap();

        let vectorizer = Vectorizer::load(&path).unwrap();
        assert_eq!(vectorizer.n_features(), 2);
        assert!(vectorizer.transform("fn")[0] > 0.0);
    }
}
