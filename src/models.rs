//! Model artifacts and inference.
//!
//! Each predictor owns exactly one artifact, deserialized from a JSON weight
//! file at startup and immutable afterwards. Whether a classifier can report
//! probabilities is decided at load time by the artifact's `kind` tag, not by
//! per-request capability probing.

use std::collections::HashMap;
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::features::{PhoneFeatures, UrlFeatures};

/// QR input images are resized to this square grid before inference.
pub const QR_IMAGE_SIZE: u32 = 64;
/// Flattened RGB input dimension of the QR model.
pub const QR_INPUT_DIM: usize = (QR_IMAGE_SIZE * QR_IMAGE_SIZE * 3) as usize;

/// Artifact loading and inference errors.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact file could not be read.
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        /// Artifact path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The artifact file is not valid JSON for the expected schema.
    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        /// Artifact path
        path: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },
    /// The artifact's weights are internally inconsistent.
    #[error("inconsistent model artifact: {0}")]
    Shape(String),
    /// A feature vector did not match the model's input dimension.
    #[error("feature vector has length {got}, model expects {expected}")]
    Dimension {
        /// Expected input dimension
        expected: usize,
        /// Actual vector length
        got: usize,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let data = std::fs::read(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| ModelError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn softmax(z: &Array1<f64>) -> Vec<f64> {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn argmax(xs: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in xs.iter().enumerate() {
        if *v > xs[best] {
            best = i;
        }
    }
    best
}

fn to_matrix(rows: Vec<Vec<f64>>, what: &str) -> Result<Array2<f64>, ModelError> {
    let nrows = rows.len();
    let ncols = rows.first().map(Vec::len).unwrap_or(0);
    if nrows == 0 || ncols == 0 {
        return Err(ModelError::Shape(format!("{what} is empty")));
    }
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(ModelError::Shape(format!("{what} rows differ in length")));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|e| ModelError::Shape(format!("{what}: {e}")))
}

// ---------------------------------------------------------------------------
// Classifier primitives
// ---------------------------------------------------------------------------

/// Serialized classifier payload. The `kind` tag selects the capability at
/// load time: `logistic` models expose class probabilities, `centroid` models
/// are label-only.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact<L> {
    /// Logistic-regression weights (probability-capable).
    Logistic {
        /// Class labels, in coefficient-row order
        classes: Vec<L>,
        /// Coefficient matrix; a single row for the binary form
        coef: Vec<Vec<f64>>,
        /// Per-row intercepts
        intercept: Vec<f64>,
    },
    /// Nearest-centroid classifier (label-only).
    Centroid {
        /// Class labels, in centroid-row order
        classes: Vec<L>,
        /// One centroid per class
        centroids: Vec<Vec<f64>>,
    },
}

/// Linear (logistic) classifier over a fixed-length feature vector.
#[derive(Debug, Clone)]
pub struct LinearClassifier<L> {
    classes: Vec<L>,
    coef: Array2<f64>,
    intercept: Array1<f64>,
}

impl<L> LinearClassifier<L> {
    /// Build a classifier from raw weights, validating shapes.
    pub fn from_parts(
        classes: Vec<L>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    ) -> Result<Self, ModelError> {
        let coef = to_matrix(coef, "coef")?;
        if intercept.len() != coef.nrows() {
            return Err(ModelError::Shape(format!(
                "intercept has {} entries for {} coefficient rows",
                intercept.len(),
                coef.nrows()
            )));
        }
        let binary = classes.len() == 2 && coef.nrows() == 1;
        if !binary && classes.len() != coef.nrows() {
            return Err(ModelError::Shape(format!(
                "{} classes for {} coefficient rows",
                classes.len(),
                coef.nrows()
            )));
        }
        Ok(Self {
            classes,
            coef,
            intercept: Array1::from(intercept),
        })
    }

    /// Model input dimension.
    pub fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    /// Class labels in probability order.
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    /// Class probability distribution: sigmoid for the single-row binary
    /// form, softmax otherwise.
    pub fn predict_proba(&self, x: &Array1<f64>) -> Result<Vec<f64>, ModelError> {
        if x.len() != self.coef.ncols() {
            return Err(ModelError::Dimension {
                expected: self.coef.ncols(),
                got: x.len(),
            });
        }
        let z = self.coef.dot(x) + &self.intercept;
        if self.classes.len() == 2 && z.len() == 1 {
            let p = sigmoid(z[0]);
            Ok(vec![1.0 - p, p])
        } else {
            Ok(softmax(&z))
        }
    }
}

/// Label-only nearest-centroid classifier.
#[derive(Debug, Clone)]
pub struct NearestCentroid<L> {
    classes: Vec<L>,
    centroids: Array2<f64>,
}

impl<L> NearestCentroid<L> {
    fn from_parts(classes: Vec<L>, centroids: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        let centroids = to_matrix(centroids, "centroids")?;
        if classes.len() != centroids.nrows() {
            return Err(ModelError::Shape(format!(
                "{} classes for {} centroids",
                classes.len(),
                centroids.nrows()
            )));
        }
        Ok(Self { classes, centroids })
    }

    /// Model input dimension.
    pub fn n_features(&self) -> usize {
        self.centroids.ncols()
    }

    /// Label of the nearest centroid by squared euclidean distance.
    pub fn predict(&self, x: &Array1<f64>) -> Result<&L, ModelError> {
        if x.len() != self.centroids.ncols() {
            return Err(ModelError::Dimension {
                expected: self.centroids.ncols(),
                got: x.len(),
            });
        }
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, row) in self.centroids.rows().into_iter().enumerate() {
            let dist: f64 = row.iter().zip(x.iter()).map(|(a, b)| (a - b) * (a - b)).sum();
            if dist < best_dist {
                best_dist = dist;
                best = i;
            }
        }
        Ok(&self.classes[best])
    }
}

/// Capability-typed classifier, selected when the artifact is loaded.
#[derive(Debug, Clone)]
pub enum Classifier<L> {
    /// Exposes a full class-probability distribution.
    Probabilistic(LinearClassifier<L>),
    /// Predicts a label only.
    LabelOnly(NearestCentroid<L>),
}

impl<L: Clone> Classifier<L> {
    /// Model input dimension.
    pub fn n_features(&self) -> usize {
        match self {
            Classifier::Probabilistic(m) => m.n_features(),
            Classifier::LabelOnly(m) => m.n_features(),
        }
    }

    /// Predicted label plus the probability distribution when the model
    /// supports one.
    pub fn classify(&self, x: &Array1<f64>) -> Result<(L, Option<Vec<f64>>), ModelError> {
        match self {
            Classifier::Probabilistic(m) => {
                let probs = m.predict_proba(x)?;
                let label = m.classes()[argmax(&probs)].clone();
                Ok((label, Some(probs)))
            }
            Classifier::LabelOnly(m) => Ok((m.predict(x)?.clone(), None)),
        }
    }
}

impl<L: Clone> TryFrom<ClassifierArtifact<L>> for Classifier<L> {
    type Error = ModelError;

    fn try_from(artifact: ClassifierArtifact<L>) -> Result<Self, ModelError> {
        match artifact {
            ClassifierArtifact::Logistic {
                classes,
                coef,
                intercept,
            } => Ok(Classifier::Probabilistic(LinearClassifier::from_parts(
                classes, coef, intercept,
            )?)),
            ClassifierArtifact::Centroid { classes, centroids } => Ok(Classifier::LabelOnly(
                NearestCentroid::from_parts(classes, centroids)?,
            )),
        }
    }
}

/// Standard-scaler parameters applied before classification.
#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
    /// Per-feature means
    pub mean: Vec<f64>,
    /// Per-feature standard deviations
    pub scale: Vec<f64>,
}

impl Scaler {
    fn transform(&self, x: &mut Array1<f64>) -> Result<(), ModelError> {
        if self.mean.len() != x.len() || self.scale.len() != x.len() {
            return Err(ModelError::Dimension {
                expected: self.mean.len(),
                got: x.len(),
            });
        }
        for (i, v) in x.iter_mut().enumerate() {
            let s = if self.scale[i] == 0.0 { 1.0 } else { self.scale[i] };
            *v = (*v - self.mean[i]) / s;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Text vectorizer
// ---------------------------------------------------------------------------

/// Serialized token vocabulary with optional idf weights.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerArtifact {
    /// Token to feature-index mapping
    pub vocab: HashMap<String, usize>,
    /// Per-index idf weights (tf-idf models)
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
}

/// Bag-of-tokens vectorizer over lowercased alphanumeric tokens.
#[derive(Debug, Clone)]
pub struct TextVectorizer {
    vocab: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    dim: usize,
}

impl TryFrom<VectorizerArtifact> for TextVectorizer {
    type Error = ModelError;

    fn try_from(artifact: VectorizerArtifact) -> Result<Self, ModelError> {
        let dim = artifact
            .vocab
            .values()
            .max()
            .map(|m| m + 1)
            .ok_or_else(|| ModelError::Shape("vectorizer vocabulary is empty".into()))?;
        if let Some(idf) = &artifact.idf {
            if idf.len() != dim {
                return Err(ModelError::Shape(format!(
                    "idf has {} entries for dimension {dim}",
                    idf.len()
                )));
            }
        }
        Ok(Self {
            vocab: artifact.vocab,
            idf: artifact.idf,
            dim,
        })
    }
}

impl TextVectorizer {
    /// Output dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Token counts (times idf when present) over the vocabulary.
    pub fn transform(&self, text: &str) -> Array1<f64> {
        let mut x = Array1::zeros(self.dim);
        for token in tokenize(text) {
            if let Some(&idx) = self.vocab.get(token) {
                x[idx] += 1.0;
            }
        }
        if let Some(idf) = &self.idf {
            for (i, v) in x.iter_mut().enumerate() {
                *v *= idf[i];
            }
        }
        x
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

// ---------------------------------------------------------------------------
// Per-domain models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct UpiArtifact {
    vectorizer: VectorizerArtifact,
    classifier: ClassifierArtifact<i64>,
}

/// UPI-ID fraud model: text vectorizer plus classifier.
#[derive(Debug, Clone)]
pub struct UpiModel {
    vectorizer: TextVectorizer,
    classifier: Classifier<i64>,
}

impl UpiModel {
    /// Load the artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let artifact: UpiArtifact = read_json(path)?;
        let vectorizer = TextVectorizer::try_from(artifact.vectorizer)?;
        let classifier = Classifier::try_from(artifact.classifier)?;
        if classifier.n_features() != vectorizer.dim() {
            return Err(ModelError::Shape(format!(
                "classifier expects {} features, vectorizer produces {}",
                classifier.n_features(),
                vectorizer.dim()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Build from already-constructed parts. Used by tests.
    pub fn from_parts(vectorizer: TextVectorizer, classifier: Classifier<i64>) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Predicted class id plus the full probability vector when available.
    pub fn classify(&self, text: &str) -> Result<(i64, Option<Vec<f64>>), ModelError> {
        let x = self.vectorizer.transform(text);
        self.classifier.classify(&x)
    }
}

#[derive(Debug, Deserialize)]
struct PhoneArtifact {
    #[serde(default)]
    scaler: Option<Scaler>,
    classifier: ClassifierArtifact<String>,
}

/// Phone-spam pipeline: feature extraction, optional scaling, classification.
#[derive(Debug, Clone)]
pub struct PhoneModel {
    scaler: Option<Scaler>,
    classifier: Classifier<String>,
}

impl PhoneModel {
    /// Load the pipeline artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let artifact: PhoneArtifact = read_json(path)?;
        Ok(Self {
            scaler: artifact.scaler,
            classifier: Classifier::try_from(artifact.classifier)?,
        })
    }

    /// Build from already-constructed parts. Used by tests.
    pub fn from_parts(scaler: Option<Scaler>, classifier: Classifier<String>) -> Self {
        Self { scaler, classifier }
    }

    /// Predicted label plus the predicted class's probability when the
    /// classifier is probability-capable.
    pub fn classify(&self, features: &PhoneFeatures) -> Result<(String, Option<f64>), ModelError> {
        let mut x = features.to_vector();
        if let Some(scaler) = &self.scaler {
            scaler.transform(&mut x)?;
        }
        let (label, probs) = self.classifier.classify(&x)?;
        let confidence = probs.map(|p| p.iter().copied().fold(f64::NEG_INFINITY, f64::max));
        Ok((label, confidence))
    }
}

#[derive(Debug, Deserialize)]
struct UrlArtifact {
    classifier: ClassifierArtifact<i64>,
}

/// URL maliciousness model. Must be probability-capable: the verdict is
/// thresholded on the malicious-class probability.
#[derive(Debug, Clone)]
pub struct UrlModel {
    classifier: LinearClassifier<i64>,
    malicious_index: usize,
}

impl UrlModel {
    /// Load the artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let artifact: UrlArtifact = read_json(path)?;
        match Classifier::try_from(artifact.classifier)? {
            Classifier::Probabilistic(classifier) => Self::from_classifier(classifier),
            Classifier::LabelOnly(_) => Err(ModelError::Shape(
                "url model must be probability-capable".into(),
            )),
        }
    }

    /// Build from a probability-capable classifier. Used by tests.
    pub fn from_classifier(classifier: LinearClassifier<i64>) -> Result<Self, ModelError> {
        let malicious_index = classifier
            .classes()
            .iter()
            .position(|c| *c == 1)
            .ok_or_else(|| ModelError::Shape("url model has no malicious class (1)".into()))?;
        Ok(Self {
            classifier,
            malicious_index,
        })
    }

    /// Probability of the malicious class.
    pub fn malicious_probability(&self, features: &UrlFeatures) -> Result<f64, ModelError> {
        let probs = self.classifier.predict_proba(&features.to_vector())?;
        Ok(probs[self.malicious_index])
    }
}

#[derive(Debug, Deserialize)]
struct SmsArtifact {
    vocab: HashMap<String, usize>,
    embedding: Vec<Vec<f64>>,
    weight: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

/// SMS spam classifier: token embeddings mean-pooled into a two-class linear
/// head with softmax. Class index 1 is Ham, everything else Spam.
#[derive(Debug, Clone)]
pub struct SmsModel {
    vocab: HashMap<String, usize>,
    embedding: Array2<f64>,
    weight: Array2<f64>,
    bias: Array1<f64>,
}

impl SmsModel {
    /// Load the artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let artifact: SmsArtifact = read_json(path)?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: SmsArtifact) -> Result<Self, ModelError> {
        let embedding = to_matrix(artifact.embedding, "embedding")?;
        let weight = to_matrix(artifact.weight, "weight")?;
        if weight.nrows() != 2 {
            return Err(ModelError::Shape(format!(
                "sms head has {} classes, expected 2",
                weight.nrows()
            )));
        }
        if weight.ncols() != embedding.ncols() {
            return Err(ModelError::Shape(format!(
                "sms head expects {} dims, embeddings have {}",
                weight.ncols(),
                embedding.ncols()
            )));
        }
        if artifact.bias.len() != 2 {
            return Err(ModelError::Shape(format!(
                "sms bias has {} entries, expected 2",
                artifact.bias.len()
            )));
        }
        if let Some(&max) = artifact.vocab.values().max() {
            if max >= embedding.nrows() {
                return Err(ModelError::Shape(format!(
                    "vocab index {max} outside embedding table of {} rows",
                    embedding.nrows()
                )));
            }
        }
        Ok(Self {
            vocab: artifact.vocab,
            embedding,
            weight,
            bias: Array1::from(artifact.bias),
        })
    }

    /// Build a model directly from weights. Used by tests.
    pub fn from_weights(
        vocab: HashMap<String, usize>,
        embedding: Vec<Vec<f64>>,
        weight: Vec<Vec<f64>>,
        bias: Vec<f64>,
    ) -> Result<Self, ModelError> {
        Self::from_artifact(SmsArtifact {
            vocab,
            embedding,
            weight,
            bias,
        })
    }

    /// Predicted class index and its softmax probability. Tokens outside the
    /// vocabulary are ignored; a message with no known tokens falls back to
    /// the bias-only logits.
    pub fn classify(&self, text: &str) -> Result<(usize, f64), ModelError> {
        let lower = text.to_lowercase();
        let mut pooled = Array1::<f64>::zeros(self.embedding.ncols());
        let mut hits = 0usize;
        for token in tokenize(&lower) {
            if let Some(&idx) = self.vocab.get(token) {
                pooled += &self.embedding.row(idx);
                hits += 1;
            }
        }
        if hits > 0 {
            pooled /= hits as f64;
        }
        let logits = self.weight.dot(&pooled) + &self.bias;
        let probs = softmax(&logits);
        let class = argmax(&probs);
        Ok((class, probs[class]))
    }
}

#[derive(Debug, Deserialize)]
struct QrArtifact {
    hidden_weight: Vec<Vec<f64>>,
    hidden_bias: Vec<f64>,
    output_weight: Vec<f64>,
    output_bias: f64,
}

/// QR maliciousness model: one ReLU hidden layer over the flattened 64x64 RGB
/// image, sigmoid output.
#[derive(Debug, Clone)]
pub struct QrModel {
    hidden_weight: Array2<f64>,
    hidden_bias: Array1<f64>,
    output_weight: Array1<f64>,
    output_bias: f64,
}

impl QrModel {
    /// Load the artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let artifact: QrArtifact = read_json(path)?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: QrArtifact) -> Result<Self, ModelError> {
        let hidden_weight = to_matrix(artifact.hidden_weight, "hidden_weight")?;
        if artifact.hidden_bias.len() != hidden_weight.nrows()
            || artifact.output_weight.len() != hidden_weight.nrows()
        {
            return Err(ModelError::Shape(format!(
                "qr layers disagree: {} hidden units, {} biases, {} output weights",
                hidden_weight.nrows(),
                artifact.hidden_bias.len(),
                artifact.output_weight.len()
            )));
        }
        Ok(Self {
            hidden_weight,
            hidden_bias: Array1::from(artifact.hidden_bias),
            output_weight: Array1::from(artifact.output_weight),
            output_bias: artifact.output_bias,
        })
    }

    /// Build a model directly from weights. Used by tests.
    pub fn from_weights(
        hidden_weight: Vec<Vec<f64>>,
        hidden_bias: Vec<f64>,
        output_weight: Vec<f64>,
        output_bias: f64,
    ) -> Result<Self, ModelError> {
        Self::from_artifact(QrArtifact {
            hidden_weight,
            hidden_bias,
            output_weight,
            output_bias,
        })
    }

    /// Malicious probability for a normalized pixel vector.
    pub fn classify(&self, pixels: &Array1<f64>) -> Result<f64, ModelError> {
        if pixels.len() != self.hidden_weight.ncols() {
            return Err(ModelError::Dimension {
                expected: self.hidden_weight.ncols(),
                got: pixels.len(),
            });
        }
        let mut hidden = self.hidden_weight.dot(pixels) + &self.hidden_bias;
        hidden.mapv_inplace(|v| v.max(0.0));
        Ok(sigmoid(self.output_weight.dot(&hidden) + self.output_bias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn binary_logistic() -> LinearClassifier<i64> {
        LinearClassifier::from_parts(vec![0, 1], vec![vec![2.0, -1.0]], vec![0.5]).unwrap()
    }

    #[test]
    fn test_binary_proba_sums_to_one() {
        let m = binary_logistic();
        let probs = m.predict_proba(&Array1::from(vec![1.0, 3.0])).unwrap();
        assert_eq!(probs.len(), 2);
        assert!((probs[0] + probs[1] - 1.0).abs() < 1e-12);
        // z = 2 - 3 + 0.5 = -0.5 < 0 so the positive class is the minority
        assert!(probs[1] < 0.5);
    }

    #[test]
    fn test_multiclass_softmax_argmax() {
        let m = LinearClassifier::from_parts(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![vec![1.0], vec![3.0], vec![2.0]],
            vec![0.0, 0.0, 0.0],
        )
        .unwrap();
        let probs = m.predict_proba(&Array1::from(vec![1.0])).unwrap();
        assert_eq!(argmax(&probs), 1);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let m = binary_logistic();
        let err = m.predict_proba(&Array1::from(vec![1.0])).unwrap_err();
        assert!(matches!(err, ModelError::Dimension { expected: 2, got: 1 }));
    }

    #[test]
    fn test_shape_validation() {
        let err = LinearClassifier::from_parts(vec![0, 1], vec![vec![1.0], vec![]], vec![0.0])
            .unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)));
    }

    #[test]
    fn test_centroid_is_label_only() {
        let artifact: ClassifierArtifact<String> = serde_json::from_value(json!({
            "kind": "centroid",
            "classes": ["ham", "spam"],
            "centroids": [[0.0, 0.0], [5.0, 5.0]],
        }))
        .unwrap();
        let clf = Classifier::try_from(artifact).unwrap();
        let (label, probs) = clf.classify(&Array1::from(vec![4.0, 4.5])).unwrap();
        assert_eq!(label, "spam");
        assert!(probs.is_none());
    }

    #[test]
    fn test_logistic_artifact_is_probabilistic() {
        let artifact: ClassifierArtifact<i64> = serde_json::from_value(json!({
            "kind": "logistic",
            "classes": [0, 1],
            "coef": [[1.0, 1.0]],
            "intercept": [0.0],
        }))
        .unwrap();
        let clf = Classifier::try_from(artifact).unwrap();
        let (_, probs) = clf.classify(&Array1::from(vec![1.0, 1.0])).unwrap();
        assert!(probs.is_some());
    }

    #[test]
    fn test_vectorizer_counts_and_dim() {
        let v = TextVectorizer::try_from(VectorizerArtifact {
            vocab: HashMap::from([("pay".to_string(), 0), ("fraud".to_string(), 2)]),
            idf: None,
        })
        .unwrap();
        assert_eq!(v.dim(), 3);
        let x = v.transform("pay pay fraud@upi");
        assert_eq!(x[0], 2.0);
        assert_eq!(x[1], 0.0);
        assert_eq!(x[2], 1.0);
    }

    #[test]
    fn test_sms_classify_known_weights() {
        // One-dimensional embeddings: "win" pushes towards class 0 (spam),
        // "hello" towards class 1 (ham).
        let m = SmsModel::from_weights(
            HashMap::from([("win".to_string(), 0), ("hello".to_string(), 1)]),
            vec![vec![1.0], vec![-1.0]],
            vec![vec![2.0], vec![-2.0]],
            vec![0.0, 0.0],
        )
        .unwrap();
        let (class, conf) = m.classify("WIN WIN WIN").unwrap();
        assert_eq!(class, 0);
        assert!(conf > 0.5);
        let (class, _) = m.classify("hello there").unwrap();
        assert_eq!(class, 1);
    }

    #[test]
    fn test_sms_no_known_tokens_uses_bias() {
        let m = SmsModel::from_weights(
            HashMap::from([("win".to_string(), 0)]),
            vec![vec![1.0]],
            vec![vec![1.0], vec![-1.0]],
            vec![-1.0, 1.0],
        )
        .unwrap();
        let (class, _) = m.classify("completely unseen words").unwrap();
        assert_eq!(class, 1);
    }

    #[test]
    fn test_qr_net_forward() {
        // Identity-ish net: hidden = relu(x), output = sigmoid(sum(hidden) - 1)
        let m = QrModel::from_weights(
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            -1.0,
        )
        .unwrap();
        let p = m.classify(&Array1::from(vec![1.0, 1.0])).unwrap();
        assert!(p > 0.5);
        let p = m.classify(&Array1::from(vec![0.0, 0.0])).unwrap();
        assert!(p < 0.5);
    }

    #[test]
    fn test_url_model_requires_malicious_class() {
        let clf = LinearClassifier::from_parts(vec![0, 2], vec![vec![1.0]], vec![0.0]).unwrap();
        assert!(matches!(
            UrlModel::from_classifier(clf),
            Err(ModelError::Shape(_))
        ));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = UpiModel::load(Path::new("/nonexistent/upi.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn test_load_roundtrip_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upi_model.json");
        std::fs::write(
            &path,
            serde_json::to_vec(&json!({
                "vectorizer": { "vocab": { "fraud": 0, "pay": 1 } },
                "classifier": {
                    "kind": "logistic",
                    "classes": [0, 1],
                    "coef": [[3.0, -1.0]],
                    "intercept": [0.0],
                },
            }))
            .unwrap(),
        )
        .unwrap();

        let model = UpiModel::load(&path).unwrap();
        let (pred, probs) = model.classify("fraud fraud").unwrap();
        assert_eq!(pred, 1);
        assert!(probs.unwrap()[1] > 0.5);
    }
}
