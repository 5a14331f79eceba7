//! Классификатор контрактов
//!
//! Пайплайн: стандартизация числовых колонок, one-hot для категориальных,
//! логистическая регрессия поверх конкатенации.

use std::path::Path;

use ndarray::{concatenate, Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use super::{Classifier, ModelError};
use crate::preprocessing::{DataNormalizer, OneHotEncoder};
use crate::types::{ClientRecord, CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericBlock {
    pub columns: Vec<String>,
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalBlock {
    pub columns: Vec<String>,
    pub categories: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub numeric: NumericBlock,
    pub categorical: CategoricalBlock,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 { 0.5 }

pub struct ContractClassifier {
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
    normalizer: DataNormalizer,
    encoder: OneHotEncoder,
    coefficients: Array1<f64>,
    intercept: f64,
    threshold: f64,
}

impl ContractClassifier {
    pub fn from_artifact(artifact: PipelineArtifact) -> Result<Self, ModelError> {
        for column in &artifact.numeric.columns {
            if !NUMERIC_COLUMNS.contains(&column.as_str()) {
                return Err(ModelError::Invalid(format!("Unknown numeric column '{}'", column)));
            }
        }
        for column in &artifact.categorical.columns {
            if !CATEGORICAL_COLUMNS.contains(&column.as_str()) {
                return Err(ModelError::Invalid(format!(
                    "Unknown categorical column '{}'",
                    column
                )));
            }
        }

        if artifact.numeric.columns.len() != artifact.numeric.mean.len() {
            return Err(ModelError::Invalid(format!(
                "{} numeric columns but {} scaler values",
                artifact.numeric.columns.len(),
                artifact.numeric.mean.len()
            )));
        }
        if artifact.categorical.columns.len() != artifact.categorical.categories.len() {
            return Err(ModelError::Invalid(format!(
                "{} categorical columns but {} category lists",
                artifact.categorical.columns.len(),
                artifact.categorical.categories.len()
            )));
        }

        let normalizer = DataNormalizer::new(artifact.numeric.mean, artifact.numeric.std)
            .map_err(ModelError::Invalid)?;
        let encoder =
            OneHotEncoder::new(&artifact.categorical.categories).map_err(ModelError::Invalid)?;

        let expected = normalizer.n_features() + encoder.width();
        if artifact.coefficients.len() != expected {
            return Err(ModelError::Invalid(format!(
                "Expected {} coefficients, got {}",
                expected,
                artifact.coefficients.len()
            )));
        }

        Ok(Self {
            numeric_columns: artifact.numeric.columns,
            categorical_columns: artifact.categorical.columns,
            normalizer,
            encoder,
            coefficients: Array1::from_vec(artifact.coefficients),
            intercept: artifact.intercept,
            threshold: artifact.threshold,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: PipelineArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn features(&self, record: &ClientRecord) -> Result<Array1<f64>, ModelError> {
        let numeric: Vec<f64> = self
            .numeric_columns
            .iter()
            .map(|c| record.numeric(c).unwrap_or(0.0))
            .collect();
        let numeric = Array2::from_shape_vec((1, numeric.len()), numeric)
            .map_err(|e| ModelError::Prediction(e.to_string()))?;
        let scaled = self
            .normalizer
            .transform(&numeric)
            .map_err(ModelError::Prediction)?;

        let categorical: Vec<&str> = self
            .categorical_columns
            .iter()
            .map(|c| record.categorical(c).unwrap_or(""))
            .collect();
        let encoded = self
            .encoder
            .transform(&categorical)
            .map_err(ModelError::Prediction)?;

        concatenate(Axis(0), &[scaled.row(0), encoded.view()])
            .map_err(|e| ModelError::Prediction(e.to_string()))
    }

    fn positive_probability(&self, record: &ClientRecord) -> Result<f64, ModelError> {
        let x = self.features(record)?;
        let logit = x.dot(&self.coefficients) + self.intercept;
        let p = sigmoid(logit);
        if p.is_finite() {
            Ok(p)
        } else {
            Err(ModelError::Prediction("Non-finite probability".to_string()))
        }
    }
}

impl Classifier for ContractClassifier {
    fn predict_proba(&self, record: &ClientRecord) -> Result<[f64; 2], ModelError> {
        let p = self.positive_probability(record)?;
        Ok([1.0 - p, p])
    }

    fn predict(&self, record: &ClientRecord) -> Result<bool, ModelError> {
        Ok(self.positive_probability(record)? > self.threshold)
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
