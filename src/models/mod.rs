/// ML модели

pub mod classification;
pub mod forecasting;
pub mod registry;

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{ClientRecord, ForecastRow};

pub use classification::ContractClassifier;
pub use forecasting::SalesForecaster;
pub use registry::{ModelKind, ModelRegistry};

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(String),

    #[error("Prediction error: {0}")]
    Prediction(String),
}

/// Модель временного ряда продаж
pub trait ForecastModel: Send + Sync {
    /// Вся история плюс `periods` дней после последней известной даты
    fn make_future_dates(&self, periods: usize) -> Vec<NaiveDate>;

    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastRow>, ModelError>;
}

/// Бинарный классификатор клиентов
pub trait Classifier: Send + Sync {
    /// Вероятности классов [нет, да]
    fn predict_proba(&self, record: &ClientRecord) -> Result<[f64; 2], ModelError>;

    fn predict(&self, record: &ClientRecord) -> Result<bool, ModelError>;
}
