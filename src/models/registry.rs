//! Реестр загруженных моделей
//!
//! Заполняется один раз при старте и дальше только читается.

use std::path::Path;
use std::sync::Arc;

use super::{Classifier, ContractClassifier, ForecastModel, ModelError, SalesForecaster};
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    SalesForecast,
    ContractPrediction,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::SalesForecast => "sales_forecast",
            ModelKind::ContractPrediction => "contract_prediction",
        }
    }
}

#[derive(Clone, Default)]
pub struct ModelRegistry {
    forecaster: Option<Arc<dyn ForecastModel>>,
    classifier: Option<Arc<dyn Classifier>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forecaster(mut self, model: Arc<dyn ForecastModel>) -> Self {
        self.forecaster = Some(model);
        self
    }

    pub fn with_classifier(mut self, model: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(model);
        self
    }

    /// Загрузка обеих моделей. Отсутствующий или битый файл оставляет слот пустым.
    pub fn load(config: &AppConfig) -> Self {
        tracing::info!("Loading models from {}", config.models_dir.display());

        let mut registry = Self::new();

        if let Some(model) = load_slot(
            ModelKind::SalesForecast,
            &config.sales_model_path(),
            SalesForecaster::load,
        ) {
            registry = registry.with_forecaster(Arc::new(model));
        }

        if let Some(model) = load_slot(
            ModelKind::ContractPrediction,
            &config.contract_model_path(),
            ContractClassifier::load,
        ) {
            registry = registry.with_classifier(Arc::new(model));
        }

        registry
    }

    pub fn is_available(&self, kind: ModelKind) -> bool {
        match kind {
            ModelKind::SalesForecast => self.forecaster.is_some(),
            ModelKind::ContractPrediction => self.classifier.is_some(),
        }
    }

    pub fn forecaster(&self) -> Option<Arc<dyn ForecastModel>> {
        self.forecaster.clone()
    }

    pub fn classifier(&self) -> Option<Arc<dyn Classifier>> {
        self.classifier.clone()
    }
}

fn load_slot<T>(
    kind: ModelKind,
    path: &Path,
    loader: impl FnOnce(&Path) -> Result<T, ModelError>,
) -> Option<T> {
    if !path.exists() {
        tracing::warn!("Model file for {} not found at {}", kind.as_str(), path.display());
        return None;
    }

    match loader(path) {
        Ok(model) => {
            tracing::info!("Loaded {} model from {}", kind.as_str(), path.display());
            Some(model)
        }
        Err(e) => {
            tracing::error!("Failed to load {} model: {}", kind.as_str(), e);
            None
        }
    }
}
