//! IMF predict - API прогнозирования продаж и контрактов

#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod preprocessing;
pub mod types;

pub use api::{router, AppState};
pub use config::AppConfig;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use models::{Classifier, ForecastModel, ModelError, ModelKind, ModelRegistry};
pub use types::*;
