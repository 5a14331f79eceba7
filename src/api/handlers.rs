//! Обработчики HTTP эндпоинтов

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::Value;

use super::validation::{json_object, missing_fields, parse_client, parse_days};
use super::AppState;
use crate::error::{ApiError, ApiResult};
use crate::models::{Classifier, ForecastModel, ModelError, ModelKind};
use crate::preprocessing::FeatureEngineer;
use crate::types::{
    ClientRecord, ClientSummary, ContractPrediction, ContractPredictionResponse, ForecastPoint,
    HealthResponse, ModelsHealth, SalesForecastResponse,
};

pub async fn root() -> Json<Value> {
    Json(serde_json::json!({
        "api": "IMF M7 - Sales and Contract Prediction",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/api/predict/sales": {
                "method": "POST",
                "description": "Forecast sales for the next N days",
                "parameters": {
                    "days": "Number of days to forecast, 1-365 (int)"
                },
                "example": { "days": 7 }
            },
            "/api/predict/contract": {
                "method": "POST",
                "description": "Predict whether a client will contract the product",
                "parameters": {
                    "age": "Client age (int)",
                    "job": "Job (str)",
                    "marital": "Marital status: married, single, divorced (str)",
                    "education": "Education level: primary, secondary, tertiary, unknown (str)",
                    "default": "Has credit in default: yes, no (str)",
                    "balance": "Account balance (int)",
                    "housing": "Has housing loan: yes, no (str)",
                    "loan": "Has personal loan: yes, no (str)",
                    "contact": "Contact type: cellular, telephone, unknown (str)",
                    "day": "Day of month (int)",
                    "month": "Month: jan, feb, mar, apr, may, jun, jul, aug, sep, oct, nov, dec (str)",
                    "campaign": "Contacts during this campaign (int)",
                    "pdays": "Days since last contact, -1 if never (int)",
                    "previous": "Contacts before this campaign (int)",
                    "poutcome": "Previous campaign outcome: success, failure, other, unknown (str)"
                },
                "example": {
                    "age": 35,
                    "job": "technician",
                    "marital": "married",
                    "education": "secondary",
                    "default": "no",
                    "balance": 1500,
                    "housing": "yes",
                    "loan": "no",
                    "contact": "cellular",
                    "day": 15,
                    "month": "may",
                    "campaign": 2,
                    "pdays": -1,
                    "previous": 0,
                    "poutcome": "unknown"
                }
            },
            "/health": {
                "method": "GET",
                "description": "API and model status"
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = &state.registry;
    Json(HealthResponse {
        status: "healthy".to_string(),
        models: ModelsHealth {
            sales_forecast: registry.is_available(ModelKind::SalesForecast),
            contract_prediction: registry.is_available(ModelKind::ContractPrediction),
        },
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn predict_sales(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SalesForecastResponse>> {
    let body = json_object(body)?;
    let days = parse_days(&body)?;

    tracing::info!("Sales forecast request: {} days", days);

    let model = state.registry.forecaster().ok_or_else(|| {
        ApiError::ServiceUnavailable("Sales forecast model not available".to_string())
    })?;

    let predictions = run_model(move || forecast_days(model.as_ref(), days)).await?;

    Ok(Json(SalesForecastResponse {
        status: "success".to_string(),
        days_predicted: days,
        predictions,
    }))
}

pub async fn predict_contract(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ContractPredictionResponse>> {
    let body = json_object(body)?;

    let missing = missing_fields(&body);
    if !missing.is_empty() {
        return Err(ApiError::Validation(format!(
            "Missing fields: {}",
            missing.join(", ")
        )));
    }

    let raw = parse_client(&body)?;

    tracing::info!(
        "Contract prediction request: age {}, job {}, month {}",
        raw.age,
        raw.job,
        raw.month
    );

    let model = state.registry.classifier().ok_or_else(|| {
        ApiError::ServiceUnavailable("Contract prediction pipeline not available".to_string())
    })?;

    let record = FeatureEngineer::derive_features(&raw);
    let prediction = run_model(move || classify(model.as_ref(), &record)).await?;

    // Эхо исходных значений, а не приведённых
    let client_summary = ClientSummary {
        age: body["age"].clone(),
        job: body["job"].clone(),
        education: body["education"].clone(),
        balance: body["balance"].clone(),
    };

    Ok(Json(ContractPredictionResponse {
        status: "success".to_string(),
        prediction,
        client_summary,
    }))
}

/// Последние `days` точек прогноза по расширенной временной шкале
pub fn forecast_days(model: &dyn ForecastModel, days: u32) -> Result<Vec<ForecastPoint>, ModelError> {
    let days = days as usize;
    let future = model.make_future_dates(days);
    let forecast = model.predict(&future)?;

    if forecast.len() < days {
        return Err(ModelError::Prediction(format!(
            "Model returned {} rows, expected at least {}",
            forecast.len(),
            days
        )));
    }

    Ok(forecast[forecast.len() - days..]
        .iter()
        .map(ForecastPoint::from)
        .collect())
}

pub fn classify(model: &dyn Classifier, record: &ClientRecord) -> Result<ContractPrediction, ModelError> {
    let proba = model.predict_proba(record)?;
    let will_contract = model.predict(record)?;

    let prob_yes = proba[1];
    if !(0.0..=1.0).contains(&prob_yes) {
        return Err(ModelError::Prediction(format!(
            "Probability out of range: {}",
            prob_yes
        )));
    }

    Ok(ContractPrediction::new(will_contract, prob_yes))
}

/// Вызов модели в пуле блокирующих задач; паника модели становится ошибкой 500
async fn run_model<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, ModelError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("Model invocation failed: {}", e)))?
        .map_err(ApiError::from)
}
