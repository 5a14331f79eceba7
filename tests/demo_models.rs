use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use imf_predict::{router, AppConfig, ModelKind, ModelRegistry};

fn demo_registry() -> ModelRegistry {
    let config = AppConfig {
        models_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/models"),
        ..AppConfig::default()
    };
    ModelRegistry::load(&config)
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router(demo_registry()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn demo_artifacts_load() {
    let registry = demo_registry();
    assert!(registry.is_available(ModelKind::SalesForecast));
    assert!(registry.is_available(ModelKind::ContractPrediction));
}

#[tokio::test]
async fn demo_forecast_starts_after_history() {
    let (status, body) = post_json("/api/predict/sales", json!({ "days": 30 })).await;
    assert_eq!(status, StatusCode::OK);

    let predictions = body["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 30);
    assert_eq!(predictions[0]["date"], "2018-01-01");
    assert_eq!(predictions[29]["date"], "2018-01-30");

    for point in predictions {
        let forecast = point["sales_forecast"].as_f64().unwrap();
        let lower = point["lower_bound"].as_f64().unwrap();
        let upper = point["upper_bound"].as_f64().unwrap();
        assert!(forecast >= 0.0 && lower >= 0.0 && upper >= 0.0);
        assert!(lower <= forecast && forecast <= upper);
    }
}

#[tokio::test]
async fn demo_contract_prediction_is_consistent() {
    let (status, body) = post_json(
        "/api/predict/contract",
        json!({
            "age": 35, "job": "technician", "marital": "married",
            "education": "secondary", "default": "no", "balance": 1500,
            "housing": "yes", "loan": "no", "contact": "cellular", "day": 15,
            "month": "may", "campaign": 2, "pdays": -1, "previous": 0,
            "poutcome": "unknown"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let prediction = &body["prediction"];
    let probability = prediction["probability"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&probability));
    assert_eq!(prediction["will_contract"], probability > 0.5);
    assert!(["high", "medium", "low"].contains(&prediction["confidence"].as_str().unwrap()));
}
