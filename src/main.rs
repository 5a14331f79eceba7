/// API сервер для моделей продаж и контрактов

use anyhow::Context;

use imf_predict::{router, AppConfig, ModelKind, ModelRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Модели загружаются до того, как сервер начнёт принимать запросы
    let registry = ModelRegistry::load(&config);
    for kind in [ModelKind::SalesForecast, ModelKind::ContractPrediction] {
        if !registry.is_available(kind) {
            tracing::warn!("{} model unavailable, its endpoint will return 500", kind.as_str());
        }
    }

    let app = router(registry);

    let addr = config.addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("  GET  /                      - API information");
    tracing::info!("  GET  /health                - Health status");
    tracing::info!("  POST /api/predict/sales     - Sales forecast");
    tracing::info!("  POST /api/predict/contract  - Contract prediction");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
