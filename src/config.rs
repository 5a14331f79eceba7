//! Конфигурация сервера из переменных окружения

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub models_dir: PathBuf,
    pub sales_model_file: String,
    pub contract_model_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            models_dir: PathBuf::from("models"),
            sales_model_file: "future_sales.json".to_string(),
            contract_model_file: "best_pipeline.json".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("PORT must be a valid number, got '{}'", value))?,
            Err(_) => defaults.port,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            models_dir: env::var("MODELS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.models_dir),
            sales_model_file: env::var("SALES_MODEL_FILE").unwrap_or(defaults.sales_model_file),
            contract_model_file: env::var("CONTRACT_MODEL_FILE")
                .unwrap_or(defaults.contract_model_file),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid HOST:PORT configuration {}:{}", self.host, self.port))
    }

    pub fn sales_model_path(&self) -> PathBuf {
        self.models_dir.join(&self.sales_model_file)
    }

    pub fn contract_model_path(&self) -> PathBuf {
        self.models_dir.join(&self.contract_model_file)
    }
}
