//! Модель прогнозирования продаж
//!
//! Аддитивная модель: линейный тренд плюс сезонности в виде рядов Фурье.
//! Параметры обучаются вне сервиса и приходят JSON-артефактом.

use std::f64::consts::PI;
use std::path::Path;

use chrono::NaiveDate;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::{ForecastModel, ModelError};
use crate::types::ForecastRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trend {
    pub offset: f64,
    pub slope: f64, // единиц в день
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seasonality {
    pub name: String,
    pub period_days: f64,
    /// Пары [a1, b1, a2, b2, ...]: a_n * sin + b_n * cos
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interval {
    pub sigma: f64,
    #[serde(default = "default_z")]
    pub z: f64,
    #[serde(default)]
    pub horizon_growth: f64,
}

fn default_z() -> f64 { 1.2816 } // 80% интервал

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastArtifact {
    pub history_start: NaiveDate,
    pub history_end: NaiveDate,
    pub trend: Trend,
    #[serde(default)]
    pub seasonalities: Vec<Seasonality>,
    pub interval: Interval,
}

struct FourierTerm {
    period_days: f64,
    coefficients: Array1<f64>,
}

impl FourierTerm {
    fn features(&self, t: f64) -> Array1<f64> {
        let order = self.coefficients.len() / 2;
        let mut features = Array1::zeros(order * 2);
        for n in 0..order {
            let angle = 2.0 * PI * (n + 1) as f64 * t / self.period_days;
            features[2 * n] = angle.sin();
            features[2 * n + 1] = angle.cos();
        }
        features
    }

    fn evaluate(&self, t: f64) -> f64 {
        self.features(t).dot(&self.coefficients)
    }
}

pub struct SalesForecaster {
    history_start: NaiveDate,
    history_end: NaiveDate,
    trend: Trend,
    seasonalities: Vec<FourierTerm>,
    interval: Interval,
}

impl SalesForecaster {
    pub fn from_artifact(artifact: ForecastArtifact) -> Result<Self, ModelError> {
        if artifact.history_start > artifact.history_end {
            return Err(ModelError::Invalid(format!(
                "history_start {} is after history_end {}",
                artifact.history_start, artifact.history_end
            )));
        }

        if !artifact.interval.sigma.is_finite() || artifact.interval.sigma < 0.0 {
            return Err(ModelError::Invalid("interval sigma must be non-negative".to_string()));
        }

        let mut seasonalities = Vec::with_capacity(artifact.seasonalities.len());
        for s in artifact.seasonalities {
            if s.period_days <= 0.0 {
                return Err(ModelError::Invalid(format!(
                    "Seasonality '{}' has non-positive period",
                    s.name
                )));
            }
            if s.coefficients.len() % 2 != 0 {
                return Err(ModelError::Invalid(format!(
                    "Seasonality '{}' needs sin/cos coefficient pairs, got {} values",
                    s.name,
                    s.coefficients.len()
                )));
            }
            seasonalities.push(FourierTerm {
                period_days: s.period_days,
                coefficients: Array1::from_vec(s.coefficients),
            });
        }

        Ok(Self {
            history_start: artifact.history_start,
            history_end: artifact.history_end,
            trend: artifact.trend,
            seasonalities,
            interval: artifact.interval,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: ForecastArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn last_date(&self) -> NaiveDate {
        self.history_end
    }

    fn point(&self, date: NaiveDate) -> ForecastRow {
        let t = (date - self.history_start).num_days() as f64;
        let seasonal: f64 = self.seasonalities.iter().map(|s| s.evaluate(t)).sum();
        let yhat = self.trend.offset + self.trend.slope * t + seasonal;

        // Неопределённость растёт за пределами истории
        let horizon = (date - self.history_end).num_days().max(0) as f64;
        let half_width =
            self.interval.z * self.interval.sigma * (1.0 + self.interval.horizon_growth * horizon);

        ForecastRow {
            date,
            yhat,
            yhat_lower: yhat - half_width,
            yhat_upper: yhat + half_width,
        }
    }
}

impl ForecastModel for SalesForecaster {
    fn make_future_dates(&self, periods: usize) -> Vec<NaiveDate> {
        let history_len = (self.history_end - self.history_start).num_days() as usize + 1;
        self.history_start
            .iter_days()
            .take(history_len + periods)
            .collect()
    }

    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<ForecastRow>, ModelError> {
        let rows: Vec<ForecastRow> = dates.iter().map(|&d| self.point(d)).collect();

        if let Some(bad) = rows.iter().find(|r| !r.yhat.is_finite()) {
            return Err(ModelError::Prediction(format!(
                "Non-finite forecast for {}",
                bad.date
            )));
        }

        Ok(rows)
    }
}
