/// Типы данных API

use serde::{Deserialize, Serialize};

/// Сырые поля клиента, обязательные для предсказания контракта
pub const REQUIRED_CLIENT_FIELDS: [&str; 15] = [
    "age", "job", "marital", "education", "default", "balance",
    "housing", "loan", "contact", "day", "month", "campaign",
    "pdays", "previous", "poutcome",
];

/// Колонки, которые пайплайн может масштабировать
pub const NUMERIC_COLUMNS: [&str; 9] = [
    "age", "balance", "day", "campaign", "pdays", "previous",
    "has_credit", "has_housing", "contact_digital",
];

/// Колонки, которые пайплайн может кодировать one-hot
pub const CATEGORICAL_COLUMNS: [&str; 10] = [
    "job", "marital", "education", "default", "housing", "loan",
    "contact", "month", "poutcome", "age_group",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawClient {
    pub age: i64,
    pub job: String,
    pub marital: String,
    pub education: String,
    pub default: String,
    pub balance: i64,
    pub housing: String,
    pub loan: String,
    pub contact: String,
    pub day: i64,
    pub month: String,
    pub campaign: i64,
    pub pdays: i64, // -1 если контакта не было
    pub previous: i64,
    pub poutcome: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Young,
    Adult,
    Senior,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Young => "young",
            AgeGroup::Adult => "adult",
            AgeGroup::Senior => "senior",
        }
    }
}

/// Строка признаков ровно в том виде, в каком классификатор видел её при обучении
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(flatten)]
    pub raw: RawClient,
    pub age_group: AgeGroup,
    pub has_credit: u8,
    pub has_housing: u8,
    pub contact_digital: u8,
}

impl ClientRecord {
    /// Числовое значение колонки по имени
    pub fn numeric(&self, column: &str) -> Option<f64> {
        let value = match column {
            "age" => self.raw.age as f64,
            "balance" => self.raw.balance as f64,
            "day" => self.raw.day as f64,
            "campaign" => self.raw.campaign as f64,
            "pdays" => self.raw.pdays as f64,
            "previous" => self.raw.previous as f64,
            "has_credit" => self.has_credit as f64,
            "has_housing" => self.has_housing as f64,
            "contact_digital" => self.contact_digital as f64,
            _ => return None,
        };
        Some(value)
    }

    /// Категориальное значение колонки по имени
    pub fn categorical(&self, column: &str) -> Option<&str> {
        let value = match column {
            "job" => self.raw.job.as_str(),
            "marital" => self.raw.marital.as_str(),
            "education" => self.raw.education.as_str(),
            "default" => self.raw.default.as_str(),
            "housing" => self.raw.housing.as_str(),
            "loan" => self.raw.loan.as_str(),
            "contact" => self.raw.contact.as_str(),
            "month" => self.raw.month.as_str(),
            "poutcome" => self.raw.poutcome.as_str(),
            "age_group" => self.age_group.as_str(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Уровень уверенности по вероятности положительного класса.
    /// Порядок проверок важен: сначала "high", затем "medium".
    pub fn from_probability(prob_yes: f64) -> Self {
        if prob_yes >= 0.7 || prob_yes <= 0.3 {
            Confidence::High
        } else if prob_yes >= 0.6 || prob_yes <= 0.4 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Одна строка прогноза модели до постобработки
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    pub date: chrono::NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: String, // YYYY-MM-DD
    pub sales_forecast: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl From<&ForecastRow> for ForecastPoint {
    fn from(row: &ForecastRow) -> Self {
        // Продажи не могут быть отрицательными
        Self {
            date: row.date.format("%Y-%m-%d").to_string(),
            sales_forecast: round_to(row.yhat.max(0.0), 2),
            lower_bound: round_to(row.yhat_lower.max(0.0), 2),
            upper_bound: round_to(row.yhat_upper.max(0.0), 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractPrediction {
    pub will_contract: bool,
    pub probability: f64,
    pub confidence: Confidence,
}

impl ContractPrediction {
    pub fn new(will_contract: bool, prob_yes: f64) -> Self {
        Self {
            will_contract,
            probability: round_to(prob_yes, 4),
            confidence: Confidence::from_probability(prob_yes),
        }
    }
}

/// Эхо полей запроса, без приведения типов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub age: serde_json::Value,
    pub job: serde_json::Value,
    pub education: serde_json::Value,
    pub balance: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesForecastResponse {
    pub status: String,
    pub days_predicted: u32,
    pub predictions: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractPredictionResponse {
    pub status: String,
    pub prediction: ContractPrediction,
    pub client_summary: ClientSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsHealth {
    pub sales_forecast: bool,
    pub contract_prediction: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub models: ModelsHealth,
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn confidence_buckets_follow_threshold_order() {
        assert_eq!(Confidence::from_probability(0.75), Confidence::High);
        assert_eq!(Confidence::from_probability(0.5), Confidence::Low);
        assert_eq!(Confidence::from_probability(0.65), Confidence::Medium);
        assert_eq!(Confidence::from_probability(0.3), Confidence::High);
        assert_eq!(Confidence::from_probability(0.28), Confidence::High);
        assert_eq!(Confidence::from_probability(0.72), Confidence::High);
        assert_eq!(Confidence::from_probability(0.35), Confidence::Medium);
        assert_eq!(Confidence::from_probability(0.4), Confidence::Medium);
        assert_eq!(Confidence::from_probability(0.45), Confidence::Low);
    }

    #[test]
    fn confidence_serializes_lowercase() {
        let json = serde_json::to_string(&Confidence::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }

    #[test]
    fn forecast_point_clamps_and_rounds() {
        let row = ForecastRow {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            yhat: 7.5612,
            yhat_lower: -13.9,
            yhat_upper: 27.987,
        };
        let point = ForecastPoint::from(&row);
        assert_eq!(point.date, "2025-01-01");
        assert_eq!(point.sales_forecast, 7.56);
        assert_eq!(point.lower_bound, 0.0);
        assert_eq!(point.upper_bound, 27.99);
    }

    #[test]
    fn contract_prediction_rounds_probability() {
        let prediction = ContractPrediction::new(true, 0.123456);
        assert_eq!(prediction.probability, 0.1235);
        assert_eq!(prediction.confidence, Confidence::High);
    }
}
