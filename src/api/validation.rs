//! Разбор и проверка тел запросов
//!
//! Приведение типов повторяет исходный контракт: целые принимаются как числа,
//! целочисленные float и строки с целым числом.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::types::{RawClient, REQUIRED_CLIENT_FIELDS};

pub const MIN_DAYS: i64 = 1;
pub const MAX_DAYS: i64 = 365;

pub fn json_object(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Map<String, Value>> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(_) => Err(ApiError::Validation("Request body must be a JSON object".to_string())),
        Err(rejection) => {
            tracing::debug!("JSON rejection: {}", rejection.body_text());
            Err(ApiError::Validation("Request body must be a JSON object".to_string()))
        }
    }
}

pub fn parse_days(body: &Map<String, Value>) -> ApiResult<u32> {
    let value = body
        .get("days")
        .ok_or_else(|| ApiError::Validation("Parameter 'days' is required".to_string()))?;

    let days = as_integer(value).ok_or_else(|| {
        ApiError::Validation("Parameter 'days' must be an integer".to_string())
    })?;

    if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
        return Err(ApiError::Validation(format!(
            "The number of days must be between {} and {}",
            MIN_DAYS, MAX_DAYS
        )));
    }

    Ok(days as u32)
}

/// Отсутствующие поля в каноническом порядке. `null` считается присутствующим.
pub fn missing_fields(body: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_CLIENT_FIELDS
        .iter()
        .copied()
        .filter(|field| !body.contains_key(*field))
        .collect()
}

pub fn parse_client(body: &Map<String, Value>) -> ApiResult<RawClient> {
    Ok(RawClient {
        age: integer_field(body, "age")?,
        job: text_field(body, "job")?,
        marital: text_field(body, "marital")?,
        education: text_field(body, "education")?,
        default: text_field(body, "default")?,
        balance: integer_field(body, "balance")?,
        housing: text_field(body, "housing")?,
        loan: text_field(body, "loan")?,
        contact: text_field(body, "contact")?,
        day: integer_field(body, "day")?,
        month: text_field(body, "month")?,
        campaign: integer_field(body, "campaign")?,
        pdays: integer_field(body, "pdays")?,
        previous: integer_field(body, "previous")?,
        poutcome: text_field(body, "poutcome")?,
    })
}

fn integer_field(body: &Map<String, Value>, name: &str) -> ApiResult<i64> {
    body.get(name)
        .and_then(as_integer)
        .ok_or_else(|| ApiError::Validation(format!("Field '{}' must be an integer", name)))
}

fn text_field(body: &Map<String, Value>, name: &str) -> ApiResult<String> {
    body.get(name)
        .and_then(as_text)
        .ok_or_else(|| ApiError::Validation(format!("Field '{}' must be a string", name)))
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn example() -> Map<String, Value> {
        object(json!({
            "age": 35, "job": "technician", "marital": "married",
            "education": "secondary", "default": "no", "balance": 1500,
            "housing": "yes", "loan": "no", "contact": "cellular", "day": 15,
            "month": "may", "campaign": 2, "pdays": -1, "previous": 0,
            "poutcome": "unknown"
        }))
    }

    fn days_error(value: Value) -> String {
        match parse_days(&object(value)) {
            Err(ApiError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn days_accepts_integers_in_range() {
        assert_eq!(parse_days(&object(json!({ "days": 1 }))).unwrap(), 1);
        assert_eq!(parse_days(&object(json!({ "days": 365 }))).unwrap(), 365);
        assert_eq!(parse_days(&object(json!({ "days": "7" }))).unwrap(), 7);
        assert_eq!(parse_days(&object(json!({ "days": 30.0 }))).unwrap(), 30);
    }

    #[test]
    fn days_rejections() {
        assert_eq!(days_error(json!({})), "Parameter 'days' is required");
        assert_eq!(days_error(json!({ "days": "abc" })), "Parameter 'days' must be an integer");
        assert_eq!(days_error(json!({ "days": 366.5 })), "Parameter 'days' must be an integer");
        assert_eq!(days_error(json!({ "days": null })), "Parameter 'days' must be an integer");
        assert_eq!(
            days_error(json!({ "days": 0 })),
            "The number of days must be between 1 and 365"
        );
        assert_eq!(
            days_error(json!({ "days": 366 })),
            "The number of days must be between 1 and 365"
        );
        assert_eq!(
            days_error(json!({ "days": -5 })),
            "The number of days must be between 1 and 365"
        );
    }

    #[test]
    fn missing_fields_in_canonical_order() {
        let mut body = example();
        assert!(missing_fields(&body).is_empty());

        body.remove("poutcome");
        body.remove("age");
        body.remove("month");
        assert_eq!(missing_fields(&body), vec!["age", "month", "poutcome"]);
    }

    #[test]
    fn null_counts_as_present_but_is_malformed() {
        let mut body = example();
        body.insert("job".to_string(), Value::Null);
        assert!(missing_fields(&body).is_empty());
        assert!(matches!(
            parse_client(&body),
            Err(ApiError::Validation(msg)) if msg == "Field 'job' must be a string"
        ));
    }

    #[test]
    fn parses_example_client_with_coercion() {
        let mut body = example();
        body.insert("balance".to_string(), json!("1500"));
        body.insert("day".to_string(), json!(15.0));
        let client = parse_client(&body).unwrap();
        assert_eq!(client.age, 35);
        assert_eq!(client.balance, 1500);
        assert_eq!(client.day, 15);
        assert_eq!(client.pdays, -1);
        assert_eq!(client.job, "technician");
        assert_eq!(client.poutcome, "unknown");
    }

    #[test]
    fn rejects_non_integer_numeric_field() {
        let mut body = example();
        body.insert("age".to_string(), json!("thirty"));
        assert!(matches!(
            parse_client(&body),
            Err(ApiError::Validation(msg)) if msg == "Field 'age' must be an integer"
        ));
    }
}
