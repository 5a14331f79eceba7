//! Feature engineering для классификатора контрактов
//!
//! Производные колонки должны совпадать с теми, что строились при обучении:
//! любое расхождение молча портит предсказания.

use crate::types::{AgeGroup, ClientRecord, RawClient};

pub struct FeatureEngineer;

impl FeatureEngineer {
    /// Строит строку признаков из сырых полей клиента
    pub fn derive_features(raw: &RawClient) -> ClientRecord {
        ClientRecord {
            age_group: Self::age_group(raw.age),
            has_credit: flag(raw.loan == "yes"),
            has_housing: flag(raw.housing == "yes"),
            contact_digital: flag(matches!(raw.contact.as_str(), "cellular" | "telephone")),
            raw: raw.clone(),
        }
    }

    /// Бакеты (.., 30], (30, 50], (50, ..)
    pub fn age_group(age: i64) -> AgeGroup {
        if age <= 30 {
            AgeGroup::Young
        } else if age <= 50 {
            AgeGroup::Adult
        } else {
            AgeGroup::Senior
        }
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}
