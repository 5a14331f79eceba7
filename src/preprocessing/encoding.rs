//! One-hot кодирование категориальных признаков

use std::collections::HashMap;

use ndarray::Array1;

pub struct OneHotEncoder {
    // Для каждой колонки: категория -> позиция внутри блока
    lookups: Vec<HashMap<String, usize>>,
    offsets: Vec<usize>,
    width: usize,
}

impl OneHotEncoder {
    pub fn new(categories: &[Vec<String>]) -> Result<Self, String> {
        let mut lookups = Vec::with_capacity(categories.len());
        let mut offsets = Vec::with_capacity(categories.len());
        let mut width = 0;

        for (col, values) in categories.iter().enumerate() {
            let mut lookup = HashMap::with_capacity(values.len());
            for (pos, value) in values.iter().enumerate() {
                if lookup.insert(value.clone(), pos).is_some() {
                    return Err(format!("Duplicate category '{}' in column {}", value, col));
                }
            }
            offsets.push(width);
            width += values.len();
            lookups.push(lookup);
        }

        Ok(Self {
            lookups,
            offsets,
            width,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Неизвестная категория кодируется нулями (handle_unknown = ignore)
    pub fn transform(&self, values: &[&str]) -> Result<Array1<f64>, String> {
        if values.len() != self.lookups.len() {
            return Err(format!(
                "Expected {} categorical values, got {}",
                self.lookups.len(),
                values.len()
            ));
        }

        let mut encoded = Array1::zeros(self.width);
        for (col, value) in values.iter().enumerate() {
            if let Some(pos) = self.lookups[col].get(*value) {
                encoded[self.offsets[col] + pos] = 1.0;
            }
        }

        Ok(encoded)
    }
}
