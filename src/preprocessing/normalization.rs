//! Нормализация данных

#![allow(non_snake_case)]

use ndarray::{Array1, Array2};

/// Стандартизация (X - mean) / std с параметрами, сохранёнными при обучении
#[derive(Debug, Clone)]
pub struct DataNormalizer {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl DataNormalizer {
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Result<Self, String> {
        if mean.len() != std.len() {
            return Err(format!(
                "Scaler mean has {} values but std has {}",
                mean.len(),
                std.len()
            ));
        }

        // Избегаем деления на ноль
        let std = std
            .into_iter()
            .map(|s| if s.abs() < 1e-10 { 1.0 } else { s })
            .collect();

        Ok(Self {
            mean: Array1::from_vec(mean),
            std,
        })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, X: &Array2<f64>) -> Result<Array2<f64>, String> {
        if X.ncols() != self.n_features() {
            return Err(format!(
                "Expected {} features, got {}",
                self.n_features(),
                X.ncols()
            ));
        }

        let mut normalized = X.clone();
        for mut row in normalized.rows_mut() {
            for (i, val) in row.iter_mut().enumerate() {
                *val = (*val - self.mean[i]) / self.std[i];
            }
        }

        Ok(normalized)
    }
}
