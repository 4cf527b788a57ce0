//! Steps de entrenamiento: partición determinista y clasificador lineal.

use indexmap::IndexMap;
use maint_core::{CoreError, ModelBlob, Payload, PipelineStep, StepOutput, Table};
use serde::{Deserialize, Serialize};

use super::stats;

/// Partición determinista por índice: cada n-ésima fila va a test. Sin
/// aleatoriedad: la misma tabla produce siempre la misma partición.
pub struct DatasetSplitter {
    pub table: Table,
    pub target_col: String,
    pub test_split_every: usize,
}

impl PipelineStep for DatasetSplitter {
    fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError> {
        let every = self.test_split_every.max(2);
        let n_rows = self.table.n_rows();
        let test_mask: Vec<bool> = (0..n_rows).map(|i| (i + 1) % every == 0).collect();
        let train_mask: Vec<bool> = test_mask.iter().map(|t| !t).collect();

        // Sólo columnas numéricas entran como features; el objetivo y las
        // columnas de texto quedan fuera.
        let feature_cols: Vec<String> = self
            .table
            .iter_columns()
            .filter(|(name, cells)| {
                *name != self.target_col && !stats::numeric_values(cells).is_empty()
            })
            .map(|(name, _)| name.to_string())
            .collect();

        let mut x_train = self.table.select(&feature_cols);
        let mut x_test = x_train.clone();
        x_train.retain_rows(&train_mask);
        x_test.retain_rows(&test_mask);

        let mut y_train = self.table.select(&[self.target_col.clone()]);
        let mut y_test = y_train.clone();
        y_train.retain_rows(&train_mask);
        y_test.retain_rows(&test_mask);

        log::info!(
            "split: {} train / {} test rows, {} features",
            x_train.n_rows(),
            x_test.n_rows(),
            feature_cols.len()
        );

        let mut out = IndexMap::new();
        out.insert("x-train".to_string(), Payload::Table(x_train));
        out.insert("x-test".to_string(), Payload::Table(x_test));
        out.insert("y-train".to_string(), Payload::Table(y_train));
        out.insert("y-test".to_string(), Payload::Table(y_test));
        Ok(Some(out))
    }
}

/// Clasificador lineal serializable (pesos por feature + sesgo).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub bias: f64,
}

impl LinearModel {
    /// Probabilidad de clase positiva para una fila de features.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let z: f64 = self
            .weights
            .iter()
            .zip(row)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        sigmoid(z)
    }
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Filas de la tabla como vectores de features (ausentes -> 0).
pub(crate) fn feature_rows(table: &Table) -> Vec<Vec<f64>> {
    (0..table.n_rows())
        .map(|row| {
            table
                .iter_columns()
                .map(|(_, cells)| cells.get(row).and_then(stats::cell_f64).unwrap_or(0.0))
                .collect()
        })
        .collect()
}

/// Primera columna de la tabla como vector de objetivos 0/1.
pub(crate) fn target_vector(table: &Table) -> Vec<f64> {
    table
        .iter_columns()
        .next()
        .map(|(_, cells)| {
            cells
                .iter()
                .map(|c| stats::cell_f64(c).unwrap_or(0.0))
                .collect()
        })
        .unwrap_or_default()
}

/// Regresión logística por descenso de gradiente batch, pesos iniciales en
/// cero. El modelo ajustado se serializa con bincode dentro del blob.
pub struct ModelTrainer {
    pub x_train: Table,
    pub y_train: Table,
    pub learning_rate: f64,
    pub epochs: usize,
}

impl PipelineStep for ModelTrainer {
    fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError> {
        let feature_names: Vec<String> = self
            .x_train
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = feature_rows(&self.x_train);
        let targets = target_vector(&self.y_train);
        let n = rows.len().min(targets.len());
        if n == 0 {
            return Err(CoreError::EmptyArtifact {
                location: "training dataset".to_string(),
            });
        }

        let mut weights = vec![0.0; feature_names.len()];
        let mut bias = 0.0;
        for _ in 0..self.epochs {
            let mut grad_w = vec![0.0; weights.len()];
            let mut grad_b = 0.0;
            for (row, target) in rows.iter().zip(&targets).take(n) {
                let z: f64 =
                    weights.iter().zip(row).map(|(w, x)| w * x).sum::<f64>() + bias;
                let residual = sigmoid(z) - target;
                for (g, x) in grad_w.iter_mut().zip(row) {
                    *g += residual * x;
                }
                grad_b += residual;
            }
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= self.learning_rate * g / n as f64;
            }
            bias -= self.learning_rate * grad_b / n as f64;
        }

        let model = LinearModel {
            feature_names,
            weights,
            bias,
        };
        log::info!(
            "trained logistic model over {} rows, {} features",
            n,
            model.weights.len()
        );
        let bytes = bincode::serialize(&model).map_err(|e| CoreError::Codec(e.to_string()))?;

        let mut out = IndexMap::new();
        out.insert(
            "model".to_string(),
            Payload::Model(ModelBlob {
                algo: "logistic-gd".to_string(),
                bytes,
            }),
        );
        Ok(Some(out))
    }
}
