//! Parámetros ajustables del pipeline.

use serde::Serialize;

/// Configuración general de la ejecución.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub random_state: u64,
    pub write_output: bool,
    pub overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            random_state: 42,
            write_output: true,
            overwrite: true,
        }
    }
}

/// Parámetros de datos: columna objetivo, columnas de sensores, partición y
/// umbral de asimetría para la transformación de distribuciones.
#[derive(Debug, Clone, Serialize)]
pub struct Params {
    pub target_col: String,
    pub sensor_cols: Vec<String>,
    /// Cada n-ésima fila va al conjunto de test (partición determinista).
    pub test_split_every: usize,
    pub skew_threshold: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            target_col: "target".to_string(),
            sensor_cols: vec!["s1", "s2", "s3", "s4", "s5", "s6"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            test_split_every: 5,
            skew_threshold: 1.0,
        }
    }
}

/// Hiperparámetros del clasificador lineal.
#[derive(Debug, Clone, Serialize)]
pub struct HyperParams {
    pub learning_rate: f64,
    pub epochs: usize,
}

impl Default for HyperParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            epochs: 200,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Settings {
    pub config: Config,
    pub params: Params,
    pub hyperparams: HyperParams,
}
