//! Estadística descriptiva mínima sobre columnas de celdas.
//!
//! Las columnas releídas de CSV llegan como texto sin tipar, así que la
//! interpretación numérica acepta tanto celdas numéricas como `Str`
//! parseables. Celdas no interpretables cuentan como ausentes.

use maint_core::Cell;

/// Valor numérico de una celda, aceptando texto parseable.
pub(crate) fn cell_f64(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Str(s) => s.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    }
}

/// Valores numéricos presentes de la columna.
pub(crate) fn numeric_values(cells: &[Cell]) -> Vec<f64> {
    cells.iter().filter_map(cell_f64).collect()
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn central_moment(values: &[f64], mu: f64, order: i32) -> f64 {
    values.iter().map(|v| (v - mu).powi(order)).sum::<f64>() / values.len() as f64
}

/// Asimetría muestral (momento estandarizado de orden 3). Columna constante
/// o con menos de dos valores -> 0.
pub(crate) fn skewness(values: &[f64]) -> f64 {
    let Some(mu) = mean(values) else { return 0.0 };
    let m2 = central_moment(values, mu, 2);
    if m2 == 0.0 {
        return 0.0;
    }
    central_moment(values, mu, 3) / m2.powf(1.5)
}

/// Curtosis en exceso (momento estandarizado de orden 4 menos 3).
pub(crate) fn kurtosis(values: &[f64]) -> f64 {
    let Some(mu) = mean(values) else { return 0.0 };
    let m2 = central_moment(values, mu, 2);
    if m2 == 0.0 {
        return 0.0;
    }
    central_moment(values, mu, 4) / (m2 * m2) - 3.0
}
