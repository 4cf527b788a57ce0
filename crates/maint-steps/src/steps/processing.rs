//! Steps de procesamiento: limpieza, features derivadas y transformación de
//! distribuciones.

use indexmap::IndexMap;
use maint_core::{Cell, CoreError, Payload, PipelineStep, StepOutput, Table};

use super::stats;

/// Limpieza del crudo: descarta filas sin objetivo, deduplica filas
/// idénticas y rellena nulos numéricos con la media de su columna.
pub struct Preprocessor {
    pub table: Table,
    pub target_col: String,
    pub out_key: String,
}

impl PipelineStep for Preprocessor {
    fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError> {
        let mut table = self.table;
        let before = table.n_rows();

        if let Some(target) = table.column(&self.target_col) {
            let keep: Vec<bool> = target.iter().map(|c| stats::cell_f64(c).is_some()).collect();
            table.retain_rows(&keep);
        }
        drop_duplicate_rows(&mut table);
        fill_numeric_nulls(&mut table);

        log::info!("preprocessing: {} -> {} rows", before, table.n_rows());

        let mut out = IndexMap::new();
        out.insert(self.out_key, Payload::Table(table));
        Ok(Some(out))
    }
}

fn drop_duplicate_rows(table: &mut Table) {
    let mut seen = std::collections::HashSet::new();
    let keep: Vec<bool> = (0..table.n_rows())
        .map(|row| {
            let fingerprint: Vec<String> = table
                .iter_columns()
                .map(|(_, cells)| cells.get(row).map(Cell::to_display).unwrap_or_default())
                .collect();
            seen.insert(fingerprint)
        })
        .collect();
    table.retain_rows(&keep);
}

/// Relleno por media en columnas con al menos un valor numérico. Columnas de
/// texto quedan intactas.
fn fill_numeric_nulls(table: &mut Table) {
    let names: Vec<String> = table.column_names().iter().map(|s| s.to_string()).collect();
    for name in names {
        let mu = match table.column(&name).map(stats::numeric_values) {
            Some(values) if !values.is_empty() => match stats::mean(&values) {
                Some(mu) => mu,
                None => continue,
            },
            _ => continue,
        };
        if let Some(cells) = table.column_mut(&name) {
            for cell in cells.iter_mut() {
                if cell.is_null() {
                    *cell = Cell::Float(mu);
                }
            }
        }
    }
}

/// Features derivadas: media de sensores por fila y ratio edad/uso mensual.
pub struct FeatureBuilder {
    pub table: Table,
    pub sensor_cols: Vec<String>,
    pub out_key: String,
}

const AGE_COL: &str = "comp_age";
const RUNTIME_COL: &str = "monthly_run_time";

impl PipelineStep for FeatureBuilder {
    fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError> {
        let mut table = self.table;
        let n_rows = table.n_rows();

        let sensor_mean: Vec<Cell> = (0..n_rows)
            .map(|row| {
                let values: Vec<f64> = self
                    .sensor_cols
                    .iter()
                    .filter_map(|col| table.column(col).and_then(|c| c.get(row)))
                    .filter_map(stats::cell_f64)
                    .collect();
                stats::mean(&values).map(Cell::Float).unwrap_or(Cell::Null)
            })
            .collect();
        table.insert_column("sensor_mean", sensor_mean);

        let ratio: Vec<Cell> = (0..n_rows)
            .map(|row| {
                let age = table
                    .column(AGE_COL)
                    .and_then(|c| c.get(row))
                    .and_then(stats::cell_f64);
                let runtime = table
                    .column(RUNTIME_COL)
                    .and_then(|c| c.get(row))
                    .and_then(stats::cell_f64);
                match (age, runtime) {
                    (Some(a), Some(r)) if r != 0.0 => Cell::Float(a / r),
                    _ => Cell::Null,
                }
            })
            .collect();
        table.insert_column("age_runtime_ratio", ratio);

        let mut out = IndexMap::new();
        out.insert(self.out_key, Payload::Table(table));
        Ok(Some(out))
    }
}

/// Aplica `ln(1+x)` a las columnas numéricas cuya asimetría supere el umbral.
/// La columna objetivo nunca se transforma; columnas con valores <= -1 se
/// omiten (el logaritmo no está definido sobre ellas).
pub struct DistributionTransformer {
    pub table: Table,
    pub target_col: String,
    pub skew_threshold: f64,
    pub out_key: String,
}

impl PipelineStep for DistributionTransformer {
    fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError> {
        let mut table = self.table;
        let names: Vec<String> = table.column_names().iter().map(|s| s.to_string()).collect();

        for name in names {
            if name == self.target_col {
                continue;
            }
            let values = match table.column(&name).map(stats::numeric_values) {
                Some(v) if !v.is_empty() => v,
                _ => continue,
            };
            let skew = stats::skewness(&values);
            if skew <= self.skew_threshold {
                continue;
            }
            if values.iter().any(|v| *v <= -1.0) {
                log::debug!("skipping ln_1p on `{}`: values below -1", name);
                continue;
            }
            log::info!("ln_1p on `{}` (skew {:.3})", name, skew);
            if let Some(cells) = table.column_mut(&name) {
                for cell in cells.iter_mut() {
                    if let Some(v) = stats::cell_f64(cell) {
                        *cell = Cell::Float((1.0 + v).ln());
                    }
                }
            }
        }

        let mut out = IndexMap::new();
        out.insert(self.out_key, Payload::Table(table));
        Ok(Some(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_target() -> Table {
        Table::from_columns(vec![
            (
                "s1".to_string(),
                vec![Cell::Float(1.0), Cell::Null, Cell::Float(3.0), Cell::Float(1.0)],
            ),
            (
                "target".to_string(),
                vec![Cell::Int(0), Cell::Int(1), Cell::Null, Cell::Int(0)],
            ),
        ])
    }

    #[test]
    fn preprocessing_drops_null_targets_and_fills_means() {
        let step = Box::new(Preprocessor {
            table: table_with_target(),
            target_col: "target".to_string(),
            out_key: "processed-data".to_string(),
        });
        let out = step.invoke().expect("invoke").expect("outputs");
        let table = out
            .get("processed-data")
            .and_then(Payload::as_table)
            .expect("table");

        // Cuatro filas: una cae por target nulo y otra por duplicado exacto.
        assert_eq!(table.n_rows(), 2);
        // El nulo de s1 (fila con target presente) se rellena con la media.
        assert_eq!(table.column("s1").unwrap()[1], Cell::Float(1.0));
    }

    #[test]
    fn duplicate_rows_are_dropped_keeping_the_first() {
        let mut table = Table::from_columns(vec![(
            "a".to_string(),
            vec![Cell::Int(1), Cell::Int(1), Cell::Int(2)],
        )]);
        drop_duplicate_rows(&mut table);
        assert_eq!(table.n_rows(), 2);
    }

    #[test]
    fn transformer_only_touches_skewed_columns() {
        let table = Table::from_columns(vec![
            (
                "skewed".to_string(),
                vec![Cell::Float(0.0), Cell::Float(0.0), Cell::Float(0.0), Cell::Float(100.0)],
            ),
            (
                "flat".to_string(),
                vec![Cell::Float(1.0), Cell::Float(2.0), Cell::Float(3.0), Cell::Float(4.0)],
            ),
        ]);
        let step = Box::new(DistributionTransformer {
            table,
            target_col: "target".to_string(),
            skew_threshold: 1.0,
            out_key: "transformed-data".to_string(),
        });
        let out = step.invoke().expect("invoke").expect("outputs");
        let table = out
            .get("transformed-data")
            .and_then(Payload::as_table)
            .expect("table");

        assert_eq!(table.column("skewed").unwrap()[0], Cell::Float(1.0f64.ln()));
        assert_eq!(table.column("flat").unwrap()[0], Cell::Float(1.0));
    }
}
