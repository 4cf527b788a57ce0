//! Steps de exploración: resumen de metadatos y asimetría/curtosis.

use indexmap::IndexMap;
use maint_core::{CoreError, Payload, PipelineStep, StepOutput, Table};
use serde_json::{json, Value};

use super::stats;

/// Resume forma y nulidad de la tabla en un informe JSON.
pub struct MetadataExplorer {
    pub table: Table,
    pub out_key: String,
}

impl PipelineStep for MetadataExplorer {
    fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError> {
        let mut null_counts = serde_json::Map::new();
        for (name, cells) in self.table.iter_columns() {
            let nulls = cells.iter().filter(|c| c.is_null()).count();
            null_counts.insert(name.to_string(), json!(nulls));
        }
        let report = json!({
            "n_rows": self.table.n_rows(),
            "n_cols": self.table.n_cols(),
            "null_counts": Value::Object(null_counts),
        });
        log::info!(
            "metadata: {} rows x {} cols",
            self.table.n_rows(),
            self.table.n_cols()
        );

        let mut out = IndexMap::new();
        out.insert(self.out_key, Payload::Json(report));
        Ok(Some(out))
    }
}

/// Asimetría y curtosis por columna numérica, como mapa plano
/// `<col>_skew` / `<col>_kurt`.
pub struct SkewKurtosis {
    pub table: Table,
    pub out_key: String,
}

impl PipelineStep for SkewKurtosis {
    fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError> {
        let mut mapping = IndexMap::new();
        for (name, cells) in self.table.iter_columns() {
            let values = stats::numeric_values(cells);
            if values.is_empty() {
                continue;
            }
            mapping.insert(format!("{}_skew", name), stats::skewness(&values));
            mapping.insert(format!("{}_kurt", name), stats::kurtosis(&values));
        }

        let mut out = IndexMap::new();
        out.insert(self.out_key, Payload::Mapping(mapping));
        Ok(Some(out))
    }
}
