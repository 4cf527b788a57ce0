//! Diccionario de datos: cadena de normalización aplicada al cargar.
//!
//! El orden es FIJO: rename -> coerción de dtypes -> proyección de columnas
//! -> reemplazo de centinelas por `Null`. Payloads no tabulares pasan sin
//! modificación.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{Cell, Payload, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dtype {
    Int,
    Float,
    Str,
}

#[derive(Debug, Clone, Default)]
pub struct DataDictionary {
    pub rename_mapping: IndexMap<String, String>,
    pub dtypes: IndexMap<String, Dtype>,
    pub use_cols: Vec<String>,
    pub na_values: Vec<String>,
}

impl DataDictionary {
    pub fn apply(&self, payload: Payload) -> Payload {
        match payload {
            Payload::Table(table) => Payload::Table(self.apply_table(table)),
            other => other,
        }
    }

    fn apply_table(&self, mut table: Table) -> Table {
        table.rename_columns(&self.rename_mapping);
        self.apply_dtypes(&mut table);
        let mut table = table.select(&self.use_cols);
        table.replace_with_null(&self.na_values);
        table
    }

    fn apply_dtypes(&self, table: &mut Table) {
        for (col, dtype) in &self.dtypes {
            if let Some(values) = table.column_mut(col) {
                for cell in values.iter_mut() {
                    *cell = coerce_cell(cell.clone(), *dtype);
                }
            }
        }
    }
}

/// Coerción celda a celda. Valores no interpretables quedan en `Null`: la
/// coerción entera conserva la representación anulable cuando hay ausentes,
/// en lugar de fallar la columna completa.
fn coerce_cell(cell: Cell, dtype: Dtype) -> Cell {
    match dtype {
        Dtype::Float => match cell {
            Cell::Null => Cell::Null,
            Cell::Int(i) => Cell::Float(i as f64),
            Cell::Float(f) => Cell::Float(f),
            Cell::Str(s) => match s.trim().parse::<f64>() {
                Ok(f) => Cell::Float(f),
                Err(_) => Cell::Null,
            },
        },
        Dtype::Int => match cell {
            Cell::Null => Cell::Null,
            Cell::Int(i) => Cell::Int(i),
            Cell::Float(f) if f.fract() == 0.0 => Cell::Int(f as i64),
            Cell::Float(_) => Cell::Null,
            Cell::Str(s) => match s.trim().parse::<f64>() {
                Ok(f) if f.fract() == 0.0 => Cell::Int(f as i64),
                _ => Cell::Null,
            },
        },
        Dtype::Str => match cell {
            Cell::Null => Cell::Null,
            other => Cell::Str(other.to_display()),
        },
    }
}
