//! Tabla columnar ordenada.
//!
//! Representación neutra de datos tabulares: columnas con nombre en orden de
//! inserción y celdas anulables. Las operaciones aquí son las que exige la
//! cadena de transformaciones del diccionario de datos (rename, proyección,
//! reemplazo de centinelas) más utilidades de filtrado por filas.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Celda anulable. `Null` es el marcador único de valor ausente/ inválido.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Valor numérico de la celda, si lo tiene. `Str` no se interpreta aquí
    /// (la coerción de dtypes es responsabilidad del diccionario).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Representación textual estable (Null -> cadena vacía).
    pub fn to_display(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Str(s) => s.clone(),
        }
    }
}

/// Tabla columna-mayor con orden de columnas preservado.
///
/// Invariante estructural: todas las columnas tienen la misma longitud. Los
/// constructores internos lo garantizan; `insert_column` lo asume del caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    columns: IndexMap<String, Vec<Cell>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: Vec<(String, Vec<Cell>)>) -> Self {
        let mut table = Table::new();
        for (name, values) in columns {
            table.insert_column(&name, values);
        }
        table
    }

    /// Inserta (o reemplaza) una columna. La longitud debe coincidir con las
    /// columnas existentes.
    pub fn insert_column(&mut self, name: &str, values: Vec<Cell>) {
        debug_assert!(
            self.columns.is_empty() || values.len() == self.n_rows(),
            "column `{}` length mismatch",
            name
        );
        self.columns.insert(name.to_string(), values);
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|(_, v)| v.len()).unwrap_or(0)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0 || self.n_cols() == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Vec<Cell>> {
        self.columns.get_mut(name)
    }

    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[Cell])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Renombra columnas según el mapeo, preservando el orden original.
    /// Columnas fuera del mapeo conservan su nombre.
    pub fn rename_columns(&mut self, mapping: &IndexMap<String, String>) {
        if mapping.is_empty() {
            return;
        }
        let mut renamed = IndexMap::with_capacity(self.columns.len());
        for (name, values) in self.columns.drain(..) {
            let new_name = mapping.get(&name).cloned().unwrap_or(name);
            renamed.insert(new_name, values);
        }
        self.columns = renamed;
    }

    /// Proyección a la lista de columnas permitidas. Lista vacía = no-op.
    /// Claves ausentes en la tabla se omiten silenciosamente.
    pub fn select(&self, keep: &[String]) -> Table {
        if keep.is_empty() {
            return self.clone();
        }
        let mut out = Table::new();
        for name in keep {
            if let Some(values) = self.columns.get(name) {
                out.insert_column(name, values.clone());
            }
        }
        out
    }

    /// Reemplaza cada celda `Str` igual a un centinela por `Null`.
    pub fn replace_with_null(&mut self, sentinels: &[String]) {
        if sentinels.is_empty() {
            return;
        }
        for values in self.columns.values_mut() {
            for cell in values.iter_mut() {
                if let Cell::Str(s) = cell {
                    if sentinels.iter().any(|sentinel| sentinel == s) {
                        *cell = Cell::Null;
                    }
                }
            }
        }
    }

    /// Conserva sólo las filas con `true` en la máscara.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.n_rows());
        for values in self.columns.values_mut() {
            let mut idx = 0;
            values.retain(|_| {
                let retained = keep.get(idx).copied().unwrap_or(false);
                idx += 1;
                retained
            });
        }
    }
}
