//! Unión etiquetada de payloads de artifact.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Table;

/// Modelo ajustado serializado. El núcleo no interpreta `bytes`; los steps de
/// entrenamiento/evaluación codifican y decodifican su propia representación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBlob {
    pub algo: String,
    pub bytes: Vec<u8>,
}

/// Payload de un artifact. Una variante por categoría de dato que circula
/// entre steps; los call sites hacen pattern-matching sin casts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    Table(Table),
    Model(ModelBlob),
    Array(Vec<f64>),
    Mapping(IndexMap<String, f64>),
    Json(Value),
}

impl Payload {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Payload::Table(_) => "table",
            Payload::Model(_) => "model",
            Payload::Array(_) => "array",
            Payload::Mapping(_) => "mapping",
            Payload::Json(_) => "json",
        }
    }

    /// Un payload vacío cuenta como "dataset vacío" para el handler.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Table(t) => t.is_empty(),
            Payload::Model(m) => m.bytes.is_empty(),
            Payload::Array(a) => a.is_empty(),
            Payload::Mapping(m) => m.is_empty(),
            Payload::Json(v) => v.is_null(),
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Payload::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<Table> {
        match self {
            Payload::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_mapping(self) -> Option<IndexMap<String, f64>> {
        match self {
            Payload::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_model(self) -> Option<ModelBlob> {
        match self {
            Payload::Model(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<Vec<f64>> {
        match self {
            Payload::Array(a) => Some(a),
            _ => None,
        }
    }
}
