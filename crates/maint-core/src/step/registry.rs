//! Registro introspectivo de metadatos de steps.
//!
//! Se puebla con llamadas explícitas durante una fase determinista de
//! arranque y nunca se consulta durante la ejecución: existe para auditoría
//! y depuración. El registro jamás falla; nombres duplicados dentro de una
//! categoría se permiten y se anotan con un warning (el mapa de despacho,
//! no el registro, es la autoridad de ejecución).

use indexmap::IndexMap;
use serde::Serialize;

use super::catalog::Category;

/// Instantánea de metadatos capturada al declarar un step.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub category: Category,
    pub name: String,
    pub step_type: String,
    /// Parámetro -> clave de artifact (o descripción del literal).
    pub args: IndexMap<String, String>,
    pub outputs: Vec<String>,
    /// Índice 1-based en orden de declaración dentro de la categoría.
    pub position: usize,
}

#[derive(Debug, Default)]
pub struct StepRegistry {
    records: IndexMap<Category, Vec<StepRecord>>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anexa un registro de metadatos. Efecto puro de anotación: no envuelve
    /// ni modifica nada, y nunca falla.
    pub fn register(
        &mut self,
        category: Category,
        name: &str,
        step_type: &str,
        args: IndexMap<String, String>,
        outputs: &[&str],
    ) {
        let records = self.records.entry(category).or_default();
        if records.iter().any(|r| r.name == name) {
            log::warn!(
                "duplicate step `{}` registered in category `{}`",
                name,
                category
            );
        }
        let position = records.len() + 1;
        records.push(StepRecord {
            category,
            name: name.to_string(),
            step_type: step_type.to_string(),
            args,
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            position,
        });
    }

    /// Registros de una categoría en orden de declaración.
    pub fn list_category(&self, category: Category) -> &[StepRecord] {
        self.records.get(&category).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Todos los registros, opcionalmente filtrados por categoría.
    pub fn list_all(&self, category: Option<Category>) -> Vec<&StepRecord> {
        match category {
            Some(cat) => self.list_category(cat).iter().collect(),
            None => self.records.values().flatten().collect(),
        }
    }
}
