//! Catálogo de productores de definiciones por categoría y mapa de despacho.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use super::definition::{StepArg, StepBuilder, StepDefinition};
use crate::data::ModuleSet;
use crate::errors::CoreError;

/// Categorías de pipeline soportadas (conjunto cerrado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Validation,
    Exploration,
    Processing,
    Training,
    Evaluation,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Validation,
        Category::Exploration,
        Category::Processing,
        Category::Training,
        Category::Evaluation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Validation => "validation",
            Category::Exploration => "exploration",
            Category::Processing => "processing",
            Category::Training => "training",
            Category::Evaluation => "evaluation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Productor de definiciones: recibe el conjunto de módulos armado por el
/// pipeline de la categoría y devuelve sus definiciones en orden.
pub type DefinitionProducer = Box<dyn Fn(&ModuleSet) -> Result<Vec<StepDefinition>, CoreError>>;

/// Lookup categoría -> productor. Una categoría sin productor registrado es
/// un error de configuración que enumera las opciones válidas.
#[derive(Default)]
pub struct StepCatalog {
    producers: IndexMap<Category, DefinitionProducer>,
}

impl StepCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, category: Category, producer: DefinitionProducer) {
        self.producers.insert(category, producer);
    }

    pub fn get_step_defs(
        &self,
        category: Category,
        modules: &ModuleSet,
    ) -> Result<Vec<StepDefinition>, CoreError> {
        let producer = self
            .producers
            .get(&category)
            .ok_or_else(|| CoreError::UnknownCategory {
                category: category.to_string(),
                valid: self.producers.keys().map(|c| c.to_string()).collect(),
            })?;
        producer(modules)
    }
}

/// Entrada del mapa de despacho: lo que el factory necesita para ejecutar.
pub struct StepSpec {
    pub step_type: &'static str,
    pub args: IndexMap<String, StepArg>,
    pub outputs: Vec<String>,
    pub builder: StepBuilder,
}

/// Mapa de despacho nombre -> spec, en orden de declaración.
pub type StepMap = IndexMap<String, StepSpec>;

/// Convierte una lista de definiciones en un mapa compatible con el factory.
pub fn create_step_map(definitions: Vec<StepDefinition>) -> StepMap {
    definitions
        .into_iter()
        .map(|def| {
            (
                def.name,
                StepSpec {
                    step_type: def.step_type,
                    args: def.args,
                    outputs: def.outputs,
                    builder: def.builder,
                },
            )
        })
        .collect()
}
