//! Pipelines por categoría: arman su conjunto de módulos, piden las
//! definiciones al catálogo y ejecutan un orden de steps con checkpoints.

mod data;
mod eda;
mod model;
mod validation;

pub use data::DataPipeline;
pub use eda::EdaPipeline;
pub use model::ModelPipeline;
pub use validation::ValidationPipeline;

use maint_core::{CoreError, DataModuleHandler, ModuleSet};

/// Resuelve los módulos de las claves dadas a través del handler (caché
/// primera-gana: pipelines distintos comparten instancias).
fn module_set(handler: &DataModuleHandler, keys: &[&str]) -> Result<ModuleSet, CoreError> {
    let mut modules = ModuleSet::new();
    for key in keys {
        modules.insert(key.to_string(), handler.get_dm(key)?);
    }
    Ok(modules)
}
