//! Steps: definición declarativa, registro, catálogo, despacho y ejecución.
//!
//! - `StepDefinition`: registro inmutable (nombre, tipo implementador,
//!   argumentos literales o perezosos, outputs declarados, builder).
//! - `StepRegistry`: catálogo de metadatos poblado en el arranque; sólo
//!   introspección, nunca consultado por el despacho.
//! - `StepCatalog`: lookup categoría -> productor de definiciones.
//! - `StepFactory`: convierte una definición en un efecto ejecutado
//!   (Lookup -> Resolve -> Merge -> Instantiate -> Invoke -> Return).
//! - `PipelineExecutor`: secuencia estricta de etapas con timing/logging.

mod catalog;
mod definition;
mod executor;
mod factory;
mod registry;

pub use catalog::{create_step_map, Category, DefinitionProducer, StepCatalog, StepMap, StepSpec};
pub use definition::{PipelineStep, ResolvedArgs, StepArg, StepBuilder, StepDefinition, StepOutput, StepValue};
pub use executor::{PipelineExecutor, Stage};
pub use factory::StepFactory;
pub use registry::{StepRecord, StepRegistry};
