//! maint-steps: implementadores de steps, diccionarios estáticos,
//! productores de definiciones y pipelines por categoría del dominio de
//! mantenimiento predictivo.
//!
//! El núcleo (`maint-core`) no conoce ningún step concreto; todo el
//! conocimiento de dominio vive aquí y se conecta mediante el catálogo.

pub mod definitions;
pub mod dictionaries;
pub mod pipelines;
pub mod steps;

pub use definitions::{build_catalog, register_all};
pub use dictionaries::{module_map, raw_data_dictionary};
pub use pipelines::{DataPipeline, EdaPipeline, ModelPipeline, ValidationPipeline};
