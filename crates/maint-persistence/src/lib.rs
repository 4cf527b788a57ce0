//! maint-persistence: implementación en disco del codec de artifacts.
//!
//! Expone `ExtensionCodec` (despacho de formato por extensión de ruta) y la
//! configuración de almacenamiento leída del entorno. El núcleo sólo conoce
//! el trait `FileCodec`; todo conocimiento de formatos vive aquí.

pub mod codec;
pub mod config;

pub use codec::ExtensionCodec;
pub use config::{init_dotenv, StorageConfig};
