//! Acceso a datos: módulos de artifact, handler con caché y handles perezosos.
//!
//! - `DataModule`: lectura/escritura uniforme sobre UN artifact, respaldado
//!   por exactamente uno de {slot de estado, ruta de fichero}.
//! - `DataModuleHandler`: única fábrica y caché de módulos; memoiza la
//!   primera carga exitosa y coordina los guardados por lotes.
//! - `LazyLoad`: referencia diferida que se resuelve recién en el despacho.

mod codec;
mod dictionary;
mod handler;
mod lazy;
mod module;

pub use codec::{FileCodec, SharedCodec};
pub use dictionary::{DataDictionary, Dtype};
pub use handler::DataModuleHandler;
pub use lazy::{LazyLoad, ModuleSet};
pub use module::DataModule;
