//! Contrato del colaborador de persistencia de ficheros.
//!
//! El núcleo no conoce formatos concretos: lee y escribe `Payload`s a través
//! de esta interfaz, despachada por extensión en la implementación externa.
//! Extensiones no soportadas deben fallar con `CoreError::UnknownFormat`.

use std::path::Path;
use std::rc::Rc;

use crate::errors::CoreError;
use crate::model::Payload;

pub trait FileCodec: std::fmt::Debug {
    fn read(&self, path: &Path) -> Result<Payload, CoreError>;
    fn write(&self, payload: &Payload, path: &Path) -> Result<(), CoreError>;
}

/// Codec compartido entre el handler y sus módulos (ejecución monohilo).
pub type SharedCodec = Rc<dyn FileCodec>;
