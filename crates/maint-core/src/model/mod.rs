//! Modelo de datos neutro del núcleo.
//!
//! `Payload` es la unión etiquetada de categorías de artifact que el store y
//! el codec saben manejar: tabla, modelo ajustado, arreglo numérico, mapa de
//! escalares y JSON estructurado. Los call sites hacen pattern-matching en
//! lugar de casts sin comprobar.

mod payload;
mod table;

pub use payload::{ModelBlob, Payload};
pub use table::{Cell, Table};
