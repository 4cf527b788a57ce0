//! Contexto de pipeline: rutas, configuración y estado compartido.
//!
//! Se construye una sola vez en el driver y se comparte por referencia
//! (`Rc<PipelineContext>`) con cada componente. Nadie muta el store salvo a
//! través de `StateStore::set`.

mod paths;
mod settings;
mod state;

use std::rc::Rc;

pub use paths::Paths;
pub use settings::{Config, HyperParams, Params, Settings};
pub use state::{StateStore, States};

#[derive(Debug)]
pub struct PipelineContext {
    pub paths: Paths,
    pub settings: Settings,
    pub states: States,
}

impl PipelineContext {
    pub fn new(paths: Paths, settings: Settings) -> Self {
        Self {
            paths,
            settings,
            states: States::default(),
        }
    }

    pub fn into_shared(self) -> Rc<Self> {
        Rc::new(self)
    }
}
