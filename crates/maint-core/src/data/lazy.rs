//! LazyLoad: referencia diferida a un `DataModule`.
//!
//! Un marcador ligero que dice: "cuando el step se despache, pide al handler
//! la carga memoizada de este módulo y entrega el resultado como argumento".
//! La construcción es puro metadato; nunca hace I/O.

use std::rc::Rc;

use indexmap::IndexMap;

use super::handler::DataModuleHandler;
use super::module::DataModule;
use crate::errors::CoreError;
use crate::model::Payload;

/// Conjunto de módulos que cada pipeline de categoría arma para sus
/// definiciones (clave de artifact -> módulo cacheado).
pub type ModuleSet = IndexMap<String, Rc<DataModule>>;

#[derive(Debug, Clone)]
pub struct LazyLoad {
    dm: Option<Rc<DataModule>>,
}

impl LazyLoad {
    pub fn new(dm: Option<Rc<DataModule>>) -> Self {
        Self { dm }
    }

    /// Handle sobre la entrada `key` del conjunto; un módulo ausente sólo
    /// falla al resolver, no al declarar.
    pub fn from_set(modules: &ModuleSet, key: &str) -> Self {
        Self::new(modules.get(key).cloned())
    }

    pub fn resolve(&self, handler: &DataModuleHandler) -> Result<Payload, CoreError> {
        let dm = self.dm.as_ref().ok_or(CoreError::UnresolvedDependency)?;
        handler.load_dm(dm)
    }
}
