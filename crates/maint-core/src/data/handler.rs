//! DataModuleHandler: fábrica, caché y persistencia por lotes de módulos.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

use super::codec::SharedCodec;
use super::dictionary::DataDictionary;
use super::module::DataModule;
use crate::context::PipelineContext;
use crate::errors::CoreError;
use crate::model::Payload;

/// Punto único de creación de `DataModule`s.
///
/// Invariantes:
/// - `get_dm(key)` devuelve siempre LA MISMA instancia para la misma clave
///   (primera construcción gana).
/// - `load_dm` memoiza: la primera carga exitosa queda adherida al módulo y
///   se devuelve en llamadas posteriores sin releer el backing.
#[derive(Debug)]
pub struct DataModuleHandler {
    ctx: Rc<PipelineContext>,
    codec: SharedCodec,
    modules: RefCell<HashMap<String, Rc<DataModule>>>,
    module_map: IndexMap<String, DataDictionary>,
}

impl DataModuleHandler {
    pub fn new(
        ctx: Rc<PipelineContext>,
        codec: SharedCodec,
        module_map: IndexMap<String, DataDictionary>,
    ) -> Self {
        Self {
            ctx,
            codec,
            modules: RefCell::new(HashMap::new()),
            module_map,
        }
    }

    /// Devuelve el módulo cacheado para `path_key`, construyéndolo en la
    /// primera petición. Claves presentes en la configuración de rutas quedan
    /// respaldadas por fichero; el resto, por el slot de estado homónimo.
    pub fn get_dm(&self, path_key: &str) -> Result<Rc<DataModule>, CoreError> {
        let mut modules = self.modules.borrow_mut();
        if let Some(dm) = modules.get(path_key) {
            return Ok(Rc::clone(dm));
        }
        let dictionary = self.module_map.get(path_key).cloned();
        let dm = if let Some(path) = self.ctx.paths.get_path(path_key) {
            DataModule::new(
                Rc::clone(&self.ctx),
                Rc::clone(&self.codec),
                None,
                Some(path),
                dictionary,
            )?
        } else {
            DataModule::new(
                Rc::clone(&self.ctx),
                Rc::clone(&self.codec),
                Some(path_key.to_string()),
                None,
                dictionary,
            )?
        };
        let dm = Rc::new(dm);
        modules.insert(path_key.to_string(), Rc::clone(&dm));
        Ok(dm)
    }

    /// Carga memoizada: relee el backing sólo si el módulo nunca cargó.
    /// Un resultado ausente o vacío es un error de dataset vacío.
    pub fn load_dm(&self, dm: &Rc<DataModule>) -> Result<Payload, CoreError> {
        if let Some(cached) = dm.loaded.borrow().as_ref() {
            return Ok(cached.clone());
        }
        let data = dm
            .load()
            .map_err(|e| CoreError::LoadFailed {
                location: dm.location(),
                source: Box::new(e),
            })?
            .filter(|d| !d.is_empty())
            .ok_or_else(|| CoreError::EmptyArtifact {
                location: dm.location(),
            })?;
        *dm.loaded.borrow_mut() = Some(data.clone());
        Ok(data)
    }

    /// Persistencia por lotes: guarda CADA entrada del mapa, resolviendo el
    /// módulo de cada clave. Los fallos de tipo del codec se enriquecen con
    /// la clave ofensora.
    pub fn save_data(&self, batch: &IndexMap<String, Payload>) -> Result<(), CoreError> {
        for (key, data) in batch {
            let dm = self.get_dm(key)?;
            dm.save(data).map_err(|e| match e {
                CoreError::UnsupportedForExtension { kind, .. } => CoreError::UnsupportedPayload {
                    key: key.clone(),
                    kind,
                },
                other => other,
            })?;
        }
        Ok(())
    }
}
