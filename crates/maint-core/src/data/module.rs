//! DataModule: accesor de lectura/escritura sobre un artifact.
//!
//! Cada módulo queda ligado en construcción a exactamente uno de:
//! - un slot del namespace `data` del estado en memoria (`state_key`), o
//! - una ruta de fichero (`data_path`), leída/escrita a través del codec.
//!
//! El campo `loaded` memoiza la primera carga exitosa, pero la autoridad
//! sobre la semántica carga-única es el `DataModuleHandler`, no el módulo.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use super::codec::SharedCodec;
use super::dictionary::DataDictionary;
use crate::context::PipelineContext;
use crate::errors::CoreError;
use crate::model::Payload;

#[derive(Debug)]
pub struct DataModule {
    ctx: Rc<PipelineContext>,
    codec: SharedCodec,
    state_key: Option<String>,
    data_path: Option<PathBuf>,
    dictionary: Option<DataDictionary>,
    pub(crate) loaded: RefCell<Option<Payload>>,
}

impl DataModule {
    pub fn new(
        ctx: Rc<PipelineContext>,
        codec: SharedCodec,
        state_key: Option<String>,
        data_path: Option<PathBuf>,
        dictionary: Option<DataDictionary>,
    ) -> Result<Self, CoreError> {
        if state_key.is_none() && data_path.is_none() {
            return Err(CoreError::MissingBinding);
        }
        Ok(Self {
            ctx,
            codec,
            state_key,
            data_path,
            dictionary,
            loaded: RefCell::new(None),
        })
    }

    pub fn state_key(&self) -> Option<&str> {
        self.state_key.as_deref()
    }

    pub fn data_path(&self) -> Option<&PathBuf> {
        self.data_path.as_ref()
    }

    /// Descripción del binding para mensajes de error.
    pub fn location(&self) -> String {
        match (&self.state_key, &self.data_path) {
            (Some(key), _) => format!("state slot `{}`", key),
            (None, Some(path)) => format!("`{}`", path.display()),
            (None, None) => "<unbound>".to_string(),
        }
    }

    /// Carga el artifact desde su backing y aplica el diccionario.
    ///
    /// `Ok(None)` significa ausencia (slot de estado nunca escrito). Un
    /// binding de fichero cuyo fichero no existe es un error de
    /// configuración, no una ausencia.
    pub fn load(&self) -> Result<Option<Payload>, CoreError> {
        let data = if let Some(key) = &self.state_key {
            self.ctx.states.data.get(key)
        } else if let Some(path) = &self.data_path {
            if path.exists() {
                Some(self.codec.read(path)?)
            } else {
                return Err(self.unloadable());
            }
        } else {
            return Err(self.unloadable());
        };
        Ok(data.map(|d| self.apply_dictionary(d)))
    }

    /// Persiste el payload en su backing (sobrescritura incondicional).
    pub fn save(&self, data: &Payload) -> Result<(), CoreError> {
        if let Some(key) = &self.state_key {
            self.ctx.states.data.set(key, data.clone());
            Ok(())
        } else if let Some(path) = &self.data_path {
            self.codec.write(data, path)
        } else {
            Err(CoreError::UnsavableModule {
                state_key: self.state_key.clone(),
                data_path: self.data_path.clone(),
            })
        }
    }

    fn apply_dictionary(&self, data: Payload) -> Payload {
        match &self.dictionary {
            Some(dd) => dd.apply(data),
            None => data,
        }
    }

    fn unloadable(&self) -> CoreError {
        CoreError::UnloadableModule {
            state_key: self.state_key.clone(),
            data_path: self.data_path.clone(),
        }
    }
}
