//! Definición declarativa de un step y su capacidad ejecutable.
//!
//! El despacho reflexivo por nombre de método del diseño original se
//! reemplaza por una capacidad cerrada: todo step implementador expone una
//! única operación `invoke`. La definición transporta un builder que, con el
//! contexto y los argumentos ya resueltos, construye la instancia ejecutable.

use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::context::PipelineContext;
use crate::data::LazyLoad;
use crate::errors::CoreError;
use crate::model::{ModelBlob, Payload, Table};

/// Mapa clave de artifact -> payload devuelto por un step.
pub type StepOutput = IndexMap<String, Payload>;

/// Capacidad ejecutable única de un step implementador.
pub trait PipelineStep {
    /// Ejecuta la lógica de dominio; puede devolver un mapa de outputs que
    /// el despachador persistirá en los checkpoints declarados.
    fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError>;
}

/// Argumento declarado: literal JSON o dependencia perezosa.
#[derive(Debug, Clone)]
pub enum StepArg {
    Value(Value),
    Lazy(LazyLoad),
}

/// Valor ya resuelto entregado al builder.
#[derive(Debug, Clone)]
pub enum StepValue {
    Data(Payload),
    Json(Value),
}

/// Argumentos resueltos, en orden de declaración. Los extractores tipados
/// consumen el valor y fallan con el nombre del argumento ofensor.
#[derive(Debug, Default)]
pub struct ResolvedArgs {
    inner: IndexMap<String, StepValue>,
}

impl ResolvedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: StepValue) {
        self.inner.insert(name.to_string(), value);
    }

    /// Fusiona `overrides` encima de `self`; en colisión gana el override.
    pub fn merge(&mut self, overrides: ResolvedArgs) {
        for (name, value) in overrides.inner {
            self.inner.insert(name, value);
        }
    }

    pub fn take_payload(&mut self, name: &str) -> Result<Payload, CoreError> {
        match self.take(name)? {
            StepValue::Data(payload) => Ok(payload),
            StepValue::Json(_) => Err(CoreError::ArgumentType { name: name.to_string() }),
        }
    }

    pub fn take_table(&mut self, name: &str) -> Result<Table, CoreError> {
        self.take_payload(name)?
            .into_table()
            .ok_or_else(|| CoreError::ArgumentType { name: name.to_string() })
    }

    pub fn take_mapping(&mut self, name: &str) -> Result<IndexMap<String, f64>, CoreError> {
        self.take_payload(name)?
            .into_mapping()
            .ok_or_else(|| CoreError::ArgumentType { name: name.to_string() })
    }

    pub fn take_model(&mut self, name: &str) -> Result<ModelBlob, CoreError> {
        self.take_payload(name)?
            .into_model()
            .ok_or_else(|| CoreError::ArgumentType { name: name.to_string() })
    }

    pub fn take_json(&mut self, name: &str) -> Result<Value, CoreError> {
        match self.take(name)? {
            StepValue::Json(value) => Ok(value),
            StepValue::Data(_) => Err(CoreError::ArgumentType { name: name.to_string() }),
        }
    }

    fn take(&mut self, name: &str) -> Result<StepValue, CoreError> {
        self.inner
            .shift_remove(name)
            .ok_or_else(|| CoreError::MissingArgument { name: name.to_string() })
    }
}

/// Builder: (contexto, argumentos resueltos) -> instancia ejecutable.
pub type StepBuilder =
    Box<dyn Fn(Rc<PipelineContext>, ResolvedArgs) -> Result<Box<dyn PipelineStep>, CoreError>>;

/// Registro declarativo de un step: qué necesita y qué produce.
pub struct StepDefinition {
    /// Nombre único dentro de un mapa de despacho.
    pub name: String,
    /// Nombre del tipo implementador (introspección/registro).
    pub step_type: &'static str,
    /// Argumentos declarados en orden: literal o handle perezoso.
    pub args: IndexMap<String, StepArg>,
    /// Claves de artifact que este step produce al ser checkpointeado.
    pub outputs: Vec<String>,
    pub builder: StepBuilder,
}

impl StepDefinition {
    pub fn new(
        name: &str,
        step_type: &'static str,
        args: IndexMap<String, StepArg>,
        outputs: &[&str],
        builder: impl Fn(Rc<PipelineContext>, ResolvedArgs) -> Result<Box<dyn PipelineStep>, CoreError>
            + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            step_type,
            args,
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            builder: Box::new(builder),
        }
    }
}
