//! StepFactory: convierte una definición de step en un efecto ejecutado.
//!
//! Máquina de estados por despacho (sin estado entre llamadas):
//! Lookup -> Resolve -> Merge -> Instantiate -> Invoke -> Return.
//! Un nombre desconocido falla cerrado: antes de instanciar tipo alguno y
//! antes de cualquier I/O.

use std::rc::Rc;

use super::catalog::StepMap;
use super::definition::{ResolvedArgs, StepArg, StepOutput, StepValue};
use crate::context::PipelineContext;
use crate::data::DataModuleHandler;
use crate::errors::CoreError;

pub struct StepFactory {
    ctx: Rc<PipelineContext>,
    handler: Rc<DataModuleHandler>,
    step_map: StepMap,
}

impl StepFactory {
    pub fn new(ctx: Rc<PipelineContext>, handler: Rc<DataModuleHandler>, step_map: StepMap) -> Self {
        Self {
            ctx,
            handler,
            step_map,
        }
    }

    /// Resuelve y ejecuta un único step.
    ///
    /// Los argumentos perezosos se resuelven a través del handler (cargas
    /// memoizadas); los literales pasan sin cambio. `runtime_extra` se
    /// fusiona encima, con precedencia en colisión de claves.
    pub fn dispatch_step(
        &self,
        step_name: &str,
        runtime_extra: ResolvedArgs,
    ) -> Result<Option<StepOutput>, CoreError> {
        let spec = self
            .step_map
            .get(step_name)
            .ok_or_else(|| CoreError::UnknownStep {
                name: step_name.to_string(),
            })?;

        let mut resolved = ResolvedArgs::new();
        for (name, arg) in &spec.args {
            match arg {
                StepArg::Lazy(lazy) => {
                    resolved.insert(name, StepValue::Data(lazy.resolve(&self.handler)?))
                }
                StepArg::Value(value) => resolved.insert(name, StepValue::Json(value.clone())),
            }
        }
        resolved.merge(runtime_extra);

        let instance = (spec.builder)(Rc::clone(&self.ctx), resolved)?;
        instance.invoke()
    }

    /// Despacha `step_order` en secuencia. Para cada nombre presente en
    /// `checkpoints`, el mapa de outputs del step se persiste inmediatamente
    /// (antes del siguiente step) mediante el guardado por lotes del handler.
    pub fn run_pipeline(&self, step_order: &[&str], checkpoints: &[&str]) -> Result<(), CoreError> {
        for step_name in step_order {
            let result = self.dispatch_step(step_name, ResolvedArgs::new())?;
            if checkpoints.contains(step_name) {
                log::debug!("SAVING at checkpoint: {}", step_name);
                match result {
                    Some(outputs) => self.handler.save_data(&outputs)?,
                    None => log::warn!("checkpoint `{}` produced no outputs; nothing to save", step_name),
                }
            }
        }
        Ok(())
    }
}
