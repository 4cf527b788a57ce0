//! Ejecución secuencial de etapas con timing y logging.
//!
//! Sin ramas, sin reintentos, sin paralelismo: cada etapa corre hasta
//! completarse antes de que comience la siguiente, y el primer error aborta
//! la secuencia completa.

use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::CoreError;

/// Etapa ya ligada: un nombre y un callable sin argumentos.
pub struct Stage {
    pub name: String,
    action: Box<dyn FnOnce() -> Result<(), CoreError>>,
}

impl Stage {
    pub fn new(name: &str, action: impl FnOnce() -> Result<(), CoreError> + 'static) -> Self {
        Self {
            name: name.to_string(),
            action: Box::new(action),
        }
    }
}

pub struct PipelineExecutor {
    run_id: Uuid,
}

impl PipelineExecutor {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Ejecuta las etapas en el orden dado, envolviendo cada una con el
    /// wrapper de timing/logging.
    pub fn run_steps(&self, stages: Vec<Stage>) -> Result<(), CoreError> {
        for stage in stages {
            self.run_step(stage)?;
        }
        Ok(())
    }

    pub fn run_step(&self, stage: Stage) -> Result<(), CoreError> {
        log::info!(
            "[run {}] Executing Stage: {} ({})",
            self.run_id,
            stage.name,
            Utc::now().to_rfc3339()
        );
        let started = Instant::now();
        let result = (stage.action)();
        let elapsed = started.elapsed();
        match &result {
            Ok(()) => log::info!(
                "[run {}] Stage {} finished in {:.2?}",
                self.run_id,
                stage.name,
                elapsed
            ),
            Err(e) => log::error!(
                "[run {}] Stage {} FAILED after {:.2?}: {}",
                self.run_id,
                stage.name,
                elapsed,
                e
            ),
        }
        result
    }
}

impl Default for PipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}
