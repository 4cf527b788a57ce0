//! Steps de validación: chequeos blandos sobre el esquema del crudo.

use maint_core::{CoreError, PipelineStep, StepOutput, Table};

/// Verifica que las columnas esperadas existan en la tabla. Los resultados
/// se registran como PASSED/FAILED sin abortar el pipeline: la validación
/// informa, no bloquea.
pub struct NameValidator {
    pub table: Table,
    pub expected: Vec<String>,
}

impl PipelineStep for NameValidator {
    fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError> {
        let mut failures = 0usize;
        for name in &self.expected {
            if self.table.has_column(name) {
                log::info!("column check PASSED: `{}`", name);
            } else {
                failures += 1;
                log::warn!("column check FAILED: `{}` not found", name);
            }
        }
        if failures == 0 {
            log::info!("name validation PASSED ({} columns)", self.expected.len());
        } else {
            log::warn!(
                "name validation FAILED: {}/{} expected columns missing",
                failures,
                self.expected.len()
            );
        }
        Ok(None)
    }
}
