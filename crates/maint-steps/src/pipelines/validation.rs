//! Pipeline de validación: chequeos blandos sobre el crudo.

use std::rc::Rc;

use maint_core::{
    create_step_map, Category, CoreError, DataModuleHandler, PipelineContext, StepCatalog,
    StepFactory,
};

use super::module_set;

pub struct ValidationPipeline {
    ctx: Rc<PipelineContext>,
    handler: Rc<DataModuleHandler>,
    catalog: Rc<StepCatalog>,
}

impl ValidationPipeline {
    pub fn new(
        ctx: Rc<PipelineContext>,
        handler: Rc<DataModuleHandler>,
        catalog: Rc<StepCatalog>,
    ) -> Self {
        Self { ctx, handler, catalog }
    }

    /// Sin checkpoints: la validación informa por log, no produce artifacts.
    pub fn check_names(&self) -> Result<(), CoreError> {
        let modules = module_set(&self.handler, &["raw-data"])?;
        let defs = self.catalog.get_step_defs(Category::Validation, &modules)?;
        let factory = StepFactory::new(
            Rc::clone(&self.ctx),
            Rc::clone(&self.handler),
            create_step_map(defs),
        );
        factory.run_pipeline(&["check-names"], &[])
    }
}
