//! Pipeline de exploración: metadatos y asimetría, antes y después del
//! procesamiento.

use std::rc::Rc;

use maint_core::{
    create_step_map, Category, CoreError, DataModuleHandler, PipelineContext, StepCatalog,
    StepFactory,
};

use super::module_set;

pub struct EdaPipeline {
    ctx: Rc<PipelineContext>,
    handler: Rc<DataModuleHandler>,
    catalog: Rc<StepCatalog>,
}

impl EdaPipeline {
    pub fn new(
        ctx: Rc<PipelineContext>,
        handler: Rc<DataModuleHandler>,
        catalog: Rc<StepCatalog>,
    ) -> Self {
        Self { ctx, handler, catalog }
    }

    /// Exploración sobre el crudo; ambos informes se checkpointean.
    pub fn initial_exploration(&self) -> Result<(), CoreError> {
        self.explore(&["raw-data"], &["raw-metadata", "raw-skew-kurt"])
    }

    /// Exploración sobre el dataset transformado.
    pub fn further_exploration(&self) -> Result<(), CoreError> {
        self.explore(
            &["transformed-data"],
            &["transformed-metadata", "transformed-skew-kurt"],
        )
    }

    fn explore(&self, module_keys: &[&str], step_order: &[&str]) -> Result<(), CoreError> {
        let modules = module_set(&self.handler, module_keys)?;
        let defs = self.catalog.get_step_defs(Category::Exploration, &modules)?;
        let factory = StepFactory::new(
            Rc::clone(&self.ctx),
            Rc::clone(&self.handler),
            create_step_map(defs),
        );
        factory.run_pipeline(step_order, step_order)
    }
}
