//! Pipeline de modelo: partición, entrenamiento y evaluación.

use std::rc::Rc;

use maint_core::{
    create_step_map, Category, CoreError, DataModuleHandler, PipelineContext, StepCatalog,
    StepFactory,
};

use super::module_set;

pub struct ModelPipeline {
    ctx: Rc<PipelineContext>,
    handler: Rc<DataModuleHandler>,
    catalog: Rc<StepCatalog>,
}

impl ModelPipeline {
    pub fn new(
        ctx: Rc<PipelineContext>,
        handler: Rc<DataModuleHandler>,
        catalog: Rc<StepCatalog>,
    ) -> Self {
        Self { ctx, handler, catalog }
    }

    pub fn train(&self) -> Result<(), CoreError> {
        let modules = module_set(&self.handler, &["transformed-data", "x-train", "y-train"])?;
        let defs = self.catalog.get_step_defs(Category::Training, &modules)?;
        let factory = StepFactory::new(
            Rc::clone(&self.ctx),
            Rc::clone(&self.handler),
            create_step_map(defs),
        );
        let order = ["split-dataset", "train-model"];
        factory.run_pipeline(&order, &order)
    }

    pub fn evaluate(&self) -> Result<(), CoreError> {
        let modules = module_set(&self.handler, &["model", "x-test", "y-test"])?;
        let defs = self.catalog.get_step_defs(Category::Evaluation, &modules)?;
        let factory = StepFactory::new(
            Rc::clone(&self.ctx),
            Rc::clone(&self.handler),
            create_step_map(defs),
        );
        factory.run_pipeline(&["evaluate-model"], &["evaluate-model"])
    }
}
