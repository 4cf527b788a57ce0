//! Pipeline de datos: limpieza, features y transformación de distribuciones.

use std::rc::Rc;

use maint_core::{
    create_step_map, Category, CoreError, DataModuleHandler, PipelineContext, StepCatalog,
    StepFactory,
};

use super::module_set;

pub struct DataPipeline {
    ctx: Rc<PipelineContext>,
    handler: Rc<DataModuleHandler>,
    catalog: Rc<StepCatalog>,
}

impl DataPipeline {
    pub fn new(
        ctx: Rc<PipelineContext>,
        handler: Rc<DataModuleHandler>,
        catalog: Rc<StepCatalog>,
    ) -> Self {
        Self { ctx, handler, catalog }
    }

    /// Cada step se checkpointea: el siguiente relee el artifact persistido
    /// de su predecesor a través de su handle perezoso.
    pub fn process(&self) -> Result<(), CoreError> {
        let modules = module_set(
            &self.handler,
            &["raw-data", "processed-data", "feature-eng"],
        )?;
        let defs = self.catalog.get_step_defs(Category::Processing, &modules)?;
        let factory = StepFactory::new(
            Rc::clone(&self.ctx),
            Rc::clone(&self.handler),
            create_step_map(defs),
        );
        let order = ["preprocess", "build-features", "transform-distributions"];
        factory.run_pipeline(&order, &order)
    }
}
