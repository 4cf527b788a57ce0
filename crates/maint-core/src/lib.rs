//! maint-core: núcleo de orquestación del pipeline ETL/ML de mantenimiento
//! predictivo.
//!
//! El núcleo separa tres preocupaciones:
//! - QUÉ necesita un step (argumentos declarados, incluidos handles perezosos),
//! - CUÁNDO se satisfacen esas necesidades (resolución en el despacho),
//! - DÓNDE viven los artifacts (estado en memoria vs. disco, mediado por el
//!   `DataModuleHandler` y el codec externo).
//!
//! La ejecución es monohilo y estrictamente secuencial; los checkpoints se
//! persisten inmediatamente después del step que los produce.

pub mod context;
pub mod data;
pub mod errors;
pub mod model;
pub mod step;

pub use context::{Paths, PipelineContext, Settings, StateStore, States};
pub use data::{DataDictionary, DataModule, DataModuleHandler, Dtype, FileCodec, LazyLoad, ModuleSet, SharedCodec};
pub use errors::CoreError;
pub use model::{Cell, ModelBlob, Payload, Table};
pub use step::{
    create_step_map, Category, PipelineExecutor, PipelineStep, ResolvedArgs, Stage, StepArg, StepCatalog,
    StepDefinition, StepFactory, StepMap, StepOutput, StepRecord, StepRegistry, StepSpec, StepValue,
};

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::rc::Rc;

    fn ctx_without_paths() -> Rc<PipelineContext> {
        Rc::new(PipelineContext::new(Paths::empty(), Settings::default()))
    }

    #[derive(Debug)]
    struct NoopCodec;

    impl FileCodec for NoopCodec {
        fn read(&self, path: &std::path::Path) -> Result<Payload, CoreError> {
            Err(CoreError::Codec(format!("no file backing in tests: {}", path.display())))
        }
        fn write(&self, _payload: &Payload, path: &std::path::Path) -> Result<(), CoreError> {
            Err(CoreError::Codec(format!("no file backing in tests: {}", path.display())))
        }
    }

    struct EchoStep {
        dataset: Payload,
        out_key: String,
    }

    impl PipelineStep for EchoStep {
        fn invoke(self: Box<Self>) -> Result<Option<StepOutput>, CoreError> {
            let mut out = IndexMap::new();
            out.insert(self.out_key, self.dataset);
            Ok(Some(out))
        }
    }

    // Pipeline mínimo respaldado sólo por el estado en memoria: un step lee
    // "seed" mediante un handle perezoso y su checkpoint escribe "echoed".
    #[test]
    fn state_backed_step_round_trips_through_checkpoint() {
        let ctx = ctx_without_paths();
        ctx.states.data.set("seed", Payload::Array(vec![1.0, 2.0, 3.0]));

        let handler = Rc::new(DataModuleHandler::new(
            Rc::clone(&ctx),
            Rc::new(NoopCodec),
            IndexMap::new(),
        ));
        let seed = handler.get_dm("seed").expect("state-backed module");

        let mut args = IndexMap::new();
        args.insert("dataset".to_string(), StepArg::Lazy(LazyLoad::new(Some(seed))));
        args.insert(
            "out_key".to_string(),
            StepArg::Value(serde_json::json!("echoed")),
        );
        let def = StepDefinition::new("echo", "EchoStep", args, &["echoed"], |_ctx, mut args| {
            Ok(Box::new(EchoStep {
                dataset: args.take_payload("dataset")?,
                out_key: args
                    .take_json("out_key")?
                    .as_str()
                    .unwrap_or_default()
                    .to_string(),
            }))
        });

        let factory = StepFactory::new(Rc::clone(&ctx), Rc::clone(&handler), create_step_map(vec![def]));
        factory.run_pipeline(&["echo"], &["echo"]).expect("pipeline run");

        assert_eq!(
            ctx.states.data.get("echoed"),
            Some(Payload::Array(vec![1.0, 2.0, 3.0]))
        );
    }
}
