//! Driver del pipeline de mantenimiento predictivo.
//!
//! Construye el contexto compartido, el codec y el handler, puebla el
//! registro de metadatos y ejecuta las etapas de categoría en orden estricto
//! a través del `PipelineExecutor`. El primer error aborta la ejecución con
//! código distinto de cero.

use std::rc::Rc;

use maint_core::{
    CoreError, DataModuleHandler, Paths, PipelineContext, PipelineExecutor, Settings, Stage,
    StepRegistry,
};
use maint_persistence::{ExtensionCodec, StorageConfig};
use maint_steps::{
    build_catalog, module_map, register_all, DataPipeline, EdaPipeline, ModelPipeline,
    ValidationPipeline,
};

fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;

    Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Info)
        .parse_default_env() // RUST_LOG puede subir o bajar el nivel
        .init();
}

fn run() -> Result<(), CoreError> {
    let storage = StorageConfig::from_env();
    log::info!("data dir: {}", storage.data_dir.display());

    let ctx = PipelineContext::new(Paths::new(storage.data_dir), Settings::default()).into_shared();
    let handler = Rc::new(DataModuleHandler::new(
        Rc::clone(&ctx),
        Rc::new(ExtensionCodec::new()),
        module_map(),
    ));
    let catalog = Rc::new(build_catalog());

    let mut registry = StepRegistry::new();
    register_all(&mut registry);
    for record in registry.list_all(None) {
        log::debug!(
            "registered step [{}] #{} {} ({})",
            record.category,
            record.position,
            record.name,
            record.step_type
        );
    }

    let validation =
        ValidationPipeline::new(Rc::clone(&ctx), Rc::clone(&handler), Rc::clone(&catalog));
    let eda_initial = EdaPipeline::new(Rc::clone(&ctx), Rc::clone(&handler), Rc::clone(&catalog));
    let eda_further = EdaPipeline::new(Rc::clone(&ctx), Rc::clone(&handler), Rc::clone(&catalog));
    let data = DataPipeline::new(Rc::clone(&ctx), Rc::clone(&handler), Rc::clone(&catalog));
    let model_train =
        ModelPipeline::new(Rc::clone(&ctx), Rc::clone(&handler), Rc::clone(&catalog));
    let model_eval = ModelPipeline::new(Rc::clone(&ctx), Rc::clone(&handler), Rc::clone(&catalog));

    let executor = PipelineExecutor::new();
    log::info!("pipeline run {}", executor.run_id());
    executor.run_steps(vec![
        Stage::new("validation", move || validation.check_names()),
        Stage::new("initial-exploration", move || {
            eda_initial.initial_exploration()
        }),
        Stage::new("data-processing", move || data.process()),
        Stage::new("further-exploration", move || {
            eda_further.further_exploration()
        }),
        Stage::new("model-training", move || model_train.train()),
        Stage::new("model-evaluation", move || model_eval.evaluate()),
    ])
}

fn main() {
    init_logger();
    if let Err(e) = run() {
        log::error!("pipeline aborted: {}", e);
        std::process::exit(1);
    }
}
