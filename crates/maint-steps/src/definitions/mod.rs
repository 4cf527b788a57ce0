//! Productores de definiciones por categoría y armado del catálogo.
//!
//! Cada productor recibe el conjunto de módulos que el pipeline de la
//! categoría armó y devuelve las definiciones en orden de declaración. Un
//! handle sobre una clave ausente del conjunto sólo falla si el step que lo
//! declara llega a despacharse, así que un productor puede declarar steps
//! para más módulos de los que un pipeline concreto carga.

use indexmap::IndexMap;
use maint_core::{
    Category, CoreError, LazyLoad, ModuleSet, ResolvedArgs, StepArg, StepCatalog, StepDefinition,
    StepRegistry,
};
use serde_json::json;

use crate::steps::{
    DatasetSplitter, DistributionTransformer, FeatureBuilder, MetadataExplorer, ModelEvaluator,
    ModelTrainer, NameValidator, Preprocessor, SkewKurtosis,
};

fn take_string(args: &mut ResolvedArgs, name: &str) -> Result<String, CoreError> {
    args.take_json(name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CoreError::ArgumentType {
            name: name.to_string(),
        })
}

pub fn validation_steps(modules: &ModuleSet) -> Result<Vec<StepDefinition>, CoreError> {
    let mut args = IndexMap::new();
    args.insert(
        "dataset".to_string(),
        StepArg::Lazy(LazyLoad::from_set(modules, "raw-data")),
    );
    Ok(vec![StepDefinition::new(
        "check-names",
        "NameValidator",
        args,
        &[],
        |ctx, mut args| {
            let mut expected = ctx.settings.params.sensor_cols.clone();
            expected.push(ctx.settings.params.target_col.clone());
            Ok(Box::new(NameValidator {
                table: args.take_table("dataset")?,
                expected,
            }))
        },
    )])
}

/// Exploración sobre el crudo y sobre el dataset transformado: mismos dos
/// steps, claves de salida distintas.
pub fn exploration_steps(modules: &ModuleSet) -> Result<Vec<StepDefinition>, CoreError> {
    let mut defs = Vec::new();
    for (step_prefix, data_key, meta_key, skew_key) in [
        (
            "raw",
            "raw-data",
            "raw-data-metadata",
            "raw-data-skew-kurt",
        ),
        (
            "transformed",
            "transformed-data",
            "transformed-data-metadata",
            "transformed-data-skew-kurt",
        ),
    ] {
        let mut meta_args = IndexMap::new();
        meta_args.insert(
            "dataset".to_string(),
            StepArg::Lazy(LazyLoad::from_set(modules, data_key)),
        );
        meta_args.insert("out_key".to_string(), StepArg::Value(json!(meta_key)));
        defs.push(StepDefinition::new(
            &format!("{}-metadata", step_prefix),
            "MetadataExplorer",
            meta_args,
            &[meta_key],
            |_ctx, mut args| {
                Ok(Box::new(MetadataExplorer {
                    table: args.take_table("dataset")?,
                    out_key: take_string(&mut args, "out_key")?,
                }))
            },
        ));

        let mut skew_args = IndexMap::new();
        skew_args.insert(
            "dataset".to_string(),
            StepArg::Lazy(LazyLoad::from_set(modules, data_key)),
        );
        skew_args.insert("out_key".to_string(), StepArg::Value(json!(skew_key)));
        defs.push(StepDefinition::new(
            &format!("{}-skew-kurt", step_prefix),
            "SkewKurtosis",
            skew_args,
            &[skew_key],
            |_ctx, mut args| {
                Ok(Box::new(SkewKurtosis {
                    table: args.take_table("dataset")?,
                    out_key: take_string(&mut args, "out_key")?,
                }))
            },
        ));
    }
    Ok(defs)
}

pub fn processing_steps(modules: &ModuleSet) -> Result<Vec<StepDefinition>, CoreError> {
    let mut defs = Vec::new();

    let mut args = IndexMap::new();
    args.insert(
        "dataset".to_string(),
        StepArg::Lazy(LazyLoad::from_set(modules, "raw-data")),
    );
    args.insert("out_key".to_string(), StepArg::Value(json!("processed-data")));
    defs.push(StepDefinition::new(
        "preprocess",
        "Preprocessor",
        args,
        &["processed-data"],
        |ctx, mut args| {
            Ok(Box::new(Preprocessor {
                table: args.take_table("dataset")?,
                target_col: ctx.settings.params.target_col.clone(),
                out_key: take_string(&mut args, "out_key")?,
            }))
        },
    ));

    let mut args = IndexMap::new();
    args.insert(
        "dataset".to_string(),
        StepArg::Lazy(LazyLoad::from_set(modules, "processed-data")),
    );
    args.insert("out_key".to_string(), StepArg::Value(json!("feature-eng")));
    defs.push(StepDefinition::new(
        "build-features",
        "FeatureBuilder",
        args,
        &["feature-eng"],
        |ctx, mut args| {
            Ok(Box::new(FeatureBuilder {
                table: args.take_table("dataset")?,
                sensor_cols: ctx.settings.params.sensor_cols.clone(),
                out_key: take_string(&mut args, "out_key")?,
            }))
        },
    ));

    let mut args = IndexMap::new();
    args.insert(
        "dataset".to_string(),
        StepArg::Lazy(LazyLoad::from_set(modules, "feature-eng")),
    );
    args.insert(
        "out_key".to_string(),
        StepArg::Value(json!("transformed-data")),
    );
    defs.push(StepDefinition::new(
        "transform-distributions",
        "DistributionTransformer",
        args,
        &["transformed-data"],
        |ctx, mut args| {
            Ok(Box::new(DistributionTransformer {
                table: args.take_table("dataset")?,
                target_col: ctx.settings.params.target_col.clone(),
                skew_threshold: ctx.settings.params.skew_threshold,
                out_key: take_string(&mut args, "out_key")?,
            }))
        },
    ));

    Ok(defs)
}

pub fn training_steps(modules: &ModuleSet) -> Result<Vec<StepDefinition>, CoreError> {
    let mut defs = Vec::new();

    let mut args = IndexMap::new();
    args.insert(
        "dataset".to_string(),
        StepArg::Lazy(LazyLoad::from_set(modules, "transformed-data")),
    );
    defs.push(StepDefinition::new(
        "split-dataset",
        "DatasetSplitter",
        args,
        &["x-train", "x-test", "y-train", "y-test"],
        |ctx, mut args| {
            Ok(Box::new(DatasetSplitter {
                table: args.take_table("dataset")?,
                target_col: ctx.settings.params.target_col.clone(),
                test_split_every: ctx.settings.params.test_split_every,
            }))
        },
    ));

    let mut args = IndexMap::new();
    args.insert(
        "x_train".to_string(),
        StepArg::Lazy(LazyLoad::from_set(modules, "x-train")),
    );
    args.insert(
        "y_train".to_string(),
        StepArg::Lazy(LazyLoad::from_set(modules, "y-train")),
    );
    defs.push(StepDefinition::new(
        "train-model",
        "ModelTrainer",
        args,
        &["model"],
        |ctx, mut args| {
            Ok(Box::new(ModelTrainer {
                x_train: args.take_table("x_train")?,
                y_train: args.take_table("y_train")?,
                learning_rate: ctx.settings.hyperparams.learning_rate,
                epochs: ctx.settings.hyperparams.epochs,
            }))
        },
    ));

    Ok(defs)
}

pub fn evaluation_steps(modules: &ModuleSet) -> Result<Vec<StepDefinition>, CoreError> {
    let mut args = IndexMap::new();
    args.insert(
        "model".to_string(),
        StepArg::Lazy(LazyLoad::from_set(modules, "model")),
    );
    args.insert(
        "x_test".to_string(),
        StepArg::Lazy(LazyLoad::from_set(modules, "x-test")),
    );
    args.insert(
        "y_test".to_string(),
        StepArg::Lazy(LazyLoad::from_set(modules, "y-test")),
    );
    Ok(vec![StepDefinition::new(
        "evaluate-model",
        "ModelEvaluator",
        args,
        &["eval-metrics", "y-test-pred"],
        |_ctx, mut args| {
            Ok(Box::new(ModelEvaluator {
                model: args.take_model("model")?,
                x_test: args.take_table("x_test")?,
                y_test: args.take_table("y_test")?,
            }))
        },
    )])
}

/// Catálogo completo: las cinco categorías con sus productores.
pub fn build_catalog() -> StepCatalog {
    let mut catalog = StepCatalog::new();
    catalog.register(Category::Validation, Box::new(validation_steps));
    catalog.register(Category::Exploration, Box::new(exploration_steps));
    catalog.register(Category::Processing, Box::new(processing_steps));
    catalog.register(Category::Training, Box::new(training_steps));
    catalog.register(Category::Evaluation, Box::new(evaluation_steps));
    catalog
}

/// Puebla el registro de metadatos con la misma información que declaran los
/// productores. Sólo introspección: el despacho nunca lo consulta.
pub fn register_all(registry: &mut StepRegistry) {
    registry.register(
        Category::Validation,
        "check-names",
        "NameValidator",
        IndexMap::from([("dataset".to_string(), "raw-data".to_string())]),
        &[],
    );

    for (step_prefix, data_key, meta_key, skew_key) in [
        ("raw", "raw-data", "raw-data-metadata", "raw-data-skew-kurt"),
        (
            "transformed",
            "transformed-data",
            "transformed-data-metadata",
            "transformed-data-skew-kurt",
        ),
    ] {
        registry.register(
            Category::Exploration,
            &format!("{}-metadata", step_prefix),
            "MetadataExplorer",
            IndexMap::from([("dataset".to_string(), data_key.to_string())]),
            &[meta_key],
        );
        registry.register(
            Category::Exploration,
            &format!("{}-skew-kurt", step_prefix),
            "SkewKurtosis",
            IndexMap::from([("dataset".to_string(), data_key.to_string())]),
            &[skew_key],
        );
    }

    registry.register(
        Category::Processing,
        "preprocess",
        "Preprocessor",
        IndexMap::from([("dataset".to_string(), "raw-data".to_string())]),
        &["processed-data"],
    );
    registry.register(
        Category::Processing,
        "build-features",
        "FeatureBuilder",
        IndexMap::from([("dataset".to_string(), "processed-data".to_string())]),
        &["feature-eng"],
    );
    registry.register(
        Category::Processing,
        "transform-distributions",
        "DistributionTransformer",
        IndexMap::from([("dataset".to_string(), "feature-eng".to_string())]),
        &["transformed-data"],
    );

    registry.register(
        Category::Training,
        "split-dataset",
        "DatasetSplitter",
        IndexMap::from([("dataset".to_string(), "transformed-data".to_string())]),
        &["x-train", "x-test", "y-train", "y-test"],
    );
    registry.register(
        Category::Training,
        "train-model",
        "ModelTrainer",
        IndexMap::from([
            ("x_train".to_string(), "x-train".to_string()),
            ("y_train".to_string(), "y-train".to_string()),
        ]),
        &["model"],
    );

    registry.register(
        Category::Evaluation,
        "evaluate-model",
        "ModelEvaluator",
        IndexMap::from([
            ("model".to_string(), "model".to_string()),
            ("x_test".to_string(), "x-test".to_string()),
            ("y_test".to_string(), "y-test".to_string()),
        ]),
        &["eval-metrics", "y-test-pred"],
    );
}
