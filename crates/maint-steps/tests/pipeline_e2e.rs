//! Recorrido completo: CSV crudo -> validación -> EDA -> procesamiento ->
//! entrenamiento -> evaluación, con artifacts reales en un directorio
//! temporal.

use std::fmt::Write as _;
use std::fs;
use std::rc::Rc;

use maint_core::{DataModuleHandler, Paths, Payload, PipelineContext, Settings};
use maint_persistence::ExtensionCodec;
use maint_steps::{
    build_catalog, module_map, DataPipeline, EdaPipeline, ModelPipeline, ValidationPipeline,
};

/// CSV sintético con los encabezados originales del proveedor. Una fila
/// lleva target ausente y otra un sensor vacío, para ejercitar la limpieza.
fn raw_csv(n_rows: usize) -> String {
    let mut csv = String::from(
        "ComponentAge,MonthlyRunTime,Location,FlowRate,OPXVolume,MaxOutputRate,\
         Sensor1,Sensor2,Sensor3,Sensor4,Sensor5,Sensor5.1,DaysSinceMaintenance,Target\n",
    );
    for i in 0..n_rows {
        let loc = if i % 2 == 0 { "north" } else { "south" };
        let target = if i == 3 {
            "NA".to_string()
        } else {
            usize::from(i >= n_rows / 2).to_string()
        };
        let s1 = if i == 7 {
            String::new()
        } else {
            format!("{:.1}", 1.0 + i as f64 * 0.5)
        };
        let _ = writeln!(
            csv,
            "{},{:.1},{},{:.2},50.0,200.0,{},{:.1},{:.1},{:.1},{:.1},{:.1},{},{}",
            10 + i,
            100.0 + i as f64,
            loc,
            5.0 + 0.1 * i as f64,
            s1,
            2.0 + i as f64 * 0.3,
            3.0 + i as f64 * 0.2,
            1.0 + i as f64 * 0.7,
            0.5 + i as f64 * 0.1,
            0.9 + i as f64 * 0.4,
            i,
            target,
        );
    }
    csv
}

#[test]
fn full_pipeline_produces_every_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let raw_path = dir.path().join("data/raw/sensors.csv");
    fs::create_dir_all(raw_path.parent().expect("parent")).expect("mkdir");
    fs::write(&raw_path, raw_csv(20)).expect("seed csv");

    let ctx = Rc::new(PipelineContext::new(
        Paths::new(dir.path()),
        Settings::default(),
    ));
    let handler = Rc::new(DataModuleHandler::new(
        Rc::clone(&ctx),
        Rc::new(ExtensionCodec::new()),
        module_map(),
    ));
    let catalog = Rc::new(build_catalog());

    ValidationPipeline::new(Rc::clone(&ctx), Rc::clone(&handler), Rc::clone(&catalog))
        .check_names()
        .expect("validation");
    let eda = EdaPipeline::new(Rc::clone(&ctx), Rc::clone(&handler), Rc::clone(&catalog));
    eda.initial_exploration().expect("initial exploration");
    DataPipeline::new(Rc::clone(&ctx), Rc::clone(&handler), Rc::clone(&catalog))
        .process()
        .expect("data pipeline");
    eda.further_exploration().expect("further exploration");
    let model = ModelPipeline::new(Rc::clone(&ctx), Rc::clone(&handler), Rc::clone(&catalog));
    model.train().expect("training");
    model.evaluate().expect("evaluation");

    for rel in [
        "reports/analysis/raw_metadata.json",
        "reports/analysis/raw_skew_kurt.json",
        "data/processed/processed.csv",
        "data/processed/feature_eng.csv",
        "data/processed/transformed.csv",
        "reports/analysis/processed_metadata.json",
        "reports/analysis/processed_skew_kurt.json",
        "data/model/x_train.csv",
        "data/model/x_test.csv",
        "data/model/y_train.csv",
        "data/model/y_test.csv",
        "models/model.bin",
        "data/model/y_test_pred.bin",
    ] {
        assert!(dir.path().join(rel).exists(), "missing artifact: {}", rel);
    }

    // Las features derivadas aparecen en el dataset transformado.
    let transformed = fs::read_to_string(dir.path().join("data/processed/transformed.csv"))
        .expect("transformed csv");
    let header = transformed.lines().next().expect("header");
    assert!(header.contains("sensor_mean"));
    assert!(header.contains("age_runtime_ratio"));
    assert!(header.contains("s1"));
    assert!(!header.contains("Sensor1"));

    // Las métricas quedan en el slot de estado, no en disco.
    match ctx.states.data.get("eval-metrics") {
        Some(Payload::Mapping(metrics)) => {
            let accuracy = metrics.get("accuracy").copied().expect("accuracy");
            assert!((0.0..=1.0).contains(&accuracy));
            assert_eq!(metrics.get("n_test").copied(), Some(3.0));
        }
        other => panic!("expected metrics mapping, got {:?}", other),
    }
}

#[test]
fn registry_mirrors_every_declared_step() {
    let mut registry = maint_core::StepRegistry::new();
    maint_steps::register_all(&mut registry);

    assert_eq!(registry.list_all(None).len(), 11);
    let processing = registry.list_category(maint_core::Category::Processing);
    let names: Vec<&str> = processing.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["preprocess", "build-features", "transform-distributions"]
    );
    assert_eq!(processing[2].position, 3);
}
