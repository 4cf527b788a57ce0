//! Normalización por diccionario aplicada en la carga de módulos de fichero.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use maint_core::{
    Cell, CoreError, DataDictionary, DataModuleHandler, Dtype, FileCodec, Paths, Payload,
    PipelineContext, Settings, Table,
};

/// Codec de prueba: entrega la misma tabla cruda que produciría un CSV sin
/// tipar (todas las celdas como texto).
#[derive(Debug)]
struct RawTableCodec;

impl FileCodec for RawTableCodec {
    fn read(&self, _path: &Path) -> Result<Payload, CoreError> {
        Ok(Payload::Table(Table::from_columns(vec![
            (
                "OldName".to_string(),
                vec![Cell::Str("3".into()), Cell::Str("7.0".into()), Cell::Str("oops".into())],
            ),
            (
                "Flag".to_string(),
                vec![Cell::Str("y".into()), Cell::Str("NA".into()), Cell::Str("n".into())],
            ),
        ])))
    }

    fn write(&self, _payload: &Payload, _path: &Path) -> Result<(), CoreError> {
        Ok(())
    }
}

fn dictionary_under_test() -> DataDictionary {
    DataDictionary {
        rename_mapping: IndexMap::from([("OldName".to_string(), "val".to_string())]),
        dtypes: IndexMap::from([("val".to_string(), Dtype::Int)]),
        use_cols: Vec::new(),
        na_values: vec!["NA".to_string()],
    }
}

#[test]
fn load_applies_rename_dtypes_and_sentinels_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let raw = dir.path().join("data/raw/sensors.csv");
    fs::create_dir_all(raw.parent().expect("parent")).expect("mkdir");
    fs::write(&raw, "placeholder").expect("seed file");

    let ctx = Rc::new(PipelineContext::new(Paths::new(dir.path()), Settings::default()));
    let module_map = IndexMap::from([("raw-data".to_string(), dictionary_under_test())]);
    let handler = DataModuleHandler::new(Rc::clone(&ctx), Rc::new(RawTableCodec), module_map);

    let dm = handler.get_dm("raw-data").expect("module");
    let loaded = handler.load_dm(&dm).expect("load");
    let table = match loaded {
        Payload::Table(t) => t,
        other => panic!("expected table, got {:?}", other),
    };

    // El rename se aplica antes del dtype: la clave de dtypes refiere al
    // nombre NUEVO. `oops` no parsea como entero y queda en Null.
    assert_eq!(table.column_names(), vec!["val", "Flag"]);
    assert_eq!(
        table.column("val"),
        Some(&[Cell::Int(3), Cell::Int(7), Cell::Null][..])
    );
    // El centinela se reemplaza en columnas no tipadas.
    assert_eq!(
        table.column("Flag"),
        Some(&[Cell::Str("y".into()), Cell::Null, Cell::Str("n".into())][..])
    );
}

#[test]
fn keys_without_dictionary_load_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let processed = dir.path().join("data/processed/processed.csv");
    fs::create_dir_all(processed.parent().expect("parent")).expect("mkdir");
    fs::write(&processed, "placeholder").expect("seed file");

    let ctx = Rc::new(PipelineContext::new(Paths::new(dir.path()), Settings::default()));
    let handler = DataModuleHandler::new(Rc::clone(&ctx), Rc::new(RawTableCodec), IndexMap::new());

    let dm = handler.get_dm("processed-data").expect("module");
    let loaded = handler.load_dm(&dm).expect("load");
    let table = match loaded {
        Payload::Table(t) => t,
        other => panic!("expected table, got {:?}", other),
    };
    assert_eq!(table.column_names(), vec!["OldName", "Flag"]);
    assert_eq!(table.column("OldName").and_then(|c| c.first()), Some(&Cell::Str("3".into())));
}

#[test]
fn column_projection_happens_after_rename() {
    let raw = Table::from_columns(vec![
        ("OldName".to_string(), vec![Cell::Str("1".into())]),
        ("Flag".to_string(), vec![Cell::Str("y".into())]),
    ]);
    let dd = DataDictionary {
        rename_mapping: IndexMap::from([("OldName".to_string(), "val".to_string())]),
        use_cols: vec!["val".to_string()],
        ..Default::default()
    };
    let out = match dd.apply(Payload::Table(raw)) {
        Payload::Table(t) => t,
        other => panic!("expected table, got {:?}", other),
    };
    assert_eq!(out.column_names(), vec!["val"]);
}
