//! Identidad y memoización de módulos a través del handler.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;
use maint_core::{
    Cell, CoreError, DataModule, DataModuleHandler, FileCodec, Paths, Payload, PipelineContext,
    Settings, SharedCodec, Table,
};

/// Codec de prueba que cuenta lecturas y devuelve siempre la misma tabla.
#[derive(Debug)]
struct CountingCodec {
    reads: RefCell<usize>,
}

impl CountingCodec {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            reads: RefCell::new(0),
        })
    }
}

impl FileCodec for CountingCodec {
    fn read(&self, _path: &Path) -> Result<Payload, CoreError> {
        *self.reads.borrow_mut() += 1;
        Ok(Payload::Table(Table::from_columns(vec![(
            "s1".to_string(),
            vec![Cell::Float(1.5), Cell::Float(2.5)],
        )])))
    }

    fn write(&self, _payload: &Payload, _path: &Path) -> Result<(), CoreError> {
        Ok(())
    }
}

fn file_backed_fixture(codec: SharedCodec) -> (tempfile::TempDir, Rc<PipelineContext>, DataModuleHandler) {
    let dir = tempfile::tempdir().expect("tempdir");
    let raw = dir.path().join("data/raw/sensors.csv");
    fs::create_dir_all(raw.parent().expect("parent")).expect("mkdir");
    fs::write(&raw, "s1\n1.5\n2.5\n").expect("seed file");
    let ctx = Rc::new(PipelineContext::new(Paths::new(dir.path()), Settings::default()));
    let handler = DataModuleHandler::new(Rc::clone(&ctx), codec, IndexMap::new());
    (dir, ctx, handler)
}

#[test]
fn get_dm_returns_the_same_instance_for_a_key() {
    let codec = CountingCodec::new();
    let (_dir, _ctx, handler) = file_backed_fixture(codec);

    let a = handler.get_dm("raw-data").expect("first get");
    let b = handler.get_dm("raw-data").expect("second get");
    assert!(Rc::ptr_eq(&a, &b));

    let other = handler.get_dm("processed-data").expect("other key");
    assert!(!Rc::ptr_eq(&a, &other));
}

#[test]
fn load_dm_reads_the_backing_exactly_once() {
    let codec = CountingCodec::new();
    let (_dir, _ctx, handler) = file_backed_fixture(Rc::clone(&codec) as SharedCodec);

    let dm = handler.get_dm("raw-data").expect("module");
    let first = handler.load_dm(&dm).expect("first load");
    let second = handler.load_dm(&dm).expect("second load");

    assert_eq!(first, second);
    assert_eq!(*codec.reads.borrow(), 1);
}

#[test]
fn construction_requires_exactly_one_binding() {
    let ctx = Rc::new(PipelineContext::new(Paths::empty(), Settings::default()));
    let codec: SharedCodec = CountingCodec::new();

    let unbound = DataModule::new(Rc::clone(&ctx), Rc::clone(&codec), None, None, None);
    assert!(matches!(unbound, Err(CoreError::MissingBinding)));

    let state_backed = DataModule::new(
        Rc::clone(&ctx),
        Rc::clone(&codec),
        Some("scratch".to_string()),
        None,
        None,
    );
    assert!(state_backed.is_ok());
}

#[test]
fn unknown_path_key_falls_back_to_state_binding() {
    let ctx = Rc::new(PipelineContext::new(Paths::empty(), Settings::default()));
    let codec: SharedCodec = CountingCodec::new();
    let handler = DataModuleHandler::new(Rc::clone(&ctx), codec, IndexMap::new());

    ctx.states.data.set("scratch", Payload::Array(vec![9.0]));
    let dm = handler.get_dm("scratch").expect("state module");
    assert_eq!(dm.state_key(), Some("scratch"));
    assert!(dm.data_path().is_none());
    assert_eq!(handler.load_dm(&dm).expect("load"), Payload::Array(vec![9.0]));
}

#[test]
fn absent_or_empty_artifacts_fail_the_load() {
    let ctx = Rc::new(PipelineContext::new(Paths::empty(), Settings::default()));
    let codec: SharedCodec = CountingCodec::new();
    let handler = DataModuleHandler::new(Rc::clone(&ctx), codec, IndexMap::new());

    // Slot nunca escrito.
    let absent = handler.get_dm("never-written").expect("module");
    assert!(matches!(
        handler.load_dm(&absent),
        Err(CoreError::EmptyArtifact { .. })
    ));

    // Slot escrito con una tabla sin filas.
    ctx.states.data.set("hollow", Payload::Table(Table::new()));
    let hollow = handler.get_dm("hollow").expect("module");
    assert!(matches!(
        handler.load_dm(&hollow),
        Err(CoreError::EmptyArtifact { .. })
    ));
}

/// Codec de prueba que sólo persiste tablas, como el codec CSV real.
#[derive(Debug)]
struct TableOnlyCodec;

impl FileCodec for TableOnlyCodec {
    fn read(&self, path: &Path) -> Result<Payload, CoreError> {
        Err(CoreError::Codec(format!("unexpected read: {}", path.display())))
    }

    fn write(&self, payload: &Payload, _path: &Path) -> Result<(), CoreError> {
        match payload {
            Payload::Table(_) => Ok(()),
            other => Err(CoreError::UnsupportedForExtension {
                kind: other.kind_name(),
                extension: "csv".to_string(),
            }),
        }
    }
}

#[test]
fn batched_save_names_the_offending_key_and_kind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = Rc::new(PipelineContext::new(Paths::new(dir.path()), Settings::default()));
    let handler = DataModuleHandler::new(Rc::clone(&ctx), Rc::new(TableOnlyCodec), IndexMap::new());

    // "x-train" está ligado a un CSV; un arreglo no cabe en ese formato.
    let mut batch = IndexMap::new();
    batch.insert("x-train".to_string(), Payload::Array(vec![1.0, 2.0]));

    let err = handler.save_data(&batch).expect_err("array into csv key");
    assert!(matches!(
        err,
        CoreError::UnsupportedPayload { ref key, kind: "array" } if key == "x-train"
    ));
}

#[test]
fn file_binding_with_missing_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = Rc::new(PipelineContext::new(Paths::new(dir.path()), Settings::default()));
    let codec: SharedCodec = CountingCodec::new();
    let handler = DataModuleHandler::new(Rc::clone(&ctx), codec, IndexMap::new());

    let dm = handler.get_dm("raw-data").expect("module");
    let err = handler.load_dm(&dm).expect_err("missing file");
    assert!(matches!(err, CoreError::LoadFailed { .. }));
}
