//! Mapa de claves de artifact a rutas en disco.
//!
//! Las claves son el único mecanismo de direccionamiento; la unicidad se
//! mantiene por convención. Todas las rutas cuelgan del directorio raíz de
//! datos configurado por el driver.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Tabla estática clave -> ruta relativa, espejo del layout en disco.
fn paths_store() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        // Crudo
        ("raw-data", "data/raw/sensors.csv"),
        // Procesado
        ("processed-data", "data/processed/processed.csv"),
        ("feature-eng", "data/processed/feature_eng.csv"),
        ("transformed-data", "data/processed/transformed.csv"),
        // EDA crudo
        ("raw-data-metadata", "reports/analysis/raw_metadata.json"),
        ("raw-data-skew-kurt", "reports/analysis/raw_skew_kurt.json"),
        // EDA procesado
        ("transformed-data-metadata", "reports/analysis/processed_metadata.json"),
        ("transformed-data-skew-kurt", "reports/analysis/processed_skew_kurt.json"),
        // Datos de modelo
        ("x-train", "data/model/x_train.csv"),
        ("x-test", "data/model/x_test.csv"),
        ("y-train", "data/model/y_train.csv"),
        ("y-test", "data/model/y_test.csv"),
        ("model", "models/model.bin"),
        ("y-test-pred", "data/model/y_test_pred.bin"),
    ])
}

#[derive(Debug, Clone)]
pub struct Paths {
    root: PathBuf,
    paths: IndexMap<String, PathBuf>,
}

impl Paths {
    /// Construye el mapa completo enraizado en `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let paths: IndexMap<String, PathBuf> = paths_store()
            .into_iter()
            .map(|(key, rel)| (key.to_string(), root.join(rel)))
            .collect();
        log::debug!("PathsConfig:\n{:#?}", paths);
        Self { root, paths }
    }

    /// Mapa vacío: todos los módulos quedan respaldados por estado en memoria.
    pub fn empty() -> Self {
        Self {
            root: PathBuf::new(),
            paths: IndexMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.paths.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.paths.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(|k| k.as_str())
    }
}
