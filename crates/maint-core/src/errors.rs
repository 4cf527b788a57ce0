//! Errores del núcleo de orquestación.
//!
//! Taxonomía (ver también el driver de nivel superior):
//! - configuración: binding ausente en un `DataModule`, step o categoría
//!   desconocidos, formato de fichero desconocido;
//! - artifact vacío: una carga produce un resultado ausente/vacío;
//! - tipo: payload no soportado por el codec para la clave destino;
//! - resolución: un `LazyLoad` sin módulo asociado.
//!
//! Todos se propagan sin reintentos hasta el driver, que los registra y
//! termina la ejecución (stop-on-failure; sin rollback de checkpoints ya
//! escritos).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// `DataModule` construido sin `state_key` ni `data_path`.
    #[error("either `state_key` or `data_path` must be provided")]
    MissingBinding,

    /// Ninguno de los dos bindings esperados pudo satisfacer la carga.
    #[error("unable to load data. `state_key`: {state_key:?}, `data_path`: {data_path:?}")]
    UnloadableModule {
        state_key: Option<String>,
        data_path: Option<PathBuf>,
    },

    #[error("unable to save data. `state_key`: {state_key:?}, `data_path`: {data_path:?}")]
    UnsavableModule {
        state_key: Option<String>,
        data_path: Option<PathBuf>,
    },

    #[error("unknown step `{name}`. Check step definitions")]
    UnknownStep { name: String },

    #[error("invalid category `{category}`. Valid options are: {valid:?}")]
    UnknownCategory { category: String, valid: Vec<String> },

    /// Carga exitosa pero resultado ausente o sin filas/elementos.
    #[error("dataset at {location} is empty")]
    EmptyArtifact { location: String },

    /// Tipo de payload que el codec no puede persistir en la extensión pedida.
    #[error("unsupported payload `{kind}` for `{extension}` files")]
    UnsupportedForExtension { kind: &'static str, extension: String },

    /// Variante enriquecida por `save_data`: nombra la clave ofensora.
    #[error("unsupported data type `{kind}` for key `{key}`")]
    UnsupportedPayload { key: String, kind: &'static str },

    /// Handle perezoso sin módulo. Verificar claves de módulos y de rutas.
    #[error("`None` data module. Verify module path keys, and path config keys")]
    UnresolvedDependency,

    /// Envuelve fallos de carga con el binding del módulo para diagnóstico.
    #[error("failed to load data from {location}: {source}")]
    LoadFailed {
        location: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("unknown file type `{extension}` for {path}")]
    UnknownFormat { extension: String, path: PathBuf },

    #[error("missing step argument `{name}`")]
    MissingArgument { name: String },

    #[error("step argument `{name}` has an unexpected type")]
    ArgumentType { name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("codec: {0}")]
    Codec(String),
}
