//! Codec por extensión de fichero.
//!
//! El formato lo decide la extensión de la ruta, nunca el contenido:
//! - `csv`  -> tablas columnares (texto sin tipar; campo vacío = Null),
//! - `json` -> informes y mapas (lectura como JSON genérico),
//! - `bin`  -> payloads binarios vía bincode (modelos, predicciones).
//!
//! Las escrituras crean los directorios intermedios que falten. Una
//! extensión desconocida es un error de configuración, no un fallback.

use std::fs;
use std::path::Path;

use maint_core::{Cell, CoreError, FileCodec, Payload, Table};
use serde_json::Value;

#[derive(Debug, Default)]
pub struct ExtensionCodec;

impl ExtensionCodec {
    pub fn new() -> Self {
        Self
    }
}

impl FileCodec for ExtensionCodec {
    fn read(&self, path: &Path) -> Result<Payload, CoreError> {
        log::debug!("Loading Input File: ``{}``", path.display());
        match extension_of(path)?.as_str() {
            "csv" => read_csv(path),
            "json" => read_json(path),
            "bin" => read_bin(path),
            other => Err(CoreError::UnknownFormat {
                extension: other.to_string(),
                path: path.to_path_buf(),
            }),
        }
    }

    fn write(&self, payload: &Payload, path: &Path) -> Result<(), CoreError> {
        log::debug!("Saving Output File: ``{}``", path.display());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        match extension_of(path)?.as_str() {
            "csv" => write_csv(payload, path),
            "json" => write_json(payload, path),
            "bin" => write_bin(payload, path),
            other => Err(CoreError::UnknownFormat {
                extension: other.to_string(),
                path: path.to_path_buf(),
            }),
        }
    }
}

fn extension_of(path: &Path) -> Result<String, CoreError> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| CoreError::UnknownFormat {
            extension: String::new(),
            path: path.to_path_buf(),
        })
}

/// Lectura CSV sin tipar: toda celda entra como `Str`, campo vacío -> `Null`.
/// La coerción a tipos es responsabilidad del diccionario de datos.
fn read_csv(path: &Path) -> Result<Payload, CoreError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| CoreError::Codec(e.to_string()))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CoreError::Codec(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| CoreError::Codec(e.to_string()))?;
        for (idx, field) in record.iter().enumerate() {
            if let Some(column) = columns.get_mut(idx) {
                column.push(if field.is_empty() {
                    Cell::Null
                } else {
                    Cell::Str(field.to_string())
                });
            }
        }
    }

    let table = Table::from_columns(headers.into_iter().zip(columns).collect());
    Ok(Payload::Table(table))
}

fn write_csv(payload: &Payload, path: &Path) -> Result<(), CoreError> {
    let table = payload.as_table().ok_or_else(|| unsupported(payload, "csv"))?;
    let mut writer = csv::Writer::from_path(path).map_err(|e| CoreError::Codec(e.to_string()))?;
    writer
        .write_record(table.column_names())
        .map_err(|e| CoreError::Codec(e.to_string()))?;
    for row in 0..table.n_rows() {
        let record: Vec<String> = table
            .iter_columns()
            .map(|(_, cells)| cells.get(row).map(Cell::to_display).unwrap_or_default())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| CoreError::Codec(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// La lectura JSON es genérica: el contenido vuelve como `Payload::Json` y el
/// consumidor decide su interpretación.
fn read_json(path: &Path) -> Result<Payload, CoreError> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text).map_err(|e| CoreError::Codec(e.to_string()))?;
    Ok(Payload::Json(value))
}

fn write_json(payload: &Payload, path: &Path) -> Result<(), CoreError> {
    let value = match payload {
        Payload::Json(value) => value.clone(),
        Payload::Mapping(mapping) => {
            serde_json::to_value(mapping).map_err(|e| CoreError::Codec(e.to_string()))?
        }
        Payload::Array(values) => {
            serde_json::to_value(values).map_err(|e| CoreError::Codec(e.to_string()))?
        }
        Payload::Table(table) => table_to_records(table),
        Payload::Model(_) => return Err(unsupported(payload, "json")),
    };
    let text =
        serde_json::to_string_pretty(&value).map_err(|e| CoreError::Codec(e.to_string()))?;
    fs::write(path, text)?;
    Ok(())
}

fn table_to_records(table: &Table) -> Value {
    let records: Vec<Value> = (0..table.n_rows())
        .map(|row| {
            let mut object = serde_json::Map::new();
            for (name, cells) in table.iter_columns() {
                let cell = cells.get(row).cloned().unwrap_or(Cell::Null);
                object.insert(name.to_string(), cell_to_value(cell));
            }
            Value::Object(object)
        })
        .collect();
    Value::Array(records)
}

fn cell_to_value(cell: Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Int(i) => Value::from(i),
        Cell::Float(f) => serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Cell::Str(s) => Value::String(s),
    }
}

fn read_bin(path: &Path) -> Result<Payload, CoreError> {
    let bytes = fs::read(path)?;
    bincode::deserialize(&bytes).map_err(|e| CoreError::Codec(e.to_string()))
}

fn write_bin(payload: &Payload, path: &Path) -> Result<(), CoreError> {
    let bytes = bincode::serialize(payload).map_err(|e| CoreError::Codec(e.to_string()))?;
    fs::write(path, bytes)?;
    Ok(())
}

fn unsupported(payload: &Payload, extension: &str) -> CoreError {
    CoreError::UnsupportedForExtension {
        kind: payload.kind_name(),
        extension: extension.to_string(),
    }
}
