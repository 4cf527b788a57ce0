//! Diccionarios de datos estáticos del dominio de mantenimiento predictivo.
//!
//! El único artifact crudo es el CSV de sensores; su diccionario normaliza
//! los encabezados originales del proveedor a snake_case corto, fija los
//! dtypes y declara los centinelas de ausencia.

use indexmap::IndexMap;
use maint_core::{DataDictionary, Dtype};

/// Diccionario del CSV crudo de sensores.
pub fn raw_data_dictionary() -> DataDictionary {
    let rename_mapping = IndexMap::from([
        ("ComponentAge".to_string(), "comp_age".to_string()),
        ("MonthlyRunTime".to_string(), "monthly_run_time".to_string()),
        ("Location".to_string(), "loc".to_string()),
        ("FlowRate".to_string(), "flow_rate".to_string()),
        ("OPXVolume".to_string(), "opx_vol".to_string()),
        ("MaxOutputRate".to_string(), "max_output_rate".to_string()),
        ("Sensor1".to_string(), "s1".to_string()),
        ("Sensor2".to_string(), "s2".to_string()),
        ("Sensor3".to_string(), "s3".to_string()),
        ("Sensor4".to_string(), "s4".to_string()),
        ("Sensor5".to_string(), "s5".to_string()),
        // Duplicado del proveedor: pandas lo entrega como `Sensor5.1`.
        ("Sensor5.1".to_string(), "s6".to_string()),
        ("DaysSinceMaintenance".to_string(), "days_since_maintenance".to_string()),
        ("Target".to_string(), "target".to_string()),
    ]);

    let dtypes = IndexMap::from([
        ("comp_age".to_string(), Dtype::Int),
        ("monthly_run_time".to_string(), Dtype::Float),
        ("loc".to_string(), Dtype::Str),
        ("flow_rate".to_string(), Dtype::Float),
        ("opx_vol".to_string(), Dtype::Float),
        ("max_output_rate".to_string(), Dtype::Float),
        ("s1".to_string(), Dtype::Float),
        ("s2".to_string(), Dtype::Float),
        ("s3".to_string(), Dtype::Float),
        ("s4".to_string(), Dtype::Float),
        ("s5".to_string(), Dtype::Float),
        ("s6".to_string(), Dtype::Float),
        ("days_since_maintenance".to_string(), Dtype::Int),
        ("target".to_string(), Dtype::Int),
    ]);

    DataDictionary {
        rename_mapping,
        dtypes,
        use_cols: Vec::new(),
        na_values: vec!["NA".to_string(), "na".to_string(), "?".to_string()],
    }
}

/// Mapa estático clave de artifact -> diccionario. Los artifacts derivados
/// no llevan diccionario: ya se escriben normalizados.
pub fn module_map() -> IndexMap<String, DataDictionary> {
    IndexMap::from([("raw-data".to_string(), raw_data_dictionary())])
}
