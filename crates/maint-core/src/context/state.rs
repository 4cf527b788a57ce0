//! Estado en memoria get/set/clear.
//!
//! Dos namespaces (`data` y `model`) con el mismo comportamiento: un mapa
//! clave -> `Payload` de proceso completo. La ejecución es monohilo, por lo
//! que `RefCell` basta; introducir concurrencia exigiría sincronización
//! explícita sobre este espacio de claves.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::model::Payload;

#[derive(Debug)]
pub struct StateStore {
    name: &'static str,
    inner: RefCell<HashMap<String, Payload>>,
}

impl StateStore {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RefCell::new(HashMap::new()),
        }
    }

    /// Sobrescribe incondicionalmente el slot.
    pub fn set(&self, key: &str, value: Payload) {
        log::debug!("SAVING ``{}`` to {} state in memory", key, self.name);
        self.inner.borrow_mut().insert(key.to_string(), value);
    }

    /// Devuelve un clon del último valor guardado, si existe.
    pub fn get(&self, key: &str) -> Option<Payload> {
        log::debug!("LOADING ``{}`` from {} state in memory", key, self.name);
        self.inner.borrow().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.borrow().contains_key(key)
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

#[derive(Debug)]
pub struct States {
    pub data: StateStore,
    pub model: StateStore,
}

impl Default for States {
    fn default() -> Self {
        Self {
            data: StateStore::new("data"),
            model: StateStore::new("model"),
        }
    }
}
