//! Persistent key-value storage for widget state.
//!
//! Widgets never talk to a backend directly. They hold a [`WidgetStore`],
//! which pairs a shared backend with a key namespace and turns every failure
//! into a logged no-op so the in-memory state stays authoritative.

pub mod file;
pub mod memory;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Synchronous string-to-string storage. Last write wins per key.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`
    ///
    /// Implementations must keep the new value readable through `get` for the
    /// rest of the session even when the durable write fails.
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// All stored keys in a stable order
    fn keys(&self) -> Vec<String>;
}

/// Backend shared by every widget on the page
pub type SharedStore = Rc<RefCell<dyn KeyValueStore>>;

/// Namespaced view of a shared backend, handed to each widget.
///
/// The empty namespace maps keys through unchanged, so a single page keeps
/// the plain `todos` / `ticTacToeBoard` / ... keys. Any other namespace
/// prefixes keys as `namespace/key`.
#[derive(Clone)]
pub struct WidgetStore {
    backend: SharedStore,
    namespace: String,
}

impl WidgetStore {
    pub fn new(backend: SharedStore, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    /// Store backed by a fresh in-memory map (nothing survives the process)
    pub fn ephemeral() -> Self {
        Self::new(Rc::new(RefCell::new(MemoryStore::new())), "")
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Full backend key for a widget key
    pub fn key(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.namespace, key)
        }
    }

    /// Save a raw string value
    pub fn save_raw(&self, key: &str, value: &str) {
        let full_key = self.key(key);
        if let Err(e) = self.backend.borrow_mut().set(&full_key, value.to_string()) {
            tracing::warn!("Failed to persist '{}': {:#}", full_key, e);
        }
    }

    /// Load a raw string value
    pub fn load_raw(&self, key: &str) -> Option<String> {
        self.backend.borrow().get(&self.key(key))
    }

    /// Serialize `value` as JSON and save it
    pub fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.save_raw(key, &json),
            Err(e) => tracing::warn!("Failed to serialize '{}': {}", self.key(key), e),
        }
    }

    /// Load and deserialize a JSON value
    ///
    /// Malformed data is logged and reported as absent, so callers fall back
    /// to their defaults.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.load_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed value for '{}': {}",
                    self.key(key),
                    e
                );
                None
            }
        }
    }
}
