//! Hierarchical path-addressed property store
//!
//! Bindings read sensor-derived properties from here and publish the
//! top-level `user_control` value that downstream listeners consume to drive
//! user transitions. Paths (e.g. `"/"`, `"/bedroom"`) are declared up front;
//! properties under a path are free-form JSON values. Every `set` fires the
//! listeners registered for that (path, key) pair, synchronously, on the
//! caller's thread; a property write counts as a "touch" whether or not the
//! value changed.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

/// The root path, always present
pub const ROOT_PATH: &str = "/";

/// Error type for property lookups
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PropertyError {
    #[error("unknown path {0:?}")]
    UnknownPath(String),

    #[error("no property {key:?} at {path:?}")]
    KeyNotFound { path: String, key: String },
}

type TouchListener = Arc<dyn Fn(&Value) + Send + Sync>;

/// Thread-safe store of properties grouped by path
#[derive(Default)]
pub struct PropertyStore {
    properties: DashMap<String, HashMap<String, Value>>,
    listeners: DashMap<(String, String), Vec<TouchListener>>,
}

impl PropertyStore {
    /// Create a store containing only the root path
    pub fn new() -> Self {
        let store = Self::default();
        store.properties.insert(ROOT_PATH.to_string(), HashMap::new());
        store
    }

    /// Declare a path so properties can be set under it
    pub fn add_path(&self, path: impl Into<String>) {
        let path = path.into();
        debug!(path = %path, "adding property path");
        self.properties.entry(path).or_default();
    }

    /// Set a property, firing any listeners for the (path, key) pair
    ///
    /// Listeners fire on every write, even when the value is unchanged.
    pub fn set(
        &self,
        path: &str,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), PropertyError> {
        let key = key.into();
        let value = value.into();

        let mut properties = self
            .properties
            .get_mut(path)
            .ok_or_else(|| PropertyError::UnknownPath(path.to_string()))?;
        trace!(path = %path, key = %key, value = %value, "setting property");
        properties.insert(key.clone(), value.clone());
        drop(properties);

        let touched: Vec<TouchListener> = self
            .listeners
            .get(&(path.to_string(), key))
            .map(|listeners| listeners.clone())
            .unwrap_or_default();
        for listener in touched {
            listener(&value);
        }
        Ok(())
    }

    /// Get a property value
    pub fn get(&self, path: &str, key: &str) -> Result<Value, PropertyError> {
        let properties = self
            .properties
            .get(path)
            .ok_or_else(|| PropertyError::UnknownPath(path.to_string()))?;
        properties
            .get(key)
            .cloned()
            .ok_or_else(|| PropertyError::KeyNotFound {
                path: path.to_string(),
                key: key.to_string(),
            })
    }

    /// Register a listener fired whenever the (path, key) property is set
    pub fn listen(
        &self,
        path: impl Into<String>,
        key: impl Into<String>,
        listener: impl Fn(&Value) + Send + Sync + 'static,
    ) {
        self.listeners
            .entry((path.into(), key.into()))
            .or_default()
            .push(Arc::new(listener));
    }

    /// All declared paths
    pub fn paths(&self) -> Vec<String> {
        self.properties.iter().map(|r| r.key().clone()).collect()
    }

    /// All property keys under a path
    pub fn keys(&self, path: &str) -> Result<Vec<String>, PropertyError> {
        let properties = self
            .properties
            .get(path)
            .ok_or_else(|| PropertyError::UnknownPath(path.to_string()))?;
        Ok(properties.keys().cloned().collect())
    }
}
