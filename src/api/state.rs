//! Application state for the Payroll Cycle Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::store::Store;

/// Shared application state.
///
/// Holds the engine's store handle; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
}

impl AppState {
    /// Creates an application state backed by a fresh, empty store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(Store::new()),
        }
    }

    /// Creates an application state around an existing store handle.
    pub fn with_store(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Returns a reference to the store.
    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
