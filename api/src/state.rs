//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use crate::db::{Database, DatabaseConfig};
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Cloning is cheap; all clones share the same [`Database`] handle.
#[derive(Clone)]
pub struct AppState {
    database: Arc<Database>,
}

impl AppState {
    /// Creates a new application state around an existing database handle.
    #[must_use]
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Creates a new application state from a database configuration.
    ///
    /// No connection is attempted here; the database connects lazily on the
    /// first probe.
    #[must_use]
    pub fn with_config(config: DatabaseConfig) -> Self {
        Self::new(Arc::new(Database::new(config)))
    }

    /// Returns a reference to the database handle.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.database
    }
}
