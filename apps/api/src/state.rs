//! Shared application state.
//!
//! One `Database` handle per process, created in `main` and handed to
//! handlers through axum's `State` extractor. The handle clones cheaply
//! (the underlying pool is reference-counted), so state is `Clone` and
//! carries no locks of its own.

use merx_db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
