//! # merx-api: HTTP API Server
//!
//! Axum application for the Merx admin API. The crate is a library plus a
//! thin `main` so integration tests can build the exact production router
//! against an in-memory database and drive it without a socket.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Lifecycle                               │
//! │                                                                         │
//! │   HTTP request                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   Router (routes/mod.rs) ── TraceLayer logs method/path/status          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   Handler (routes/*.rs)                                                 │
//! │       ├── validate fields        (merx-core::validation)                │
//! │       ├── check references       (repository exists())                  │
//! │       ├── derive totals          (merx-core::order_total)               │
//! │       ├── read/write             (merx-db repositories)                 │
//! │       └── resolve for response   (merx-db::Resolver)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   ApiResult<T> ── ApiError::into_response maps to 400/404/500           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
