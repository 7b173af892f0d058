//! HTTP surface for planboard collections.
//!
//! Routes: `GET/POST/PATCH /goals`, `GET/POST/DELETE /notes`,
//! `GET/POST /events`, `GET /health`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::build_router;
pub use state::{AppState, Collections};
