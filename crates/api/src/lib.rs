//! Quill API server library.
//!
//! Exposes the building blocks (config, state, error handling, rendering,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod render;
pub mod router;
pub mod routes;
pub mod state;
