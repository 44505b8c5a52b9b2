//! Folio API server library.
//!
//! Exposes config, state, error handling, the content read layer and routes
//! so integration tests and the binaries can share them.

pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
