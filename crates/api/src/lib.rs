//! Asset API server library.
//!
//! Exposes the building blocks (config, state, error handling, the request
//! validation pipeline, routes and the OpenAPI generator) so integration
//! tests and the binaries can share them.

pub mod app;
pub mod auth;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
