//! Domain types shared by the asset store and the HTTP API.
//!
//! - [`asset`] -- the asset record, its input payload and list filter.
//! - [`error`] -- the domain error taxonomy.
//! - [`permissions`] -- capability tokens gating endpoints.
//! - [`schema`] -- declarative payload descriptors used for both request
//!   validation and API documentation.

pub mod asset;
pub mod error;
pub mod permissions;
pub mod schema;
