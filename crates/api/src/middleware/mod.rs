//! Request extractors shared by every endpoint.
//!
//! - [`auth`] -- resolves the bearer token into an [`auth::AuthUser`].
//! - [`validation`] -- the per-endpoint pipeline (auth, permissions, body and
//!   query validation) exposed as the [`validation::Validated`] extractor.

pub mod auth;
pub mod validation;
