pub mod assets;
pub mod docs;
pub mod health;

use axum::Router;

use crate::endpoint::{ApiRouter, EndpointSpec};
use crate::state::AppState;

/// Every endpoint served under `/api`.
///
/// ```text
/// POST   /assets            create (create_asset)
/// GET    /assets            list (read_asset)
/// PUT    /assets/{id}       update (create_asset)
/// ```
pub fn api() -> ApiRouter {
    ApiRouter::new().merge(assets::router())
}

/// Build the `/api` route tree.
pub fn api_routes() -> Router<AppState> {
    api().into_router()
}

/// Declarations of every endpoint mounted by [`api_routes`], in mount order.
pub fn endpoint_specs() -> Vec<&'static EndpointSpec> {
    api().into_specs()
}
