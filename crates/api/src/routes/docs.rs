//! Serves the API document generated from the registered endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::openapi::{self, DocumentInfo};
use crate::routes::endpoint_specs;
use crate::state::AppState;

/// Message returned when the document cannot be built.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate Open API document";

/// GET /open-api.json
///
/// The document is rebuilt on every request; it is cheap and always reflects
/// the endpoints actually mounted.
async fn open_api_document(State(state): State<AppState>) -> Response {
    let info = DocumentInfo::from_config(&state.config.openapi);
    match openapi::generate(&endpoint_specs(), info) {
        Ok(document) => Json(document).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to generate API document");
            (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED_MESSAGE).into_response()
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/open-api.json", get(open_api_document))
}
