//! The request pipeline every endpoint runs before its handler.
//!
//! [`Validated<E>`] is an extractor that, in order:
//!
//! 1. resolves the caller from the bearer token (`401` on failure),
//! 2. checks the caller holds at least one of `E`'s required permissions
//!    (`403`, listing the missing ones),
//! 3. rejects a missing body when `E` declares a body schema (`400`),
//! 4. validates the body against the schema, reporting every issue (`400`),
//! 5. validates the query string strictly, reporting every issue (`400`).
//!
//! Handlers taking a `Validated<E>` therefore only see authorized, well-formed
//! input.

use std::marker::PhantomData;

use assets_core::error::{CoreError, Issue, ValidationError};
use assets_core::permissions::missing_permissions;
use assets_core::schema::ObjectSchema;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::Uri;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::auth::AuthUser;
use crate::endpoint::Endpoint;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Upper bound on accepted request bodies.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

const MISSING_BODY: &str = "Missing request body";
const INVALID_BODY: &str = "Invalid request body";
const INVALID_QUERY: &str = "Invalid query param(s)";

pub struct Validated<E: Endpoint> {
    pub user: AuthUser,
    pub body: E::Body,
    pub query: E::Query,
    _endpoint: PhantomData<fn() -> E>,
}

impl<E: Endpoint> FromRequest<AppState> for Validated<E> {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let spec = E::spec();
        let (mut parts, body) = req.into_parts();

        let user = AuthUser::from_request_parts(&mut parts, state).await?;

        if let Some(missing) = missing_permissions(&spec.required_permissions, &user.permissions) {
            tracing::warn!(
                user = %user.username,
                method = %spec.method,
                route = spec.route,
                ?missing,
                "Permission denied"
            );
            return Err(CoreError::NotAllowed { missing }.into());
        }

        let body = match &spec.body {
            Some(schema) => {
                let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
                    .await
                    .map_err(|e| {
                        CoreError::from(ValidationError::with_issues(
                            INVALID_BODY,
                            vec![Issue::new(Vec::new(), e.to_string())],
                        ))
                    })?;
                parse_body(schema, &bytes)?
            }
            None => E::Body::default(),
        };

        let query = match &spec.query {
            Some(schema) => parse_query(schema, &parts.uri)?,
            None => E::Query::default(),
        };

        Ok(Self {
            user,
            body,
            query,
            _endpoint: PhantomData,
        })
    }
}

fn parse_body<T: DeserializeOwned>(schema: &ObjectSchema, bytes: &[u8]) -> AppResult<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(CoreError::from(ValidationError::message(MISSING_BODY)).into());
    }

    let raw: Value = serde_json::from_slice(bytes).map_err(|e| {
        CoreError::from(ValidationError::with_issues(
            INVALID_BODY,
            vec![Issue::new(Vec::new(), e.to_string())],
        ))
    })?;
    if raw.is_null() {
        return Err(CoreError::from(ValidationError::message(MISSING_BODY)).into());
    }

    let parsed = schema
        .parse(&raw)
        .map_err(|issues| CoreError::from(ValidationError::with_issues(INVALID_BODY, issues)))?;
    into_typed(parsed)
}

fn parse_query<T: DeserializeOwned>(schema: &ObjectSchema, uri: &Uri) -> AppResult<T> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).map_err(|e| {
        CoreError::from(ValidationError::with_issues(
            INVALID_QUERY,
            vec![Issue::new(Vec::new(), e.body_text())],
        ))
    })?;

    let raw: Map<String, Value> = pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();

    let parsed = schema
        .parse_strict(&Value::Object(raw))
        .map_err(|issues| CoreError::from(ValidationError::with_issues(INVALID_QUERY, issues)))?;
    into_typed(parsed)
}

/// Deserialize a schema-normalized payload into the handler's input type.
/// A failure here means the schema and the Rust type disagree.
fn into_typed<T: DeserializeOwned>(parsed: Map<String, Value>) -> AppResult<T> {
    serde_json::from_value(Value::Object(parsed)).map_err(|e| {
        AppError::InternalError(format!("validated payload does not match handler input: {e}"))
    })
}
