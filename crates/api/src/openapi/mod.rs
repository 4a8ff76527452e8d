//! OpenAPI document generation.
//!
//! The document is derived entirely from the [`EndpointSpec`]s the router
//! mounts and assembled from [`openapiv3`] types. Generation is
//! all-or-nothing: any inconsistency between a route template and its
//! declared parameters, a body on a method that carries none, a duplicated
//! operation or a conflicting component aborts with an [`OpenApiError`].

pub mod document;
pub mod registry;

use std::collections::BTreeMap;

use assets_core::permissions::Permission;
use indexmap::IndexMap;
use openapiv3::{
    OpenAPI, Operation, ReferenceOr, RequestBody, Response, Responses, StatusCode,
};

use crate::config::{
    OpenApiConfig, DEFAULT_OPENAPI_DESCRIPTION, DEFAULT_OPENAPI_SERVER_URL, DEFAULT_OPENAPI_TITLE,
};
use crate::endpoint::{EndpointSpec, HttpMethod, ParamSpec, ResponseSpec};
use document::{json_content, path_parameter, query_parameter, response_header, schema};
use registry::OpenApiRegistry;

/// Description of the response every operation documents for a missing or
/// invalid token.
pub const UNAUTHORIZED_DESCRIPTION: &str = "Not authorized";

#[derive(Debug, thiserror::Error)]
pub enum OpenApiError {
    #[error("no API spec found")]
    NoEndpoints,

    #[error("{method} {route}: route parameter '{param}' is not declared")]
    UndeclaredRouteParam {
        method: HttpMethod,
        route: String,
        param: String,
    },

    #[error("{method} {route}: declared parameter '{param}' does not appear in the route")]
    UnusedParam {
        method: HttpMethod,
        route: String,
        param: String,
    },

    #[error("{method} {route}: a body is not allowed for this method")]
    BodyNotAllowed { method: HttpMethod, route: String },

    #[error("{method} {route} is registered more than once")]
    DuplicateOperation { method: HttpMethod, route: String },

    #[error("{route}: malformed route template")]
    MalformedRoute { route: String },

    #[error("component '{name}' is declared with conflicting definitions")]
    ConflictingComponent { name: String },

    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Document-level metadata.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub version: String,
    pub description: String,
    pub server_url: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: DEFAULT_OPENAPI_TITLE.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: DEFAULT_OPENAPI_DESCRIPTION.to_string(),
            server_url: DEFAULT_OPENAPI_SERVER_URL.to_string(),
        }
    }
}

impl DocumentInfo {
    pub fn from_config(config: &OpenApiConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            server_url: config.server_url.clone(),
            ..Self::default()
        }
    }
}

/// Build the document for `specs`.
pub fn generate(specs: &[&EndpointSpec], info: DocumentInfo) -> Result<OpenAPI, OpenApiError> {
    if specs.is_empty() {
        return Err(OpenApiError::NoEndpoints);
    }

    let mut registry = OpenApiRegistry::new();
    for spec in specs {
        check_route_params(spec)?;
        if spec.body.is_some() && !spec.method.accepts_body() {
            return Err(OpenApiError::BodyNotAllowed {
                method: spec.method,
                route: spec.route.to_string(),
            });
        }

        let operation = build_operation(spec, &mut registry)?;
        registry.register_path(spec.method, spec.route, operation)?;
    }

    tracing::debug!(endpoints = specs.len(), "Generated API document");
    registry.into_document(info)
}

/// The `{name}` tokens of a route template, in order.
fn route_params(route: &str) -> Result<Vec<&str>, OpenApiError> {
    let malformed = || OpenApiError::MalformedRoute {
        route: route.to_string(),
    };

    let mut params = Vec::new();
    let mut rest = route;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(malformed)?;
        let name = &after[..end];
        if name.is_empty() || name.contains('{') {
            return Err(malformed());
        }
        params.push(name);
        rest = &after[end + 1..];
    }
    if rest.contains('}') {
        return Err(malformed());
    }
    Ok(params)
}

/// Route tokens and declared path parameters must match in both directions.
fn check_route_params(spec: &EndpointSpec) -> Result<(), OpenApiError> {
    let in_route = route_params(spec.route)?;

    if let Some(param) = in_route
        .iter()
        .find(|name| !spec.params.iter().any(|p| p.name == **name))
    {
        return Err(OpenApiError::UndeclaredRouteParam {
            method: spec.method,
            route: spec.route.to_string(),
            param: param.to_string(),
        });
    }

    if let Some(param) = spec.params.iter().find(|p| !in_route.contains(&p.name)) {
        return Err(OpenApiError::UnusedParam {
            method: spec.method,
            route: spec.route.to_string(),
            param: param.name.to_string(),
        });
    }

    Ok(())
}

fn build_operation(
    spec: &EndpointSpec,
    registry: &mut OpenApiRegistry,
) -> Result<Operation, OpenApiError> {
    let mut parameters = Vec::new();
    for param in &spec.params {
        parameters.push(path_param(param, registry)?);
    }

    if let Some(query) = &spec.query {
        for (name, field) in query.fields() {
            parameters.push(ReferenceOr::Item(query_parameter(
                name,
                field.description_text(),
                field.is_required(),
                schema(field.json_schema())?,
            )));
        }
    }

    let request_body = match &spec.body {
        Some(body) => Some(ReferenceOr::Item(RequestBody {
            required: true,
            content: json_content(schema(body.json_schema())?),
            ..RequestBody::default()
        })),
        None => None,
    };

    Ok(Operation {
        tags: vec![spec.tag.to_string()],
        summary: Some(spec.summary.to_string()),
        description: Some(spec.description.to_string()),
        parameters,
        request_body,
        responses: build_responses(spec)?,
        ..Operation::default()
    })
}

fn path_param(
    param: &ParamSpec,
    registry: &mut OpenApiRegistry,
) -> Result<ReferenceOr<openapiv3::Parameter>, OpenApiError> {
    let parameter = path_parameter(
        param.name,
        param.schema.description_text(),
        schema(param.schema.json_schema())?,
    );
    match param.component {
        Some(component) => registry.register_parameter(component, parameter),
        None => Ok(ReferenceOr::Item(parameter)),
    }
}

/// Synthesized 401/403 entries merged with the declared responses, which win
/// on conflict.
fn build_responses(spec: &EndpointSpec) -> Result<Responses, OpenApiError> {
    let mut responses = BTreeMap::new();
    responses.insert(401u16, described(UNAUTHORIZED_DESCRIPTION.to_string()));
    if !spec.required_permissions.is_empty() {
        responses.insert(
            403,
            described(forbidden_description(&spec.required_permissions)),
        );
    }
    for (status, declared) in &spec.responses {
        responses.insert(*status, response(declared)?);
    }

    Ok(Responses {
        responses: responses
            .into_iter()
            .map(|(status, response)| (StatusCode::Code(status), ReferenceOr::Item(response)))
            .collect(),
        ..Responses::default()
    })
}

fn described(description: String) -> Response {
    Response {
        description,
        ..Response::default()
    }
}

fn response(spec: &ResponseSpec) -> Result<Response, OpenApiError> {
    let mut headers = IndexMap::new();
    for header in &spec.headers {
        headers.insert(
            header.name.to_string(),
            ReferenceOr::Item(response_header(
                header.description,
                schema(header.schema.json_schema())?,
            )),
        );
    }

    let content = match &spec.schema {
        Some(body) => json_content(schema(body.json_schema())?),
        None => IndexMap::new(),
    };

    Ok(Response {
        description: spec.description.to_string(),
        headers,
        content,
        ..Response::default()
    })
}

/// Description of the 403 response for an endpoint guarded by `permissions`.
pub fn forbidden_description(permissions: &[Permission]) -> String {
    match permissions {
        [single] => format!("Not allowed, user has no \"{single}\" permission"),
        _ => {
            let quoted: Vec<String> = permissions.iter().map(|p| format!("\"{p}\"")).collect();
            format!(
                "Not allowed, user is missing one of those permissions: {}",
                quoted.join(", ")
            )
        }
    }
}
