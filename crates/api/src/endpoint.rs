//! Static endpoint declarations.
//!
//! Every endpoint is a marker type implementing [`Endpoint`]. Its
//! [`EndpointSpec`] is the single source for the route the router mounts,
//! the checks the [`Validated`](crate::middleware::validation::Validated)
//! extractor performs, and the operation the OpenAPI generator documents.

use std::fmt;

use assets_core::permissions::Permission;
use assets_core::schema::{ObjectSchema, Schema};
use axum::handler::Handler;
use axum::routing::{on, MethodFilter};
use axum::Router;
use serde::de::DeserializeOwned;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Lowercase name, as used for OpenAPI path item keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    /// Whether requests with this method may carry a body.
    pub fn accepts_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    pub fn filter(&self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
            HttpMethod::Put => MethodFilter::PUT,
            HttpMethod::Patch => MethodFilter::PATCH,
            HttpMethod::Delete => MethodFilter::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// A path parameter declared by an endpoint.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub schema: Schema,
    /// When set, the parameter is documented once under
    /// `components.parameters.<component>` and referenced from each operation.
    pub component: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct HeaderSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub schema: Schema,
}

#[derive(Debug, Clone)]
pub struct ResponseSpec {
    pub description: &'static str,
    pub schema: Option<Schema>,
    pub headers: Vec<HeaderSpec>,
}

impl ResponseSpec {
    pub fn new(description: &'static str) -> Self {
        Self {
            description,
            schema: None,
            headers: Vec::new(),
        }
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn header(mut self, name: &'static str, description: &'static str, schema: Schema) -> Self {
        self.headers.push(HeaderSpec {
            name,
            description,
            schema,
        });
        self
    }
}

/// The declared contract of one route.
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    pub method: HttpMethod,
    /// Route template relative to the API root, e.g. `/assets/{id}`.
    pub route: &'static str,
    pub tag: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
    pub query: Option<ObjectSchema>,
    pub body: Option<ObjectSchema>,
    /// Declared responses keyed by status code.
    pub responses: Vec<(u16, ResponseSpec)>,
    /// The caller must hold at least one of these. Empty means any
    /// authenticated caller.
    pub required_permissions: Vec<Permission>,
}

pub trait Endpoint: Send + Sync + 'static {
    /// Typed request body; `Default` is used when no body schema is declared.
    type Body: DeserializeOwned + Default + Send;
    /// Typed query; `Default` is used when no query schema is declared.
    type Query: DeserializeOwned + Default + Send;

    fn spec() -> &'static EndpointSpec;
}

/// Mount `handler` at the route and method declared by `E`.
pub fn mount<E, H, T>(router: Router<AppState>, handler: H) -> Router<AppState>
where
    E: Endpoint,
    H: Handler<T, AppState>,
    T: 'static,
{
    let spec = E::spec();
    router.route(spec.route, on(spec.method.filter(), handler))
}

/// A router that remembers the declaration of every endpoint mounted on it,
/// so the served routes and the documented routes cannot diverge.
#[derive(Default)]
pub struct ApiRouter {
    router: Router<AppState>,
    specs: Vec<&'static EndpointSpec>,
}

impl ApiRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint<E, H, T>(mut self, handler: H) -> Self
    where
        E: Endpoint,
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.router = mount::<E, H, T>(self.router, handler);
        self.specs.push(E::spec());
        self
    }

    pub fn merge(mut self, other: ApiRouter) -> Self {
        self.router = self.router.merge(other.router);
        self.specs.extend(other.specs);
        self
    }

    pub fn specs(&self) -> &[&'static EndpointSpec] {
        &self.specs
    }

    pub fn into_specs(self) -> Vec<&'static EndpointSpec> {
        self.specs
    }

    pub fn into_router(self) -> Router<AppState> {
        self.router
    }
}
