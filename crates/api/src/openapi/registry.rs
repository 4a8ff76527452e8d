//! Accumulates operations and reusable components before the document is
//! assembled.

use indexmap::IndexMap;
use openapiv3::{
    Components, Info, OpenAPI, Operation, Parameter, PathItem, Paths, ReferenceOr, Server,
};

use super::document::{bearer_jwt_scheme, BEARER_AUTH, OPENAPI_VERSION};
use super::{DocumentInfo, OpenApiError};
use crate::endpoint::HttpMethod;

#[derive(Debug, Default)]
pub struct OpenApiRegistry {
    paths: IndexMap<String, PathItem>,
    parameters: IndexMap<String, Parameter>,
}

impl OpenApiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `parameter` as the component `name` and return a reference to
    /// it. Registering an identical definition again is a no-op; a different
    /// definition under the same name is an error.
    pub fn register_parameter(
        &mut self,
        name: &str,
        parameter: Parameter,
    ) -> Result<ReferenceOr<Parameter>, OpenApiError> {
        match self.parameters.get(name) {
            Some(existing) if *existing != parameter => {
                return Err(OpenApiError::ConflictingComponent {
                    name: name.to_string(),
                });
            }
            Some(_) => {}
            None => {
                self.parameters.insert(name.to_string(), parameter);
            }
        }
        Ok(ReferenceOr::Reference {
            reference: format!("#/components/parameters/{name}"),
        })
    }

    /// Add an operation. Each method and path pair may only be registered once.
    pub fn register_path(
        &mut self,
        method: HttpMethod,
        path: &str,
        operation: Operation,
    ) -> Result<(), OpenApiError> {
        let item = self.paths.entry(path.to_string()).or_default();
        let slot = match method {
            HttpMethod::Get => &mut item.get,
            HttpMethod::Post => &mut item.post,
            HttpMethod::Put => &mut item.put,
            HttpMethod::Patch => &mut item.patch,
            HttpMethod::Delete => &mut item.delete,
        };
        if slot.is_some() {
            return Err(OpenApiError::DuplicateOperation {
                method,
                route: path.to_string(),
            });
        }
        *slot = Some(operation);
        Ok(())
    }

    pub fn into_document(self, info: DocumentInfo) -> Result<OpenAPI, OpenApiError> {
        let mut security_schemes = IndexMap::new();
        security_schemes.insert(
            BEARER_AUTH.to_string(),
            ReferenceOr::Item(bearer_jwt_scheme()?),
        );

        let mut requirement = IndexMap::new();
        requirement.insert(BEARER_AUTH.to_string(), Vec::new());

        Ok(OpenAPI {
            openapi: OPENAPI_VERSION.to_string(),
            info: Info {
                title: info.title,
                description: Some(info.description),
                version: info.version,
                ..Info::default()
            },
            servers: vec![Server {
                url: info.server_url,
                ..Server::default()
            }],
            paths: Paths {
                paths: self
                    .paths
                    .into_iter()
                    .map(|(path, item)| (path, ReferenceOr::Item(item)))
                    .collect(),
                ..Paths::default()
            },
            components: Some(Components {
                security_schemes,
                parameters: self
                    .parameters
                    .into_iter()
                    .map(|(name, parameter)| (name, ReferenceOr::Item(parameter)))
                    .collect(),
                ..Components::default()
            }),
            security: Some(vec![requirement]),
            ..OpenAPI::default()
        })
    }
}
