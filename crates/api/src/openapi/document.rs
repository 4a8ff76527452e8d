//! Conversions from endpoint declarations into [`openapiv3`] document types.

use indexmap::IndexMap;
use openapiv3::{
    Header, HeaderStyle, MediaType, Parameter, ParameterData, ParameterSchemaOrContent,
    PathStyle, QueryStyle, ReferenceOr, Schema, SecurityScheme,
};
use serde_json::{json, Value};

use super::OpenApiError;

/// Version of the OpenAPI format the document declares.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Name of the bearer security scheme every operation requires.
pub const BEARER_AUTH: &str = "bearerAuth";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Read a rendered JSON schema into the document's schema type.
pub fn schema(rendered: Value) -> Result<Schema, OpenApiError> {
    serde_json::from_value(rendered).map_err(|e| OpenApiError::InvalidSchema(e.to_string()))
}

/// `http` / `bearer` scheme carrying a JWT.
pub fn bearer_jwt_scheme() -> Result<SecurityScheme, OpenApiError> {
    serde_json::from_value(json!({
        "type": "http",
        "scheme": "bearer",
        "bearerFormat": "JWT",
    }))
    .map_err(|e| OpenApiError::InvalidSchema(e.to_string()))
}

/// A single `application/json` content entry.
pub fn json_content(schema: Schema) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert(
        JSON_CONTENT_TYPE.to_string(),
        MediaType {
            schema: Some(ReferenceOr::Item(schema)),
            ..MediaType::default()
        },
    );
    content
}

fn parameter_data(
    name: &str,
    description: Option<&str>,
    required: bool,
    schema: Schema,
) -> ParameterData {
    ParameterData {
        name: name.to_string(),
        description: description.map(str::to_string),
        required,
        deprecated: None,
        format: ParameterSchemaOrContent::Schema(ReferenceOr::Item(schema)),
        example: None,
        examples: IndexMap::new(),
        explode: None,
        extensions: IndexMap::new(),
    }
}

pub fn path_parameter(name: &str, description: Option<&str>, schema: Schema) -> Parameter {
    Parameter::Path {
        parameter_data: parameter_data(name, description, true, schema),
        style: PathStyle::Simple,
    }
}

pub fn query_parameter(
    name: &str,
    description: Option<&str>,
    required: bool,
    schema: Schema,
) -> Parameter {
    Parameter::Query {
        parameter_data: parameter_data(name, description, required, schema),
        allow_reserved: false,
        style: QueryStyle::Form,
        allow_empty_value: None,
    }
}

pub fn response_header(description: &str, schema: Schema) -> Header {
    Header {
        description: Some(description.to_string()),
        style: HeaderStyle::Simple,
        required: false,
        deprecated: None,
        format: ParameterSchemaOrContent::Schema(ReferenceOr::Item(schema)),
        example: None,
        examples: IndexMap::new(),
        extensions: IndexMap::new(),
    }
}
