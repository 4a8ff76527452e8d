//! Renders descriptors as OpenAPI 3.0 schema objects.

use serde_json::{Map, Value};

use super::{ObjectSchema, Schema, SchemaKind};

impl Schema {
    /// Schema object for this value. Field descriptions are attached by the
    /// enclosing object (or parameter), not here.
    pub fn json_schema(&self) -> Value {
        let mut out = match &self.kind {
            SchemaKind::String {
                min_length, format, ..
            } => {
                let mut out = typed("string");
                if let Some(min) = min_length {
                    out.insert("minLength".into(), Value::from(*min));
                }
                if let Some(format) = format {
                    out.insert("format".into(), Value::from(format.as_str()));
                }
                out
            }
            SchemaKind::Integer {
                minimum,
                exclusive_minimum,
            } => {
                let mut out = typed("integer");
                if let Some(min) = minimum {
                    out.insert("minimum".into(), Value::from(*min));
                    if *exclusive_minimum {
                        out.insert("exclusiveMinimum".into(), Value::Bool(true));
                    }
                }
                out
            }
            SchemaKind::Boolean => typed("boolean"),
            SchemaKind::Array(items) => {
                let mut out = typed("array");
                out.insert("items".into(), items.json_schema());
                out
            }
            SchemaKind::Object(object) => object.schema_map(),
        };

        if let Some(default) = &self.default {
            out.insert("default".into(), default.clone());
        }
        if let Some(example) = &self.example {
            out.insert("example".into(), example.clone());
        }
        Value::Object(out)
    }
}

impl ObjectSchema {
    pub fn json_schema(&self) -> Value {
        Value::Object(self.schema_map())
    }

    fn schema_map(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for (name, schema) in &self.fields {
            let mut property = schema.json_schema();
            if let (Some(text), Value::Object(map)) = (&schema.description, &mut property) {
                map.insert("description".into(), Value::from(text.as_str()));
            }
            properties.insert(name.clone(), property);
            if schema.is_required() {
                required.push(Value::from(name.as_str()));
            }
        }

        let mut out = typed("object");
        out.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            out.insert("required".into(), Value::Array(required));
        }
        if self.strict {
            out.insert("additionalProperties".into(), Value::Bool(false));
        }
        out
    }
}

fn typed(name: &str) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("type".into(), Value::from(name));
    out
}
