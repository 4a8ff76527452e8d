//! Declarative payload descriptors.
//!
//! A [`Schema`] describes one value (string, integer, boolean, array or
//! object) together with its constraints, default, optionality and
//! documentation metadata. The same descriptor is consumed twice:
//!
//! - [`validate`] checks a raw JSON value against it, normalizes it (trims,
//!   applies defaults, coerces query-string literals) and reports *every*
//!   problem found as an [`Issue`](crate::error::Issue).
//! - [`json_schema`] renders it as an OpenAPI 3.0 schema object.

pub mod json_schema;
pub mod validate;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Uuid,
}

impl StringFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StringFormat::Uuid => "uuid",
        }
    }
}

#[derive(Debug, Clone)]
pub enum SchemaKind {
    String {
        /// Strip surrounding whitespace before checking constraints.
        trim: bool,
        min_length: Option<usize>,
        format: Option<StringFormat>,
    },
    Integer {
        minimum: Option<i64>,
        /// When set, `minimum` itself is not allowed.
        exclusive_minimum: bool,
    },
    Boolean,
    Array(Box<Schema>),
    Object(ObjectSchema),
}

#[derive(Debug, Clone)]
pub struct Schema {
    kind: SchemaKind,
    optional: bool,
    default: Option<Value>,
    /// Accept string renderings of non-string values (`"42"`, `"true"`).
    coerce: bool,
    description: Option<String>,
    example: Option<Value>,
}

impl Schema {
    fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            optional: false,
            default: None,
            coerce: false,
            description: None,
            example: None,
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaKind::String {
            trim: false,
            min_length: None,
            format: None,
        })
    }

    pub fn integer() -> Self {
        Self::of(SchemaKind::Integer {
            minimum: None,
            exclusive_minimum: false,
        })
    }

    pub fn boolean() -> Self {
        Self::of(SchemaKind::Boolean)
    }

    pub fn array(items: Schema) -> Self {
        Self::of(SchemaKind::Array(Box::new(items)))
    }

    pub fn object(object: ObjectSchema) -> Self {
        Self::of(SchemaKind::Object(object))
    }

    pub fn trim(mut self) -> Self {
        if let SchemaKind::String { trim, .. } = &mut self.kind {
            *trim = true;
        }
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        if let SchemaKind::String { min_length, .. } = &mut self.kind {
            *min_length = Some(length);
        }
        self
    }

    pub fn uuid(mut self) -> Self {
        if let SchemaKind::String { format, .. } = &mut self.kind {
            *format = Some(StringFormat::Uuid);
        }
        self
    }

    /// Inclusive lower bound.
    pub fn minimum(mut self, value: i64) -> Self {
        if let SchemaKind::Integer {
            minimum,
            exclusive_minimum,
        } = &mut self.kind
        {
            *minimum = Some(value);
            *exclusive_minimum = false;
        }
        self
    }

    /// Strictly greater than zero.
    pub fn positive(mut self) -> Self {
        if let SchemaKind::Integer {
            minimum,
            exclusive_minimum,
        } = &mut self.kind
        {
            *minimum = Some(0);
            *exclusive_minimum = true;
        }
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Value substituted when the field is absent. Implies the field is not
    /// required.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Whether a value must be supplied by the caller.
    pub fn is_required(&self) -> bool {
        !self.optional && self.default.is_none()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn example_value(&self) -> Option<&Value> {
        self.example.as_ref()
    }
}

/// Ordered set of named fields.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<(String, Schema)>,
    strict: bool,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push((name.into(), schema));
        self
    }

    /// Reject keys that are not declared as fields.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_makes_field_not_required() {
        assert!(Schema::integer().is_required());
        assert!(!Schema::integer().default_value(0).is_required());
        assert!(!Schema::string().optional().is_required());
    }

    #[test]
    fn string_modifiers_ignore_other_kinds() {
        let schema = Schema::integer().trim().min_length(3);
        assert!(matches!(
            schema.kind(),
            SchemaKind::Integer {
                minimum: None,
                exclusive_minimum: false
            }
        ));
    }

    #[test]
    fn fields_keep_declaration_order() {
        let object = ObjectSchema::new()
            .field("b", Schema::string())
            .field("a", Schema::string());
        let names: Vec<_> = object.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
