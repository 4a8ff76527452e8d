//! Checks raw JSON against a [`Schema`] and produces the normalized value.
//!
//! Validation never stops at the first problem: every field is visited and
//! all issues are returned together.

use std::borrow::Cow;

use serde_json::{Map, Number, Value};
use uuid::Uuid;

use super::{ObjectSchema, Schema, SchemaKind, StringFormat};
use crate::error::Issue;

impl ObjectSchema {
    /// Validate `input`, honouring this schema's own strictness.
    pub fn parse(&self, input: &Value) -> Result<Map<String, Value>, Vec<Issue>> {
        self.parse_with(input, self.strict)
    }

    /// Validate `input`, rejecting undeclared keys regardless of how the
    /// schema was declared.
    pub fn parse_strict(&self, input: &Value) -> Result<Map<String, Value>, Vec<Issue>> {
        self.parse_with(input, true)
    }

    fn parse_with(&self, input: &Value, strict: bool) -> Result<Map<String, Value>, Vec<Issue>> {
        let mut path = Vec::new();
        let mut issues = Vec::new();
        let parsed = self.check(input, strict, &mut path, &mut issues);
        match parsed {
            Some(map) if issues.is_empty() => Ok(map),
            _ => Err(issues),
        }
    }

    fn check(
        &self,
        input: &Value,
        strict: bool,
        path: &mut Vec<String>,
        issues: &mut Vec<Issue>,
    ) -> Option<Map<String, Value>> {
        let Value::Object(map) = input else {
            issues.push(Issue::new(path.clone(), type_mismatch("object", input)));
            return None;
        };

        let mut out = Map::new();
        for (name, schema) in &self.fields {
            path.push(name.clone());
            if let Some(value) = schema.check(map.get(name), path, issues) {
                out.insert(name.clone(), value);
            }
            path.pop();
        }

        if strict {
            let unknown: Vec<String> = map
                .keys()
                .filter(|key| !self.has_field(key))
                .map(|key| format!("'{key}'"))
                .collect();
            if !unknown.is_empty() {
                issues.push(Issue::new(
                    path.clone(),
                    format!("Unrecognized key(s) in object: {}", unknown.join(", ")),
                ));
            }
        }

        Some(out)
    }
}

impl Schema {
    /// Validate a single, possibly absent, value.
    ///
    /// Returns `Ok(None)` for an absent optional value without a default.
    pub fn parse(&self, input: Option<&Value>) -> Result<Option<Value>, Vec<Issue>> {
        let mut path = Vec::new();
        let mut issues = Vec::new();
        let parsed = self.check(input, &mut path, &mut issues);
        if issues.is_empty() {
            Ok(parsed)
        } else {
            Err(issues)
        }
    }

    fn check(
        &self,
        input: Option<&Value>,
        path: &mut Vec<String>,
        issues: &mut Vec<Issue>,
    ) -> Option<Value> {
        let Some(raw) = input else {
            if let Some(default) = &self.default {
                return Some(default.clone());
            }
            if !self.optional {
                issues.push(Issue::new(path.clone(), "Required"));
            }
            return None;
        };

        let value = if self.coerce {
            self.coerce_literal(raw)
        } else {
            Cow::Borrowed(raw)
        };

        match &self.kind {
            SchemaKind::String {
                trim,
                min_length,
                format,
            } => {
                let Some(text) = value.as_str() else {
                    issues.push(Issue::new(path.clone(), type_mismatch("string", &value)));
                    return None;
                };
                let text = if *trim { text.trim() } else { text };
                if let Some(min) = min_length {
                    if text.chars().count() < *min {
                        issues.push(Issue::new(
                            path.clone(),
                            format!("String must contain at least {min} character(s)"),
                        ));
                    }
                }
                if let Some(StringFormat::Uuid) = format {
                    if Uuid::parse_str(text).is_err() {
                        issues.push(Issue::new(path.clone(), "Invalid uuid"));
                    }
                }
                Some(Value::String(text.to_string()))
            }
            SchemaKind::Integer {
                minimum,
                exclusive_minimum,
            } => {
                let Value::Number(number) = value.as_ref() else {
                    issues.push(Issue::new(path.clone(), type_mismatch("number", &value)));
                    return None;
                };
                let Some(int) = as_integer(number) else {
                    issues.push(Issue::new(path.clone(), "Expected integer, received float"));
                    return None;
                };
                if let Some(min) = minimum {
                    if *exclusive_minimum && int <= *min {
                        issues.push(Issue::new(
                            path.clone(),
                            format!("Number must be greater than {min}"),
                        ));
                    } else if !*exclusive_minimum && int < *min {
                        issues.push(Issue::new(
                            path.clone(),
                            format!("Number must be greater than or equal to {min}"),
                        ));
                    }
                }
                Some(Value::from(int))
            }
            SchemaKind::Boolean => match value.as_ref() {
                Value::Bool(flag) => Some(Value::Bool(*flag)),
                other => {
                    issues.push(Issue::new(path.clone(), type_mismatch("boolean", other)));
                    None
                }
            },
            SchemaKind::Array(items) => {
                let Value::Array(elements) = value.as_ref() else {
                    issues.push(Issue::new(path.clone(), type_mismatch("array", &value)));
                    return None;
                };
                let mut out = Vec::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    path.push(index.to_string());
                    if let Some(parsed) = items.check(Some(element), path, issues) {
                        out.push(parsed);
                    }
                    path.pop();
                }
                Some(Value::Array(out))
            }
            SchemaKind::Object(object) => object
                .check(&value, object.strict, path, issues)
                .map(Value::Object),
        }
    }

    /// Convert query-string literals into the value type this schema expects.
    /// Anything that does not convert cleanly is passed through unchanged so
    /// the type check reports it.
    fn coerce_literal<'a>(&self, raw: &'a Value) -> Cow<'a, Value> {
        let Value::String(text) = raw else {
            return Cow::Borrowed(raw);
        };
        match self.kind {
            SchemaKind::Integer { .. } => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Cow::Owned(Value::from(0));
                }
                if let Ok(int) = trimmed.parse::<i64>() {
                    return Cow::Owned(Value::from(int));
                }
                match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
                    Some(number) => Cow::Owned(Value::Number(number)),
                    None => Cow::Borrowed(raw),
                }
            }
            SchemaKind::Boolean => match text.as_str() {
                "true" => Cow::Owned(Value::Bool(true)),
                "false" => Cow::Owned(Value::Bool(false)),
                _ => Cow::Borrowed(raw),
            },
            _ => Cow::Borrowed(raw),
        }
    }
}

fn as_integer(number: &Number) -> Option<i64> {
    if let Some(int) = number.as_i64() {
        return Some(int);
    }
    // Whole numbers outside the i64 range saturate.
    number
        .as_f64()
        .filter(|float| float.fract() == 0.0)
        .map(|float| float as i64)
}

fn type_mismatch(expected: &str, received: &Value) -> String {
    format!("Expected {expected}, received {}", type_name(received))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
