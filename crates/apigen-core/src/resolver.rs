//! Schema to field-tree resolution.

use std::fmt;

use crate::field::{is_primitive, translate_type, Field, FieldType, JSON_VALUE_TYPE};
use crate::naming::dedupe_names;
use crate::openapi::Schema;

/// Top-level shape of a body schema, taken from its declared type before recursing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeTag {
    Empty,
    Object,
    Array,
    Other(String),
}

impl ShapeTag {
    pub fn of(schema: &Schema) -> Self {
        match schema.primary_type() {
            None => Self::Empty,
            Some("object") => Self::Object,
            Some("array") => Self::Array,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Object => f.write_str("object"),
            Self::Array => f.write_str("array"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Resolve a root schema into its ordered fields.
///
/// An object root yields one field per property, sorted by key, with `required`
/// taken from membership in `required_names`. An array root yields a single
/// unnamed, required field holding the list type. Any other root yields nothing.
pub fn resolve_schema(schema: &Schema, required_names: &[String]) -> Vec<Field> {
    match schema.primary_type() {
        Some("object") => resolve_properties(schema, required_names),
        Some("array") => vec![Field::array_root(resolve_type(schema))],
        _ => Vec::new(),
    }
}

/// Resolve one named property of a parent schema.
pub fn resolve_field(key: &str, schema: &Schema, required_names: &[String]) -> Field {
    Field::new(
        key,
        resolve_type(schema),
        required_names.iter().any(|name| name == key),
    )
}

fn resolve_properties(schema: &Schema, required_names: &[String]) -> Vec<Field> {
    let mut keys: Vec<&String> = schema.properties.keys().collect();
    keys.sort();

    let mut fields: Vec<Field> = keys
        .into_iter()
        .map(|key| resolve_field(key, &schema.properties[key], required_names))
        .collect();
    dedupe_names(&mut fields);
    fields
}

/// Resolve the type of a schema node, recursing into properties and items.
pub fn resolve_type(schema: &Schema) -> FieldType {
    match schema.primary_type() {
        Some("object") if !schema.properties.is_empty() => {
            FieldType::Object(resolve_properties(schema, &schema.required))
        }
        Some("array") => {
            let item = schema
                .items
                .as_deref()
                .map(resolve_type)
                .unwrap_or_else(|| FieldType::scalar(JSON_VALUE_TYPE));
            FieldType::list(item)
        }
        Some(name) if is_primitive(name) => FieldType::Scalar(translate_type(name)),
        _ => FieldType::scalar(JSON_VALUE_TYPE),
    }
}
