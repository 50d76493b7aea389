//! The typed field model every schema is resolved into.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming::to_identifier;

/// Target type used for schemas with no usable declared type.
pub const JSON_VALUE_TYPE: &str = "serde_json::Value";

/// Resolved type of a [`Field`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum FieldType {
    /// A translated scalar, e.g. `i64` or `String`
    Scalar(String),
    /// An inline composite; the vector holds its members
    Object(Vec<Field>),
    /// A list of the boxed item type. Never carries members of its own.
    List(Box<FieldType>),
}

impl FieldType {
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::Scalar(name.into())
    }

    pub fn list(item: FieldType) -> Self {
        Self::List(Box::new(item))
    }

    /// Whether two types describe the same shape for merge purposes.
    ///
    /// A top-level composite compares by kind only. List items are compared
    /// structurally, so two lists of composites agree only when their items have
    /// the same keys with the same types all the way down.
    pub fn same_shape(&self, other: &FieldType) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Object(_), Self::Object(_)) => true,
            (Self::List(a), Self::List(b)) => a.same_structure(b),
            _ => false,
        }
    }

    /// Structural equality: scalars by name, composites by member keys and types.
    pub fn same_structure(&self, other: &FieldType) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|member| {
                        b.iter()
                            .find(|m| m.source_key == member.source_key)
                            .is_some_and(|m| member.ty.same_structure(&m.ty))
                    })
            }
            (Self::List(a), Self::List(b)) => a.same_structure(b),
            _ => false,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(name) => f.write_str(name),
            Self::Object(members) if members.is_empty() => f.write_str("object"),
            Self::Object(members) => {
                f.write_str("object {")?;
                for (i, member) in members.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{}: {}", member.source_key, member.ty)?;
                }
                f.write_str(" }")
            }
            Self::List(item) => write!(f, "Vec<{item}>"),
        }
    }
}

/// A resolved, typed, named node of a schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Exported identifier; empty for the array-root field and for an empty key
    pub name: String,
    /// Property or parameter name exactly as written in the schema
    pub source_key: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub required: bool,
    /// Set only on the single field standing for an array-root body
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub array_root: bool,
}

impl Field {
    /// A named member, identified by its schema key.
    pub fn new(key: &str, ty: FieldType, required: bool) -> Self {
        Self {
            name: to_identifier(key),
            source_key: key.to_string(),
            ty,
            required,
            array_root: false,
        }
    }

    /// The unnamed, required field holding the list type of an array-root body.
    pub fn array_root(ty: FieldType) -> Self {
        Self {
            name: String::new(),
            source_key: String::new(),
            ty,
            required: true,
            array_root: true,
        }
    }

    /// Members of an inline composite, empty for every other type.
    pub fn children(&self) -> &[Field] {
        match &self.ty {
            FieldType::Object(children) => children,
            _ => &[],
        }
    }

    /// True for the single unnamed field produced by an array-root schema.
    pub fn is_array_root(&self) -> bool {
        self.array_root
    }
}

/// Translate a schema primitive type name to its Rust counterpart.
///
/// Names that are not schema primitives pass through unchanged, which makes the
/// function the identity on its own outputs.
pub fn translate_type(name: &str) -> String {
    match name {
        "integer" => "i64",
        "number" => "f64",
        "boolean" => "bool",
        "string" => "String",
        other => other,
    }
    .to_string()
}

/// Whether `name` is one of the schema primitive type names.
pub fn is_primitive(name: &str) -> bool {
    matches!(name, "integer" | "number" | "boolean" | "string")
}
