//! Struct and alias declarations for resolved fields.

use std::fmt::Write as _;

use crate::field::{Field, FieldType};
use crate::naming::to_field_ident;

const DERIVES: &str = "#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]";

/// Type names already used in one source unit.
///
/// Nested structs are named after their owner and field, so two different paths can
/// produce the same name (`tags` items vs. a `tags_item` object). Later claims get a
/// numeric suffix.
#[derive(Debug, Default)]
pub struct TypeNames {
    used: Vec<String>,
}

impl TypeNames {
    pub fn claim(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut n = 2;
        while self.used.contains(&name) {
            name = format!("{base}{n}");
            n += 1;
        }
        self.used.push(name.clone());
        name
    }
}

/// A composite that still has to be written out as its own struct.
struct PendingStruct<'a> {
    name: String,
    fields: &'a [Field],
}

/// Render the declaration of `type_name` for a field list.
///
/// A single unnamed field (an array-root body) becomes a type alias; anything else
/// becomes a struct. Nested composites follow their owner, depth first.
pub fn render_declaration(type_name: &str, fields: &[Field], names: &mut TypeNames) -> String {
    let mut out = String::new();
    let mut pending = Vec::new();

    match fields {
        [root] if root.is_array_root() => {
            let ty = type_expr(type_name, &root.ty, names, &mut pending);
            let _ = writeln!(out, "\npub type {type_name} = {ty};");
        }
        _ => render_struct(type_name, fields, names, &mut pending, &mut out),
    }

    drain_pending(pending, names, &mut out);
    out
}

fn drain_pending(pending: Vec<PendingStruct<'_>>, names: &mut TypeNames, out: &mut String) {
    for nested in pending {
        let mut inner = Vec::new();
        render_struct(&nested.name, nested.fields, names, &mut inner, out);
        drain_pending(inner, names, out);
    }
}

fn render_struct<'a>(
    name: &str,
    fields: &'a [Field],
    names: &mut TypeNames,
    pending: &mut Vec<PendingStruct<'a>>,
    out: &mut String,
) {
    let mut sorted: Vec<&Field> = fields.iter().collect();
    sorted.sort_by(|a, b| a.source_key.cmp(&b.source_key));

    let _ = writeln!(out, "\n{DERIVES}\npub struct {name} {{");
    for field in sorted {
        let base = type_expr(&format!("{name}{}", field.name), &field.ty, names, pending);
        let _ = writeln!(out, "    {}", serde_attribute(field));
        if field.required {
            let _ = writeln!(out, "    pub {}: {base},", to_field_ident(&field.name));
        } else {
            let _ = writeln!(out, "    pub {}: Option<{base}>,", to_field_ident(&field.name));
        }
    }
    out.push_str("}\n");
}

fn type_expr<'a>(
    owner: &str,
    ty: &'a FieldType,
    names: &mut TypeNames,
    pending: &mut Vec<PendingStruct<'a>>,
) -> String {
    match ty {
        FieldType::Scalar(name) => name.clone(),
        FieldType::Object(children) => {
            let name = names.claim(owner);
            pending.push(PendingStruct {
                name: name.clone(),
                fields: children,
            });
            name
        }
        FieldType::List(item) => {
            format!("Vec<{}>", type_expr(&format!("{owner}Item"), item, names, pending))
        }
    }
}

/// The `#[serde(...)]` line for a struct member.
pub fn serde_attribute(field: &Field) -> String {
    if field.required {
        format!("#[serde(rename = {:?})]", field.source_key)
    } else {
        format!(
            "#[serde(rename = {:?}, default, skip_serializing_if = \"Option::is_none\")]",
            field.source_key
        )
    }
}
