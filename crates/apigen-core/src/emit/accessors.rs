//! Accessor functions that pull typed values out of a request.
//!
//! Header and query accessors read each parameter as text, enforce presence of
//! required ones and parse the scalar. Body accessors hand the payload to the
//! shared `parse_body` helper. Fields are visited in declaration order, not the
//! sorted order used for the struct itself.

use std::fmt::Write as _;

use crate::field::{Field, FieldType};
use crate::naming::to_field_ident;
use crate::parameters::ParameterKind;

/// Where a parameter accessor reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    Header,
    Query,
}

impl ParamSource {
    pub fn kind(self) -> ParameterKind {
        match self {
            Self::Header => ParameterKind::Header,
            Self::Query => ParameterKind::Query,
        }
    }

    fn argument(self) -> &'static str {
        match self {
            Self::Header => "headers: &HeaderMap",
            Self::Query => "query: &HashMap<String, String>",
        }
    }

    fn location(self) -> &'static str {
        match self {
            Self::Header => "utils::ParamLocation::Header",
            Self::Query => "utils::ParamLocation::Query",
        }
    }

    fn lookup(self, key: &str) -> String {
        match self {
            Self::Header => format!(
                "utils::text_value(headers.get({key:?}).map(|value| value.to_str()), {key:?}, {})?",
                self.location()
            ),
            Self::Query => format!("query.get({key:?}).map(String::as_str).unwrap_or_default()"),
        }
    }
}

/// Render a header or query accessor for `struct_name`.
pub fn render_param_accessor(
    source: ParamSource,
    fn_name: &str,
    struct_name: &str,
    fields: &[Field],
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\npub fn {fn_name}({}) -> Result<{struct_name}, utils::ParamError> {{",
        source.argument()
    );
    let _ = writeln!(out, "    let mut data = {struct_name}::default();");

    for field in fields {
        let key = &field.source_key;
        let ident = to_field_ident(&field.name);
        let location = source.location();
        let value = parse_expr(field, location);

        let _ = writeln!(out, "\n    let raw = {};", source.lookup(key));
        if field.required {
            let _ = writeln!(out, "    utils::require(raw, {key:?}, {location})?;");
            let _ = writeln!(out, "    data.{ident} = {value};");
        } else {
            let _ = writeln!(out, "    if !raw.is_empty() {{");
            let _ = writeln!(out, "        data.{ident} = Some({value});");
            let _ = writeln!(out, "    }}");
        }
    }

    out.push_str("\n    Ok(data)\n}\n");
    out
}

fn parse_expr(field: &Field, location: &str) -> String {
    let key = &field.source_key;
    match &field.ty {
        FieldType::Scalar(ty) if ty == "bool" => {
            format!("utils::parse_bool(raw, {key:?}, {location})?")
        }
        FieldType::Scalar(ty) if ty == "i64" => {
            format!("utils::parse_int(raw, {key:?}, {location})?")
        }
        FieldType::Scalar(ty) if ty == "f64" => {
            format!("utils::parse_float(raw, {key:?}, {location})?")
        }
        _ => "raw.to_string()".to_string(),
    }
}

/// Render a body accessor; decode failures are returned to the caller as-is.
pub fn render_body_accessor(fn_name: &str, type_name: &str) -> String {
    format!(
        "\npub fn {fn_name}(payload: &[u8]) -> Result<{type_name}, serde_json::Error> {{\n    utils::parse_body(payload)\n}}\n"
    )
}
