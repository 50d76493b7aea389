//! Rendering of operation bindings into formatted Rust source.
//!
//! A unit is assembled in a fixed order: preamble, then header declaration and
//! accessor, query declaration and accessor, body declaration and accessor, and
//! finally the response declaration. Empty sections are left out. The assembled
//! text is handed to a [`SourceFormatter`]; if formatting fails the raw text is
//! returned inside the error.

pub mod accessors;
pub mod declarations;

use crate::binding::OperationBinding;
use crate::format::SourceFormatter;
use crate::templates::{single_line, PreambleContext, TemplateRenderer};
use crate::{Error, Result};

use self::accessors::{render_body_accessor, render_param_accessor, ParamSource};
use self::declarations::{render_declaration, TypeNames};

/// Default module name of the shared runtime helper.
pub const DEFAULT_HELPER_MODULE: &str = "apigen_utils";

/// Source of the shared runtime helper, written once per run.
pub const HELPER_SOURCE: &str = include_str!("../runtime.rs");

#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Module the generated accessors import their helpers from
    pub helper_module: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            helper_module: DEFAULT_HELPER_MODULE.to_string(),
        }
    }
}

/// Turns [`OperationBinding`]s into formatted source units.
pub struct CodeEmitter<'a> {
    formatter: &'a dyn SourceFormatter,
    templates: &'a TemplateRenderer,
    options: &'a EmitOptions,
}

impl<'a> CodeEmitter<'a> {
    pub fn new(
        formatter: &'a dyn SourceFormatter,
        templates: &'a TemplateRenderer,
        options: &'a EmitOptions,
    ) -> Self {
        Self {
            formatter,
            templates,
            options,
        }
    }

    /// Emit and format the unit for one operation.
    pub fn emit(&self, title: &str, binding: &OperationBinding) -> Result<String> {
        let raw = self.assemble(title, binding)?;
        self.format(raw)
    }

    /// Format the shared runtime helper.
    pub fn emit_helper(&self) -> Result<String> {
        self.format(HELPER_SOURCE.to_string())
    }

    /// Build the unformatted text of an operation's unit.
    pub fn assemble(&self, title: &str, binding: &OperationBinding) -> Result<String> {
        let mut out = self.templates.render_preamble(&PreambleContext {
            title: single_line(title),
            method: &binding.method,
            path: &binding.path,
            helper_module: &self.options.helper_module,
            has_headers: !binding.header_fields.is_empty(),
            has_query: !binding.query_fields.is_empty(),
            has_accessors: binding.has_accessors(),
        })?;

        let module = binding.module_name();
        let mut names = TypeNames::default();
        let headers_type = names.claim(&binding.headers_type());
        let query_type = names.claim(&binding.query_type());
        let body_type = names.claim(&binding.body_type());
        let response_type = names.claim(&binding.response_type());

        for (source, type_name, fields) in [
            (ParamSource::Header, &headers_type, &binding.header_fields),
            (ParamSource::Query, &query_type, &binding.query_fields),
        ] {
            if fields.is_empty() {
                continue;
            }
            let suffix = match source {
                ParamSource::Header => "headers",
                ParamSource::Query => "query",
            };
            log::debug!(
                "{}: {} {:?} field(s)",
                binding.prefix,
                fields.len(),
                source.kind()
            );
            out.push_str(&render_declaration(type_name, fields, &mut names));
            out.push_str(&render_param_accessor(
                source,
                &format!("get_{module}_{suffix}"),
                type_name,
                fields,
            ));
        }

        if !binding.body_fields.is_empty() {
            out.push_str(&render_declaration(&body_type, &binding.body_fields, &mut names));
            out.push_str(&render_body_accessor(&format!("get_{module}_body"), &body_type));
        }

        if !binding.response_fields.is_empty() {
            out.push_str(&render_declaration(
                &response_type,
                &binding.response_fields,
                &mut names,
            ));
        }

        Ok(out)
    }

    fn format(&self, raw: String) -> Result<String> {
        match self.formatter.format(&raw) {
            Ok(formatted) => Ok(formatted),
            Err(message) => Err(Error::Format {
                source_text: raw,
                message,
            }),
        }
    }
}
