//! Tera templates for the fixed parts of generated files.
//!
//! The templates are compiled into the library so generation never depends on
//! files next to the binary.

use serde::Serialize;
use tera::{Context, Tera};

use crate::Result;

const UNIT_PREAMBLE: &str = "unit_preamble.rs.tera";
const MODULE_INDEX: &str = "module_index.rs.tera";

/// Context for the header of one operation's source unit.
#[derive(Debug, Clone, Serialize)]
pub struct PreambleContext<'a> {
    pub title: String,
    pub method: &'a str,
    pub path: &'a str,
    pub helper_module: &'a str,
    pub has_headers: bool,
    pub has_query: bool,
    pub has_accessors: bool,
}

/// Context for the `mod.rs` that declares every generated module.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleIndexContext<'a> {
    pub titles: Vec<String>,
    pub helper_module: &'a str,
    pub modules: Vec<String>,
}

/// Renders the embedded templates
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                UNIT_PREAMBLE,
                include_str!("../../templates/unit_preamble.rs.tera"),
            ),
            (
                MODULE_INDEX,
                include_str!("../../templates/module_index.rs.tera"),
            ),
        ])?;
        Ok(Self { tera })
    }

    pub fn render_preamble(&self, context: &PreambleContext<'_>) -> Result<String> {
        self.render(UNIT_PREAMBLE, context)
    }

    pub fn render_module_index(&self, context: &ModuleIndexContext<'_>) -> Result<String> {
        self.render(MODULE_INDEX, context)
    }

    fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        let context = Context::from_serialize(context)?;
        log::debug!("Rendering template: {}", template_name);
        Ok(self.tera.render(template_name, &context)?)
    }
}

/// Collapse a free-form title onto one line so it can sit inside a doc comment.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_imports_follow_sections() {
        let renderer = TemplateRenderer::new().unwrap();
        let out = renderer
            .render_preamble(&PreambleContext {
                title: "Pet Store".into(),
                method: "get",
                path: "/pets",
                helper_module: "apigen_utils",
                has_headers: false,
                has_query: true,
                has_accessors: true,
            })
            .unwrap();
        assert!(out.starts_with("//! Request bindings for `GET /pets` of Pet Store."));
        assert!(out.contains("use std::collections::HashMap;"));
        assert!(!out.contains("HeaderMap"));
        assert!(out.contains("use super::apigen_utils as utils;"));
    }

    #[test]
    fn test_preamble_without_accessors() {
        let renderer = TemplateRenderer::new().unwrap();
        let out = renderer
            .render_preamble(&PreambleContext {
                title: String::new(),
                method: "delete",
                path: "/pets/{id}",
                helper_module: "apigen_utils",
                has_headers: false,
                has_query: false,
                has_accessors: false,
            })
            .unwrap();
        assert!(out.starts_with("//! Request bindings for `DELETE /pets/{id}`."));
        assert!(!out.contains("as utils"));
    }

    #[test]
    fn test_module_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let out = renderer
            .render_module_index(&ModuleIndexContext {
                titles: vec!["Pet Store".into()],
                helper_module: "apigen_utils",
                modules: vec!["pet_store_pets_get".into(), "pet_store_pets_post".into()],
            })
            .unwrap();
        assert!(out.contains("pub mod apigen_utils;\n"));
        assert!(out.contains("pub mod pet_store_pets_get;\npub mod pet_store_pets_post;\n"));
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("  Pet\n  Store  API "), "Pet Store API");
    }
}
