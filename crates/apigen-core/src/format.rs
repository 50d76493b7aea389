//! Formatting pass applied to every emitted source unit.

/// Turns emitted text into canonical source, or explains why it cannot.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, String>;
}

/// Parses with `syn` and prints with `prettyplease`.
///
/// Parsing doubles as validation: text that is not a well-formed Rust file is
/// rejected with the parser's message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyPleaseFormatter;

impl SourceFormatter for PrettyPleaseFormatter {
    fn format(&self, source: &str) -> Result<String, String> {
        let file = syn::parse_file(source).map_err(|e| e.to_string())?;
        Ok(prettyplease::unparse(&file))
    }
}

/// Returns the text untouched. Useful when inspecting raw emitter output.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFormatter;

impl SourceFormatter for IdentityFormatter {
    fn format(&self, source: &str) -> Result<String, String> {
        Ok(source.to_string())
    }
}
