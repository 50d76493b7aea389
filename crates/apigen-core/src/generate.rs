//! The generation driver: documents in, one source file per operation out.
//!
//! A run renders everything in memory before touching the output directory's
//! contents. The first error anywhere aborts the whole run; no file of a run that
//! failed during rendering is written.

// Internal imports (std, crate)
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::binding::OperationBinding;
use crate::config::Config;
use crate::emit::{CodeEmitter, EmitOptions};
use crate::format::{PrettyPleaseFormatter, SourceFormatter};
use crate::openapi::OpenApiContext;
use crate::templates::{single_line, ModuleIndexContext, TemplateRenderer};
use crate::{Error, Result};

// External imports (alphabetized)
use serde::Serialize;
use tokio::fs;

/// Name of the module index written next to the generated modules.
pub const MODULE_INDEX_FILE: &str = "mod.rs";

/// One formatted source file ready to be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedUnit {
    /// Operation prefix; empty for the helper and index units
    pub prefix: String,
    /// Module name, also the file stem
    pub module: String,
    /// `GET /pets` style label; empty for the helper and index units
    pub operation: String,
    pub source: String,
}

impl GeneratedUnit {
    pub fn file_name(&self) -> String {
        if self.module == "mod" {
            MODULE_INDEX_FILE.to_string()
        } else {
            format!("{}.rs", self.module)
        }
    }

    fn label(&self) -> &str {
        if self.operation.is_empty() {
            "the runtime helper"
        } else {
            &self.operation
        }
    }
}

/// What a finished run wrote.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub documents: usize,
    pub operations: usize,
    pub files: Vec<PathBuf>,
}

/// Render every operation of one document, in document order.
pub fn render_document(
    context: &OpenApiContext,
    emitter: &CodeEmitter<'_>,
) -> Result<Vec<GeneratedUnit>> {
    let title = context.title().unwrap_or_default();
    let operations = context.operations()?;
    log::info!("operations: {}", operations.len());

    let mut units = Vec::with_capacity(operations.len());
    for op in &operations {
        log::debug!("path: {} {}", op.method.to_uppercase(), op.path);
        let binding = OperationBinding::build(title, op)?;
        if let Ok(summary) = serde_json::to_string(&binding.summary()) {
            log::trace!("binding: {}", summary);
        }
        let source = emitter.emit(title, &binding)?;
        units.push(GeneratedUnit {
            module: binding.module_name(),
            operation: format!("{} {}", op.method.to_uppercase(), op.path),
            prefix: binding.prefix,
            source,
        });
    }
    Ok(units)
}

/// Render the units of a whole run: all documents, the helper and the module index.
pub fn render_run(
    config: &Config,
    documents: &[OpenApiContext],
    formatter: &dyn SourceFormatter,
) -> Result<Vec<GeneratedUnit>> {
    let templates = TemplateRenderer::new()?;
    let options = EmitOptions {
        helper_module: config.helper_module.clone(),
    };
    let emitter = CodeEmitter::new(formatter, &templates, &options);

    let mut units = vec![GeneratedUnit {
        prefix: String::new(),
        module: config.helper_module.clone(),
        operation: String::new(),
        source: emitter.emit_helper()?,
    }];

    for document in documents {
        units.extend(render_document(document, &emitter)?);
    }
    check_module_collisions(&units)?;

    if config.emit_mod_file {
        let modules: BTreeSet<String> = units
            .iter()
            .filter(|unit| !unit.prefix.is_empty())
            .map(|unit| unit.module.clone())
            .collect();
        let titles = documents
            .iter()
            .filter_map(|d| d.title())
            .map(single_line)
            .collect();
        let index = templates.render_module_index(&ModuleIndexContext {
            titles,
            helper_module: &config.helper_module,
            modules: modules.into_iter().collect(),
        })?;
        let source = formatter.format(&index).map_err(|message| Error::Format {
            source_text: index.clone(),
            message,
        })?;
        units.push(GeneratedUnit {
            prefix: String::new(),
            module: "mod".to_string(),
            operation: String::new(),
            source,
        });
    }

    Ok(units)
}

/// Fail when two units mangle to the same module, which would overwrite a file.
pub fn check_module_collisions(units: &[GeneratedUnit]) -> Result<()> {
    for (i, unit) in units.iter().enumerate() {
        if let Some(earlier) = units[..i].iter().find(|u| u.module == unit.module) {
            return Err(Error::ModuleCollision {
                module: unit.module.clone(),
                first: earlier.label().to_string(),
                second: unit.label().to_string(),
            });
        }
    }
    Ok(())
}

/// Run a full generation with the default formatter.
pub async fn generate(config: &Config) -> Result<GenerationReport> {
    generate_with_formatter(config, &PrettyPleaseFormatter).await
}

/// Run a full generation: prepare the output directory, load documents, render,
/// then write every unit.
pub async fn generate_with_formatter(
    config: &Config,
    formatter: &dyn SourceFormatter,
) -> Result<GenerationReport> {
    config.validate()?;
    let output_dir = PathBuf::from(&config.output_dir);
    prepare_output_dir(&output_dir, config.clean_output).await?;

    let mut documents = Vec::new();
    for location in config.document_paths() {
        log::info!("source: {}", location);
        documents.push(OpenApiContext::from_file_or_url(location).await?);
    }
    if documents.is_empty() {
        return Err(Error::config("no input document has a supported extension"));
    }

    let units = render_run(config, &documents, formatter)?;

    let mut report = GenerationReport {
        output_dir: output_dir.clone(),
        documents: documents.len(),
        operations: units.iter().filter(|u| !u.prefix.is_empty()).count(),
        files: Vec::with_capacity(units.len()),
    };
    for unit in &units {
        let path = output_dir.join(unit.file_name());
        fs::write(&path, &unit.source).await?;
        log::info!("saved to: {}", path.display());
        report.files.push(path);
    }

    Ok(report)
}

/// Delete (when `clean` is set) and recreate the output directory.
pub async fn prepare_output_dir(dir: &Path, clean: bool) -> Result<()> {
    if clean {
        match fs::remove_dir_all(dir).await {
            Ok(()) => log::debug!("Removed output directory: {}", dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::directory(dir, e)),
        }
    }
    fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::directory(dir, e))
}
