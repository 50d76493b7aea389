//! Apigen Core Library
//!
//! This library turns OpenAPI 3 documents into typed Rust request bindings for
//! axum services: one module per operation with header, query, body and response
//! types, accessor functions, and a shared runtime helper module.

pub mod binding;
pub mod config;
pub mod emit;
pub mod error;
pub mod field;
pub mod format;
pub mod generate;
pub mod merge;
pub mod naming;
pub mod openapi;
pub mod parameters;
pub mod resolver;
pub mod runtime;
pub mod templates;

pub use crate::{
    binding::OperationBinding,
    config::Config,
    emit::{CodeEmitter, EmitOptions},
    error::{Error, Result},
    field::{Field, FieldType},
    format::{PrettyPleaseFormatter, SourceFormatter},
    generate::{generate, generate_with_formatter, GenerationReport},
    openapi::OpenApiContext,
};
