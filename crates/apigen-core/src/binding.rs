//! Per-operation bindings: everything the emitter needs for one operation.

use serde::Serialize;

use crate::field::Field;
use crate::merge::{json_variants, merge_responses};
use crate::naming::{operation_prefix, to_snake_case};
use crate::openapi::OpenApiOperation;
use crate::parameters::classify_parameters;
use crate::resolver::{resolve_schema, ShapeTag};
use crate::Result;

/// Field sets and identifier prefix computed for one operation.
///
/// Built fresh for every operation and consumed right away by the emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationBinding {
    pub prefix: String,
    pub method: String,
    pub path: String,
    pub header_fields: Vec<Field>,
    pub query_fields: Vec<Field>,
    pub body_fields: Vec<Field>,
    pub response_fields: Vec<Field>,
    pub response_shape: ShapeTag,
}

impl OperationBinding {
    /// Resolve parameters, request body and responses of `op`.
    pub fn build(title: &str, op: &OpenApiOperation) -> Result<Self> {
        let prefix = operation_prefix(title, &op.path, &op.method);
        let parameters = classify_parameters(&op.parameters);

        let body_fields = op
            .json_request_schema()
            .map(|schema| resolve_schema(schema, &schema.required))
            .unwrap_or_default();

        let merged = merge_responses(&prefix, &json_variants(&op.responses))?;

        Ok(Self {
            prefix,
            method: op.method.clone(),
            path: op.path.clone(),
            header_fields: parameters.header,
            query_fields: parameters.query,
            body_fields,
            response_fields: merged.fields,
            response_shape: merged.shape,
        })
    }

    /// Snake-cased prefix, used for the module file and accessor names.
    pub fn module_name(&self) -> String {
        to_snake_case(&self.prefix)
    }

    pub fn headers_type(&self) -> String {
        format!("{}Headers", self.prefix)
    }

    pub fn query_type(&self) -> String {
        format!("{}Query", self.prefix)
    }

    pub fn body_type(&self) -> String {
        format!("{}Body", self.prefix)
    }

    pub fn response_type(&self) -> String {
        format!("{}Response", self.prefix)
    }

    pub fn has_accessors(&self) -> bool {
        !self.header_fields.is_empty() || !self.query_fields.is_empty() || !self.body_fields.is_empty()
    }

    /// Counts logged after each operation is built.
    pub fn summary(&self) -> BindingSummary<'_> {
        BindingSummary {
            prefix: &self.prefix,
            headers: self.header_fields.len(),
            query: self.query_fields.len(),
            body: self.body_fields.len(),
            response: self.response_fields.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BindingSummary<'a> {
    pub prefix: &'a str,
    pub headers: usize,
    pub query: usize,
    pub body: usize,
    pub response: usize,
}
