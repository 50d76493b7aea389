//! OpenAPI document loading and the typed view the generator works on.
//!
//! Documents are kept as raw JSON in [`OpenApiContext`]. Local `$ref`s are inlined
//! first, then the result is deserialized into the small typed model below, which
//! only carries what binding generation needs.
//!
//! # Examples
//!
//! ```no_run
//! use apigen_core::openapi::OpenApiContext;
//! use apigen_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let spec = OpenApiContext::from_file("openapi.yaml").await?;
//! for op in spec.operations()? {
//!     println!("{} {}", op.method, op.path);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::collections::BTreeMap;
use std::path::Path;

use crate::Error;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use tokio::fs;

/// Media type whose schemas take part in binding generation.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// HTTP verbs in the order they are visited within one path.
pub const METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Represents an OpenAPI specification
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct OpenApiContext {
    /// The raw JSON value of the OpenAPI spec
    pub json: JsonValue,
}

impl OpenApiContext {
    /// Wrap an already parsed document.
    pub fn new(json: JsonValue) -> Self {
        Self { json }
    }

    /// Load a document from a file or URL (supports both YAML and JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::from_url(location).await;
        }

        Self::from_file(location).await
    }

    /// Load a document from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::document(path.display().to_string(), e.to_string()))?;
        Self::parse_content(&content)
            .map_err(|e| Error::document(path.display().to_string(), e))
    }

    /// Load a document from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        let response = reqwest::get(url)
            .await
            .map_err(|e| Error::document(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::document(url, format!("HTTP {}", response.status())));
        }

        let content = response
            .text()
            .await
            .map_err(|e| Error::document(url, e.to_string()))?;

        Self::parse_content(&content).map_err(|e| Error::document(url, e))
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> Result<Self, String> {
        if let Ok(json) = serde_json::from_str(content) {
            return Ok(Self { json });
        }

        match serde_yaml::from_str(content) {
            Ok(json) => Ok(Self { json }),
            Err(e) => Err(format!("content is neither valid JSON nor YAML: {e}")),
        }
    }

    /// Get a reference to the raw JSON value
    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// Return a copy of the document with every local `$ref` replaced by its target.
    pub fn inline_refs(&self) -> crate::Result<JsonValue> {
        let mut active = Vec::new();
        inline_value(&self.json, &self.json, &mut active)
    }

    /// Deserialize the ref-free document into the typed model.
    pub fn document(&self) -> crate::Result<ApiDocument> {
        let inlined = self.inline_refs()?;
        serde_json::from_value(inlined).map_err(|e| {
            Error::document(self.title().unwrap_or("<untitled>"), e.to_string())
        })
    }

    /// All operations of the document in generation order.
    ///
    /// Paths are visited in lexicographic order and verbs in [`METHODS`] order.
    /// Path-item parameters are folded into each operation; an operation-level
    /// parameter with the same name and location wins.
    pub fn operations(&self) -> crate::Result<Vec<OpenApiOperation>> {
        let document = self.document()?;
        let mut operations = Vec::new();

        for (path, item) in &document.paths {
            for method in METHODS {
                let Some(operation) = item.operation(method) else {
                    continue;
                };

                let mut parameters = item.parameters.clone();
                for param in &operation.parameters {
                    match parameters
                        .iter_mut()
                        .find(|p| p.name == param.name && p.in_ == param.in_)
                    {
                        Some(existing) => *existing = param.clone(),
                        None => parameters.push(param.clone()),
                    }
                }

                operations.push(OpenApiOperation {
                    id: operation.operation_id.clone(),
                    path: path.clone(),
                    method: method.to_string(),
                    summary: operation.summary.clone(),
                    parameters,
                    request_body: operation.request_body.clone(),
                    responses: operation.responses.clone(),
                });
            }
        }

        Ok(operations)
    }
}

fn inline_value(
    root: &JsonValue,
    value: &JsonValue,
    active: &mut Vec<String>,
) -> crate::Result<JsonValue> {
    match value {
        JsonValue::Object(map) => {
            if let Some(reference) = map.get("$ref").and_then(JsonValue::as_str) {
                return inline_ref(root, reference, active);
            }
            let mut out = JsonMap::with_capacity(map.len());
            for (key, item) in map {
                out.insert(key.clone(), inline_value(root, item, active)?);
            }
            Ok(JsonValue::Object(out))
        }
        JsonValue::Array(items) => items
            .iter()
            .map(|item| inline_value(root, item, active))
            .collect::<crate::Result<Vec<_>>>()
            .map(JsonValue::Array),
        other => Ok(other.clone()),
    }
}

fn inline_ref(root: &JsonValue, reference: &str, active: &mut Vec<String>) -> crate::Result<JsonValue> {
    let Some(pointer) = reference.strip_prefix('#') else {
        return Err(Error::unresolved_ref(
            reference,
            "only references local to the document are supported",
        ));
    };
    if active.iter().any(|r| r == reference) {
        return Err(Error::unresolved_ref(
            reference,
            "recursive schemas cannot be inlined",
        ));
    }
    let target = root
        .pointer(pointer)
        .ok_or_else(|| Error::unresolved_ref(reference, "target not found"))?;

    active.push(reference.to_string());
    let resolved = inline_value(root, target, active);
    active.pop();
    resolved
}

/// The parts of an OpenAPI document binding generation reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiDocument {
    #[serde(default)]
    pub info: Info,
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,
    pub version: Option<String>,
}

/// One entry of the `paths` object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// Parameters shared by every operation under this path
    #[serde(default)]
    pub parameters: Vec<OpenApiParameter>,
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
}

impl PathItem {
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method {
            "get" => self.get.as_ref(),
            "put" => self.put.as_ref(),
            "post" => self.post.as_ref(),
            "delete" => self.delete.as_ref(),
            "options" => self.options.as_ref(),
            "head" => self.head.as_ref(),
            "patch" => self.patch.as_ref(),
            "trace" => self.trace.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub parameters: Vec<OpenApiParameter>,
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status; a `BTreeMap` so variants are visited in status order
    #[serde(default)]
    pub responses: BTreeMap<String, OpenApiResponse>,
}

/// An operation flattened out of its path item, ready for binding generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiOperation {
    /// The declared `operationId`, if any
    pub id: Option<String>,
    /// The path where this operation is defined (e.g., "/pet/findByStatus")
    pub path: String,
    /// Lowercase HTTP verb
    pub method: String,
    pub summary: Option<String>,
    /// Path-item and operation parameters, in declaration order
    pub parameters: Vec<OpenApiParameter>,
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<String, OpenApiResponse>,
}

impl OpenApiOperation {
    /// Schema of the `application/json` request body, if the operation has one.
    pub fn json_request_schema(&self) -> Option<&Schema> {
        self.request_body.as_ref()?.json_schema()
    }
}

/// Information about a single parameter in an OpenAPI operation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OpenApiParameter {
    /// The name of the parameter. Parameter names are case sensitive.
    pub name: String,
    /// The location of the parameter. Possible values: "query", "header", "path", or "cookie".
    #[serde(rename = "in")]
    pub in_: String,
    pub description: Option<String>,
    /// Whether the parameter is mandatory; absent means false
    pub required: Option<bool>,
    /// The schema defining the type used for the parameter.
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
    #[serde(default)]
    pub required: bool,
}

impl RequestBody {
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content.get(JSON_MEDIA_TYPE)?.schema.as_ref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenApiResponse {
    pub description: Option<String>,
    #[serde(default)]
    pub content: BTreeMap<String, MediaType>,
}

impl OpenApiResponse {
    pub fn json_schema(&self) -> Option<&Schema> {
        self.content.get(JSON_MEDIA_TYPE)?.schema.as_ref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// The declared `type` of a schema: a single name (3.0) or a list of names (3.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaTypeDecl {
    Single(String),
    Many(Vec<String>),
}

/// A schema node. Only the keywords that shape generated types are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaTypeDecl>,
    /// Ignored by generation; every format collapses to its base type
    pub format: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default)]
    pub required: Vec<String>,
    pub items: Option<Box<Schema>>,
}

impl Schema {
    /// The primary declared type, skipping a `"null"` entry of a 3.1 type list.
    pub fn primary_type(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            SchemaTypeDecl::Single(name) => Some(name.as_str()),
            SchemaTypeDecl::Many(names) => names
                .iter()
                .map(String::as_str)
                .find(|name| *name != "null"),
        }
        .filter(|name| *name != "null")
    }
}
