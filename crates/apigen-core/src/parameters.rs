//! Operation parameter classification.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::field::{is_primitive, translate_type, Field, FieldType};
use crate::naming::dedupe_names;
use crate::openapi::OpenApiParameter;

/// Parameter kind based on the OpenAPI `in` field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Path,
    Query,
    Header,
    Cookie,
}

impl FromStr for ParameterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(Self::Path),
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            "cookie" => Ok(Self::Cookie),
            other => Err(format!("unknown parameter location {other:?}")),
        }
    }
}

/// Header and query fields of one operation, each in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedParameters {
    pub header: Vec<Field>,
    pub query: Vec<Field>,
}

/// Resolve a parameter into its single flat field.
///
/// Parameters cannot carry nested structure: anything that is not a schema
/// primitive is read as raw text.
pub fn parameter_field(param: &OpenApiParameter) -> Field {
    let ty = match param.schema.as_ref().and_then(|s| s.primary_type()) {
        Some(name) if is_primitive(name) => translate_type(name),
        _ => translate_type("string"),
    };

    Field::new(
        &param.name,
        FieldType::Scalar(ty),
        param.required.unwrap_or(false),
    )
}

/// Bucket parameters by location. Path, cookie and unknown locations are skipped.
pub fn classify_parameters(parameters: &[OpenApiParameter]) -> ClassifiedParameters {
    let mut classified = ClassifiedParameters::default();

    for param in parameters {
        match param.in_.parse::<ParameterKind>() {
            Ok(ParameterKind::Header) => classified.header.push(parameter_field(param)),
            Ok(ParameterKind::Query) => classified.query.push(parameter_field(param)),
            Ok(kind) => {
                log::debug!("Skipping {:?} parameter {:?}", kind, param.name);
            }
            Err(e) => {
                log::debug!("Skipping parameter {:?}: {}", param.name, e);
            }
        }
    }

    dedupe_names(&mut classified.header);
    dedupe_names(&mut classified.query);
    classified
}
