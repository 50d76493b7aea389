//! Merging of response variants into one response shape.

use crate::field::Field;
use crate::naming::dedupe_names;
use crate::openapi::{OpenApiResponse, Schema};
use crate::resolver::{resolve_schema, ShapeTag};
use crate::{Error, Result};

/// One response variant carrying a JSON body.
#[derive(Debug, Clone, Copy)]
pub struct ResponseVariant<'a> {
    pub status: &'a str,
    pub schema: &'a Schema,
}

/// The JSON-bodied variants of a response map, in the map's order.
pub fn json_variants<'a, I>(responses: I) -> Vec<ResponseVariant<'a>>
where
    I: IntoIterator<Item = (&'a String, &'a OpenApiResponse)>,
{
    responses
        .into_iter()
        .filter_map(|(status, response)| {
            response.json_schema().map(|schema| ResponseVariant {
                status: status.as_str(),
                schema,
            })
        })
        .collect()
}

/// Result of merging every variant of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedResponse {
    /// Merged fields in first-seen order
    pub fields: Vec<Field>,
    pub shape: ShapeTag,
}

/// Merge the body schemas of all variants into one consistent field set.
///
/// Fails on the first variant whose top-level shape differs from the recorded one,
/// and on the first shared property whose type differs between variants. A property
/// that is optional in any variant it appears in ends up optional; a property that
/// is simply missing from a variant keeps the required flag it already had.
pub fn merge_responses(prefix: &str, variants: &[ResponseVariant<'_>]) -> Result<MergedResponse> {
    let mut shape = ShapeTag::Empty;
    let mut merged: Vec<Field> = Vec::new();

    for variant in variants {
        let current = ShapeTag::of(variant.schema);
        if shape.is_empty() {
            shape = current.clone();
        }
        if shape != current {
            return Err(Error::ResponseTypeConflict {
                prefix: prefix.to_string(),
                first: shape.to_string(),
                second: current.to_string(),
            });
        }

        for field in resolve_schema(variant.schema, &variant.schema.required) {
            let Some(index) = merged
                .iter()
                .position(|f| f.source_key == field.source_key)
            else {
                merged.push(field);
                continue;
            };
            let existing = &mut merged[index];

            if !existing.ty.same_shape(&field.ty) {
                return Err(Error::ResponseFieldConflict {
                    prefix: prefix.to_string(),
                    status: variant.status.to_string(),
                    field: field.source_key,
                    first: existing.ty.to_string(),
                    second: field.ty.to_string(),
                });
            }

            if !field.required {
                existing.required = false;
            }
        }
    }

    dedupe_names(&mut merged);
    log::debug!(
        "{}: merged {} response variant(s) into {} field(s)",
        prefix,
        variants.len(),
        merged.len()
    );
    Ok(MergedResponse {
        fields: merged,
        shape,
    })
}
