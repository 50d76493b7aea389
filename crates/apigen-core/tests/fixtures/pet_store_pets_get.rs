//! Request bindings for `GET /pets` of Pet Store.
//!
//! Code generated by apigen. Do not edit.
#![allow(dead_code, unused_imports, clippy::all)]

use std::collections::HashMap;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use super::apigen_utils as utils;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PetStorePetsGetHeaders {
    #[serde(rename = "X-Request-ID")]
    pub x_request_id: String,
}

pub fn get_pet_store_pets_get_headers(
    headers: &HeaderMap,
) -> Result<PetStorePetsGetHeaders, utils::ParamError> {
    let mut data = PetStorePetsGetHeaders::default();

    let raw = utils::text_value(
        headers.get("X-Request-ID").map(|value| value.to_str()),
        "X-Request-ID",
        utils::ParamLocation::Header,
    )?;
    utils::require(raw, "X-Request-ID", utils::ParamLocation::Header)?;
    data.x_request_id = raw.to_string();

    Ok(data)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PetStorePetsGetQuery {
    #[serde(rename = "limit", default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

pub fn get_pet_store_pets_get_query(
    query: &HashMap<String, String>,
) -> Result<PetStorePetsGetQuery, utils::ParamError> {
    let mut data = PetStorePetsGetQuery::default();

    let raw = query.get("limit").map(String::as_str).unwrap_or_default();
    if !raw.is_empty() {
        data.limit = Some(utils::parse_int(raw, "limit", utils::ParamLocation::Query)?);
    }

    Ok(data)
}

pub type PetStorePetsGetResponse = Vec<PetStorePetsGetResponseItem>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PetStorePetsGetResponseItem {
    #[serde(rename = "id")]
    pub id: i64,
    #[serde(rename = "name")]
    pub name: String,
    #[serde(rename = "owner", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<PetStorePetsGetResponseItemOwner>,
    #[serde(rename = "tag", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PetStorePetsGetResponseItemOwner {
    #[serde(rename = "email")]
    pub email: String,
}
