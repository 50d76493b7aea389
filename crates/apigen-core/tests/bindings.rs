//! Runs a checked-in copy of the bindings generated for `GET /pets` against real
//! request data, and checks the copy still matches what the generator emits.

#[path = "../src/runtime.rs"]
mod apigen_utils;

#[path = "fixtures/pet_store_pets_get.rs"]
mod pet_store_pets_get;

use std::collections::HashMap;
use std::path::PathBuf;

use apigen_core::format::IdentityFormatter;
use apigen_core::{generate_with_formatter, Config};
use axum::http::{HeaderMap, HeaderValue};
use pet_store_pets_get::*;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Token text with layout removed, so hand-formatted and raw output compare equal.
fn tokens(source: &str) -> String {
    source
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace(",)", ")")
        .replace(",}", "}")
}

#[tokio::test]
async fn test_checked_in_bindings_match_generator() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bindings");
    let config = Config::new(
        vec![fixture_path("petstore.yaml").display().to_string()],
        out.display().to_string(),
    );
    generate_with_formatter(&config, &IdentityFormatter).await.unwrap();

    let generated = std::fs::read_to_string(out.join("pet_store_pets_get.rs")).unwrap();
    let checked_in = std::fs::read_to_string(fixture_path("pet_store_pets_get.rs")).unwrap();
    assert_eq!(tokens(&generated), tokens(&checked_in));
}

#[test]
fn test_required_header_missing_is_not_found() {
    let err = get_pet_store_pets_get_headers(&HeaderMap::new()).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "header not found: \"X-Request-ID\"");
}

#[test]
fn test_required_header_present() {
    let mut headers = HeaderMap::new();
    headers.insert("X-Request-ID", HeaderValue::from_static("abc"));
    let data = get_pet_store_pets_get_headers(&headers).unwrap();
    assert_eq!(
        data,
        PetStorePetsGetHeaders {
            x_request_id: "abc".into()
        }
    );
}

#[test]
fn test_unreadable_header_is_not_reported_missing() {
    let mut headers = HeaderMap::new();
    headers.insert("X-Request-ID", HeaderValue::from_bytes(b"caf\xe9").unwrap());
    let err = get_pet_store_pets_get_headers(&headers).unwrap_err();
    assert!(!err.is_not_found());
    assert!(matches!(err, apigen_utils::ParamError::InvalidText { .. }));
}

#[test]
fn test_optional_query_stays_unset() {
    let data = get_pet_store_pets_get_query(&HashMap::new()).unwrap();
    assert_eq!(data.limit, None);

    let query = HashMap::from([("limit".to_string(), String::new())]);
    assert_eq!(get_pet_store_pets_get_query(&query).unwrap().limit, None);

    let query = HashMap::from([("limit".to_string(), "25".to_string())]);
    assert_eq!(get_pet_store_pets_get_query(&query).unwrap().limit, Some(25));

    let query = HashMap::from([("limit".to_string(), "many".to_string())]);
    let err = get_pet_store_pets_get_query(&query).unwrap_err();
    assert_eq!(err.key(), "limit");
}

#[test]
fn test_response_round_trips_through_serde() {
    let body = br#"[{"id":1,"name":"Rex","owner":{"email":"a@b.c"}},{"id":2,"name":"Tom"}]"#;
    let pets: PetStorePetsGetResponse = apigen_utils::parse_body(body).unwrap();
    assert_eq!(pets.len(), 2);
    assert_eq!(pets[0].owner.as_ref().map(|o| o.email.as_str()), Some("a@b.c"));
    assert_eq!(pets[1].tag, None);

    let json = serde_json::to_value(&pets[1]).unwrap();
    assert_eq!(json, serde_json::json!({ "id": 2, "name": "Tom" }));
}
