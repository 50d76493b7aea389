use std::path::{Path, PathBuf};

use apigen_core::format::IdentityFormatter;
use apigen_core::{generate, generate_with_formatter, Config, Error};
use tempfile::tempdir;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .display()
        .to_string()
}

fn read(dir: &Path, file: &str) -> String {
    std::fs::read_to_string(dir.join(file)).unwrap_or_else(|e| panic!("{file}: {e}"))
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_generates_one_unit_per_operation() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bindings");
    let config = Config::new(
        vec![fixture("petstore.yaml"), "README.txt".into()],
        out.display().to_string(),
    );

    let report = generate(&config).await.unwrap();
    assert_eq!(report.documents, 1);
    assert_eq!(report.operations, 3);
    assert_eq!(
        listing(&out),
        vec![
            "apigen_utils.rs",
            "mod.rs",
            "pet_store_pets_get.rs",
            "pet_store_pets_pet_id_get.rs",
            "pet_store_pets_post.rs",
        ]
    );

    let index = read(&out, "mod.rs");
    assert!(index.contains("Generated request bindings for Pet Store."));
    assert!(index.contains("pub mod apigen_utils;"));
    assert!(index.contains("pub mod pet_store_pets_pet_id_get;"));

    let helper = read(&out, "apigen_utils.rs");
    assert!(helper.contains("pub fn parse_body<T: DeserializeOwned>"));
}

#[tokio::test]
async fn test_list_operation_has_accessors_and_array_alias() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bindings");
    let config = Config::new(vec![fixture("petstore.yaml")], out.display().to_string());
    generate(&config).await.unwrap();

    let unit = read(&out, "pet_store_pets_get.rs");
    assert!(unit.contains("//! Request bindings for `GET /pets` of Pet Store."));
    assert!(unit.contains("use axum::http::HeaderMap;"));
    assert!(unit.contains("use super::apigen_utils as utils;"));

    assert!(unit.contains("pub struct PetStorePetsGetHeaders {"));
    assert!(unit.contains("pub x_request_id: String,"));
    assert!(unit.contains("fn get_pet_store_pets_get_headers("));
    assert!(unit.contains("pub struct PetStorePetsGetQuery {"));
    assert!(unit.contains("pub limit: Option<i64>,"));
    assert!(unit.contains("fn get_pet_store_pets_get_query("));

    assert!(unit.contains("pub type PetStorePetsGetResponse = Vec<PetStorePetsGetResponseItem>;"));
    assert!(unit.contains("pub struct PetStorePetsGetResponseItem {"));
    assert!(unit.contains("pub owner: Option<PetStorePetsGetResponseItemOwner>,"));
    assert!(unit.contains("pub struct PetStorePetsGetResponseItemOwner {"));
    assert!(!unit.contains("PetStorePetsGetBody"));
}

#[tokio::test]
async fn test_create_operation_merges_responses() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bindings");
    let config = Config::new(vec![fixture("petstore.yaml")], out.display().to_string());
    generate(&config).await.unwrap();

    let unit = read(&out, "pet_store_pets_post.rs");
    assert!(!unit.contains("HeaderMap"));
    assert!(unit.contains("pub struct PetStorePetsPostBody {"));
    assert!(unit.contains("fn get_pet_store_pets_post_body("));

    // 201 and 400 bodies share one response struct
    let response = unit.find("pub struct PetStorePetsPostResponse {").unwrap();
    let fields = &unit[response..];
    for member in ["pub code: i64,", "pub id: i64,", "pub message: Option<String>,", "pub name: String,"] {
        assert!(fields.contains(member), "missing {member}");
    }
    let code = fields.find("pub code").unwrap();
    let tag = fields.find("pub tag").unwrap();
    assert!(code < tag);
}

#[tokio::test]
async fn test_path_parameters_are_ignored() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bindings");
    let config = Config::new(vec![fixture("petstore.yaml")], out.display().to_string());
    generate(&config).await.unwrap();

    let unit = read(&out, "pet_store_pets_pet_id_get.rs");
    assert!(!unit.contains("pet_id:"));
    assert!(unit.contains("pub verbose: Option<bool>,"));
    assert!(unit.contains("pub struct PetStorePetsPetIdGetResponse {"));
}

#[tokio::test]
async fn test_generation_is_deterministic() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    for out in [&first, &second] {
        let config = Config::new(vec![fixture("petstore.yaml")], out.display().to_string());
        generate(&config).await.unwrap();
    }

    for file in listing(&first) {
        assert_eq!(read(&first, &file), read(&second, &file), "{file} differs");
    }
}

#[tokio::test]
async fn test_conflicting_responses_abort_without_output() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bindings");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("stale.rs"), "// previous run").unwrap();

    let config = Config::new(
        vec![fixture("petstore.yaml"), fixture("conflict.json")],
        out.display().to_string(),
    );
    let err = generate(&config).await.unwrap_err();
    match err {
        Error::ResponseTypeConflict { prefix, first, second } => {
            assert_eq!(prefix, "ConflictsItemsGet");
            assert_eq!(first, "object");
            assert_eq!(second, "array");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(listing(&out).is_empty());
}

#[tokio::test]
async fn test_missing_document_is_a_load_error() {
    let dir = tempdir().unwrap();
    let config = Config::new(
        vec![dir.path().join("absent.yaml").display().to_string()],
        dir.path().join("out").display().to_string(),
    );
    let err = generate(&config).await.unwrap_err();
    assert!(matches!(err, Error::DocumentLoad { .. }));
}

#[tokio::test]
async fn test_custom_helper_module_without_index() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("bindings");
    let mut config = Config::new(vec![fixture("petstore.yaml")], out.display().to_string());
    config.helper_module = "runtime_support".into();
    config.emit_mod_file = false;

    generate_with_formatter(&config, &IdentityFormatter).await.unwrap();

    let files = listing(&out);
    assert!(files.contains(&"runtime_support.rs".to_string()));
    assert!(!files.contains(&"mod.rs".to_string()));
    let unit = read(&out, "pet_store_pets_get.rs");
    assert!(unit.contains("use super::runtime_support as utils;"));
}
