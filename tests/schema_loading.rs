//! Schema Loading Tests
//!
//! - Product types load from `*.json` files in the schema directory
//! - Only active properties are validated, ordered by sort order
//! - Foreign constraints on a property are ignored
//! - Schema defects never fail a product write

use std::fs;

use pim_attributes::attributes::AttributeService;
use pim_attributes::schema::{
    DataType, ProductType, PropertyRecord, SchemaErrorCode, SchemaLoader, SchemaProvider, TypeId,
};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const APPAREL: &str = r#"{
    "id": 3,
    "code": "apparel",
    "name": "Apparel",
    "properties": [
        {"key": "size", "data_type": "Enum", "is_required": true,
         "options_json": "[\"S\", \"M\", \"L\", \"M\", \" \"]", "sort_order": 2},
        {"key": "chest_cm", "data_type": "Number", "min": 40, "max": 160,
         "regex": "^[0-9]+$", "sort_order": 1},
        {"key": "legacy_code", "data_type": "Text", "is_required": true,
         "is_active": false, "sort_order": 0},
        {"key": "release", "data_type": "Date", "sort_order": 3}
    ]
}"#;

fn setup_loader() -> (TempDir, SchemaLoader) {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("type_3.json"), APPAREL).unwrap();
    fs::write(tmp.path().join("README.txt"), "ignored").unwrap();

    let mut loader = SchemaLoader::new(tmp.path());
    assert_eq!(loader.load_all().unwrap(), 1);
    (tmp, loader)
}

// =============================================================================
// Loader
// =============================================================================

#[test]
fn test_active_definitions_sorted() {
    let (_tmp, loader) = setup_loader();
    let defs = loader.active_definitions(TypeId(3)).unwrap();

    let keys: Vec<&str> = defs.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, vec!["chest_cm", "size", "release"]);
}

#[test]
fn test_missing_directory_is_empty() {
    let tmp = TempDir::new().unwrap();
    let mut loader = SchemaLoader::new(tmp.path().join("absent"));
    assert_eq!(loader.load_all().unwrap(), 0);
    assert!(loader.active_definitions(TypeId(1)).unwrap().is_empty());
}

#[test]
fn test_malformed_file_fails_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("type_1.json"), "{ nope").unwrap();

    let err = SchemaLoader::new(tmp.path()).load_all().unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::PimSchemaMalformed);
    assert!(err.path().unwrap().ends_with("type_1.json"));
}

#[test]
fn test_duplicate_type_ids_fail_load() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.json"), r#"{"id": 9, "code": "a"}"#).unwrap();
    fs::write(tmp.path().join("b.json"), r#"{"id": 9, "code": "b"}"#).unwrap();

    assert!(SchemaLoader::new(tmp.path()).load_all().is_err());
}

#[test]
fn test_save_then_load() {
    let tmp = TempDir::new().unwrap();
    let mut weight = PropertyRecord::new("weight", DataType::Number);
    weight.min = Some(0.0);

    let writer = SchemaLoader::new(tmp.path());
    writer
        .save_type(&ProductType::new(4, "parcel", "Parcel").with_property(weight))
        .unwrap();

    let mut reader = SchemaLoader::new(tmp.path());
    reader.load_all().unwrap();
    let loaded = reader.registry().get(TypeId(4)).unwrap();
    assert_eq!(loaded.code, "parcel");
    assert_eq!(loaded.properties[0].min, Some(0.0));
}

// =============================================================================
// End to End
// =============================================================================

#[test]
fn test_service_over_loaded_schemas() {
    let (_tmp, loader) = setup_loader();
    let service = AttributeService::new(loader);

    // Inactive required field is not enforced
    let outcome = service.validate(Some(TypeId(3)), Some(r#"{"size": "M"}"#)).unwrap();
    assert!(outcome.is_valid());

    // Regex on a Number property is ignored
    let outcome = service
        .validate(Some(TypeId(3)), Some(r#"{"size": "S", "chest_cm": "95.5"}"#))
        .unwrap();
    assert!(outcome.is_valid());

    // Options are distinct and blank-filtered
    let outcome = service.validate(Some(TypeId(3)), Some(r#"{"size": "XL"}"#)).unwrap();
    assert_eq!(outcome.reason(), Some("size must be one of: S, M, L"));

    // Sort order decides which failure is reported
    let outcome = service
        .validate(Some(TypeId(3)), Some(r#"{"chest_cm": 10, "release": "soon"}"#))
        .unwrap();
    assert_eq!(outcome.reason(), Some("chest_cm must be >= 40"));
}

#[test]
fn test_schema_defects_do_not_reject() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("type_8.json"),
        r#"{"id": 8, "code": "odd", "properties": [
            {"key": "tag", "data_type": "Enum", "options_json": "not an array"},
            {"key": "finish", "data_type": "Enum", "options_json": "[\"matte\", 2]"},
            {"key": "code", "data_type": "Text", "regex": "   "}
        ]}"#,
    )
    .unwrap();

    let mut loader = SchemaLoader::new(tmp.path());
    loader.load_all().unwrap();
    let service = AttributeService::new(loader);

    let outcome = service
        .validate(
            Some(TypeId(8)),
            Some(r#"{"tag": "free", "finish": "glossy", "code": "anything"}"#),
        )
        .unwrap();
    assert!(outcome.is_valid());
}

#[test]
fn test_uncompilable_pattern_fails_closed() {
    let tmp = TempDir::new().unwrap();
    let mut code = PropertyRecord::new("code", DataType::Text);
    code.regex = Some("([a-z".into());

    let mut loader = SchemaLoader::new(tmp.path());
    loader
        .register(ProductType::new(2, "broken", "Broken").with_property(code))
        .unwrap();

    let service = AttributeService::new(loader);
    let outcome = service.validate(Some(TypeId(2)), Some(r#"{"code": "abc"}"#)).unwrap();
    assert_eq!(outcome.reason(), Some("code format is invalid"));

    // Absent optional field never reaches the pattern
    assert!(service.validate(Some(TypeId(2)), Some("{}")).unwrap().is_valid());
}
