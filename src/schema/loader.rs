//! Schema loader for product type documents on disk
//!
//! - One file per product type: `<schema_dir>/type_<id>.json`
//! - Each file holds a single `ProductType` document
//! - Non-JSON files are skipped
//! - A malformed file fails the whole load

use std::fs;
use std::path::{Path, PathBuf};

use crate::observability::{log_event_with_fields, Event};

use super::errors::{SchemaError, SchemaResult};
use super::provider::{SchemaProvider, SchemaRegistry};
use super::types::{FieldDefinition, ProductType, TypeId};

/// Loads product type documents from a directory into a registry.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    registry: SchemaRegistry,
}

impl SchemaLoader {
    /// Creates a loader for the given schema directory.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            registry: SchemaRegistry::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Returns the loaded registry.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Consumes the loader, returning its registry.
    pub fn into_registry(self) -> SchemaRegistry {
        self.registry
    }

    /// Loads every `*.json` file in the schema directory.
    ///
    /// A missing directory is an empty schema set. Returns the number of
    /// product types loaded by this call.
    pub fn load_all(&mut self) -> SchemaResult<usize> {
        if !self.schema_dir.exists() {
            return Ok(0);
        }

        let dir = self.schema_dir.display().to_string();
        let entries = fs::read_dir(&self.schema_dir)
            .map_err(|e| SchemaError::io(&dir, format!("Failed to read schema directory: {}", e)))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::io(&dir, format!("Failed to read directory entry: {}", e))
            })?;
            let path = entry.path();

            if path.extension().map_or(true, |ext| ext != "json") {
                let skipped = path.display().to_string();
                log_event_with_fields(Event::SchemaFileSkipped, &[("path", skipped.as_str())]);
                continue;
            }
            paths.push(path);
        }

        // read_dir order is platform dependent
        paths.sort();

        for path in &paths {
            self.load_type_file(path)?;
        }

        let count = paths.len().to_string();
        log_event_with_fields(
            Event::SchemasLoaded,
            &[("count", count.as_str()), ("dir", dir.as_str())],
        );

        Ok(paths.len())
    }

    /// Loads a single product type file.
    fn load_type_file(&mut self, path: &Path) -> SchemaResult<()> {
        let display = path.display().to_string();

        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::io(&display, format!("Failed to read file: {}", e)))?;

        let product_type: ProductType = serde_json::from_str(&content)
            .map_err(|e| SchemaError::malformed_schema(&display, format!("Invalid JSON: {}", e)))?;

        self.registry
            .register(product_type)
            .map_err(|e| SchemaError::malformed_schema(&display, e.message()))
    }

    /// Registers a product type directly (for tests or programmatic setup).
    pub fn register(&mut self, product_type: ProductType) -> SchemaResult<()> {
        self.registry.register(product_type)
    }

    /// Writes a product type to `type_<id>.json`.
    ///
    /// Refuses to overwrite an existing file.
    pub fn save_type(&self, product_type: &ProductType) -> SchemaResult<PathBuf> {
        product_type
            .validate_structure()
            .map_err(SchemaError::invalid_structure)?;

        let path = self
            .schema_dir
            .join(format!("type_{}.json", product_type.id));
        let display = path.display().to_string();

        if path.exists() {
            return Err(SchemaError::duplicate_type(product_type.id));
        }

        fs::create_dir_all(&self.schema_dir).map_err(|e| {
            SchemaError::io(
                self.schema_dir.display().to_string(),
                format!("Failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(product_type).map_err(|e| {
            SchemaError::malformed_schema(&display, format!("Failed to serialize: {}", e))
        })?;

        fs::write(&path, content)
            .map_err(|e| SchemaError::io(&display, format!("Failed to write file: {}", e)))?;

        Ok(path)
    }
}

impl SchemaProvider for SchemaLoader {
    fn active_definitions(&self, type_id: TypeId) -> SchemaResult<Vec<FieldDefinition>> {
        self.registry.active_definitions(type_id)
    }
}
