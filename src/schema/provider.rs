//! Schema providers
//!
//! A provider resolves a product type to its active field definitions,
//! ordered by `sort_order`. The validator never reaches into a provider
//! itself; callers resolve definitions first and pass them in.

use std::collections::BTreeMap;

use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldDefinition, ProductType, TypeId};

/// Source of field definitions for a product type.
pub trait SchemaProvider {
    /// Returns the active definitions for `type_id`, ordered by `sort_order`.
    ///
    /// An unknown type has no definitions.
    fn active_definitions(&self, type_id: TypeId) -> SchemaResult<Vec<FieldDefinition>>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for &P {
    fn active_definitions(&self, type_id: TypeId) -> SchemaResult<Vec<FieldDefinition>> {
        (**self).active_definitions(type_id)
    }
}

/// In-memory registry of product types.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: BTreeMap<TypeId, ProductType>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product type after checking its structure.
    pub fn register(&mut self, product_type: ProductType) -> SchemaResult<()> {
        product_type
            .validate_structure()
            .map_err(SchemaError::invalid_structure)?;

        if self.types.contains_key(&product_type.id) {
            return Err(SchemaError::duplicate_type(product_type.id));
        }

        self.types.insert(product_type.id, product_type);
        Ok(())
    }

    /// Gets a product type by id.
    pub fn get(&self, type_id: TypeId) -> Option<&ProductType> {
        self.types.get(&type_id)
    }

    /// Gets a product type by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&ProductType> {
        self.types.values().find(|t| t.code == code)
    }

    pub fn exists(&self, type_id: TypeId) -> bool {
        self.types.contains_key(&type_id)
    }

    /// Returns all product types in id order.
    pub fn all_types(&self) -> impl Iterator<Item = &ProductType> {
        self.types.values()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl SchemaProvider for SchemaRegistry {
    fn active_definitions(&self, type_id: TypeId) -> SchemaResult<Vec<FieldDefinition>> {
        Ok(self
            .get(type_id)
            .map(ProductType::active_definitions)
            .unwrap_or_default())
    }
}
