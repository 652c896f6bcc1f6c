//! Schema store error types
//!
//! Error codes:
//! - PIM_SCHEMA_MALFORMED
//! - PIM_SCHEMA_DUPLICATE_TYPE
//! - PIM_SCHEMA_INVALID_STRUCTURE
//! - PIM_SCHEMA_IO
//!
//! These describe defects on the provider side. Attribute bags are never
//! rejected with a schema error; they get a `ValidationOutcome`.

use std::fmt;

use super::types::TypeId;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema file is not a valid product type document
    PimSchemaMalformed,
    /// A product type id was registered twice
    PimSchemaDuplicateType,
    /// Product type document failed its structure check
    PimSchemaInvalidStructure,
    /// Reading or writing the schema directory failed
    PimSchemaIo,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::PimSchemaMalformed => "PIM_SCHEMA_MALFORMED",
            SchemaErrorCode::PimSchemaDuplicateType => "PIM_SCHEMA_DUPLICATE_TYPE",
            SchemaErrorCode::PimSchemaInvalidStructure => "PIM_SCHEMA_INVALID_STRUCTURE",
            SchemaErrorCode::PimSchemaIo => "PIM_SCHEMA_IO",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error type with context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    /// File path if the error came from disk
    path: Option<String>,
}

impl SchemaError {
    /// Create an error for a malformed schema file
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            code: SchemaErrorCode::PimSchemaMalformed,
            message: format!("Malformed schema file '{}': {}", path, reason.into()),
            path: Some(path),
        }
    }

    /// Create a duplicate product type error
    pub fn duplicate_type(type_id: TypeId) -> Self {
        Self {
            code: SchemaErrorCode::PimSchemaDuplicateType,
            message: format!("Product type {} is already registered", type_id),
            path: None,
        }
    }

    /// Create a structure check failure
    pub fn invalid_structure(reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::PimSchemaInvalidStructure,
            message: reason.into(),
            path: None,
        }
    }

    /// Create an I/O failure for the given path
    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            code: SchemaErrorCode::PimSchemaIo,
            message: format!("{}: {}", path, reason.into()),
            path: Some(path),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the file path if applicable
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
