//! Product type schemas
//!
//! A product type declares an ordered list of field definitions. This module
//! owns their at-rest encoding, the typed form consumed by the attribute
//! validator, and the providers that resolve a type to its active fields.
//!
//! # Design Principles
//!
//! - Kinds form a closed set; each kind carries only its own constraints
//! - Constraints of other kinds are dropped on conversion, never an error
//! - Providers return active definitions ordered by `sort_order`
//! - Schema defects in enum options degrade to "no restriction"

mod errors;
mod loader;
mod options;
mod provider;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use options::{parse_options, OptionSet};
pub use provider::{SchemaProvider, SchemaRegistry};
pub use types::{DataType, FieldDefinition, FieldKind, ProductType, PropertyRecord, TypeId};
