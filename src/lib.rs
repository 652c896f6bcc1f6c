//! pim-attributes - schema-driven validation of product attribute bags
//!
//! Products carry a free-form JSON attribute bag whose shape depends on the
//! product's type. Each type declares ordered, typed, constrained field
//! definitions; the attribute validator checks a bag against them.

pub mod attributes;
pub mod cli;
pub mod config;
pub mod observability;
pub mod schema;
