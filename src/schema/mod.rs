//! # Schema Catalog
//!
//! Static description of the nine entity types: their fields, primary
//! keys, foreign-key edges, and field value domains. Built once at
//! startup and never mutated.

pub mod catalog;
pub mod errors;
pub mod row;
pub mod types;
pub mod value;

pub use catalog::Catalog;
pub use errors::{SchemaError, SchemaResult};
pub use row::{Key, Row};
pub use types::{EntityType, FieldDef, FieldDomain, ForeignKey, PrimaryKey, TableSchema};
pub use value::Value;
