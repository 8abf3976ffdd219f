//! Schema module: loading and lookup of the protocol schema document
//!
//! The document is fetched once from a [`SchemaSource`] and turned into an
//! immutable [`SchemaStore`] that is shared by reference afterwards.

mod error;
mod source;
mod store;

pub use error::{SchemaError, SchemaResult};
pub use source::{
    schema_source_for, BundledSchemaSource, FileSchemaSource, HttpSchemaSource, SchemaSource,
    BUNDLED_LOCATION, BUNDLED_SCHEMA,
};
pub use store::SchemaStore;
