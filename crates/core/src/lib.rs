//! Core types for Dynamap
//!
//! This crate defines the foundational types used throughout the mapper:
//! - AttributeValue: tagged value enum for every storable attribute type
//! - PrimaryKey / key validation: hash + optional range addressing
//! - TableSchema: table name, key attribute names, timestamp flag
//! - Record: attribute map with dirty tracking
//! - Lifecycle: validators and per-phase hook pipelines
//! - AttributeDumper: record-to-storable translation contract
//! - KeyGenerator: injectable hash key generation strategy
//! - MapperConfig: explicit configuration (no ambient globals)
//! - Error: caller-facing error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod config;
pub mod dump;
pub mod error;
pub mod key;
pub mod keygen;
pub mod lifecycle;
pub mod record;
pub mod schema;
pub mod value;

// Re-export commonly used types and traits
pub use config::MapperConfig;
pub use dump::{AttributeDumper, IdentityDumper};
pub use error::{Error, Result};
pub use key::{validate_key_value, KeyError, PrimaryKey};
pub use keygen::{KeyGenerator, SequenceKeys, UuidKeys};
pub use lifecycle::{Hook, HookOutcome, HookPhase, Lifecycle, ValidationError, Validator};
pub use record::Record;
pub use schema::{TableSchema, CREATED_AT, UPDATED_AT};
pub use value::AttributeValue;
