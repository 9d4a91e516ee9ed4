#![no_std] // Record types are shared with no_std consumers

extern crate alloc;

// Enable std if the feature is active (for paths and std::error::Error)
#[cfg(feature = "std")]
extern crate std;

pub mod codes;
pub mod flags;
pub mod ids;
pub mod schema;

// Re-export core types for convenience
pub use flags::SyntaxFlags;
pub use ids::{LemmaId, WordformId};
pub use schema::{
    Database, FieldDescriptor, FieldKind, GroupLayout, RecordKind, RecordLayout, Registry, Repeat,
    Schema, SchemaError, TableKind, Variant, PARSES, PRONS,
};

pub mod model;
pub use model::*;
