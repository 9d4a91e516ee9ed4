use std::path::PathBuf;

use celex_parser::DecodeError;
use celex_protocol::{LemmaId, SchemaError, TableKind, WordformId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid schema registry: {0}")]
    Schema(#[from] SchemaError),

    #[error("unknown database code {0:?}, expected one of s, m, f, p")]
    UnknownDatabase(char),

    #[error("no database selected")]
    EmptyDatabaseSelection,

    #[error("no selected database contributes to the {table} table")]
    NoVariants { table: TableKind },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line failed to decode; `line` is 1-based.
    #[error("{}:{line}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        line: usize,
        #[source]
        source: DecodeError,
    },

    /// A merged record failed to materialize. `index` is 0-based, `line` is
    /// 1-based; `variant` and `path` name the file the failing column came from.
    #[error("{}:{line}: {variant} column of {table} record {index}: {source}", .path.display())]
    Record {
        table: TableKind,
        index: usize,
        variant: &'static str,
        path: PathBuf,
        line: usize,
        #[source]
        source: DecodeError,
    },

    /// Files merged into one table disagree on their record count.
    #[error("{} has {actual} records, the {table} table has {expected}", .path.display())]
    TableMisalignment {
        table: TableKind,
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("{table} record at position {index} has id {found}, expected {}", .index + 1)]
    IdentifierGap {
        table: TableKind,
        index: usize,
        found: u32,
    },

    #[error("wordform {wordform} refers to lemma {lemma}, which is not in 1..={max}")]
    DanglingReference {
        wordform: WordformId,
        lemma: LemmaId,
        max: usize,
    },

    #[error("no {table} record with id {id}")]
    NotFound { table: TableKind, id: u32 },
}

impl StoreError {
    /// `NotFound` is the one error a caller is expected to recover from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// A convenience `Result` type alias using the crate's `StoreError` type.
pub type Result<T> = std::result::Result<T, StoreError>;
