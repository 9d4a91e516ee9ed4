use std::path::PathBuf;

use celex_protocol::{Database, TableKind, Variant};

use crate::error::{Result, StoreError};

/// Where the database lives and which of its sub-databases to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelexConfig {
    /// Directory holding one sub-directory per variant (`eml/eml.cd`, ...).
    pub root: PathBuf,
    /// Sub-databases in merge order; on a column collision the later one wins.
    pub databases: Vec<Database>,
}

impl CelexConfig {
    /// Reads all four sub-databases.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            databases: Database::ALL.to_vec(),
        }
    }

    /// Restricts the sub-databases to the given codes, e.g. `"mf"`.
    pub fn with_databases(mut self, codes: &str) -> Result<Self> {
        let mut databases = Vec::new();
        for code in codes.chars() {
            let db = Database::from_code(code).ok_or(StoreError::UnknownDatabase(code))?;
            if !databases.contains(&db) {
                databases.push(db);
            }
        }
        self.databases = databases;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.databases.is_empty() {
            return Err(StoreError::EmptyDatabaseSelection);
        }
        Ok(())
    }

    /// Files contributing to `table`, in merge order.
    pub fn variants(&self, table: TableKind) -> Vec<Variant> {
        self.databases
            .iter()
            .filter_map(|&db| Variant::of(db, table))
            .collect()
    }
}
