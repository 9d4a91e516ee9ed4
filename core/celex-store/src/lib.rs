//! Lazily loaded, cross-linked lemma and wordform tables.
//!
//! ```no_run
//! use celex_store::{Celex, CelexConfig};
//!
//! let celex = Celex::open(CelexConfig::new("/data/celex/english").with_databases("mf")?)?;
//! for lemma in celex.lemma_lookup("bank")? {
//!     let forms = celex.lemma_to_wordforms(lemma)?;
//!     println!("{} {}: {} wordforms", lemma.id, lemma.head, forms.len());
//! }
//! # Ok::<(), celex_store::StoreError>(())
//! ```

pub mod config;
pub mod error;
pub mod linker;
pub mod loader;
pub mod table;

#[cfg(test)]
mod testing;

pub use config::CelexConfig;
pub use error::{Result, StoreError};
pub use linker::Links;
pub use loader::load_table;
pub use table::{Entry, Table};

use celex_protocol::{Lemma, LemmaId, Registry, TableKind, Wordform, WordformId};
use once_cell::sync::OnceCell;
use tracing::info;

/// Handle to one database directory.
///
/// Nothing is read until a query needs it; each table is loaded at most once
/// and a failed load is retried by the next query.
pub struct Celex {
    config: CelexConfig,
    registry: Registry,
    lemmas: OnceCell<Table<Lemma>>,
    wordforms: OnceCell<Table<Wordform>>,
    links: OnceCell<Links>,
}

impl Celex {
    pub fn open(config: CelexConfig) -> Result<Self> {
        config.validate()?;
        let registry = Registry::new()?;
        Ok(Self {
            config,
            registry,
            lemmas: OnceCell::new(),
            wordforms: OnceCell::new(),
            links: OnceCell::new(),
        })
    }

    pub fn config(&self) -> &CelexConfig {
        &self.config
    }

    pub fn ensure_lemmas_loaded(&self) -> Result<&Table<Lemma>> {
        self.lemmas
            .get_or_try_init(|| load_table(&self.config, &self.registry))
    }

    pub fn ensure_wordforms_loaded(&self) -> Result<&Table<Wordform>> {
        self.wordforms
            .get_or_try_init(|| load_table(&self.config, &self.registry))
    }

    /// Loads both tables and builds the lemma to wordform links.
    pub fn ensure_linked(&self) -> Result<&Links> {
        self.links.get_or_try_init(|| {
            let lemmas = self.ensure_lemmas_loaded()?;
            let wordforms = self.ensure_wordforms_loaded()?;
            let links = Links::build(lemmas, wordforms)?;
            info!(edges = links.edge_count(), lemmas = lemmas.len(), "linked tables");
            Ok(links)
        })
    }

    pub fn lemma_by_id(&self, id: LemmaId) -> Result<&Lemma> {
        self.ensure_lemmas_loaded()?.by_id(id.0)
    }

    pub fn wordform_by_id(&self, id: WordformId) -> Result<&Wordform> {
        self.ensure_wordforms_loaded()?.by_id(id.0)
    }

    /// Every lemma whose head is exactly `head`; empty when there is none.
    pub fn lemma_lookup(&self, head: &str) -> Result<Vec<&Lemma>> {
        Ok(self.ensure_lemmas_loaded()?.lookup(head))
    }

    pub fn wordform_lookup(&self, word: &str) -> Result<Vec<&Wordform>> {
        Ok(self.ensure_wordforms_loaded()?.lookup(word))
    }

    /// Wordforms of `lemma` in wordform table order.
    pub fn lemma_to_wordforms(&self, lemma: &Lemma) -> Result<Vec<&Wordform>> {
        let links = self.ensure_linked()?;
        let wordforms = self.ensure_wordforms_loaded()?;
        let ids = links.wordforms_of(lemma.id).ok_or(StoreError::NotFound {
            table: TableKind::Lemmas,
            id: lemma.id.0,
        })?;
        ids.iter().map(|id| wordforms.by_id(id.0)).collect()
    }

    pub fn wordform_to_lemma(&self, wordform: &Wordform) -> Result<&Lemma> {
        linker::resolve_lemma(self.ensure_lemmas_loaded()?, wordform)
    }

    pub fn lemmas(&self) -> Result<&[Lemma]> {
        Ok(self.ensure_lemmas_loaded()?.records())
    }

    pub fn wordforms(&self) -> Result<&[Wordform]> {
        Ok(self.ensure_wordforms_loaded()?.records())
    }
}
