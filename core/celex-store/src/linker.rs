use celex_protocol::{Lemma, LemmaId, Wordform, WordformId};

use crate::error::{Result, StoreError};
use crate::table::Table;

/// Lemma to wordform adjacency, built once both tables are loaded.
#[derive(Debug, Default)]
pub struct Links {
    wordforms: Vec<Vec<WordformId>>,
}

impl Links {
    /// Every wordform is attached to exactly one lemma, in table order.
    pub fn build(lemmas: &Table<Lemma>, wordforms: &Table<Wordform>) -> Result<Self> {
        let mut adjacency = vec![Vec::new(); lemmas.len()];
        for wordform in wordforms.records() {
            let lemma = resolve_lemma(lemmas, wordform)?;
            if let Some(index) = lemma.id.index() {
                adjacency[index].push(wordform.id);
            }
        }
        Ok(Self { wordforms: adjacency })
    }

    /// `None` when the lemma id is outside the table the links were built on.
    pub fn wordforms_of(&self, lemma: LemmaId) -> Option<&[WordformId]> {
        lemma
            .index()
            .and_then(|i| self.wordforms.get(i))
            .map(Vec::as_slice)
    }

    pub fn edge_count(&self) -> usize {
        self.wordforms.iter().map(Vec::len).sum()
    }
}

/// The lemma a wordform inflects.
pub fn resolve_lemma<'t>(lemmas: &'t Table<Lemma>, wordform: &Wordform) -> Result<&'t Lemma> {
    lemmas
        .get(wordform.lemma_id.0)
        .filter(|lemma| lemma.id == wordform.lemma_id)
        .ok_or(StoreError::DanglingReference {
            wordform: wordform.id,
            lemma: wordform.lemma_id,
            max: lemmas.len(),
        })
}
