//! Dense, id-addressed record tables with a secondary index on the surface
//! form.

use std::collections::HashMap;

use celex_parser::FromDecoded;
use celex_protocol::{Lemma, TableKind, Wordform};

use crate::error::{Result, StoreError};

/// A record that can live in a [`Table`].
pub trait Entry: FromDecoded {
    const TABLE: TableKind;

    fn id(&self) -> u32;

    /// The string the table is indexed by (head or spelled word).
    fn form(&self) -> &str;
}

impl Entry for Lemma {
    const TABLE: TableKind = TableKind::Lemmas;

    fn id(&self) -> u32 {
        self.id.0
    }

    fn form(&self) -> &str {
        &self.head
    }
}

impl Entry for Wordform {
    const TABLE: TableKind = TableKind::Wordforms;

    fn id(&self) -> u32 {
        self.id.0
    }

    fn form(&self) -> &str {
        &self.word
    }
}

/// Records stored in id order; id `n` sits at position `n - 1`.
#[derive(Debug)]
pub struct Table<T> {
    records: Vec<T>,
    by_form: HashMap<String, Vec<usize>>,
}

impl<T: Entry> Table<T> {
    /// Checks that ids run 1, 2, 3, ... without gaps and indexes the forms.
    pub fn build(records: Vec<T>) -> Result<Self> {
        let mut by_form: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            if record.id() as usize != index + 1 {
                return Err(StoreError::IdentifierGap {
                    table: T::TABLE,
                    index,
                    found: record.id(),
                });
            }
            by_form.entry(record.form().to_string()).or_default().push(index);
        }
        Ok(Self { records, by_form })
    }

    /// Id 0 and ids past the end are absent.
    pub fn get(&self, id: u32) -> Option<&T> {
        let index = (id as usize).checked_sub(1)?;
        self.records.get(index)
    }

    pub fn by_id(&self, id: u32) -> Result<&T> {
        self.get(id).ok_or(StoreError::NotFound { table: T::TABLE, id })
    }

    /// All records with exactly this form, in id order.
    pub fn lookup(&self, form: &str) -> Vec<&T> {
        self.by_form
            .get(form)
            .map(|positions| positions.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn distinct_forms(&self) -> usize {
        self.by_form.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celex_protocol::LemmaId;

    fn lemmas(heads: &[&str]) -> Vec<Lemma> {
        heads
            .iter()
            .enumerate()
            .map(|(i, head)| Lemma::new(LemmaId(i as u32 + 1), head.to_string()))
            .collect()
    }

    #[test]
    fn test_homonyms_share_a_form() {
        let table = Table::build(lemmas(&["bank", "bar", "bank"])).unwrap();
        let ids: Vec<u32> = table.lookup("bank").iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(table.distinct_forms(), 2);
        assert!(table.lookup("Bank").is_empty());
    }

    #[test]
    fn test_id_bounds() {
        let table = Table::build(lemmas(&["a", "b"])).unwrap();
        assert_eq!(table.by_id(2).unwrap().head, "b");
        for id in [0, 3, u32::MAX] {
            let err = table.by_id(id).unwrap_err();
            assert!(err.is_not_found(), "{id}: {err}");
        }
    }

    #[test]
    fn test_identifier_gap() {
        let mut records = lemmas(&["a", "b", "c"]);
        records[1].id = LemmaId(5);
        match Table::build(records) {
            Err(StoreError::IdentifierGap { table, index, found }) => {
                assert_eq!(table, TableKind::Lemmas);
                assert_eq!(index, 1);
                assert_eq!(found, 5);
            }
            other => panic!("expected IdentifierGap, got {other:?}"),
        }
    }
}
