//! Reads the variant files of one table and merges them into typed records.
//!
//! The files of a table are line-aligned: line `i` of every file describes the
//! same record. Each line is decoded against its variant's schema, the raw
//! records are merged position by position, and only then materialized.

use std::fs;
use std::path::PathBuf;

use celex_parser::{decode_line, materialize, DecodeError, RawRecord};
use celex_protocol::{Registry, Schema, Variant};
use tracing::{debug, info, info_span};

use crate::config::CelexConfig;
use crate::error::{Result, StoreError};
use crate::table::{Entry, Table};

struct Source {
    variant: Variant,
    path: PathBuf,
    text: String,
}

impl Source {
    fn read(config: &CelexConfig, variant: Variant) -> Result<Self> {
        let path = variant.path(&config.root);
        let text = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(variant = variant.tag(), path = %path.display(), bytes = text.len(), "read variant file");
        Ok(Self { variant, path, text })
    }

    /// Surrounding whitespace of a line is not part of any field.
    fn decode(&self, schema: &Schema) -> Result<Vec<RawRecord<'_>>> {
        self.text
            .lines()
            .enumerate()
            .map(|(i, line)| {
                decode_line(line.trim(), schema).map_err(|source| StoreError::Decode {
                    path: self.path.clone(),
                    line: i + 1,
                    source,
                })
            })
            .collect()
    }
}

/// Loads the table `T` lives in from every selected variant file.
pub fn load_table<T: Entry>(config: &CelexConfig, registry: &Registry) -> Result<Table<T>> {
    let table = T::TABLE;
    let span = info_span!("load_table", %table);
    let _enter = span.enter();

    let sources = config
        .variants(table)
        .into_iter()
        .map(|variant| Source::read(config, variant))
        .collect::<Result<Vec<_>>>()?;
    let first = sources.first().ok_or(StoreError::NoVariants { table })?;

    let mut merged: Option<Vec<RawRecord<'_>>> = None;
    for source in &sources {
        let records = source.decode(registry.schema(source.variant))?;
        debug!(variant = source.variant.tag(), records = records.len(), "decoded variant file");
        match merged.as_mut() {
            None => merged = Some(records),
            Some(base) => {
                if base.len() != records.len() {
                    return Err(StoreError::TableMisalignment {
                        table,
                        path: source.path.clone(),
                        expected: base.len(),
                        actual: records.len(),
                    });
                }
                for (record, overlay) in base.iter_mut().zip(records) {
                    record.merge(overlay);
                }
            }
        }
    }

    let layout = T::KIND.layout();
    let records = merged
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            materialize(raw, layout)
                .and_then(T::from_decoded)
                .map_err(|source| {
                    let origin = origin(&sources, registry, &source).unwrap_or(first);
                    StoreError::Record {
                        table,
                        index,
                        variant: origin.variant.tag(),
                        path: origin.path.clone(),
                        line: index + 1,
                        source,
                    }
                })
        })
        .collect::<Result<Vec<T>>>()?;

    let loaded = Table::build(records)?;
    info!(
        records = loaded.len(),
        forms = loaded.distinct_forms(),
        files = sources.len(),
        "loaded table"
    );
    Ok(loaded)
}

/// The file whose text a failing column was decoded from. On a collision the
/// later file wins the merge, so the search runs back to front.
fn origin<'s>(sources: &'s [Source], registry: &Registry, error: &DecodeError) -> Option<&'s Source> {
    let field = error.field()?;
    sources
        .iter()
        .rev()
        .find(|source| registry.schema(source.variant).declares(field))
}
