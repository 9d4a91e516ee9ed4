pub mod assemble;
pub mod error;
pub mod line;
pub mod materialize;
pub mod raw;

#[cfg(test)]
mod testing;

pub use assemble::FromDecoded;
pub use error::DecodeError;
pub use line::{decode_line, repeat_count, split_fields, DELIMITER};
pub use materialize::{decode_value, materialize, DecodedRecord, Value};
pub use raw::{RawFields, RawRecord};

use celex_protocol::Schema;

/// Primary entry point for single-file records: Line -> Raw -> Decoded -> Typed.
///
/// Tables assembled from several files decode each line with [`decode_line`]
/// and merge the raw records before materializing them.
pub fn parse_line<T: FromDecoded>(line: &str, schema: &Schema) -> Result<T, DecodeError> {
    let raw = decode_line(line, schema)?;
    let decoded = materialize(&raw, T::KIND.layout())?;
    T::from_decoded(decoded)
}
