use celex_protocol::RecordKind;
use thiserror::Error;

/// Field- and line-level decode failures. Each one aborts the load in progress.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The line does not have the number of fields its variant requires.
    #[error("{variant} line has {actual} fields, expected {expected}")]
    SchemaMismatch {
        variant: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("field {field}: expected Y or N, found {value:?}")]
    InvalidBoolean { field: &'static str, value: String },

    #[error("field {field} of {record} records: unknown code {code:?}")]
    UnknownCode {
        record: RecordKind,
        field: &'static str,
        code: String,
    },

    #[error("field {field}: expected a single character code, found {value:?}")]
    UnexpectedCardinality { field: &'static str, value: String },

    #[error("field {field}: malformed number {value:?}")]
    MalformedNumber { field: &'static str, value: String },

    /// Raw fields the record kind does not declare; the registry and the
    /// file format have drifted apart.
    #[error("{record} record has unconverted fields: {}", .fields.join(", "))]
    UnconvertedFields {
        record: RecordKind,
        fields: Vec<&'static str>,
    },

    #[error("field {field} of {record} records decoded as {found}, expected {expected}")]
    KindMismatch {
        record: RecordKind,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{record} record is missing required field {field}")]
    MissingField {
        record: RecordKind,
        field: &'static str,
    },
}

impl DecodeError {
    /// The single column an error is about, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DecodeError::InvalidBoolean { field, .. }
            | DecodeError::UnknownCode { field, .. }
            | DecodeError::UnexpectedCardinality { field, .. }
            | DecodeError::MalformedNumber { field, .. }
            | DecodeError::KindMismatch { field, .. }
            | DecodeError::MissingField { field, .. } => Some(*field),
            DecodeError::SchemaMismatch { .. } | DecodeError::UnconvertedFields { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_of_error() {
        let unknown = DecodeError::UnknownCode {
            record: RecordKind::Lemma,
            field: "MorphStatus",
            code: "q".to_string(),
        };
        assert_eq!(unknown.field(), Some("MorphStatus"));

        let drift = DecodeError::UnconvertedFields {
            record: RecordKind::Parse,
            fields: vec!["Stress", "Tone"],
        };
        assert_eq!(drift.field(), None);
    }
}
