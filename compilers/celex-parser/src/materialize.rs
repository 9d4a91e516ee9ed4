//! Typed decoding of raw fields, driven by the field descriptors of a layout.

use std::collections::BTreeMap;

use celex_protocol::{FieldDescriptor, FieldKind, RecordKind, RecordLayout};

use crate::error::DecodeError;
use crate::raw::{RawFields, RawRecord};

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Label(&'static str),
    Labels(Vec<&'static str>),
    Segments(Vec<&'a str>),
}

impl Value<'_> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Label(_) => "label",
            Value::Labels(_) => "label list",
            Value::Segments(_) => "segments",
        }
    }
}

/// A record whose fields have all been decoded, nested groups included.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord<'a> {
    pub kind: RecordKind,
    pub values: BTreeMap<&'static str, Value<'a>>,
    pub groups: BTreeMap<&'static str, Vec<DecodedRecord<'a>>>,
}

impl<'a> DecodedRecord<'a> {
    pub fn get(&self, name: &str) -> Option<&Value<'a>> {
        self.values.get(name)
    }

    pub fn group(&self, key: &str) -> &[DecodedRecord<'a>] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Decodes one raw field according to its descriptor.
pub fn decode_value<'a>(
    record: RecordKind,
    field: &FieldDescriptor,
    raw: &'a str,
) -> Result<Value<'a>, DecodeError> {
    let value = match field.kind {
        FieldKind::Text => Value::Text(raw),
        FieldKind::Integer => Value::Integer(raw.parse().map_err(|_| malformed(field, raw))?),
        FieldKind::Float => Value::Float(raw.parse().map_err(|_| malformed(field, raw))?),
        FieldKind::Boolean => match raw {
            "Y" => Value::Boolean(true),
            "N" => Value::Boolean(false),
            _ => {
                return Err(DecodeError::InvalidBoolean {
                    field: field.name,
                    value: raw.to_string(),
                })
            }
        },
        FieldKind::Code(table) => {
            if raw.chars().count() > 1 {
                return Err(DecodeError::UnexpectedCardinality {
                    field: field.name,
                    value: raw.to_string(),
                });
            }
            Value::Label(table.label(raw).ok_or_else(|| unknown(record, field, raw))?)
        }
        FieldKind::NumCode(table) => {
            let code: u32 = raw.parse().map_err(|_| malformed(field, raw))?;
            Value::Label(table.label(code).ok_or_else(|| unknown(record, field, raw))?)
        }
        FieldKind::CodeList(table) => Value::Labels(
            raw.chars()
                .map(|code| {
                    table
                        .label_char(code)
                        .ok_or_else(|| unknown(record, field, code.encode_utf8(&mut [0u8; 4])))
                })
                .collect::<Result<_, _>>()?,
        ),
        FieldKind::Segments => Value::Segments(raw.split('+').collect()),
    };
    Ok(value)
}

fn malformed(field: &FieldDescriptor, raw: &str) -> DecodeError {
    DecodeError::MalformedNumber {
        field: field.name,
        value: raw.to_string(),
    }
}

fn unknown(record: RecordKind, field: &FieldDescriptor, code: &str) -> DecodeError {
    DecodeError::UnknownCode {
        record,
        field: field.name,
        code: code.to_string(),
    }
}

/// Decodes every field of `raw` the layout declares, recursing into groups.
///
/// Anything the layout does not declare is reported as
/// [`DecodeError::UnconvertedFields`] rather than dropped.
pub fn materialize<'a>(
    raw: &RawRecord<'a>,
    layout: &RecordLayout,
) -> Result<DecodedRecord<'a>, DecodeError> {
    let mut record = materialize_fields(&raw.fields, layout)?;

    let mut leftover = Vec::new();
    for (&key, members) in &raw.groups {
        let Some(group) = layout.group(key) else {
            leftover.push(key);
            continue;
        };
        let decoded = members
            .iter()
            .map(|member| materialize_fields(member, group))
            .collect::<Result<Vec<_>, _>>()?;
        record.groups.insert(key, decoded);
    }

    if !leftover.is_empty() {
        return Err(DecodeError::UnconvertedFields {
            record: layout.kind,
            fields: leftover,
        });
    }
    Ok(record)
}

fn materialize_fields<'a>(
    fields: &RawFields<'a>,
    layout: &RecordLayout,
) -> Result<DecodedRecord<'a>, DecodeError> {
    let mut values = BTreeMap::new();
    for field in layout.descriptors() {
        if let Some(raw) = fields.get(field.name) {
            values.insert(field.name, decode_value(layout.kind, field, raw)?);
        }
    }

    let leftover: Vec<&'static str> = fields
        .keys()
        .filter(|name| !values.contains_key(*name))
        .copied()
        .collect();
    if !leftover.is_empty() {
        return Err(DecodeError::UnconvertedFields {
            record: layout.kind,
            fields: leftover,
        });
    }

    Ok(DecodedRecord {
        kind: layout.kind,
        values,
        groups: BTreeMap::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::decode_line;
    use crate::testing::{toy_schema, TOY_LAYOUT};
    use celex_protocol::schema::{LEMMA_LAYOUT, PARSE_LAYOUT, WORDFORM_LAYOUT};
    use proptest::prelude::*;

    fn field(layout: &RecordLayout, name: &str) -> &'static FieldDescriptor {
        layout.field(name).unwrap()
    }

    #[test]
    fn test_villa_record() {
        let schema = toy_schema();
        let raw = decode_line(r"1\villa\12\M\\1\Y\N", &schema).unwrap();
        let record = materialize(&raw, &TOY_LAYOUT).unwrap();

        assert_eq!(record.get("Id"), Some(&Value::Integer(1)));
        assert_eq!(record.get("Head"), Some(&Value::Text("villa")));
        assert_eq!(record.get("Freq"), Some(&Value::Integer(12)));
        assert_eq!(record.get("StatusCode"), Some(&Value::Label("monomorphemic")));
        assert_eq!(record.get("Lang"), Some(&Value::Label("")));
        assert_eq!(record.get("Count"), Some(&Value::Integer(1)));

        let parses = record.group("Parses");
        assert_eq!(parses.len(), 1);
        assert_eq!(parses[0].get("FlagA"), Some(&Value::Boolean(true)));
        assert_eq!(parses[0].get("FlagB"), Some(&Value::Boolean(false)));
    }

    #[test]
    fn test_invalid_boolean() {
        let schema = toy_schema();
        let raw = decode_line(r"1\villa\12\M\\1\Q\N", &schema).unwrap();
        assert_eq!(
            materialize(&raw, &TOY_LAYOUT),
            Err(DecodeError::InvalidBoolean {
                field: "FlagA",
                value: "Q".to_string()
            })
        );
    }

    #[test]
    fn test_code_fields() {
        let status = field(&LEMMA_LAYOUT, "MorphStatus");
        assert_eq!(
            decode_value(RecordKind::Lemma, status, "Z"),
            Ok(Value::Label("zero_derivation"))
        );
        assert_eq!(
            decode_value(RecordKind::Lemma, status, "ZM"),
            Err(DecodeError::UnexpectedCardinality {
                field: "MorphStatus",
                value: "ZM".to_string()
            })
        );
        assert_eq!(
            decode_value(RecordKind::Lemma, status, "q"),
            Err(DecodeError::UnknownCode {
                record: RecordKind::Lemma,
                field: "MorphStatus",
                code: "q".to_string()
            })
        );
    }

    #[test]
    fn test_numeric_code() {
        let class = field(&LEMMA_LAYOUT, "ClassNum");
        assert_eq!(decode_value(RecordKind::Lemma, class, "4"), Ok(Value::Label("verb")));
        assert!(matches!(
            decode_value(RecordKind::Lemma, class, "99"),
            Err(DecodeError::UnknownCode { .. })
        ));
        assert!(matches!(
            decode_value(RecordKind::Lemma, class, "verb"),
            Err(DecodeError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn test_code_list_keeps_order_and_duplicates() {
        let flect = field(&WORDFORM_LAYOUT, "FlectType");
        assert_eq!(
            decode_value(RecordKind::Wordform, flect, "a1S"),
            Ok(Value::Labels(vec!["past_tense", "1st_person_verb", "singular"]))
        );
        assert_eq!(
            decode_value(RecordKind::Wordform, flect, "PP"),
            Ok(Value::Labels(vec!["plural", "plural"]))
        );
        assert_eq!(decode_value(RecordKind::Wordform, flect, ""), Ok(Value::Labels(vec![])));
        assert_eq!(
            decode_value(RecordKind::Wordform, flect, "Sz"),
            Err(DecodeError::UnknownCode {
                record: RecordKind::Wordform,
                field: "FlectType",
                code: "z".to_string()
            })
        );
    }

    #[test]
    fn test_numbers_and_segments() {
        let log = field(&LEMMA_LAYOUT, "CobLog");
        assert_eq!(decode_value(RecordKind::Lemma, log, "1.25"), Ok(Value::Float(1.25)));
        assert!(matches!(
            decode_value(RecordKind::Lemma, log, "1,25"),
            Err(DecodeError::MalformedNumber { field: "CobLog", .. })
        ));

        let cob = field(&LEMMA_LAYOUT, "Cob");
        assert!(matches!(
            decode_value(RecordKind::Lemma, cob, ""),
            Err(DecodeError::MalformedNumber { field: "Cob", .. })
        ));

        let imm = field(&PARSE_LAYOUT, "Imm");
        assert_eq!(
            decode_value(RecordKind::Parse, imm, "sand+bank"),
            Ok(Value::Segments(vec!["sand", "bank"]))
        );
    }

    #[test]
    fn test_unconverted_fields() {
        let raw = RawRecord::new(BTreeMap::from([("IdNum", "1"), ("Head", "a"), ("Bogus", "x")]));
        assert_eq!(
            materialize(&raw, &LEMMA_LAYOUT),
            Err(DecodeError::UnconvertedFields {
                record: RecordKind::Lemma,
                fields: vec!["Bogus"]
            })
        );

        let mut grouped = RawRecord::new(BTreeMap::from([("IdNum", "1")]));
        grouped.groups.insert("Parses", vec![BTreeMap::from([("Def", "Y")])]);
        assert!(materialize(&grouped, &WORDFORM_LAYOUT).is_err());
    }

    proptest! {
        #[test]
        fn test_boolean_is_a_closed_map(raw in "\\PC{0,3}") {
            let flag = field(&PARSE_LAYOUT, "Def");
            let decoded = decode_value(RecordKind::Parse, flag, &raw);
            match raw.as_str() {
                "Y" => prop_assert_eq!(decoded, Ok(Value::Boolean(true))),
                "N" => prop_assert_eq!(decoded, Ok(Value::Boolean(false))),
                _ => prop_assert_eq!(
                    decoded,
                    Err(DecodeError::InvalidBoolean { field: "Def", value: raw.clone() })
                ),
            }
        }
    }
}
