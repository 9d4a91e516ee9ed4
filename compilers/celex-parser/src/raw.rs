use std::collections::BTreeMap;

use celex_protocol::FieldDescriptor;

/// Raw text of one record's fields, keyed by field name.
pub type RawFields<'a> = BTreeMap<&'static str, &'a str>;

/// Undecoded record: flat fields plus repeat groups under their reserved key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub fields: RawFields<'a>,
    pub groups: BTreeMap<&'static str, Vec<RawFields<'a>>>,
}

impl<'a> RawRecord<'a> {
    pub fn new(fields: RawFields<'a>) -> Self {
        Self {
            fields,
            groups: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.fields.get(name).copied()
    }

    pub fn group(&self, key: &str) -> &[RawFields<'a>] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Unions the columns of another physical file into this record.
    /// Fields of `other` win on collision.
    pub fn merge(&mut self, other: RawRecord<'a>) {
        self.fields.extend(other.fields);
        self.groups.extend(other.groups);
    }
}

/// Pairs descriptors with raw values positionally.
pub fn zip_fields<'a>(descriptors: &[FieldDescriptor], values: &[&'a str]) -> RawFields<'a> {
    descriptors
        .iter()
        .zip(values.iter())
        .map(|(field, value)| (field.name, *value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_unions_fields_and_groups() {
        let mut morphology = RawRecord::new(BTreeMap::from([("IdNum", "1"), ("MorphCnt", "1")]));
        morphology
            .groups
            .insert("Parses", vec![BTreeMap::from([("Imm", "villa")])]);

        let mut phonology = RawRecord::new(BTreeMap::from([("IdNum", "1"), ("PronCnt", "1")]));
        phonology
            .groups
            .insert("Prons", vec![BTreeMap::from([("PronStatus", "P")])]);

        morphology.merge(phonology);

        assert_eq!(morphology.fields.len(), 3);
        assert_eq!(morphology.get("PronCnt"), Some("1"));
        assert_eq!(morphology.group("Parses").len(), 1);
        assert_eq!(morphology.group("Prons").len(), 1);
        assert!(morphology.group("Missing").is_empty());
    }
}
