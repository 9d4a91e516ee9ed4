//! Small hand-written layout shared by the unit tests.

use celex_protocol::codes::CodeTable;
use celex_protocol::{FieldDescriptor, FieldKind, GroupLayout, RecordKind, RecordLayout, Repeat, Schema};

pub static STATUS: CodeTable = CodeTable {
    record: RecordKind::Lemma,
    field: "StatusCode",
    entries: &[("M", "monomorphemic"), ("C", "complex")],
};

pub static LANGS: CodeTable = CodeTable {
    record: RecordKind::Lemma,
    field: "Lang",
    entries: &[("", ""), ("L", "Latin")],
};

pub static BASE: [FieldDescriptor; 6] = [
    FieldDescriptor::new("Id", FieldKind::Integer, ""),
    FieldDescriptor::new("Head", FieldKind::Text, ""),
    FieldDescriptor::new("Freq", FieldKind::Integer, ""),
    FieldDescriptor::new("StatusCode", FieldKind::Code(&STATUS), ""),
    FieldDescriptor::new("Lang", FieldKind::Code(&LANGS), ""),
    FieldDescriptor::new("Count", FieldKind::Integer, ""),
];

pub static UNIT: [FieldDescriptor; 2] = [
    FieldDescriptor::new("FlagA", FieldKind::Boolean, ""),
    FieldDescriptor::new("FlagB", FieldKind::Boolean, ""),
];

pub static UNIT_LAYOUT: RecordLayout = RecordLayout {
    kind: RecordKind::Parse,
    fields: &UNIT,
    frequency: false,
    groups: &[],
};

pub static TOY_LAYOUT: RecordLayout = RecordLayout {
    kind: RecordKind::Lemma,
    fields: &BASE,
    frequency: false,
    groups: &[GroupLayout {
        key: "Parses",
        layout: &UNIT_LAYOUT,
    }],
};

pub fn toy_schema() -> Schema {
    Schema {
        tag: "toy",
        record: RecordKind::Lemma,
        base: BASE.to_vec(),
        repeat: Some(Repeat {
            key: "Parses",
            record: RecordKind::Parse,
            count_field: "Count",
            unit: UNIT.to_vec(),
            cap: 4,
        }),
    }
}
