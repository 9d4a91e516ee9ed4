//! Enumerated-code tables.
//!
//! Every table is owned by exactly one `(RecordKind, field)` pair, so two
//! fields that happen to share a name in different record kinds never share a
//! table. Field descriptors hold a direct reference to their table.

use crate::schema::RecordKind;

/// String code → label table used by `Code` and `CodeList` fields.
#[derive(Debug, PartialEq, Eq)]
pub struct CodeTable {
    pub record: RecordKind,
    pub field: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

impl CodeTable {
    pub fn label(&self, code: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, label)| *label)
    }

    /// Lookup of a single character code, as used by list-valued fields.
    pub fn label_char(&self, code: char) -> Option<&'static str> {
        let mut buf = [0u8; 4];
        self.label(code.encode_utf8(&mut buf))
    }
}

/// Integer code → label table used by `NumCode` fields.
#[derive(Debug, PartialEq, Eq)]
pub struct NumberTable {
    pub record: RecordKind,
    pub field: &'static str,
    pub entries: &'static [(u32, &'static str)],
}

impl NumberTable {
    pub fn label(&self, code: u32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, label)| *label)
    }
}

pub static CLASS_NUM: NumberTable = NumberTable {
    record: RecordKind::Lemma,
    field: "ClassNum",
    entries: &[
        (1, "noun"),
        (2, "adjective"),
        (3, "number"),
        (4, "verb"),
        (5, "article"),
        (6, "pronoun"),
        (7, "adverb"),
        (8, "preposition"),
        (9, "conjunction"),
        (10, "interjection"),
        (11, "single_contraction"),
        (12, "complex_contraction"),
        // 13-15 occur in the data but are undocumented.
        (13, "?"),
        (14, "??"),
        (15, "???"),
    ],
};

pub static MORPH_STATUS: CodeTable = CodeTable {
    record: RecordKind::Lemma,
    field: "MorphStatus",
    entries: &[
        ("C", "complex"),
        ("M", "monomorphemic"),
        ("Z", "zero_derivation"),
        ("F", "contracted"),
        ("I", "irrelevant"),
        ("O", "obscure"),
        ("R", "may_include_a_root"),
        ("U", "undetermined"),
    ],
};

pub static LANG: CodeTable = CodeTable {
    record: RecordKind::Lemma,
    field: "Lang",
    entries: &[
        ("A", "American"),
        ("F", "French"),
        ("B", "British"),
        ("D", "German"),
        ("G", "Greek"),
        ("I", "Italian"),
        ("S", "Spanish"),
        ("L", "Latin"),
        ("", ""),
    ],
};

pub static FLECT_TYPE: CodeTable = CodeTable {
    record: RecordKind::Wordform,
    field: "FlectType",
    entries: &[
        ("S", "singular"),
        ("P", "plural"),
        ("b", "positive"),
        ("c", "comparative"),
        ("s", "superlative"),
        ("i", "infinitive"),
        ("p", "participle"),
        ("e", "present_tense"),
        ("a", "past_tense"),
        ("1", "1st_person_verb"),
        ("2", "2nd_person_verb"),
        ("3", "3rd_person_verb"),
        ("r", "rare_form"),
        ("X", "headword_form"),
    ],
};

const STEM_AFFIX: &[(&str, &str)] = &[("S", "stem"), ("A", "affix"), ("F", "inflected_stem")];

const ALLOMORPHY: &[(&str, &str)] = &[
    ("B", "blend"),
    ("C", "clipping"),
    ("D", "derivational"),
    ("F", "flectional"),
    ("Z", "conversion"),
    ("N", "none"),
];

pub static FLAT_SA: CodeTable = CodeTable {
    record: RecordKind::Parse,
    field: "FlatSA",
    entries: STEM_AFFIX,
};

pub static IMM_SA: CodeTable = CodeTable {
    record: RecordKind::Parse,
    field: "ImmSA",
    entries: STEM_AFFIX,
};

pub static IMM_ALLO: CodeTable = CodeTable {
    record: RecordKind::Parse,
    field: "ImmAllo",
    entries: ALLOMORPHY,
};

pub static STRUC_ALLO: CodeTable = CodeTable {
    record: RecordKind::Parse,
    field: "StrucAllo",
    entries: ALLOMORPHY,
};

pub static IMM_SUB_CAT: CodeTable = CodeTable {
    record: RecordKind::Parse,
    field: "ImmSubCat",
    entries: &[
        ("N", "noun"),
        ("A", "adjective"),
        ("Q", "numeral"),
        ("0", "unmarked_transitivity_verb"),
        ("1", "intrans_verb"),
        ("2", "trans_verb"),
        ("3", "trans_and_intrans_verb"),
        ("D", "article"),
        ("O", "pronoun"),
        ("B", "adverb"),
        ("P", "preposition"),
        ("C", "conjunction"),
        ("I", "interjection"),
        ("S", "single_contraction"),
        ("T", "complex_contraction"),
        ("x", "affix"),
        ("?", "?"),
    ],
};

pub static PRON_STATUS: CodeTable = CodeTable {
    record: RecordKind::Pronunciation,
    field: "PronStatus",
    entries: &[("P", "Primary"), ("S", "Secondary")],
};

static CODE_TABLES: &[&CodeTable] = &[
    &MORPH_STATUS,
    &LANG,
    &FLECT_TYPE,
    &FLAT_SA,
    &IMM_SA,
    &IMM_ALLO,
    &STRUC_ALLO,
    &IMM_SUB_CAT,
    &PRON_STATUS,
];

static NUMBER_TABLES: &[&NumberTable] = &[&CLASS_NUM];

/// Finds the string-code table of `field` in records of kind `record`.
pub fn code_table(record: RecordKind, field: &str) -> Option<&'static CodeTable> {
    CODE_TABLES
        .iter()
        .copied()
        .find(|table| table.record == record && table.field == field)
}

/// Finds the integer-code table of `field` in records of kind `record`.
pub fn number_table(record: RecordKind, field: &str) -> Option<&'static NumberTable> {
    NUMBER_TABLES
        .iter()
        .copied()
        .find(|table| table.record == record && table.field == field)
}
