//! Field descriptors, record layouts and the file-variant registry.

use alloc::vec::Vec;
use core::fmt;

use crate::codes::{self, CodeTable, NumberTable};
use FieldKind::{Boolean, Code, CodeList, Float, Integer, NumCode, Segments, Text};

/// The four kinds of record the database is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Lemma,
    Wordform,
    Parse,
    Pronunciation,
}

impl RecordKind {
    pub const fn name(self) -> &'static str {
        match self {
            RecordKind::Lemma => "lemma",
            RecordKind::Wordform => "wordform",
            RecordKind::Parse => "parse",
            RecordKind::Pronunciation => "pronunciation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [RecordKind::Lemma, RecordKind::Wordform, RecordKind::Parse, RecordKind::Pronunciation]
            .into_iter()
            .find(|kind| kind.name() == name)
    }

    /// Documentation of a column of this record kind, nested groups included.
    pub fn field_doc(self, name: &str) -> Option<&'static str> {
        self.layout().doc(name)
    }

    pub fn layout(self) -> &'static RecordLayout {
        match self {
            RecordKind::Lemma => &LEMMA_LAYOUT,
            RecordKind::Wordform => &WORDFORM_LAYOUT,
            RecordKind::Parse => &PARSE_LAYOUT,
            RecordKind::Pronunciation => &PRONUNCIATION_LAYOUT,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two logical tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Lemmas,
    Wordforms,
}

impl TableKind {
    pub const fn record(self) -> RecordKind {
        match self {
            TableKind::Lemmas => RecordKind::Lemma,
            TableKind::Wordforms => RecordKind::Wordform,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Lemmas => f.write_str("lemmas"),
            TableKind::Wordforms => f.write_str("wordforms"),
        }
    }
}

/// Sub-databases; each contributes columns to the logical tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Database {
    Syntax,
    Morphology,
    Frequency,
    Phonology,
}

impl Database {
    pub const ALL: [Database; 4] = [
        Database::Syntax,
        Database::Morphology,
        Database::Frequency,
        Database::Phonology,
    ];

    pub const fn code(self) -> char {
        match self {
            Database::Syntax => 's',
            Database::Morphology => 'm',
            Database::Frequency => 'f',
            Database::Phonology => 'p',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|db| db.code() == code)
    }
}

/// One physical file kind: a `(database, table)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Efl,
    Esl,
    Eml,
    Epl,
    Efw,
    Emw,
    Epw,
}

impl Variant {
    pub const ALL: [Variant; 7] = [
        Variant::Efl,
        Variant::Esl,
        Variant::Eml,
        Variant::Epl,
        Variant::Efw,
        Variant::Emw,
        Variant::Epw,
    ];

    /// The variant holding `table` columns of `db`; the syntax database has
    /// no wordform file.
    pub const fn of(db: Database, table: TableKind) -> Option<Self> {
        match (db, table) {
            (Database::Frequency, TableKind::Lemmas) => Some(Variant::Efl),
            (Database::Syntax, TableKind::Lemmas) => Some(Variant::Esl),
            (Database::Morphology, TableKind::Lemmas) => Some(Variant::Eml),
            (Database::Phonology, TableKind::Lemmas) => Some(Variant::Epl),
            (Database::Frequency, TableKind::Wordforms) => Some(Variant::Efw),
            (Database::Syntax, TableKind::Wordforms) => None,
            (Database::Morphology, TableKind::Wordforms) => Some(Variant::Emw),
            (Database::Phonology, TableKind::Wordforms) => Some(Variant::Epw),
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Variant::Efl => "efl",
            Variant::Esl => "esl",
            Variant::Eml => "eml",
            Variant::Epl => "epl",
            Variant::Efw => "efw",
            Variant::Emw => "emw",
            Variant::Epw => "epw",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.tag() == tag)
    }

    pub const fn table(self) -> TableKind {
        match self {
            Variant::Efl | Variant::Esl | Variant::Eml | Variant::Epl => TableKind::Lemmas,
            Variant::Efw | Variant::Emw | Variant::Epw => TableKind::Wordforms,
        }
    }

    /// Path of the `.cd` file relative to the database root, e.g. `eml/eml.cd`.
    #[cfg(feature = "std")]
    pub fn path(self, root: &std::path::Path) -> std::path::PathBuf {
        let tag = self.tag();
        root.join(tag).join(alloc::format!("{tag}.cd"))
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// How the raw text of a field is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    /// `Y` / `N`.
    Boolean,
    /// One character looked up in a code table.
    Code(&'static CodeTable),
    /// An integer looked up in a code table.
    NumCode(&'static NumberTable),
    /// Every character looked up in a code table, in order.
    CodeList(&'static CodeTable),
    /// `+`-separated morphemes.
    Segments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub doc: &'static str,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind, doc: &'static str) -> Self {
        Self { name, kind, doc }
    }
}

/// Field universe of a record kind plus its nested sub-record groups.
#[derive(Debug)]
pub struct RecordLayout {
    pub kind: RecordKind,
    pub fields: &'static [FieldDescriptor],
    /// Whether the shared frequency block belongs to the universe.
    pub frequency: bool,
    pub groups: &'static [GroupLayout],
}

impl RecordLayout {
    pub fn descriptors(&self) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
        let shared: &'static [FieldDescriptor] = if self.frequency { &FREQUENCY_FIELDS } else { &[] };
        self.fields.iter().chain(shared.iter())
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.descriptors().find(|field| field.name == name)
    }

    pub fn group(&self, key: &str) -> Option<&'static RecordLayout> {
        self.groups.iter().find(|group| group.key == key).map(|group| group.layout)
    }

    pub fn doc(&self, name: &str) -> Option<&'static str> {
        self.field(name)
            .map(|field| field.doc)
            .or_else(|| self.groups.iter().find_map(|group| group.layout.doc(name)))
    }
}

#[derive(Debug)]
pub struct GroupLayout {
    pub key: &'static str,
    pub layout: &'static RecordLayout,
}

/// Reserved sub-record key for morphological parses.
pub const PARSES: &str = "Parses";
/// Reserved sub-record key for pronunciations.
pub const PRONS: &str = "Prons";


static FREQUENCY_FIELDS: [FieldDescriptor; 10] = [
    FieldDescriptor::new("Cob", Integer, "Frequency in the COBUILD corpus (17.9m words)"),
    FieldDescriptor::new("CobDev", Integer, "Deviation of the estimate when disambiguation was not done by hand"),
    FieldDescriptor::new("CobMln", Integer, "Frequency per million words"),
    FieldDescriptor::new("CobLog", Float, "Base 10 logarithm of frequency per million words"),
    FieldDescriptor::new("CobW", Integer, "Frequency in the written part of the corpus (16.6m words)"),
    FieldDescriptor::new("CobWMln", Integer, "Frequency per million words in the written part"),
    FieldDescriptor::new("CobWLog", Float, "Base 10 logarithm of written frequency per million words"),
    FieldDescriptor::new("CobS", Integer, "Frequency in the spoken part of the corpus (1.3m words)"),
    FieldDescriptor::new("CobSMln", Integer, "Frequency per million words in the spoken part"),
    FieldDescriptor::new("CobSLog", Float, "Base 10 logarithm of spoken frequency per million words"),
];

static LEMMA_FIELDS: [FieldDescriptor; 50] = [
    FieldDescriptor::new("IdNum", Integer, "Lemma identifier"),
    FieldDescriptor::new("Head", Text, "Headword"),
    FieldDescriptor::new("ClassNum", NumCode(&codes::CLASS_NUM), "Syntactic category"),
    FieldDescriptor::new("MorphStatus", Code(&codes::MORPH_STATUS), "Morphological status"),
    FieldDescriptor::new("Lang", Code(&codes::LANG), "Language of origin"),
    FieldDescriptor::new("MorphCnt", Integer, "Number of morphological analyses"),
    FieldDescriptor::new("PronCnt", Integer, "Number of pronunciations"),
    FieldDescriptor::new("C_N", Boolean, "Countable noun"),
    FieldDescriptor::new("Unc_N", Boolean, "Uncountable noun"),
    FieldDescriptor::new("Sing_N", Boolean, "Noun that only occurs in the singular"),
    FieldDescriptor::new("Plu_N", Boolean, "Noun that only occurs in a plural form"),
    FieldDescriptor::new("GrC_N", Boolean, "Collective noun with singular and plural forms (government)"),
    FieldDescriptor::new("GrUnc_N", Boolean, "Collective noun with only a singular form"),
    FieldDescriptor::new("Attr_N", Boolean, "Noun usable attributively (machine translation)"),
    FieldDescriptor::new("PostPos_N", Boolean, "Postpositive noun (forty two proof)"),
    FieldDescriptor::new("Voc_N", Boolean, "Vocative noun (chicken!)"),
    FieldDescriptor::new("Proper_N", Boolean, "Proper noun"),
    FieldDescriptor::new("Exp_N", Boolean, "Noun limited to a single phrase (loggerheads)"),
    FieldDescriptor::new("Trans_V", Boolean, "Transitive verb"),
    FieldDescriptor::new("TransComp_V", Boolean, "Transitive verb with complement (find someone guilty)"),
    FieldDescriptor::new("Intrans_V", Boolean, "Intransitive verb"),
    FieldDescriptor::new("Ditrans_V", Boolean, "Ditransitive verb"),
    FieldDescriptor::new("Link_V", Boolean, "Linking verb (be)"),
    FieldDescriptor::new("Phr_V", Boolean, "Phrasal verb (speak out)"),
    FieldDescriptor::new("Prep_V", Boolean, "Verb with preposition (minister to)"),
    FieldDescriptor::new("PhrPrep_V", Boolean, "Phrasal verb with preposition (walk away with)"),
    FieldDescriptor::new("Exp_V", Boolean, "Verb limited to a single phrase (toe the line)"),
    FieldDescriptor::new("Ord_A", Boolean, "Ordinary adjective, attributive and predicative"),
    FieldDescriptor::new("Attr_A", Boolean, "Adjective that is only attributive in some contexts (sheer nonsense)"),
    FieldDescriptor::new("Pred_A", Boolean, "Predicative adjective (awake)"),
    FieldDescriptor::new("PostPos_A", Boolean, "Postpositive adjective (life everlasting)"),
    FieldDescriptor::new("Exp_A", Boolean, "Adjective limited to a single phrase (bated breath)"),
    FieldDescriptor::new("Ord_ADV", Boolean, "Ordinary adverb"),
    FieldDescriptor::new("Pred_ADV", Boolean, "Predicative adverb (adrift)"),
    FieldDescriptor::new("PostPos_ADV", Boolean, "Postpositive adverb (the boat is adrift)"),
    FieldDescriptor::new("Comb_ADV", Boolean, "Adverb combining with an adverb or preposition (all alone)"),
    FieldDescriptor::new("Exp_ADV", Boolean, "Adverb limited to a single phrase (run amok)"),
    FieldDescriptor::new("Card_NUM", Boolean, "Cardinal number"),
    FieldDescriptor::new("Ord_NUM", Boolean, "Ordinal number"),
    FieldDescriptor::new("Exp_NUM", Boolean, "Number used as part of an expression"),
    FieldDescriptor::new("Pers_PRON", Boolean, "Personal pronoun (he, them)"),
    FieldDescriptor::new("Dem_PRON", Boolean, "Demonstrative pronoun (this)"),
    FieldDescriptor::new("Poss_PRON", Boolean, "Possessive pronoun (her, hers)"),
    FieldDescriptor::new("Refl_PRON", Boolean, "Reflexive pronoun (yourself)"),
    FieldDescriptor::new("Wh_PRON", Boolean, "Wh pronoun (who, howsoever)"),
    FieldDescriptor::new("Det_PRON", Boolean, "Pronoun usable as a determiner"),
    FieldDescriptor::new("Pron_PRON", Boolean, "Pronoun that can replace a noun (mine is better)"),
    FieldDescriptor::new("Exp_PRON", Boolean, "Pronoun used as part of an expression (for aught I know)"),
    FieldDescriptor::new("Cor_C", Boolean, "Coordinating conjunction (and, or, but)"),
    FieldDescriptor::new("Sub_C", Boolean, "Subordinating conjunction (because)"),
];

static WORDFORM_FIELDS: [FieldDescriptor; 7] = [
    FieldDescriptor::new("IdNum", Integer, "Wordform identifier"),
    FieldDescriptor::new("Word", Text, "Wordform spelling"),
    FieldDescriptor::new("Head", Text, "Wordform spelling, as named by the phonology file"),
    FieldDescriptor::new("IdNumLemma", Integer, "Identifier of the parent lemma"),
    FieldDescriptor::new("FlectType", CodeList(&codes::FLECT_TYPE), "Inflectional categories"),
    FieldDescriptor::new("TransInfl", Text, "Inflectional transformation from base to wordform (@-e+ing@)"),
    FieldDescriptor::new("PronCnt", Integer, "Number of pronunciations"),
];

static PARSE_FIELDS: [FieldDescriptor; 19] = [
    FieldDescriptor::new("NVAffComp", Boolean, "Noun-verb-affix compound (typesetter)"),
    FieldDescriptor::new("Der", Boolean, "Noun-verb-affix compound analysed as a derivation"),
    FieldDescriptor::new("Comp", Boolean, "Noun-verb-affix compound analysed as a compound"),
    FieldDescriptor::new("DerComp", Boolean, "Noun-verb-affix compound analysed as a derivational compound"),
    FieldDescriptor::new("Def", Boolean, "Default analysis"),
    FieldDescriptor::new("Imm", Segments, "Immediate segmentation"),
    FieldDescriptor::new("ImmSubCat", CodeList(&codes::IMM_SUB_CAT), "Syntactic categories of constituents"),
    FieldDescriptor::new("ImmSA", CodeList(&codes::IMM_SA), "Stem / affix status of constituents"),
    FieldDescriptor::new("ImmAllo", Code(&codes::IMM_ALLO), "Stem allomorphy (clear -> clarify)"),
    FieldDescriptor::new("ImmSubst", Boolean, "Affix substitution in stem (action -> active)"),
    FieldDescriptor::new("ImmOpac", Boolean, "Morphologically or semantically opaque (accordion)"),
    FieldDescriptor::new("TransDer", Text, "Sound changes in derivation (#-e#)"),
    FieldDescriptor::new("ImmInfix", Boolean, "Infixation (looker-on)"),
    FieldDescriptor::new("ImmRevers", Boolean, "Reversal (offputting)"),
    FieldDescriptor::new("FlatSA", CodeList(&codes::FLAT_SA), "Stem / affix status of the flat segmentation"),
    FieldDescriptor::new("StrucLab", Text, "Structured segmentation with word class labels"),
    FieldDescriptor::new("StrucAllo", CodeList(&codes::STRUC_ALLO), "Stem allomorphy at any level"),
    FieldDescriptor::new("StrucSubst", Boolean, "Affix substitution at any level"),
    FieldDescriptor::new("StrucOpac", Boolean, "Semantic opacity at any level"),
];

static PRONUNCIATION_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::new("PronStatus", Code(&codes::PRON_STATUS), "Primary or secondary pronunciation"),
    FieldDescriptor::new("PhonStrsDISC", Text, "Syllabified and stressed DISC transcription"),
    FieldDescriptor::new("PhonCVBr", Text, "CV pattern with brackets"),
    FieldDescriptor::new("PhonSylBCLX", Text, "Syllabified CELEX transcription with brackets"),
];

pub static PARSE_LAYOUT: RecordLayout = RecordLayout {
    kind: RecordKind::Parse,
    fields: &PARSE_FIELDS,
    frequency: false,
    groups: &[],
};

pub static PRONUNCIATION_LAYOUT: RecordLayout = RecordLayout {
    kind: RecordKind::Pronunciation,
    fields: &PRONUNCIATION_FIELDS,
    frequency: false,
    groups: &[],
};

pub static LEMMA_LAYOUT: RecordLayout = RecordLayout {
    kind: RecordKind::Lemma,
    fields: &LEMMA_FIELDS,
    frequency: true,
    groups: &[
        GroupLayout { key: PARSES, layout: &PARSE_LAYOUT },
        GroupLayout { key: PRONS, layout: &PRONUNCIATION_LAYOUT },
    ],
};

pub static WORDFORM_LAYOUT: RecordLayout = RecordLayout {
    kind: RecordKind::Wordform,
    fields: &WORDFORM_FIELDS,
    frequency: true,
    groups: &[GroupLayout { key: PRONS, layout: &PRONUNCIATION_LAYOUT }],
};

struct RepeatLayout {
    key: &'static str,
    record: RecordKind,
    count_field: &'static str,
    unit: &'static [&'static str],
    cap: usize,
}

struct VariantLayout {
    variant: Variant,
    base: &'static [&'static str],
    repeat: Option<RepeatLayout>,
}

const PARSE_UNIT: &[&str] = &[
    "NVAffComp", "Der", "Comp", "DerComp", "Def", "Imm", "ImmSubCat", "ImmSA", "ImmAllo", "ImmSubst",
    "ImmOpac", "TransDer", "ImmInfix", "ImmRevers", "FlatSA", "StrucLab", "StrucAllo", "StrucSubst",
    "StrucOpac",
];

const PRON_UNIT: &[&str] = &["PronStatus", "PhonStrsDISC", "PhonCVBr", "PhonSylBCLX"];

// Lines of a handful of lemmas (copyholder, leaseholder, potterer, ...) declare
// more parses than the file has room for; only the first MAX_PARSES are kept.
pub const MAX_PARSES: usize = 4;
pub const MAX_LEMMA_PRONS: usize = 24;
pub const MAX_WORDFORM_PRONS: usize = 23;

static VARIANT_LAYOUTS: &[VariantLayout] = &[
    VariantLayout {
        variant: Variant::Efl,
        base: &[
            "IdNum", "Head", "Cob", "CobDev", "CobMln", "CobLog", "CobW", "CobWMln", "CobWLog", "CobS",
            "CobSMln", "CobSLog",
        ],
        repeat: None,
    },
    VariantLayout {
        variant: Variant::Esl,
        base: &[
            "IdNum", "Head", "Cob", "ClassNum", "C_N", "Unc_N", "Sing_N", "Plu_N", "GrC_N", "GrUnc_N",
            "Attr_N", "PostPos_N", "Voc_N", "Proper_N", "Exp_N", "Trans_V", "TransComp_V", "Intrans_V",
            "Ditrans_V", "Link_V", "Phr_V", "Prep_V", "PhrPrep_V", "Exp_V", "Ord_A", "Attr_A", "Pred_A",
            "PostPos_A", "Exp_A", "Ord_ADV", "Pred_ADV", "PostPos_ADV", "Comb_ADV", "Exp_ADV", "Card_NUM",
            "Ord_NUM", "Exp_NUM", "Pers_PRON", "Dem_PRON", "Poss_PRON", "Refl_PRON", "Wh_PRON",
            "Det_PRON", "Pron_PRON", "Exp_PRON", "Cor_C", "Sub_C",
        ],
        repeat: None,
    },
    VariantLayout {
        variant: Variant::Eml,
        base: &["IdNum", "Head", "Cob", "MorphStatus", "Lang", "MorphCnt"],
        repeat: Some(RepeatLayout {
            key: PARSES,
            record: RecordKind::Parse,
            count_field: "MorphCnt",
            unit: PARSE_UNIT,
            cap: MAX_PARSES,
        }),
    },
    VariantLayout {
        variant: Variant::Epl,
        base: &["IdNum", "Head", "Cob", "PronCnt"],
        repeat: Some(RepeatLayout {
            key: PRONS,
            record: RecordKind::Pronunciation,
            count_field: "PronCnt",
            unit: PRON_UNIT,
            cap: MAX_LEMMA_PRONS,
        }),
    },
    VariantLayout {
        variant: Variant::Efw,
        base: &[
            "IdNum", "Word", "IdNumLemma", "Cob", "CobDev", "CobMln", "CobLog", "CobW", "CobWMln",
            "CobWLog", "CobS", "CobSMln", "CobSLog",
        ],
        repeat: None,
    },
    VariantLayout {
        variant: Variant::Emw,
        base: &["IdNum", "Word", "Cob", "IdNumLemma", "FlectType", "TransInfl"],
        repeat: None,
    },
    VariantLayout {
        variant: Variant::Epw,
        base: &["IdNum", "Head", "Cob", "IdNumLemma", "PronCnt"],
        repeat: Some(RepeatLayout {
            key: PRONS,
            record: RecordKind::Pronunciation,
            count_field: "PronCnt",
            unit: PRON_UNIT,
            cap: MAX_WORDFORM_PRONS,
        }),
    },
];

/// Repeating trailing structure of a variable-layout line.
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
    /// Sub-record key the groups are stored under.
    pub key: &'static str,
    pub record: RecordKind,
    /// Base field holding the declared number of groups.
    pub count_field: &'static str,
    pub unit: Vec<FieldDescriptor>,
    pub cap: usize,
}

/// Resolved line layout of one file variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Tag used in diagnostics, e.g. `eml`.
    pub tag: &'static str,
    pub record: RecordKind,
    pub base: Vec<FieldDescriptor>,
    pub repeat: Option<Repeat>,
}

impl Schema {
    /// Position of the repeat count within the base fields.
    pub fn count_position(&self) -> Option<usize> {
        let repeat = self.repeat.as_ref()?;
        self.base.iter().position(|field| field.name == repeat.count_field)
    }

    /// Whether lines of this variant carry `field`, in the base or a repeat group.
    pub fn declares(&self, field: &str) -> bool {
        let unit = self.repeat.as_ref().map(|repeat| repeat.unit.as_slice()).unwrap_or(&[]);
        self.base.iter().chain(unit).any(|descriptor| descriptor.name == field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    MissingVariant(&'static str),
    UnknownField { variant: &'static str, field: &'static str },
    DuplicateField { variant: &'static str, field: &'static str },
    InvalidRepeat { variant: &'static str, reason: &'static str },
    ForeignCodeTable { variant: &'static str, field: &'static str },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MissingVariant(tag) => write!(f, "no layout registered for variant {}", tag),
            SchemaError::UnknownField { variant, field } => {
                write!(f, "variant {} names field {} which its record kind does not declare", variant, field)
            }
            SchemaError::DuplicateField { variant, field } => {
                write!(f, "variant {} lists field {} twice", variant, field)
            }
            SchemaError::InvalidRepeat { variant, reason } => {
                write!(f, "variant {} has an invalid repeat group: {}", variant, reason)
            }
            SchemaError::ForeignCodeTable { variant, field } => {
                write!(f, "field {} of variant {} uses a code table registered for another field", field, variant)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchemaError {}

/// Resolved schemas of every supported variant.
#[derive(Debug, Clone)]
pub struct Registry {
    schemas: Vec<Schema>,
}

impl Registry {
    /// Resolves every variant layout against its record kind, failing on the
    /// first inconsistency.
    pub fn new() -> Result<Self, SchemaError> {
        Self::from_layouts(VARIANT_LAYOUTS)
    }

    fn from_layouts(layouts: &[VariantLayout]) -> Result<Self, SchemaError> {
        let mut schemas = Vec::with_capacity(Variant::ALL.len());
        for variant in Variant::ALL {
            let layout = layouts
                .iter()
                .find(|layout| layout.variant == variant)
                .ok_or(SchemaError::MissingVariant(variant.tag()))?;
            schemas.push(resolve(layout)?);
        }
        Ok(Self { schemas })
    }

    pub fn schema(&self, variant: Variant) -> &Schema {
        &self.schemas[variant.index()]
    }

    /// Schema for a file-variant tag such as `"eml"`.
    pub fn schema_for_tag(&self, tag: &str) -> Option<&Schema> {
        Variant::from_tag(tag).map(|variant| self.schema(variant))
    }
}

fn resolve(layout: &VariantLayout) -> Result<Schema, SchemaError> {
    let tag = layout.variant.tag();
    let record = layout.variant.table().record();
    let base = resolve_fields(tag, record.layout(), layout.base)?;

    let repeat = match &layout.repeat {
        None => None,
        Some(repeat) => {
            if repeat.cap == 0 {
                return Err(SchemaError::InvalidRepeat { variant: tag, reason: "cap is zero" });
            }
            let count = base
                .iter()
                .find(|field| field.name == repeat.count_field)
                .ok_or(SchemaError::InvalidRepeat { variant: tag, reason: "count field is not a base field" })?;
            if count.kind != FieldKind::Integer {
                return Err(SchemaError::InvalidRepeat { variant: tag, reason: "count field is not an integer" });
            }
            if repeat.unit.is_empty() {
                return Err(SchemaError::InvalidRepeat { variant: tag, reason: "repeat unit is empty" });
            }
            match record.layout().group(repeat.key) {
                None => {
                    return Err(SchemaError::InvalidRepeat { variant: tag, reason: "record kind has no such group" })
                }
                Some(group) if group.kind != repeat.record => {
                    return Err(SchemaError::InvalidRepeat { variant: tag, reason: "group holds another record kind" })
                }
                Some(_) => {}
            }
            Some(Repeat {
                key: repeat.key,
                record: repeat.record,
                count_field: repeat.count_field,
                unit: resolve_fields(tag, repeat.record.layout(), repeat.unit)?,
                cap: repeat.cap,
            })
        }
    };

    Ok(Schema { tag, record, base, repeat })
}

fn resolve_fields(
    tag: &'static str,
    layout: &RecordLayout,
    names: &'static [&'static str],
) -> Result<Vec<FieldDescriptor>, SchemaError> {
    let record = layout.kind;
    let mut resolved: Vec<FieldDescriptor> = Vec::with_capacity(names.len());
    for &name in names {
        if resolved.iter().any(|field| field.name == name) {
            return Err(SchemaError::DuplicateField { variant: tag, field: name });
        }
        let field = layout
            .field(name)
            .ok_or(SchemaError::UnknownField { variant: tag, field: name })?;
        // A coded field must use the table registered for its own (kind, field).
        let registered = match field.kind {
            Code(table) | CodeList(table) => {
                codes::code_table(record, name).is_some_and(|own| core::ptr::eq(own, table))
            }
            NumCode(table) => codes::number_table(record, name).is_some_and(|own| core::ptr::eq(own, table)),
            _ => true,
        };
        if !registered {
            return Err(SchemaError::ForeignCodeTable { variant: tag, field: name });
        }
        resolved.push(*field);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::SYNTAX_COLUMNS;

    #[test]
    fn test_registry_resolves_every_variant() {
        let registry = Registry::new().expect("registry should resolve");
        for variant in Variant::ALL {
            let schema = registry.schema(variant);
            assert_eq!(schema.tag, variant.tag());
            assert_eq!(schema.record, variant.table().record());
            assert_eq!(registry.schema_for_tag(variant.tag()), Some(schema));
        }
        assert!(registry.schema_for_tag("exw").is_none());
    }

    #[test]
    fn test_fixed_layout_widths() {
        let registry = Registry::new().unwrap();
        assert_eq!(registry.schema(Variant::Efl).base.len(), 12);
        assert_eq!(registry.schema(Variant::Esl).base.len(), 47);
        assert_eq!(registry.schema(Variant::Efw).base.len(), 13);
        assert_eq!(registry.schema(Variant::Emw).base.len(), 6);
        assert!(registry.schema(Variant::Esl).repeat.is_none());
    }

    #[test]
    fn test_repeat_layouts() {
        let registry = Registry::new().unwrap();

        let eml = registry.schema(Variant::Eml);
        let parses = eml.repeat.as_ref().unwrap();
        assert_eq!(parses.key, PARSES);
        assert_eq!(parses.unit.len(), 19);
        assert_eq!(parses.cap, 4);
        assert_eq!(eml.count_position(), Some(5));

        let epl = registry.schema(Variant::Epl);
        assert_eq!(epl.repeat.as_ref().unwrap().cap, 24);
        assert_eq!(epl.count_position(), Some(3));

        let epw = registry.schema(Variant::Epw);
        assert_eq!(epw.repeat.as_ref().unwrap().cap, 23);
        assert_eq!(epw.count_position(), Some(4));
    }

    #[test]
    fn test_variant_of_database() {
        assert_eq!(Variant::of(Database::Morphology, TableKind::Lemmas), Some(Variant::Eml));
        assert_eq!(Variant::of(Database::Phonology, TableKind::Wordforms), Some(Variant::Epw));
        assert_eq!(Variant::of(Database::Syntax, TableKind::Wordforms), None);
        assert_eq!(Database::from_code('f'), Some(Database::Frequency));
        assert_eq!(Database::from_code('x'), None);
        assert_eq!(Variant::from_tag("epw"), Some(Variant::Epw));
        assert_eq!(Variant::from_tag("EPW"), None);
    }

    #[test]
    fn test_invalid_layouts_are_rejected() {
        static ZERO_CAP: VariantLayout = VariantLayout {
            variant: Variant::Epl,
            base: &["IdNum", "Head", "PronCnt"],
            repeat: Some(RepeatLayout {
                key: PRONS,
                record: RecordKind::Pronunciation,
                count_field: "PronCnt",
                unit: &["PronStatus"],
                cap: 0,
            }),
        };
        assert_eq!(
            resolve(&ZERO_CAP),
            Err(SchemaError::InvalidRepeat { variant: "epl", reason: "cap is zero" })
        );

        static UNKNOWN: VariantLayout = VariantLayout {
            variant: Variant::Efw,
            base: &["IdNum", "MorphStatus"],
            repeat: None,
        };
        assert_eq!(
            resolve(&UNKNOWN),
            Err(SchemaError::UnknownField { variant: "efw", field: "MorphStatus" })
        );

        static EMPTY_UNIT: VariantLayout = VariantLayout {
            variant: Variant::Epl,
            base: &["IdNum", "PronCnt"],
            repeat: Some(RepeatLayout {
                key: PRONS,
                record: RecordKind::Pronunciation,
                count_field: "PronCnt",
                unit: &[],
                cap: 4,
            }),
        };
        assert_eq!(
            resolve(&EMPTY_UNIT),
            Err(SchemaError::InvalidRepeat { variant: "epl", reason: "repeat unit is empty" })
        );

        static WRONG_GROUP: VariantLayout = VariantLayout {
            variant: Variant::Eml,
            base: &["IdNum", "MorphCnt"],
            repeat: Some(RepeatLayout {
                key: PARSES,
                record: RecordKind::Pronunciation,
                count_field: "MorphCnt",
                unit: &["PronStatus"],
                cap: 4,
            }),
        };
        assert_eq!(
            resolve(&WRONG_GROUP),
            Err(SchemaError::InvalidRepeat { variant: "eml", reason: "group holds another record kind" })
        );
        static DUPLICATE: VariantLayout = VariantLayout {
            variant: Variant::Emw,
            base: &["IdNum", "Word", "IdNum"],
            repeat: None,
        };
        assert_eq!(
            resolve(&DUPLICATE),
            Err(SchemaError::DuplicateField { variant: "emw", field: "IdNum" })
        );

        static COUNT_NOT_IN_BASE: VariantLayout = VariantLayout {
            variant: Variant::Epw,
            base: &["IdNum", "Head"],
            repeat: Some(RepeatLayout {
                key: PRONS,
                record: RecordKind::Pronunciation,
                count_field: "PronCnt",
                unit: PRON_UNIT,
                cap: 4,
            }),
        };
        assert_eq!(
            resolve(&COUNT_NOT_IN_BASE),
            Err(SchemaError::InvalidRepeat { variant: "epw", reason: "count field is not a base field" })
        );

        static TEXT_COUNT: VariantLayout = VariantLayout {
            variant: Variant::Epw,
            base: &["IdNum", "Head", "PronCnt"],
            repeat: Some(RepeatLayout {
                key: PRONS,
                record: RecordKind::Pronunciation,
                count_field: "Head",
                unit: PRON_UNIT,
                cap: 4,
            }),
        };
        assert_eq!(
            resolve(&TEXT_COUNT),
            Err(SchemaError::InvalidRepeat { variant: "epw", reason: "count field is not an integer" })
        );
    }

    #[test]
    fn test_registry_requires_every_variant() {
        // Drops the efl layout.
        assert_eq!(
            Registry::from_layouts(&VARIANT_LAYOUTS[1..]).unwrap_err(),
            SchemaError::MissingVariant("efl")
        );
        assert!(Registry::from_layouts(VARIANT_LAYOUTS).is_ok());
    }

    #[test]
    fn test_code_tables_stay_with_their_field() {
        static BORROWED: [FieldDescriptor; 2] = [
            FieldDescriptor::new("IdNum", Integer, ""),
            FieldDescriptor::new("FlatSA", CodeList(&codes::FLAT_SA), ""),
        ];
        static BORROWING: RecordLayout = RecordLayout {
            kind: RecordKind::Lemma,
            fields: &BORROWED,
            frequency: false,
            groups: &[],
        };
        assert_eq!(
            resolve_fields("efl", &BORROWING, &["IdNum", "FlatSA"]),
            Err(SchemaError::ForeignCodeTable { variant: "efl", field: "FlatSA" })
        );

        // Same record kind, but the table belongs to another column.
        static SWAPPED: [FieldDescriptor; 1] = [FieldDescriptor::new("MorphStatus", Code(&codes::LANG), "")];
        static SWAPPING: RecordLayout = RecordLayout {
            kind: RecordKind::Lemma,
            fields: &SWAPPED,
            frequency: false,
            groups: &[],
        };
        assert_eq!(
            resolve_fields("eml", &SWAPPING, &["MorphStatus"]),
            Err(SchemaError::ForeignCodeTable { variant: "eml", field: "MorphStatus" })
        );

        assert_eq!(resolve_fields("eml", &LEMMA_LAYOUT, &["MorphStatus", "Lang"]).map(|f| f.len()), Ok(2));
    }

    #[test]
    fn test_field_docs() {
        assert_eq!(
            RecordKind::Lemma.field_doc("Cob"),
            Some("Frequency in the COBUILD corpus (17.9m words)")
        );
        // Group columns are found through the owning record kind.
        assert_eq!(RecordKind::Lemma.field_doc("PronStatus"), Some("Primary or secondary pronunciation"));
        assert_eq!(RecordKind::Wordform.field_doc("ImmSA"), None);
        assert_eq!(RecordKind::Parse.field_doc("NoSuchColumn"), None);
        assert_eq!(RecordKind::from_name("pronunciation"), Some(RecordKind::Pronunciation));
        assert_eq!(RecordKind::from_name("Lemma"), None);
    }

    #[test]
    fn test_schema_declares_group_columns() {
        let registry = Registry::new().unwrap();
        let eml = registry.schema(Variant::Eml);
        assert!(eml.declares("MorphStatus"));
        assert!(eml.declares("ImmSA"));
        assert!(!eml.declares("PronStatus"));
        assert!(!registry.schema(Variant::Efl).declares("ImmSA"));
    }

    #[test]
    fn test_every_syntax_column_is_a_lemma_field() {
        for (column, _) in SYNTAX_COLUMNS {
            let field = LEMMA_LAYOUT.field(column).expect("syntax column declared");
            assert_eq!(field.kind, FieldKind::Boolean);
        }
    }
}
