use rkyv::{Archive, Deserialize, Serialize};
use crate::flags::SyntaxFlags;
use crate::ids::{LemmaId, WordformId};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// COBUILD frequency columns shared by lemma and wordform files.
#[derive(Debug, Clone, Default, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Frequency {
    pub cob: Option<u32>,
    pub cob_dev: Option<u32>,
    pub cob_mln: Option<u32>,
    pub cob_log: Option<f64>,
    pub cob_w: Option<u32>,
    pub cob_w_mln: Option<u32>,
    pub cob_w_log: Option<f64>,
    pub cob_s: Option<u32>,
    pub cob_s_mln: Option<u32>,
    pub cob_s_log: Option<f64>,
}

/// One candidate decomposition of a lemma into morphemes.
#[derive(Debug, Clone, Default, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct MorphParse {
    /// Immediate constituents, e.g. `["abandon", "ment"]`.
    pub imm: Vec<String>,
    pub nv_aff_comp: bool,
    pub der: bool,
    pub comp: bool,
    pub der_comp: bool,
    /// Default analysis among several parses.
    pub def: bool,
    pub imm_sub_cat: Vec<String>,
    pub imm_sa: Vec<String>,
    pub imm_allo: String,
    pub imm_subst: bool,
    pub imm_opac: bool,
    pub trans_der: String,
    pub imm_infix: bool,
    pub imm_revers: bool,
    pub flat_sa: Vec<String>,
    pub struc_lab: String,
    pub struc_allo: Vec<String>,
    pub struc_subst: bool,
    pub struc_opac: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Pronunciation {
    /// `Primary` or `Secondary`.
    pub status: String,
    pub phon_strs_disc: String,
    pub phon_cv_br: String,
    pub phon_syl_bclx: String,
}

impl Pronunciation {
    pub fn is_primary(&self) -> bool {
        self.status == "Primary"
    }
}

/// A headword sense. Columns of databases that were not loaded stay `None`.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lemma {
    pub id: LemmaId,
    pub head: String,
    pub frequency: Frequency,
    /// Syntactic category label.
    pub class: Option<String>,
    pub syntax: Option<SyntaxFlags>,
    pub morph_status: Option<String>,
    pub lang: Option<String>,
    pub morph_count: Option<u32>,
    pub pron_count: Option<u32>,
    pub parses: Vec<MorphParse>,
    pub prons: Vec<Pronunciation>,
}

impl Lemma {
    pub fn new(id: LemmaId, head: String) -> Self {
        Self {
            id,
            head,
            frequency: Frequency::default(),
            class: None,
            syntax: None,
            morph_status: None,
            lang: None,
            morph_count: None,
            pron_count: None,
            parses: Vec::new(),
            prons: Vec::new(),
        }
    }

    /// The parse flagged as default, falling back to the first one.
    pub fn default_parse(&self) -> Option<&MorphParse> {
        self.parses.iter().find(|parse| parse.def).or_else(|| self.parses.first())
    }

    pub fn has_syntax(&self, flags: SyntaxFlags) -> bool {
        self.syntax.is_some_and(|syntax| syntax.contains(flags))
    }
}

/// One inflected surface form of a lemma.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Wordform {
    pub id: WordformId,
    pub word: String,
    pub lemma_id: LemmaId,
    pub frequency: Frequency,
    /// Inflectional categories, e.g. `["plural"]`.
    pub flect_type: Vec<String>,
    pub trans_infl: Option<String>,
    pub pron_count: Option<u32>,
    pub prons: Vec<Pronunciation>,
}

impl Wordform {
    pub fn new(id: WordformId, word: String, lemma_id: LemmaId) -> Self {
        Self {
            id,
            word,
            lemma_id,
            frequency: Frequency::default(),
            flect_type: Vec::new(),
            trans_infl: None,
            pron_count: None,
            prons: Vec::new(),
        }
    }
}

/// A fully loaded database, as written by the snapshot exporter.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    /// Database codes the tables were merged from, e.g. `"smfp"`.
    pub databases: String,
    pub lemmas: Vec<Lemma>,
    pub wordforms: Vec<Wordform>,
}

impl Lexicon {
    pub const VERSION: u32 = 1;
}
