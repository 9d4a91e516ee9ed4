//! Assembly of decoded records into the fixed record types.
//!
//! Every field name a record kind may carry has exactly one slot; a decoded
//! field without a slot is an error, never silently ignored.

use celex_protocol::{
    Frequency, Lemma, LemmaId, MorphParse, Pronunciation, RecordKind, SyntaxFlags, Wordform,
    WordformId, PARSES, PRONS,
};

use crate::error::DecodeError;
use crate::materialize::{DecodedRecord, Value};

/// Builds a typed record out of a fully decoded one.
pub trait FromDecoded: Sized {
    const KIND: RecordKind;

    fn from_decoded(record: DecodedRecord<'_>) -> Result<Self, DecodeError>;
}

/// Where a value is being assigned, for error reporting.
#[derive(Clone, Copy)]
struct Slot {
    record: RecordKind,
    field: &'static str,
}

impl Slot {
    fn mismatch(self, expected: &'static str, found: &Value<'_>) -> DecodeError {
        DecodeError::KindMismatch {
            record: self.record,
            field: self.field,
            expected,
            found: found.kind_name(),
        }
    }

    fn text(self, value: Value<'_>) -> Result<String, DecodeError> {
        match value {
            Value::Text(text) => Ok(text.to_string()),
            other => Err(self.mismatch("text", &other)),
        }
    }

    fn count(self, value: Value<'_>) -> Result<u32, DecodeError> {
        match value {
            Value::Integer(n) => u32::try_from(n).map_err(|_| DecodeError::MalformedNumber {
                field: self.field,
                value: n.to_string(),
            }),
            other => Err(self.mismatch("integer", &other)),
        }
    }

    fn real(self, value: Value<'_>) -> Result<f64, DecodeError> {
        match value {
            Value::Float(x) => Ok(x),
            other => Err(self.mismatch("float", &other)),
        }
    }

    fn flag(self, value: Value<'_>) -> Result<bool, DecodeError> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(self.mismatch("boolean", &other)),
        }
    }

    fn label(self, value: Value<'_>) -> Result<String, DecodeError> {
        match value {
            Value::Label(label) => Ok(label.to_string()),
            other => Err(self.mismatch("label", &other)),
        }
    }

    fn labels(self, value: Value<'_>) -> Result<Vec<String>, DecodeError> {
        match value {
            Value::Labels(labels) => Ok(labels.into_iter().map(str::to_string).collect()),
            other => Err(self.mismatch("label list", &other)),
        }
    }

    fn segments(self, value: Value<'_>) -> Result<Vec<String>, DecodeError> {
        match value {
            Value::Segments(parts) => Ok(parts.into_iter().map(str::to_string).collect()),
            other => Err(self.mismatch("segments", &other)),
        }
    }
}

const FREQUENCY_COLUMNS: [&str; 10] = [
    "Cob", "CobDev", "CobMln", "CobLog", "CobW", "CobWMln", "CobWLog", "CobS", "CobSMln", "CobSLog",
];

fn assign_frequency(frequency: &mut Frequency, at: Slot, value: Value<'_>) -> Result<(), DecodeError> {
    match at.field {
        "Cob" => frequency.cob = Some(at.count(value)?),
        "CobDev" => frequency.cob_dev = Some(at.count(value)?),
        "CobMln" => frequency.cob_mln = Some(at.count(value)?),
        "CobLog" => frequency.cob_log = Some(at.real(value)?),
        "CobW" => frequency.cob_w = Some(at.count(value)?),
        "CobWMln" => frequency.cob_w_mln = Some(at.count(value)?),
        "CobWLog" => frequency.cob_w_log = Some(at.real(value)?),
        "CobS" => frequency.cob_s = Some(at.count(value)?),
        "CobSMln" => frequency.cob_s_mln = Some(at.count(value)?),
        "CobSLog" => frequency.cob_s_log = Some(at.real(value)?),
        other => {
            return Err(DecodeError::UnconvertedFields {
                record: at.record,
                fields: vec![other],
            })
        }
    }
    Ok(())
}

fn unconverted(record: RecordKind, mut fields: Vec<&'static str>) -> Result<(), DecodeError> {
    if fields.is_empty() {
        return Ok(());
    }
    fields.sort_unstable();
    Err(DecodeError::UnconvertedFields { record, fields })
}

fn assemble_all<T: FromDecoded>(members: Vec<DecodedRecord<'_>>) -> Result<Vec<T>, DecodeError> {
    members.into_iter().map(T::from_decoded).collect()
}

impl FromDecoded for Lemma {
    const KIND: RecordKind = RecordKind::Lemma;

    fn from_decoded(record: DecodedRecord<'_>) -> Result<Self, DecodeError> {
        let mut id = None;
        let mut head = None;
        let mut frequency = Frequency::default();
        let mut class = None;
        let mut syntax: Option<SyntaxFlags> = None;
        let mut morph_status = None;
        let mut lang = None;
        let mut morph_count = None;
        let mut pron_count = None;
        let mut leftover = Vec::new();

        for (name, value) in record.values {
            let at = Slot { record: Self::KIND, field: name };
            match name {
                "IdNum" => id = Some(LemmaId(at.count(value)?)),
                "Head" => head = Some(at.text(value)?),
                "ClassNum" => class = Some(at.label(value)?),
                "MorphStatus" => morph_status = Some(at.label(value)?),
                "Lang" => lang = Some(at.label(value)?),
                "MorphCnt" => morph_count = Some(at.count(value)?),
                "PronCnt" => pron_count = Some(at.count(value)?),
                _ if FREQUENCY_COLUMNS.contains(&name) => assign_frequency(&mut frequency, at, value)?,
                _ => match SyntaxFlags::from_column(name) {
                    Some(flag) => {
                        let set = at.flag(value)?;
                        syntax.get_or_insert_with(SyntaxFlags::empty).set(flag, set);
                    }
                    None => leftover.push(name),
                },
            }
        }

        let mut parses = Vec::new();
        let mut prons = Vec::new();
        for (key, members) in record.groups {
            match key {
                PARSES => parses = assemble_all(members)?,
                PRONS => prons = assemble_all(members)?,
                _ => leftover.push(key),
            }
        }
        unconverted(Self::KIND, leftover)?;

        let missing = |field| DecodeError::MissingField { record: Self::KIND, field };
        let mut lemma = Lemma::new(id.ok_or(missing("IdNum"))?, head.ok_or(missing("Head"))?);
        lemma.frequency = frequency;
        lemma.class = class;
        lemma.syntax = syntax;
        lemma.morph_status = morph_status;
        lemma.lang = lang;
        lemma.morph_count = morph_count;
        lemma.pron_count = pron_count;
        lemma.parses = parses;
        lemma.prons = prons;
        Ok(lemma)
    }
}

impl FromDecoded for Wordform {
    const KIND: RecordKind = RecordKind::Wordform;

    fn from_decoded(record: DecodedRecord<'_>) -> Result<Self, DecodeError> {
        let mut id = None;
        let mut word = None;
        let mut head = None;
        let mut lemma_id = None;
        let mut frequency = Frequency::default();
        let mut flect_type = Vec::new();
        let mut trans_infl = None;
        let mut pron_count = None;
        let mut leftover = Vec::new();

        for (name, value) in record.values {
            let at = Slot { record: Self::KIND, field: name };
            match name {
                "IdNum" => id = Some(WordformId(at.count(value)?)),
                "Word" => word = Some(at.text(value)?),
                // The phonology file names the spelling column `Head`.
                "Head" => head = Some(at.text(value)?),
                "IdNumLemma" => lemma_id = Some(LemmaId(at.count(value)?)),
                "FlectType" => flect_type = at.labels(value)?,
                "TransInfl" => trans_infl = Some(at.text(value)?),
                "PronCnt" => pron_count = Some(at.count(value)?),
                _ if FREQUENCY_COLUMNS.contains(&name) => assign_frequency(&mut frequency, at, value)?,
                _ => leftover.push(name),
            }
        }

        let mut prons = Vec::new();
        for (key, members) in record.groups {
            match key {
                PRONS => prons = assemble_all(members)?,
                _ => leftover.push(key),
            }
        }
        unconverted(Self::KIND, leftover)?;

        let missing = |field| DecodeError::MissingField { record: Self::KIND, field };
        let mut wordform = Wordform::new(
            id.ok_or(missing("IdNum"))?,
            word.or(head).ok_or(missing("Word"))?,
            lemma_id.ok_or(missing("IdNumLemma"))?,
        );
        wordform.frequency = frequency;
        wordform.flect_type = flect_type;
        wordform.trans_infl = trans_infl;
        wordform.pron_count = pron_count;
        wordform.prons = prons;
        Ok(wordform)
    }
}

impl FromDecoded for MorphParse {
    const KIND: RecordKind = RecordKind::Parse;

    fn from_decoded(record: DecodedRecord<'_>) -> Result<Self, DecodeError> {
        let mut parse = MorphParse::default();
        let mut leftover: Vec<&'static str> = record.groups.into_keys().collect();

        for (name, value) in record.values {
            let at = Slot { record: Self::KIND, field: name };
            match name {
                "NVAffComp" => parse.nv_aff_comp = at.flag(value)?,
                "Der" => parse.der = at.flag(value)?,
                "Comp" => parse.comp = at.flag(value)?,
                "DerComp" => parse.der_comp = at.flag(value)?,
                "Def" => parse.def = at.flag(value)?,
                "Imm" => parse.imm = at.segments(value)?,
                "ImmSubCat" => parse.imm_sub_cat = at.labels(value)?,
                "ImmSA" => parse.imm_sa = at.labels(value)?,
                "ImmAllo" => parse.imm_allo = at.label(value)?,
                "ImmSubst" => parse.imm_subst = at.flag(value)?,
                "ImmOpac" => parse.imm_opac = at.flag(value)?,
                "TransDer" => parse.trans_der = at.text(value)?,
                "ImmInfix" => parse.imm_infix = at.flag(value)?,
                "ImmRevers" => parse.imm_revers = at.flag(value)?,
                "FlatSA" => parse.flat_sa = at.labels(value)?,
                "StrucLab" => parse.struc_lab = at.text(value)?,
                "StrucAllo" => parse.struc_allo = at.labels(value)?,
                "StrucSubst" => parse.struc_subst = at.flag(value)?,
                "StrucOpac" => parse.struc_opac = at.flag(value)?,
                _ => leftover.push(name),
            }
        }
        unconverted(Self::KIND, leftover)?;
        Ok(parse)
    }
}

impl FromDecoded for Pronunciation {
    const KIND: RecordKind = RecordKind::Pronunciation;

    fn from_decoded(record: DecodedRecord<'_>) -> Result<Self, DecodeError> {
        let mut pron = Pronunciation::default();
        let mut leftover: Vec<&'static str> = record.groups.into_keys().collect();

        for (name, value) in record.values {
            let at = Slot { record: Self::KIND, field: name };
            match name {
                "PronStatus" => pron.status = at.label(value)?,
                "PhonStrsDISC" => pron.phon_strs_disc = at.text(value)?,
                "PhonCVBr" => pron.phon_cv_br = at.text(value)?,
                "PhonSylBCLX" => pron.phon_syl_bclx = at.text(value)?,
                _ => leftover.push(name),
            }
        }
        unconverted(Self::KIND, leftover)?;
        Ok(pron)
    }
}
