use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

bitflags! {
    /// Sub-categorial Y/N columns of the syntax lemma file.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct SyntaxFlags: u64 {
        // Nouns
        const COUNTABLE_NOUN = 1 << 0;
        const UNCOUNTABLE_NOUN = 1 << 1;
        const SINGULAR_NOUN = 1 << 2;
        const PLURAL_NOUN = 1 << 3;
        const GROUP_COUNTABLE_NOUN = 1 << 4;
        const GROUP_UNCOUNTABLE_NOUN = 1 << 5;
        const ATTRIBUTIVE_NOUN = 1 << 6;
        const POSTPOSITIVE_NOUN = 1 << 7;
        const VOCATIVE_NOUN = 1 << 8;
        const PROPER_NOUN = 1 << 9;
        const EXPRESSION_NOUN = 1 << 10;

        // Verbs
        const TRANSITIVE_VERB = 1 << 11;
        const TRANSITIVE_COMPLEMENT_VERB = 1 << 12;
        const INTRANSITIVE_VERB = 1 << 13;
        const DITRANSITIVE_VERB = 1 << 14;
        const LINKING_VERB = 1 << 15;
        const PHRASAL_VERB = 1 << 16;
        const PREPOSITIONAL_VERB = 1 << 17;
        const PHRASAL_PREPOSITIONAL_VERB = 1 << 18;
        const EXPRESSION_VERB = 1 << 19;

        // Adjectives
        const ORDINARY_ADJECTIVE = 1 << 20;
        const ATTRIBUTIVE_ADJECTIVE = 1 << 21;
        const PREDICATIVE_ADJECTIVE = 1 << 22;
        const POSTPOSITIVE_ADJECTIVE = 1 << 23;
        const EXPRESSION_ADJECTIVE = 1 << 24;

        // Adverbs
        const ORDINARY_ADVERB = 1 << 25;
        const PREDICATIVE_ADVERB = 1 << 26;
        const POSTPOSITIVE_ADVERB = 1 << 27;
        const COMBINATORY_ADVERB = 1 << 28;
        const EXPRESSION_ADVERB = 1 << 29;

        // Numerals
        const CARDINAL_NUMBER = 1 << 30;
        const ORDINAL_NUMBER = 1 << 31;
        const EXPRESSION_NUMBER = 1 << 32;

        // Pronouns
        const PERSONAL_PRONOUN = 1 << 33;
        const DEMONSTRATIVE_PRONOUN = 1 << 34;
        const POSSESSIVE_PRONOUN = 1 << 35;
        const REFLEXIVE_PRONOUN = 1 << 36;
        const WH_PRONOUN = 1 << 37;
        const DETERMINER_PRONOUN = 1 << 38;
        const PRONOMINAL_PRONOUN = 1 << 39;
        const EXPRESSION_PRONOUN = 1 << 40;

        // Conjunctions
        const COORDINATING_CONJUNCTION = 1 << 41;
        const SUBORDINATING_CONJUNCTION = 1 << 42;
    }
}

/// Column name of each flag, in syntax-file order.
pub const SYNTAX_COLUMNS: [(&str, SyntaxFlags); 43] = [
    ("C_N", SyntaxFlags::COUNTABLE_NOUN),
    ("Unc_N", SyntaxFlags::UNCOUNTABLE_NOUN),
    ("Sing_N", SyntaxFlags::SINGULAR_NOUN),
    ("Plu_N", SyntaxFlags::PLURAL_NOUN),
    ("GrC_N", SyntaxFlags::GROUP_COUNTABLE_NOUN),
    ("GrUnc_N", SyntaxFlags::GROUP_UNCOUNTABLE_NOUN),
    ("Attr_N", SyntaxFlags::ATTRIBUTIVE_NOUN),
    ("PostPos_N", SyntaxFlags::POSTPOSITIVE_NOUN),
    ("Voc_N", SyntaxFlags::VOCATIVE_NOUN),
    ("Proper_N", SyntaxFlags::PROPER_NOUN),
    ("Exp_N", SyntaxFlags::EXPRESSION_NOUN),
    ("Trans_V", SyntaxFlags::TRANSITIVE_VERB),
    ("TransComp_V", SyntaxFlags::TRANSITIVE_COMPLEMENT_VERB),
    ("Intrans_V", SyntaxFlags::INTRANSITIVE_VERB),
    ("Ditrans_V", SyntaxFlags::DITRANSITIVE_VERB),
    ("Link_V", SyntaxFlags::LINKING_VERB),
    ("Phr_V", SyntaxFlags::PHRASAL_VERB),
    ("Prep_V", SyntaxFlags::PREPOSITIONAL_VERB),
    ("PhrPrep_V", SyntaxFlags::PHRASAL_PREPOSITIONAL_VERB),
    ("Exp_V", SyntaxFlags::EXPRESSION_VERB),
    ("Ord_A", SyntaxFlags::ORDINARY_ADJECTIVE),
    ("Attr_A", SyntaxFlags::ATTRIBUTIVE_ADJECTIVE),
    ("Pred_A", SyntaxFlags::PREDICATIVE_ADJECTIVE),
    ("PostPos_A", SyntaxFlags::POSTPOSITIVE_ADJECTIVE),
    ("Exp_A", SyntaxFlags::EXPRESSION_ADJECTIVE),
    ("Ord_ADV", SyntaxFlags::ORDINARY_ADVERB),
    ("Pred_ADV", SyntaxFlags::PREDICATIVE_ADVERB),
    ("PostPos_ADV", SyntaxFlags::POSTPOSITIVE_ADVERB),
    ("Comb_ADV", SyntaxFlags::COMBINATORY_ADVERB),
    ("Exp_ADV", SyntaxFlags::EXPRESSION_ADVERB),
    ("Card_NUM", SyntaxFlags::CARDINAL_NUMBER),
    ("Ord_NUM", SyntaxFlags::ORDINAL_NUMBER),
    ("Exp_NUM", SyntaxFlags::EXPRESSION_NUMBER),
    ("Pers_PRON", SyntaxFlags::PERSONAL_PRONOUN),
    ("Dem_PRON", SyntaxFlags::DEMONSTRATIVE_PRONOUN),
    ("Poss_PRON", SyntaxFlags::POSSESSIVE_PRONOUN),
    ("Refl_PRON", SyntaxFlags::REFLEXIVE_PRONOUN),
    ("Wh_PRON", SyntaxFlags::WH_PRONOUN),
    ("Det_PRON", SyntaxFlags::DETERMINER_PRONOUN),
    ("Pron_PRON", SyntaxFlags::PRONOMINAL_PRONOUN),
    ("Exp_PRON", SyntaxFlags::EXPRESSION_PRONOUN),
    ("Cor_C", SyntaxFlags::COORDINATING_CONJUNCTION),
    ("Sub_C", SyntaxFlags::SUBORDINATING_CONJUNCTION),
];

impl SyntaxFlags {
    /// The flag stored in syntax column `name`, if it is one.
    pub fn from_column(name: &str) -> Option<Self> {
        SYNTAX_COLUMNS
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, flag)| *flag)
    }
}

// rkyv support for SyntaxFlags: archived as its raw bits.
impl Archive for SyntaxFlags {
    type Archived = u64;
    type Resolver = ();

    unsafe fn resolve(&self, _pos: usize, _resolver: Self::Resolver, out: *mut Self::Archived) {
        out.write(self.bits());
    }
}

impl<S: rkyv::Fallible + ?Sized> Serialize<S> for SyntaxFlags {
    fn serialize(&self, _serializer: &mut S) -> Result<Self::Resolver, S::Error> {
        Ok(())
    }
}

impl<D: rkyv::Fallible + ?Sized> Deserialize<SyntaxFlags, D> for u64 {
    fn deserialize(&self, _deserializer: &mut D) -> Result<SyntaxFlags, D::Error> {
        Ok(SyntaxFlags::from_bits_truncate(*self))
    }
}
