//! Relation names and their categories.
//!
//! An elementary predication is named either by a grammar relation
//! (upper-case, e.g. `PROPER_Q_REL`, written as `<pred>`) or by a lexical
//! relation derived from a lemma (e.g. `_like_v_1_rel`, written as
//! `<spred>`). Rewrite rules never match on raw strings; they ask for the
//! [`RelationCategory`] instead.

use std::fmt;

pub const WHICH_Q_REL: &str = "WHICH_Q_REL";
pub const THING_REL: &str = "THING_REL";
pub const PERSON_REL: &str = "PERSON_REL";
pub const PLACE_N_REL: &str = "PLACE_N_REL";
pub const TIME_N_REL: &str = "TIME_N_REL";
pub const REASON_REL: &str = "REASON_REL";
pub const MANNER_REL: &str = "MANNER_REL";
pub const ABSTR_DEG_REL: &str = "ABSTR_DEG_REL";
pub const MEASURE_REL: &str = "MEASURE_REL";
pub const MUCH_MANY_A_REL: &str = "MUCH-MANY_A_REL";
pub const LOC_NONSP_REL: &str = "LOC_NONSP_REL";
pub const APPOS_REL: &str = "APPOS_REL";
pub const IMPLICIT_CONJ_REL: &str = "IMPLICIT_CONJ_REL";
pub const NAMED_REL: &str = "NAMED_REL";
pub const PROPER_Q_REL: &str = "PROPER_Q_REL";
pub const UDEF_Q_REL: &str = "UDEF_Q_REL";
pub const CARD_REL: &str = "CARD_REL";
pub const BE_V_ID_REL: &str = "_be_v_id_rel";
pub const FOR_P_REL: &str = "_for_p_rel";
pub const BY_P_MEANS_REL: &str = "_by_p_means_rel";

/// The relation a predication instantiates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// A grammar relation, e.g. `PROPER_Q_REL`
    Grammar(String),
    /// A lexical relation, e.g. `_like_v_1_rel`
    Lexical(String),
}

/// The decomposed name of a lexical relation: `_lemma_pos[_sense]_rel`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalParts<'a> {
    pub lemma: &'a str,
    pub pos: char,
    pub sense: Option<&'a str>,
}

/// Closed set of relation categories the rewrite rules dispatch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationCategory {
    /// `_and_c_rel`, `_or_c_rel`, `_but_c_rel`, `IMPLICIT_CONJ_REL`
    Coordination,
    /// `APPOS_REL`
    Apposition,
    /// `_because_x_rel`
    Causal,
    /// Other subordinating conjunctions (`_while_x_rel`, `SUBORD_REL`, ...)
    Subordination,
    /// `_if_x_then_rel`, `_unless_x_rel`
    Conditional,
    /// Generalised quantifiers (`_the_q_rel`, `PROPER_Q_REL`, ...)
    Quantifier,
    /// Prepositions and implicit locatives (`_in_p_rel`, `LOC_NONSP_REL`)
    Preposition,
    /// `NAMED_REL`
    Named,
    /// `CARD_REL`
    Cardinal,
    /// `COMPOUND_REL`
    Compound,
    /// Nouns, including placeholder nouns like `THING_REL`
    Noun,
    /// Verbs
    Verb,
    /// Adjectives and adverbs
    Modifier,
    Other,
}

impl Predicate {
    /// Classify a relation name: lexical relations start with `_`
    pub fn parse(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.trim().trim_matches('"').to_string();
        if name.starts_with('_') {
            Predicate::Lexical(name)
        } else {
            Predicate::Grammar(name)
        }
    }

    pub fn grammar(name: impl Into<String>) -> Self {
        Predicate::Grammar(name.into())
    }

    pub fn lexical(name: impl Into<String>) -> Self {
        Predicate::Lexical(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Predicate::Grammar(name) | Predicate::Lexical(name) => name,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, Predicate::Lexical(_))
    }

    /// Lower-cased name without the leading `_` and trailing `_rel`
    pub fn stem(&self) -> String {
        let lower = self.name().to_ascii_lowercase();
        let trimmed = lower.trim_start_matches('_');
        trimmed.strip_suffix("_rel").unwrap_or(trimmed).to_string()
    }

    /// Case-insensitive comparison against a relation name
    pub fn is(&self, name: &str) -> bool {
        self.name().eq_ignore_ascii_case(name)
    }

    /// Lemma, part of speech and sense of a lexical relation
    pub fn lexical_parts(&self) -> Option<LexicalParts<'_>> {
        let Predicate::Lexical(name) = self else {
            return None;
        };
        let body = name.trim_start_matches('_');
        let body = body
            .strip_suffix("_rel")
            .or_else(|| body.strip_suffix("_REL"))
            .unwrap_or(body);
        let mut pieces = body.splitn(3, '_');
        let lemma = pieces.next().filter(|lemma| !lemma.is_empty())?;
        let mut pos = pieces.next()?.chars();
        let tag = pos.next()?.to_ascii_lowercase();
        if pos.next().is_some() {
            return None;
        }
        Some(LexicalParts {
            lemma,
            pos: tag,
            sense: pieces.next(),
        })
    }

    pub fn category(&self) -> RelationCategory {
        match self {
            Predicate::Lexical(_) => match self.lexical_parts() {
                Some(parts) => match parts.pos {
                    'c' => RelationCategory::Coordination,
                    'q' => RelationCategory::Quantifier,
                    'p' => RelationCategory::Preposition,
                    'n' => RelationCategory::Noun,
                    'v' => RelationCategory::Verb,
                    'a' => RelationCategory::Modifier,
                    'x' => {
                        let lemma = parts.lemma.to_ascii_lowercase();
                        match lemma.as_str() {
                            "because" => RelationCategory::Causal,
                            "if" | "unless" => RelationCategory::Conditional,
                            _ => RelationCategory::Subordination,
                        }
                    }
                    _ => RelationCategory::Other,
                },
                None => RelationCategory::Other,
            },
            Predicate::Grammar(_) => {
                let stem = self.stem();
                match stem.as_str() {
                    "appos" => RelationCategory::Apposition,
                    "implicit_conj" => RelationCategory::Coordination,
                    "named" | "named_n" => RelationCategory::Named,
                    "card" => RelationCategory::Cardinal,
                    "compound" | "compound_name" => RelationCategory::Compound,
                    "subord" => RelationCategory::Subordination,
                    "loc_nonsp" | "unspec_loc" => RelationCategory::Preposition,
                    "thing" | "person" | "place_n" | "time_n" | "reason" | "manner"
                    | "abstr_deg" | "pron" => RelationCategory::Noun,
                    stem if stem.ends_with("_q") => RelationCategory::Quantifier,
                    _ => RelationCategory::Other,
                }
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_splits_lexical_names() {
        let like = Predicate::parse("_like_v_1_rel");
        assert_eq!(
            like.lexical_parts(),
            Some(LexicalParts {
                lemma: "like",
                pos: 'v',
                sense: Some("1"),
            })
        );

        let when = Predicate::parse("\"_when_x_subord_rel\"");
        assert_eq!(when.name(), "_when_x_subord_rel");
        assert_eq!(when.lexical_parts().map(|p| p.sense), Some(Some("subord")));

        assert_eq!(Predicate::parse("PROPER_Q_REL").lexical_parts(), None);
    }

    #[test]
    fn it_categorizes_relations() {
        let cases = [
            ("_and_c_rel", RelationCategory::Coordination),
            ("_AND_C_REL", RelationCategory::Coordination),
            ("IMPLICIT_CONJ_REL", RelationCategory::Coordination),
            ("APPOS_REL", RelationCategory::Apposition),
            ("_because_x_rel", RelationCategory::Causal),
            ("_while_x_rel", RelationCategory::Subordination),
            ("_if_x_then_rel", RelationCategory::Conditional),
            ("PROPER_Q_REL", RelationCategory::Quantifier),
            ("_the_q_rel", RelationCategory::Quantifier),
            ("_in_p_rel", RelationCategory::Preposition),
            ("LOC_NONSP_REL", RelationCategory::Preposition),
            ("NAMED_REL", RelationCategory::Named),
            ("CARD_REL", RelationCategory::Cardinal),
            ("_girl_n_1_rel", RelationCategory::Noun),
            ("PERSON_REL", RelationCategory::Noun),
            ("_like_v_1_rel", RelationCategory::Verb),
            ("_quick_a_1_rel", RelationCategory::Modifier),
            ("NEG_REL", RelationCategory::Other),
        ];
        for (name, category) in cases {
            assert_eq!(Predicate::parse(name).category(), category, "{name}");
        }
    }
}
