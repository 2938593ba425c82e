//! Question kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use dialog_mrs::{
    ABSTR_DEG_REL, DECLARATIVE, MANNER_REL, PERSON_REL, PLACE_N_REL, REASON_REL, THING_REL,
    TIME_N_REL,
};

/// The sentence type a rewritten graph is tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(rename = "Y/N")]
    YesNo,
    #[serde(rename = "WHO")]
    Who,
    #[serde(rename = "WHAT")]
    What,
    #[serde(rename = "WHERE")]
    Where,
    #[serde(rename = "WHEN")]
    When,
    #[serde(rename = "WHY")]
    Why,
    #[serde(rename = "HOW")]
    How,
    #[serde(rename = "HOW MANY")]
    HowMany,
}

impl QuestionKind {
    /// The sentence-type tag written onto the graph
    pub fn tag(&self) -> &'static str {
        match self {
            QuestionKind::YesNo => "Y/N",
            QuestionKind::Who => "WHO",
            QuestionKind::What => "WHAT",
            QuestionKind::Where => "WHERE",
            QuestionKind::When => "WHEN",
            QuestionKind::Why => "WHY",
            QuestionKind::How => "HOW",
            QuestionKind::HowMany => "HOW MANY",
        }
    }

    /// Look up a kind by tag. `PROP` and unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        [
            QuestionKind::YesNo,
            QuestionKind::Who,
            QuestionKind::What,
            QuestionKind::Where,
            QuestionKind::When,
            QuestionKind::Why,
            QuestionKind::How,
            QuestionKind::HowMany,
        ]
        .into_iter()
        .find(|kind| kind.tag() == tag && tag != DECLARATIVE)
    }

    /// The placeholder noun a question of this kind is built around
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            QuestionKind::YesNo => None,
            QuestionKind::Who => Some(PERSON_REL),
            QuestionKind::What => Some(THING_REL),
            QuestionKind::Where => Some(PLACE_N_REL),
            QuestionKind::When => Some(TIME_N_REL),
            QuestionKind::Why => Some(REASON_REL),
            QuestionKind::How => Some(MANNER_REL),
            QuestionKind::HowMany => Some(ABSTR_DEG_REL),
        }
    }

    /// True for questions that ask about a circumstance of the main event
    /// through a prepositional frame
    pub fn is_framed(&self) -> bool {
        matches!(self, QuestionKind::Where | QuestionKind::When)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
