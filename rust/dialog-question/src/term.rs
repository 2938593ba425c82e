//! Named-entity terms supplied alongside a parse.
//!
//! The upstream tagger marks spans of the sentence with entity categories.
//! A term asks about the individual its span denotes; [`Term::focus`] finds
//! that individual in a graph.

use serde::{Deserialize, Serialize};
use tracing::trace;

use dialog_mrs::role::{ARG0, ARG1};
use dialog_mrs::{Mrs, RelationCategory, Sort, Span, VariableRef};

use crate::QuestionKind;

/// Entity category of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Person,
    Location,
    Date,
    Time,
    Number,
    Organization,
    Other,
}

impl EntityCategory {
    /// The question asking for an entity of this category
    pub fn question(&self) -> QuestionKind {
        match self {
            EntityCategory::Person => QuestionKind::Who,
            EntityCategory::Location => QuestionKind::Where,
            EntityCategory::Date | EntityCategory::Time => QuestionKind::When,
            EntityCategory::Number => QuestionKind::HowMany,
            EntityCategory::Organization | EntityCategory::Other => QuestionKind::What,
        }
    }
}

/// A tagged span of the input sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub text: String,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub categories: Vec<EntityCategory>,
}

impl Term {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Term {
            text: text.into(),
            start,
            end,
            categories: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: EntityCategory) -> Self {
        self.categories.push(category);
        self
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Question kinds this term yields, without repeats
    pub fn questions(&self) -> Vec<QuestionKind> {
        let mut kinds = Vec::new();
        for kind in self.categories.iter().map(EntityCategory::question) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }

    /// The individual this term denotes in `mrs`: an individual bound by a
    /// predication inside the span (or counted by a cardinal inside it) that
    /// a predication outside the span refers to. When several qualify the
    /// last one wins.
    pub fn focus(&self, mrs: &Mrs) -> Option<VariableRef> {
        let span = self.span();
        let inside = |at: usize| {
            mrs.predications()[at]
                .span
                .is_some_and(|candidate| span.contains(&candidate))
        };

        let mut candidates = Vec::new();
        for (at, predication) in mrs.predications().iter().enumerate() {
            if !inside(at) {
                continue;
            }
            let variable = match predication.predicate.category() {
                RelationCategory::Cardinal => predication.variable(ARG1),
                _ => predication.arg0(),
            };
            if let Some(variable) = variable
                && mrs.variable(variable).sort() == Sort::Individual
                && !candidates.contains(&variable)
            {
                candidates.push(variable);
            }
        }

        let focus = candidates.into_iter().rev().find(|&variable| {
            mrs.predications()
                .iter()
                .enumerate()
                .filter(|&(at, _)| !inside(at))
                .any(|(_, predication)| {
                    predication
                        .roles
                        .iter()
                        .filter(|pair| pair.role != ARG0)
                        .filter_map(|pair| pair.as_variable())
                        .any(|value| mrs.same_variable(value, variable))
                })
        });
        trace!(term = %self.text, found = focus.is_some(), "term focus");
        focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_mrs::{counted_entity, located_event};
    use pretty_assertions::assert_eq;

    #[test]
    fn it_parses_terms_from_json() {
        let terms: Vec<Term> = serde_json::from_str(
            r#"[{"text": "Paris", "start": 17, "end": 22, "categories": ["location"]}]"#,
        )
        .unwrap();
        assert_eq!(
            terms,
            vec![Term::new("Paris", 17, 22).with_category(EntityCategory::Location)]
        );
    }

    #[test]
    fn it_focuses_on_the_individual_referenced_from_outside() {
        let mrs = located_event();
        let paris = Term::new("Paris", 17, 22).focus(&mrs).unwrap();
        assert_eq!(mrs.variable(paris).label(), "x15");

        let john = Term::new("John", 0, 4).focus(&mrs).unwrap();
        assert_eq!(mrs.variable(john).label(), "x6");

        assert_eq!(Term::new("met", 5, 8).focus(&mrs), None);
    }

    #[test]
    fn it_focuses_on_what_a_number_counts() {
        let mrs = counted_entity();
        let three = Term::new("three", 9, 14).focus(&mrs).unwrap();
        assert_eq!(mrs.variable(three).label(), "x9");
    }

    #[test]
    fn it_maps_categories_to_distinct_questions() {
        let term = Term::new("noon", 0, 4)
            .with_category(EntityCategory::Time)
            .with_category(EntityCategory::Date)
            .with_category(EntityCategory::Other);
        assert_eq!(term.questions(), vec![QuestionKind::When, QuestionKind::What]);
    }
}
