//! Splitting relative clauses.
//!
//! A relative clause shows up as a verb sharing its label with the noun it
//! modifies and taking that noun's variable as an argument: in "the dog
//! that barked ran", `_bark_v_1_rel` sits on the label of `_dog_n_1_rel`
//! with `ARG1` bound to the dog.

use tracing::trace;

use dialog_mrs::{Mode, Mrs, RelationCategory, Sort, Traversal};

use crate::{Decomposer, QuestionResult};

/// Splits verbs that modify a noun in their own scope
pub struct RelativeClause;

impl RelativeClause {
    /// True when the verb at `at` takes the `ARG0` of a noun sharing its
    /// label as one of its arguments
    fn modifies_noun(mrs: &Mrs, at: usize) -> bool {
        let verb = &mrs.predications()[at];
        mrs.labelled(verb.label)
            .into_iter()
            .filter(|&other| other != at)
            .map(|other| &mrs.predications()[other])
            .filter(|noun| noun.predicate.category() == RelationCategory::Noun)
            .filter_map(|noun| noun.arg0())
            .filter(|&arg0| mrs.variable(arg0).sort() == Sort::Individual)
            .any(|arg0| {
                verb.roles.iter().any(|pair| {
                    pair.is_argument()
                        && pair
                            .as_variable()
                            .is_some_and(|value| mrs.same_variable(value, arg0))
                })
            })
    }
}

impl Decomposer for RelativeClause {
    fn name(&self) -> &'static str {
        "relative-clause"
    }

    fn matches(&self, mrs: &Mrs) -> Vec<usize> {
        mrs.predications()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.predicate.category() == RelationCategory::Verb)
            .filter(|(_, p)| {
                p.arg0().is_some_and(|arg0| {
                    mrs.variable(arg0).is_event()
                        && mrs
                            .index()
                            .is_none_or(|index| !mrs.same_variable(index, arg0))
                })
            })
            .map(|(at, _)| at)
            .filter(|&at| Self::modifies_noun(mrs, at))
            .collect()
    }

    fn split(&self, mrs: &Mrs, at: usize) -> QuestionResult<Vec<Mrs>> {
        let mut main = mrs.fork();
        let marked = main.mark(&[at], Traversal::arguments(), Mode::Delete)?;
        trace!(removed = marked.len(), "dropping relative clause");
        main.remove(marked)?;

        Ok(vec![main, clause(mrs, at)?])
    }
}

/// The relative clause as a sentence of its own. The verb and the
/// modifiers of its event move to a fresh label so the noun's scope no
/// longer contains them.
fn clause(mrs: &Mrs, at: usize) -> QuestionResult<Mrs> {
    let mut graph = mrs.fork();
    let label = graph.fresh_handle();
    let (old_label, event) = {
        let verb = &graph.predications()[at];
        (verb.label, verb.arg0())
    };

    let mut moved = vec![at];
    if let Some(event) = event {
        moved.extend(graph.labelled(old_label).into_iter().filter(|&other| {
            other != at
                && graph.predications()[other]
                    .roles
                    .iter()
                    .any(|pair| {
                        pair.is_argument()
                            && pair
                                .as_variable()
                                .is_some_and(|value| graph.same_variable(value, event))
                    })
        }));
    }
    for &other in &moved {
        graph.set_label(other, label);
    }
    Ok(graph.extract(&moved, Traversal::arguments())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_mrs::{Handle, coordinated_events, relative_clause};
    use pretty_assertions::assert_eq;

    fn names(mrs: &Mrs) -> Vec<&str> {
        mrs.predications()
            .iter()
            .map(|p| p.predicate.name())
            .collect()
    }

    #[test]
    fn it_matches_verbs_modifying_a_noun() {
        let mrs = relative_clause();
        let matches = RelativeClause.matches(&mrs);
        assert_eq!(matches.len(), 1);
        assert!(mrs.predications()[matches[0]].predicate.is("_bark_v_1_rel"));

        assert!(RelativeClause.matches(&coordinated_events()).is_empty());
    }

    #[test]
    fn it_splits_off_the_relative_clause() {
        let mrs = relative_clause();
        let at = RelativeClause.matches(&mrs)[0];
        let graphs = RelativeClause.split(&mrs, at).unwrap();
        assert_eq!(graphs.len(), 2);

        let main = &graphs[0];
        assert_eq!(names(main), vec!["_the_q_rel", "_dog_n_1_rel", "_run_v_1_rel"]);
        assert_eq!(main.index_variable().unwrap().label(), "e2");
        assert_eq!(main.top_target(), Some(Handle(10)));

        let clause = &graphs[1];
        assert_eq!(names(clause), vec!["_the_q_rel", "_dog_n_1_rel", "_bark_v_1_rel"]);
        let bark = &clause.predications()[2];
        assert_ne!(bark.label, Handle(8));
        assert_eq!(clause.top_target(), Some(bark.label));
        let index = clause.index_variable().unwrap();
        assert_eq!(index.label(), "e9");
        assert_eq!(index.property("SF"), Some("PROP"));
    }
}
