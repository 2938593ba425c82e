//! Splitting causal clauses.
//!
//! "John slept because Mary worked." yields "John slept.", "Mary worked."
//! and "Why did John sleep?". A causal preposition ("John slept because of
//! the noise.") has no reason clause to split off; it yields the main
//! clause without the preposition and the `WHY` question about it.

use tracing::trace;

use dialog_mrs::role::{ARG1, ARG2};
use dialog_mrs::{Mode, Mrs, Predicate, RelationCategory, Traversal};

use crate::rule::role_variable;
use crate::subordinate::extract_clause;
use crate::{Decomposer, QuestionResult, ask_why};

/// Splits `_because_x_rel` and `_because+of_p_rel`
pub struct Causal;

fn is_causal_preposition(predicate: &Predicate) -> bool {
    predicate.lexical_parts().is_some_and(|parts| {
        parts.pos == 'p' && parts.lemma.to_ascii_lowercase().starts_with("because")
    })
}

impl Decomposer for Causal {
    fn name(&self) -> &'static str {
        "causal"
    }

    fn matches(&self, mrs: &Mrs) -> Vec<usize> {
        mrs.predications()
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.predicate.category() == RelationCategory::Causal
                    || is_causal_preposition(&p.predicate)
            })
            .map(|(at, _)| at)
            .collect()
    }

    fn split(&self, mrs: &Mrs, at: usize) -> QuestionResult<Vec<Mrs>> {
        if is_causal_preposition(&mrs.predications()[at].predicate) {
            let main = drop_phrase(mrs, at)?;
            let why = ask_why(&main)?;
            return Ok(vec![main, why]);
        }

        let main = extract_clause(mrs, at, ARG1)?;
        let reason = extract_clause(mrs, at, ARG2)?;
        let why = ask_why(&main)?;
        Ok(vec![main, reason, why])
    }
}

/// The graph without the causal preposition at `at` and the phrase it
/// takes as its object
fn drop_phrase(mrs: &Mrs, at: usize) -> QuestionResult<Mrs> {
    let object = role_variable(mrs, at, ARG2)?;
    let mut main = mrs.fork();
    let preposition = main.marked([at]);
    main.remove(preposition)?;

    let phrase = main.bound_by(object);
    if !phrase.is_empty() {
        let marked = main.mark(&phrase, Traversal::all(), Mode::Delete)?;
        trace!(removed = marked.len(), "dropping causal phrase");
        main.remove(marked)?;
    }
    Ok(main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_mrs::role::ARG0;
    use dialog_mrs::{FOR_P_REL, GraphBuilder, REASON_REL, causal_clause, subordinate_clause};
    use pretty_assertions::assert_eq;

    fn names(mrs: &Mrs) -> Vec<&str> {
        mrs.predications()
            .iter()
            .map(|p| p.predicate.name())
            .collect()
    }

    /// "John slept because of the noise."
    fn causal_phrase() -> Mrs {
        GraphBuilder::new(1)
            .index("e3", &[("SF", "PROP"), ("TENSE", "PAST")])
            .ep(
                "PROPER_Q_REL",
                4,
                (0, 4),
                &[(ARG0, "x6"), ("RSTR", "h5"), ("BODY", "h7")],
            )
            .ep("NAMED_REL", 8, (0, 4), &[(ARG0, "x6"), ("CARG", "\"John\"")])
            .ep("_sleep_v_1_rel", 2, (5, 10), &[(ARG0, "e3"), (ARG1, "x6")])
            .ep(
                "_because+of_p_rel",
                2,
                (11, 21),
                &[(ARG0, "e9"), (ARG1, "e3"), (ARG2, "x10")],
            )
            .ep(
                "_the_q_rel",
                11,
                (22, 25),
                &[(ARG0, "x10"), ("RSTR", "h12"), ("BODY", "h13")],
            )
            .ep("_noise_n_1_rel", 14, (26, 31), &[(ARG0, "x10")])
            .qeq(1, 2)
            .qeq(5, 8)
            .qeq(12, 14)
            .build()
    }

    #[test]
    fn it_splits_reason_clauses_and_asks_why() {
        let mrs = causal_clause();
        let matches = Causal.matches(&mrs);
        assert_eq!(matches.len(), 1);
        assert!(Causal.matches(&subordinate_clause()).is_empty());

        let graphs = Causal.split(&mrs, matches[0]).unwrap();
        assert_eq!(graphs.len(), 3);
        assert_eq!(names(&graphs[0]), vec!["PROPER_Q_REL", "NAMED_REL", "_sleep_v_1_rel"]);
        assert_eq!(names(&graphs[1]), vec!["PROPER_Q_REL", "NAMED_REL", "_work_v_1_rel"]);

        let why = &graphs[2];
        assert_eq!(why.kind(), "WHY");
        assert!(why.predications().iter().any(|p| p.predicate.is(FOR_P_REL)));
        assert!(why.predications().iter().any(|p| p.predicate.is(REASON_REL)));
        assert!(!why.predications().iter().any(|p| p.predicate.is("_work_v_1_rel")));
        assert!(graphs[0].is_declarative());
    }

    #[test]
    fn it_drops_causal_phrases_and_asks_why() {
        let mrs = causal_phrase();
        let at = Causal.matches(&mrs)[0];
        let graphs = Causal.split(&mrs, at).unwrap();
        assert_eq!(graphs.len(), 2);

        assert_eq!(names(&graphs[0]), vec!["PROPER_Q_REL", "NAMED_REL", "_sleep_v_1_rel"]);
        assert_eq!(graphs[1].kind(), "WHY");
    }
}
