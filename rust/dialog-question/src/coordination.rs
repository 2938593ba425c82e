//! Splitting coordinations.
//!
//! "John likes Mary and hates Anna." becomes "John likes Mary." and "John
//! hates Anna."; "John and Mary slept." becomes "John slept." and "Mary
//! slept.". Each output keeps one conjunct in the place of the whole
//! coordination: the coordination's variable is rebound to the conjunct's
//! and its label is moved onto the conjunct, so anything that governed or
//! modified the coordination now governs or modifies the conjunct.

use tracing::trace;

use dialog_mrs::role::{ARG0, L_HNDL, L_INDEX, R_HNDL, R_INDEX};
use dialog_mrs::{Handle, Mode, Mrs, RelationCategory, Traversal, VariableRef};

use crate::rule::role_variable;
use crate::{Decomposer, QuestionError, QuestionResult, matching};

/// Splits `_and_c_rel`, `_or_c_rel`, `_but_c_rel` and `IMPLICIT_CONJ_REL`
pub struct Coordination;

/// One side of a coordination
#[derive(Debug, Clone, Copy)]
struct Conjunct {
    variable: VariableRef,
    handle: Option<Handle>,
}

impl Conjunct {
    fn of(mrs: &Mrs, at: usize, index_role: &str, handle_role: &str) -> QuestionResult<Self> {
        let variable = role_variable(mrs, at, index_role)?;
        let handle = mrs
            .predication(at)
            .and_then(|predication| predication.variable(handle_role))
            .and_then(|handle| mrs.variable(handle).as_handle());
        Ok(Conjunct { variable, handle })
    }

    /// Label of the conjunct's head
    fn label(&self, mrs: &Mrs) -> QuestionResult<Option<Handle>> {
        if let Some(handle) = self.handle
            && !mrs.resolve_handle(handle)?.is_empty()
        {
            return Ok(Some(handle));
        }
        Ok(mrs
            .resolve(self.variable)?
            .map(|head| mrs.predications()[head].label))
    }

    /// A conjunct nothing introduces cannot stand in for the coordination
    fn ensure_resolved(&self, mrs: &Mrs, at: usize) -> QuestionResult<()> {
        if self.label(mrs)?.is_none() && self.predications(mrs)?.is_empty() {
            return Err(QuestionError::MissingCompanion {
                rule: "coordination",
                predicate: mrs.predications()[at].predicate.to_string(),
                companion: "conjunct",
            });
        }
        Ok(())
    }

    /// Predications that make up the conjunct itself
    fn predications(&self, mrs: &Mrs) -> QuestionResult<Vec<usize>> {
        let bound = mrs.bound_by(self.variable);
        if !bound.is_empty() {
            return Ok(bound);
        }
        match self.handle {
            Some(handle) => Ok(mrs.resolve_handle(handle)?),
            None => Ok(Vec::new()),
        }
    }
}

impl Decomposer for Coordination {
    fn name(&self) -> &'static str {
        "coordination"
    }

    fn matches(&self, mrs: &Mrs) -> Vec<usize> {
        matching(mrs, RelationCategory::Coordination)
    }

    fn split(&self, mrs: &Mrs, at: usize) -> QuestionResult<Vec<Mrs>> {
        let left = Conjunct::of(mrs, at, L_INDEX, L_HNDL)?;
        let right = Conjunct::of(mrs, at, R_INDEX, R_HNDL)?;
        left.ensure_resolved(mrs, at)?;
        right.ensure_resolved(mrs, at)?;
        Ok(vec![
            keep_conjunct(mrs, at, left, right)?,
            keep_conjunct(mrs, at, right, left)?,
        ])
    }
}

/// Replace the coordination at `at` with `keep`, dropping `drop` and every
/// predication only it needed
fn keep_conjunct(mrs: &Mrs, at: usize, keep: Conjunct, drop: Conjunct) -> QuestionResult<Mrs> {
    let mut graph = mrs.fork();
    let coordinated = role_variable(&graph, at, ARG0)?;
    let label = graph.predications()[at].label;

    // The coordination and the quantifier binding a coordinated individual
    let marked = graph.marked(graph.bound_by(coordinated));
    let keep_label = keep.label(&graph)?;

    if graph.variable(coordinated).is_event() {
        graph.inherit_properties(keep.variable, coordinated);
    }
    if let Some(keep_label) = keep_label {
        graph.relabel(label, keep_label);
    }
    graph.rebind(coordinated, keep.variable);
    graph.remove(marked)?;

    let dropped = drop.predications(&graph)?;
    if !dropped.is_empty() {
        let marked = graph.mark(&dropped, Traversal::all(), Mode::Delete)?;
        trace!(removed = marked.len(), "dropping conjunct");
        graph.remove(marked)?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_mrs::role::ARG1;
    use crate::decompose;
    use dialog_mrs::{GraphBuilder, coordinated_events, coordinated_individuals};
    use pretty_assertions::assert_eq;

    fn names(mrs: &Mrs) -> Vec<&str> {
        mrs.predications()
            .iter()
            .map(|p| p.predicate.name())
            .collect()
    }

    #[test]
    fn it_splits_coordinated_events_into_conjuncts() {
        let mrs = coordinated_events();
        let matches = Coordination.matches(&mrs);
        assert_eq!(matches.len(), 1);

        let graphs = Coordination.split(&mrs, matches[0]).unwrap();
        assert_eq!(graphs.len(), 2);

        assert_eq!(
            names(&graphs[0]),
            vec![
                "PROPER_Q_REL",
                "NAMED_REL",
                "_like_v_1_rel",
                "PROPER_Q_REL",
                "NAMED_REL",
            ]
        );
        assert_eq!(
            names(&graphs[1]),
            vec![
                "PROPER_Q_REL",
                "NAMED_REL",
                "_hate_v_1_rel",
                "PROPER_Q_REL",
                "NAMED_REL",
            ]
        );

        let like = &graphs[0];
        let index = like.index_variable().unwrap();
        assert_eq!(index.label(), "e10");
        assert_eq!(index.property("SF"), Some("PROP"));
        assert_eq!(like.top_target(), Some(Handle(11)));

        let hate = &graphs[1];
        assert_eq!(hate.index_variable().unwrap().label(), "e13");
        assert_eq!(hate.top_target(), Some(Handle(14)));
    }

    #[test]
    fn it_rebinds_coordinated_individuals() {
        let mrs = coordinated_individuals();
        let at = Coordination.matches(&mrs)[0];
        let graphs = Coordination.split(&mrs, at).unwrap();

        for (graph, name) in graphs.iter().zip(["John", "Mary"]) {
            assert_eq!(
                names(graph),
                vec!["PROPER_Q_REL", "NAMED_REL", "_sleep_v_1_rel"]
            );
            assert_eq!(graph.predications()[1].constant("CARG"), Some(name));
            let subject = graph.predications()[2].variable(ARG1).unwrap();
            assert_eq!(graph.predications()[1].arg0(), Some(subject));
        }
    }

    #[test]
    fn it_leaves_the_input_untouched() {
        let mrs = coordinated_events();
        let before = dialog_mrs::write(&mrs).unwrap();
        Coordination.split(&mrs, Coordination.matches(&mrs)[0]).unwrap();
        assert_eq!(dialog_mrs::write(&mrs).unwrap(), before);
    }

    #[test_log::test]
    fn it_skips_coordinations_with_an_unresolved_conjunct() {
        let mrs = GraphBuilder::new(1)
            .index("e3", &[("SF", "PROP"), ("TENSE", "PRES")])
            .ep(
                "_and_c_rel",
                2,
                (16, 19),
                &[
                    (ARG0, "e3"),
                    ("L-INDEX", "e10"),
                    ("R-INDEX", "e99"),
                    ("L-HNDL", "h11"),
                ],
            )
            .ep("_sleep_v_1_rel", 11, (5, 10), &[(ARG0, "e10")])
            .qeq(1, 2)
            .build();
        let at = Coordination.matches(&mrs)[0];
        assert!(matches!(
            Coordination.split(&mrs, at),
            Err(QuestionError::MissingCompanion {
                companion: "conjunct",
                ..
            })
        ));

        let before = dialog_mrs::write(&mrs).unwrap();
        let graphs = decompose(&Coordination, vec![mrs], 4);
        assert_eq!(graphs.len(), 1);
        assert_eq!(dialog_mrs::write(&graphs[0]).unwrap(), before);
        assert_eq!(names(&graphs[0]), vec!["_and_c_rel", "_sleep_v_1_rel"]);
    }
}
