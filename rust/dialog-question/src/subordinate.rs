//! Splitting subordinate clauses.
//!
//! "John slept while Mary worked." becomes "John slept." and "Mary
//! worked.". The subordinating conjunction takes both clauses as handles
//! (`ARG1` the main clause, `ARG2` the subordinate one); each output is the
//! extraction of one of them.

use tracing::debug;

use dialog_mrs::role::{ARG1, ARG2};
use dialog_mrs::{Mrs, MrsError, RelationCategory, Traversal};

use crate::rule::role_variable;
use crate::{Decomposer, QuestionResult, matching};

/// Splits `_while_x_rel`, `_although_x_rel`, `SUBORD_REL` and friends.
/// Conditionals are left whole: neither clause holds on its own.
pub struct Subordinate;

impl Decomposer for Subordinate {
    fn name(&self) -> &'static str {
        "subordinate"
    }

    fn matches(&self, mrs: &Mrs) -> Vec<usize> {
        for at in matching(mrs, RelationCategory::Conditional) {
            debug!(
                predicate = %mrs.predications()[at].predicate,
                "not splitting conditional"
            );
        }
        matching(mrs, RelationCategory::Subordination)
    }

    fn split(&self, mrs: &Mrs, at: usize) -> QuestionResult<Vec<Mrs>> {
        Ok(vec![
            extract_clause(mrs, at, ARG1)?,
            extract_clause(mrs, at, ARG2)?,
        ])
    }
}

/// The clause filling `role` of the conjunction at `at`, as a graph of its
/// own
pub(crate) fn extract_clause(mrs: &Mrs, at: usize, role: &str) -> QuestionResult<Mrs> {
    let clause = role_variable(mrs, at, role)?;
    if let Some(handle) = mrs.variable(clause).as_handle() {
        return Ok(mrs.extract_label(handle, Traversal::all())?);
    }
    let head = mrs.resolve(clause)?.ok_or_else(|| MrsError::Unresolved {
        predicate: mrs.predications()[at].predicate.to_string(),
        role: role.to_string(),
    })?;
    Ok(mrs.extract(&[head], Traversal::all())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose;
    use dialog_mrs::{Handle, conditional_clause, subordinate_clause};
    use pretty_assertions::assert_eq;

    fn names(mrs: &Mrs) -> Vec<&str> {
        mrs.predications()
            .iter()
            .map(|p| p.predicate.name())
            .collect()
    }

    #[test]
    fn it_splits_main_and_subordinate_clauses() {
        let mrs = subordinate_clause();
        let at = Subordinate.matches(&mrs)[0];
        let graphs = Subordinate.split(&mrs, at).unwrap();

        assert_eq!(
            names(&graphs[0]),
            vec!["PROPER_Q_REL", "NAMED_REL", "_sleep_v_1_rel"]
        );
        assert_eq!(graphs[0].top_target(), Some(Handle(9)));
        assert_eq!(graphs[0].index_variable().unwrap().label(), "e10");

        assert_eq!(
            names(&graphs[1]),
            vec!["PROPER_Q_REL", "NAMED_REL", "_work_v_1_rel"]
        );
        let index = graphs[1].index_variable().unwrap();
        assert_eq!(index.label(), "e19");
        assert_eq!(index.property("SF"), Some("PROP"));
    }

    #[test_log::test]
    fn it_leaves_conditionals_whole() {
        let mrs = conditional_clause();
        assert!(Subordinate.matches(&mrs).is_empty());

        let graphs = decompose(&Subordinate, vec![mrs], 4);
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].len(), 7);
    }
}
