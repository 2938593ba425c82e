//! Splitting appositions.
//!
//! "the girl Anna likes dogs" yields "the girl is Anna", "the girl likes
//! dogs" and "Anna likes dogs".

use tracing::trace;

use dialog_mrs::role::{ARG1, ARG2};
use dialog_mrs::{BE_V_ID_REL, Mode, Mrs, Predicate, RelationCategory, Traversal, VariableRef};

use crate::rule::role_variable;
use crate::{Decomposer, QuestionResult, matching};

/// Splits `APPOS_REL`
pub struct Apposition;

impl Decomposer for Apposition {
    fn name(&self) -> &'static str {
        "apposition"
    }

    fn matches(&self, mrs: &Mrs) -> Vec<usize> {
        matching(mrs, RelationCategory::Apposition)
    }

    fn split(&self, mrs: &Mrs, at: usize) -> QuestionResult<Vec<Mrs>> {
        let first = role_variable(mrs, at, ARG1)?;
        let second = role_variable(mrs, at, ARG2)?;
        Ok(vec![
            copula(mrs, at)?,
            keep_side(mrs, at, first, second)?,
            keep_side(mrs, at, second, first)?,
        ])
    }
}

/// The apposition asserted as an identity: `APPOS_REL(e, x1, x2)` becomes
/// `_be_v_id_rel(e, x1, x2)` under its own label, with `e` as the index
fn copula(mrs: &Mrs, at: usize) -> QuestionResult<Mrs> {
    let mut graph = mrs.fork();
    let label = graph.fresh_handle();
    graph.set_predicate(at, Predicate::lexical(BE_V_ID_REL));
    graph.set_label(at, label);
    Ok(graph.extract(&[at], Traversal::all())?)
}

/// Drop the apposition and the `drop` side, then rebind `drop` to `keep`
fn keep_side(
    mrs: &Mrs,
    at: usize,
    keep: VariableRef,
    drop: VariableRef,
) -> QuestionResult<Mrs> {
    let mut graph = mrs.fork();
    let apposition = graph.marked([at]);
    graph.remove(apposition)?;

    let dropped = graph.bound_by(drop);
    if !dropped.is_empty() {
        let marked = graph.mark(&dropped, Traversal::all(), Mode::Delete)?;
        trace!(removed = marked.len(), "dropping apposed side");
        graph.remove(marked)?;
    }
    graph.rebind(drop, keep);
    Ok(graph)
}
