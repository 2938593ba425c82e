//! Decomposition rules.
//!
//! A decomposer splits one complex declarative graph into simpler ones:
//! coordinated clauses into their conjuncts, a sentence with a subordinate
//! clause into both clauses, and so on. Rules are applied as a worklist so
//! that their own output is scanned again until nothing matches, which
//! fully splits nested coordinations and sentences with several clauses.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dialog_mrs::{Mrs, MrsError, RelationCategory, VariableRef};

use crate::{
    Apposition, Causal, Coordination, QuestionResult, RelativeClause, Subordinate,
};

/// A rule that splits a graph around a matching predication
pub trait Decomposer {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Positions of the predications this rule can split around
    fn matches(&self, mrs: &Mrs) -> Vec<usize>;

    /// Split `mrs` around the predication at `at`. `mrs` is not modified;
    /// the result holds new graphs.
    fn split(&self, mrs: &Mrs, at: usize) -> QuestionResult<Vec<Mrs>>;
}

/// Positions of the predications in a relation category
pub fn matching(mrs: &Mrs, category: RelationCategory) -> Vec<usize> {
    mrs.predications()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.predicate.category() == category)
        .map(|(at, _)| at)
        .collect()
}

/// The variable filling `role` of the predication at `at`
pub(crate) fn role_variable(mrs: &Mrs, at: usize, role: &str) -> QuestionResult<VariableRef> {
    let predication = mrs
        .predication(at)
        .ok_or(MrsError::MissingPredication(at))?;
    let variable = predication.variable(role).ok_or_else(|| MrsError::MissingRole {
        predicate: predication.predicate.to_string(),
        role: role.to_string(),
    })?;
    Ok(variable)
}

/// Apply a decomposer to every graph until no graph matches or
/// `max_depth` splits deep.
///
/// Interrogative graphs pass through untouched. For each declarative graph
/// the matches are tried in order; the first successful split replaces the
/// graph with its outputs, which are scanned again. A failed split is
/// logged and the next match is tried; a graph no match could split is
/// kept as it is.
pub fn decompose(rule: &dyn Decomposer, graphs: Vec<Mrs>, max_depth: usize) -> Vec<Mrs> {
    let mut output = Vec::new();
    let mut pending: Vec<(Mrs, usize)> = graphs.into_iter().rev().map(|g| (g, 0)).collect();

    while let Some((mrs, depth)) = pending.pop() {
        if !mrs.is_declarative() || depth >= max_depth {
            output.push(mrs);
            continue;
        }

        let mut split = None;
        for at in rule.matches(&mrs) {
            match rule.split(&mrs, at) {
                Ok(outputs) if !outputs.is_empty() => {
                    debug!(
                        rule = rule.name(),
                        predicate = %mrs.predications()[at].predicate,
                        outputs = outputs.len(),
                        "split graph"
                    );
                    split = Some(outputs);
                    break;
                }
                Ok(_) => {}
                Err(error) => warn!(
                    rule = rule.name(),
                    predicate = %mrs.predications()[at].predicate,
                    %error,
                    "abandoning rule match"
                ),
            }
        }

        match split {
            Some(outputs) => {
                pending.extend(outputs.into_iter().rev().map(|g| (g, depth + 1)));
            }
            None => output.push(mrs),
        }
    }
    output
}

/// The decomposition stages, in the order a pipeline may run them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Causal,
    Subordinate,
    RelativeClause,
    Coordination,
    Apposition,
}

impl Stage {
    /// Every stage in its default order
    pub fn all() -> Vec<Stage> {
        vec![
            Stage::Causal,
            Stage::Subordinate,
            Stage::RelativeClause,
            Stage::Coordination,
            Stage::Apposition,
        ]
    }

    pub fn run(&self, graphs: Vec<Mrs>, max_depth: usize) -> Vec<Mrs> {
        match self {
            Stage::Causal => decompose(&Causal, graphs, max_depth),
            Stage::Subordinate => decompose(&Subordinate, graphs, max_depth),
            Stage::RelativeClause => decompose(&RelativeClause, graphs, max_depth),
            Stage::Coordination => decompose(&Coordination, graphs, max_depth),
            Stage::Apposition => decompose(&Apposition, graphs, max_depth),
        }
    }
}
