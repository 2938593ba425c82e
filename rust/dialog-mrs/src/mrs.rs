//! The semantic graph.
//!
//! An [`Mrs`] owns its predications, its handle constraints and an arena of
//! [`Variable`]s. Role values refer into the arena through [`VariableRef`],
//! so two predications that mention the same entity share one slot once
//! [`Mrs::unify_coreferences`] has run. Graphs never share state with one
//! another: [`Mrs::fork`] produces an independent deep copy.
//!
//! Every structural edit (adding or removing predications) bumps the graph's
//! revision. A [`Marked`] set remembers the revision it was computed against
//! and [`Mrs::remove`] refuses sets that are out of date.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use tracing::{debug, trace};

use crate::closure::Marked;
use crate::constraint::{HandleConstraint, Target};
use crate::role::{ARG0, Value};
use crate::{
    Handle, MrsError, MrsResult, Predicate, Predication, RelationCategory, Sort, Variable,
    VariableRef,
};

/// Sentence-type tag of a graph that has not been turned into a question
pub const DECLARATIVE: &str = "PROP";
/// Property carrying the sentence force of an event
pub const SENTENCE_FORCE: &str = "SF";
/// Sentence force of an interrogative
pub const INTERROGATIVE_FORCE: &str = "QUES";

/// A Minimal Recursion Semantics graph
#[derive(Debug, Clone)]
pub struct Mrs {
    top: Handle,
    index: Option<VariableRef>,
    kind: String,
    predications: Vec<Predication>,
    constraints: Vec<HandleConstraint>,
    variables: Vec<Variable>,
    revision: u64,
}

impl Mrs {
    pub fn new(top: Handle) -> Self {
        Mrs {
            top,
            index: None,
            kind: DECLARATIVE.into(),
            predications: Vec::new(),
            constraints: Vec::new(),
            variables: Vec::new(),
            revision: 0,
        }
    }

    pub fn top(&self) -> Handle {
        self.top
    }

    pub fn set_top(&mut self, top: Handle) {
        self.top = top;
    }

    /// The main event
    pub fn index(&self) -> Option<VariableRef> {
        self.index
    }

    pub fn index_variable(&self) -> Option<&Variable> {
        self.index.map(|index| self.variable(index))
    }

    pub fn set_index(&mut self, index: VariableRef) {
        self.index = Some(index);
    }

    /// Sentence-type tag (`PROP`, `Y/N`, `WHO`, ...)
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
    }

    pub fn is_declarative(&self) -> bool {
        self.kind == DECLARATIVE
    }

    pub fn predications(&self) -> &[Predication] {
        &self.predications
    }

    pub fn predication(&self, at: usize) -> Option<&Predication> {
        self.predications.get(at)
    }

    /// Edit a predication in place. Changing labels or roles does not
    /// invalidate outstanding [`Marked`] sets; only adding or removing
    /// predications does.
    pub fn predication_mut(&mut self, at: usize) -> Option<&mut Predication> {
        self.predications.get_mut(at)
    }

    pub fn len(&self) -> usize {
        self.predications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predications.is_empty()
    }

    pub fn constraints(&self) -> &[HandleConstraint] {
        &self.constraints
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn variable(&self, variable: VariableRef) -> &Variable {
        &self.variables[variable.0]
    }

    pub fn variable_mut(&mut self, variable: VariableRef) -> &mut Variable {
        &mut self.variables[variable.0]
    }

    /// Add a variable to the arena.
    ///
    /// Variables other than handles are interned: adding a variable whose
    /// label is already present returns the existing reference, and the
    /// existing slot absorbs any property it did not carry yet.
    pub fn add_variable(&mut self, variable: Variable) -> VariableRef {
        if !variable.is_handle()
            && let Some(at) = self
                .variables
                .iter()
                .position(|existing| existing.key() == variable.key())
        {
            self.variables[at].absorb(&variable);
            return VariableRef(at);
        }
        self.push_variable(variable)
    }

    /// Add a variable occurrence without interning it. The reader uses this
    /// and unifies afterwards.
    pub(crate) fn push_variable(&mut self, variable: Variable) -> VariableRef {
        self.variables.push(variable);
        VariableRef(self.variables.len() - 1)
    }

    /// True when both references denote the same variable label
    pub fn same_variable(&self, a: VariableRef, b: VariableRef) -> bool {
        a == b || self.variable(a).key() == self.variable(b).key()
    }

    /// Append a predication and return its position. Handle constraints are
    /// cleaned afterwards, so constraints that target the new predication
    /// must be added after it.
    pub fn add_predication(&mut self, predication: Predication) -> usize {
        trace!(predicate = %predication.predicate, label = %predication.label, "adding predication");
        self.predications.push(predication);
        self.revision += 1;
        self.clean_handle_constraints();
        self.predications.len() - 1
    }

    /// Add a handle constraint unless an identical one exists
    pub fn add_constraint(&mut self, constraint: HandleConstraint) {
        if !self.constraints.contains(&constraint) {
            self.constraints.push(constraint);
        }
    }

    pub fn set_label(&mut self, at: usize, label: Handle) {
        if let Some(predication) = self.predications.get_mut(at) {
            predication.label = label;
        }
    }

    pub fn set_predicate(&mut self, at: usize, predicate: Predicate) {
        if let Some(predication) = self.predications.get_mut(at) {
            predication.predicate = predicate;
        }
    }

    /// Set a property on the main event. Returns false if the graph has no
    /// index.
    pub fn set_index_property(&mut self, name: &str, value: &str) -> bool {
        match self.index {
            Some(index) => {
                self.variable_mut(index).set_property(name, value);
                true
            }
            None => false,
        }
    }

    /// Tag the graph as a question of the given kind and set the main
    /// event's sentence force to `QUES`
    pub fn mark_interrogative(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
        if !self.set_index_property(SENTENCE_FORCE, INTERROGATIVE_FORCE) {
            debug!(kind = %self.kind, "graph has no index to carry sentence force");
        }
    }

    /// Rebind every occurrence of one variable to another. Returns the
    /// number of role values that changed.
    pub fn rebind(&mut self, from: VariableRef, to: VariableRef) -> usize {
        let from_key = self.variable(from).key();
        let mut count = 0;
        for at in 0..self.predications.len() {
            for slot in 0..self.predications[at].roles.len() {
                if let Value::Variable(current) = self.predications[at].roles[slot].value
                    && current != to
                    && self.variables[current.0].key() == from_key
                {
                    self.predications[at].roles[slot].value = Value::Variable(to);
                    count += 1;
                }
            }
        }
        if let Some(index) = self.index
            && self.variable(index).key() == from_key
        {
            self.index = Some(to);
        }
        count
    }

    /// Move every predication labelled `from` to `to` and point constraints
    /// targeting `from` at `to`. Returns the number of predications moved.
    pub fn relabel(&mut self, from: Handle, to: Handle) -> usize {
        let mut moved = 0;
        for predication in self.predications.iter_mut().filter(|p| p.label == from) {
            predication.label = to;
            moved += 1;
        }
        for constraint in self.constraints.iter_mut().filter(|c| c.lo() == from) {
            constraint.lo = Target::Handle(to);
        }
        moved
    }

    /// Copy to `to` every property of `from` that `to` does not carry yet
    pub fn inherit_properties(&mut self, to: VariableRef, from: VariableRef) {
        if to == from {
            return;
        }
        let source = self.variable(from).clone();
        self.variable_mut(to).absorb(&source);
    }

    /// Point the constraint on the top handle at `label`, adding one if the
    /// graph has none
    pub fn retarget_top(&mut self, label: Handle) {
        let top = self.top;
        match self.constraints.iter_mut().find(|c| c.hi == top) {
            Some(constraint) => constraint.lo = Target::Handle(label),
            None => self.constraints.push(HandleConstraint::qeq(top, label)),
        }
    }

    /// Label targeted by the top handle's constraint
    pub fn top_target(&self) -> Option<Handle> {
        self.constraints
            .iter()
            .find(|c| c.hi == self.top)
            .map(HandleConstraint::lo)
    }

    /// Unify every occurrence of a non-handle variable label into one arena
    /// slot. The first occurrence (in predication order, then role order)
    /// is canonical and absorbs properties missing from it; the index is
    /// rebound last. Idempotent.
    pub fn unify_coreferences(&mut self) {
        let mut canonical: HashMap<(Sort, u32), VariableRef> = HashMap::new();
        for at in 0..self.predications.len() {
            for slot in 0..self.predications[at].roles.len() {
                let Value::Variable(current) = self.predications[at].roles[slot].value else {
                    continue;
                };
                let variable = &self.variables[current.0];
                if variable.is_handle() {
                    continue;
                }
                match canonical.get(&variable.key()) {
                    Some(&first) if first != current => {
                        let occurrence = variable.clone();
                        self.variables[first.0].absorb(&occurrence);
                        self.predications[at].roles[slot].value = Value::Variable(first);
                    }
                    Some(_) => {}
                    None => {
                        canonical.insert(variable.key(), current);
                    }
                }
            }
        }
        if let Some(index) = self.index
            && let Some(&first) = canonical.get(&self.variable(index).key())
            && first != index
        {
            let occurrence = self.variable(index).clone();
            self.variables[first.0].absorb(&occurrence);
            self.index = Some(first);
        }
    }

    /// Deep copy that shares no state with `self`. Arena positions are
    /// preserved, so a [`VariableRef`] or predication position taken from
    /// `self` addresses the same variable or predication in the copy.
    pub fn fork(&self) -> Mrs {
        let mut copy = self.clone();
        copy.unify_coreferences();
        copy
    }

    /// `n` consecutive ids above every id in use: predication labels,
    /// arena variables (role values and reserved fresh variables),
    /// constraint handles and the top handle. All sorts share the
    /// numbering space, so the ids are unused under any sort prefix. Read
    /// ids never exceed `MAX_VARIABLE_ID`, which leaves room above them.
    pub fn fresh_ids(&self, n: usize) -> Vec<u32> {
        let highest = self
            .predications
            .iter()
            .map(|p| p.label.0)
            .chain(self.variables.iter().map(Variable::id))
            .chain(self.constraints.iter().flat_map(|c| [c.hi.0, c.lo().0]))
            .chain(std::iter::once(self.top.0))
            .max()
            .unwrap_or(0);
        (1..=n as u32).map(|offset| highest + offset).collect()
    }

    /// Reserve a fresh variable of the given sort in the arena
    pub fn fresh_variable(&mut self, sort: Sort) -> VariableRef {
        let id = self.fresh_ids(1)[0];
        self.push_variable(Variable::new(sort, id))
    }

    /// Reserve a fresh handle
    pub fn fresh_handle(&mut self) -> Handle {
        let variable = self.fresh_variable(Sort::Handle);
        Handle(self.variable(variable).id())
    }

    /// Delete the marked predications and clean the handle constraints.
    /// Returns the number of predications removed.
    pub fn remove(&mut self, marked: Marked) -> MrsResult<usize> {
        if marked.revision() != self.revision {
            return Err(MrsError::StaleMark {
                marked: marked.revision(),
                current: self.revision,
            });
        }
        if let Some(missing) = marked.iter().find(|&at| at >= self.predications.len()) {
            return Err(MrsError::MissingPredication(missing));
        }

        let before = self.predications.len();
        let mut at = 0;
        self.predications.retain(|_| {
            let keep = !marked.contains(at);
            at += 1;
            keep
        });
        self.revision += 1;
        let dropped = self.clean_handle_constraints();
        let removed = before - self.predications.len();
        debug!(removed, dropped_constraints = dropped, "removed marked predications");
        Ok(removed)
    }

    /// Drop every constraint whose outer handle is not the top handle, a
    /// label or a handle-valued role of a surviving predication, or whose
    /// inner target is not a surviving label. Returns how many were dropped.
    pub fn clean_handle_constraints(&mut self) -> usize {
        let labels: HashSet<Handle> = self.predications.iter().map(|p| p.label).collect();
        let mut outer = labels.clone();
        outer.insert(self.top);
        for predication in &self.predications {
            for variable in predication.variables() {
                if let Some(handle) = self.variables[variable.0].as_handle() {
                    outer.insert(handle);
                }
            }
        }

        let before = self.constraints.len();
        self.constraints
            .retain(|c| outer.contains(&c.hi) && labels.contains(&c.lo()));
        before - self.constraints.len()
    }

    /// Positions of the predications carrying `label`
    pub fn labelled(&self, label: Handle) -> Vec<usize> {
        self.predications
            .iter()
            .enumerate()
            .filter(|(_, p)| p.label == label)
            .map(|(at, _)| at)
            .collect()
    }

    /// Positions of the predications whose `ARG0` is `variable`
    pub fn bound_by(&self, variable: VariableRef) -> Vec<usize> {
        self.predications
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.arg0()
                    .is_some_and(|arg0| self.same_variable(arg0, variable))
            })
            .map(|(at, _)| at)
            .collect()
    }

    /// Predications a handle stands for: those labelled with it, or those
    /// labelled with the target of a constraint whose outer handle it is.
    /// An empty result means the handle is unconstrained.
    pub fn resolve_handle(&self, handle: Handle) -> MrsResult<Vec<usize>> {
        let direct = self.labelled(handle);
        if !direct.is_empty() {
            return Ok(direct);
        }
        let mut resolved = BTreeSet::new();
        for constraint in self.constraints.iter().filter(|c| c.hi == handle) {
            let targets = self.labelled(constraint.lo());
            if targets.is_empty() {
                return Err(MrsError::UnresolvedHandle {
                    hi: handle,
                    lo: constraint.lo(),
                });
            }
            resolved.extend(targets);
        }
        Ok(resolved.into_iter().collect())
    }

    /// The head among predications that share a scope: the first one that
    /// is not a quantifier and does not take another candidate's `ARG0` as
    /// one of its roles.
    pub fn head_of(&self, candidates: &[usize]) -> Option<usize> {
        let own: Vec<VariableRef> = candidates
            .iter()
            .filter_map(|&at| self.predications.get(at).and_then(Predication::arg0))
            .collect();
        let modifies_other = |at: usize| {
            let predication = &self.predications[at];
            predication.roles.iter().any(|pair| {
                pair.role != ARG0
                    && pair.as_variable().is_some_and(|value| {
                        own.iter().any(|&arg0| {
                            Some(arg0) != predication.arg0() && self.same_variable(arg0, value)
                        })
                    })
            })
        };
        let is_quantifier =
            |at: usize| self.predications[at].predicate.category() == RelationCategory::Quantifier;

        candidates
            .iter()
            .copied()
            .filter(|&at| at < self.predications.len())
            .find(|&at| !is_quantifier(at) && !modifies_other(at))
            .or_else(|| {
                candidates
                    .iter()
                    .copied()
                    .find(|&at| at < self.predications.len() && !is_quantifier(at))
            })
    }

    /// The predication a role value stands for: the head of the scope a
    /// handle resolves to, or the head among the predications bound by a
    /// variable
    pub fn resolve(&self, variable: VariableRef) -> MrsResult<Option<usize>> {
        match self.variable(variable).as_handle() {
            Some(handle) => Ok(self.head_of(&self.resolve_handle(handle)?)),
            None => Ok(self.head_of(&self.bound_by(variable))),
        }
    }

    /// The predication introducing the main event
    pub fn main_predication(&self) -> Option<usize> {
        let index = self.index?;
        self.head_of(&self.bound_by(index))
    }
}

impl fmt::Display for Mrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[ {}", self.kind)?;
        writeln!(f, "  TOP: {}", self.top)?;
        if let Some(index) = self.index_variable() {
            writeln!(f, "  INDEX: {index}")?;
        }
        writeln!(f, "  RELS: <")?;
        for predication in &self.predications {
            write!(f, "    [ {}", predication.predicate)?;
            if let Some(span) = predication.span {
                write!(f, "{span}")?;
            }
            write!(f, " LBL: {}", predication.label)?;
            for pair in &predication.roles {
                match &pair.value {
                    Value::Variable(variable) => {
                        write!(f, " {}: {}", pair.role, self.variable(*variable).label())?
                    }
                    Value::Constant(constant) => write!(f, " {}: {constant:?}", pair.role)?,
                }
            }
            writeln!(f, " ]")?;
        }
        writeln!(f, "  >")?;
        write!(f, "  HCONS: <")?;
        for constraint in &self.constraints {
            write!(f, " {constraint}")?;
        }
        write!(f, " > ]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::ARG1;
    use crate::{coordinated_events, coordinated_individuals, relative_clause};
    use pretty_assertions::assert_eq;

    fn position(mrs: &Mrs, name: &str) -> usize {
        mrs.predications()
            .iter()
            .position(|p| p.predicate.is(name))
            .unwrap()
    }

    #[test]
    fn it_interns_variables_by_label() {
        let mut mrs = Mrs::new(Handle(1));
        let first = mrs.add_variable(Variable::new(Sort::Individual, 3).with_property("NUM", "SG"));
        let second = mrs.add_variable(Variable::new(Sort::Individual, 3).with_property("PERS", "3"));
        let handle = mrs.add_variable(Variable::new(Sort::Handle, 3));

        assert_eq!(first, second);
        assert_ne!(first, handle);
        assert_eq!(mrs.variable(first).property("PERS"), Some("3"));
    }

    #[test]
    fn it_unifies_occurrences_idempotently() {
        let mut mrs = Mrs::new(Handle(1));
        let a = mrs.push_variable(Variable::new(Sort::Individual, 4));
        let b = mrs.push_variable(Variable::new(Sort::Individual, 4).with_property("NUM", "PL"));
        mrs.add_predication(
            Predication::new(Predicate::lexical("_dog_n_1_rel"), Handle(2)).with_variable(ARG0, a),
        );
        mrs.add_predication(
            Predication::new(Predicate::lexical("_bark_v_1_rel"), Handle(3))
                .with_variable(ARG1, b),
        );

        mrs.unify_coreferences();
        let once = format!("{mrs}");
        mrs.unify_coreferences();

        assert_eq!(format!("{mrs}"), once);
        assert_eq!(mrs.predications()[1].variable(ARG1), Some(a));
        assert_eq!(mrs.variable(a).property("NUM"), Some("PL"));
    }

    #[test]
    fn it_rebinds_every_occurrence_and_the_index() {
        let mut mrs = coordinated_events();
        let and = position(&mrs, "_and_c_rel");
        let like = position(&mrs, "_like_v_1_rel");
        let conjunction = mrs.predications()[and].arg0().unwrap();
        let conjunct = mrs.predications()[like].arg0().unwrap();

        let changed = mrs.rebind(conjunction, conjunct);

        assert_eq!(changed, 1);
        assert_eq!(mrs.index(), Some(conjunct));
    }

    #[test]
    fn it_relabels_predications_and_constraint_targets() {
        let mut mrs = coordinated_events();
        assert_eq!(mrs.relabel(Handle(2), Handle(11)), 1);
        assert_eq!(mrs.top_target(), Some(Handle(11)));
        assert_eq!(mrs.labelled(Handle(11)).len(), 2);
    }

    #[test]
    fn it_hands_out_distinct_fresh_handles() {
        let mut mrs = coordinated_events();
        let first = mrs.fresh_handle();
        let second = mrs.fresh_handle();
        assert_eq!(first, Handle(25));
        assert_eq!(second, Handle(26));
        assert_eq!(mrs.fresh_ids(2), vec![27, 28]);
    }

    #[test]
    fn it_drops_constraints_over_removed_predications() {
        let mut mrs = coordinated_events();
        let named = mrs
            .predications()
            .iter()
            .rposition(|p| p.predicate.is("NAMED_REL"))
            .unwrap();
        let before = mrs.constraints().len();

        let marked = mrs.marked([named]);
        assert_eq!(mrs.remove(marked), Ok(1));

        assert_eq!(mrs.constraints().len(), before - 1);
        assert!(mrs.constraints().iter().all(|c| c.lo() != Handle(24)));
    }

    #[test]
    fn it_resolves_handles_through_constraints() {
        let mrs = coordinated_events();
        assert_eq!(mrs.resolve_handle(Handle(1)), Ok(vec![position(&mrs, "_and_c_rel")]));
        assert_eq!(mrs.resolve_handle(Handle(7)), Ok(vec![]));
    }

    #[test]
    fn it_finds_the_head_of_a_shared_label() {
        let mrs = relative_clause();
        let dog = position(&mrs, "_dog_n_1_rel");
        assert_eq!(mrs.head_of(&mrs.labelled(Handle(8))), Some(dog));
        assert_eq!(mrs.main_predication(), Some(position(&mrs, "_run_v_1_rel")));
    }

    #[test]
    fn it_resolves_variables_to_their_non_quantifier_binder() {
        let mrs = coordinated_individuals();
        let sleep = position(&mrs, "_sleep_v_1_rel");
        let subject = mrs.predications()[sleep].variable(ARG1).unwrap();
        assert_eq!(mrs.resolve(subject), Ok(Some(position(&mrs, "_and_c_rel"))));
    }

    #[test]
    fn it_tags_interrogatives() {
        let mut mrs = coordinated_events();
        assert!(mrs.is_declarative());
        mrs.mark_interrogative("Y/N");
        assert_eq!(mrs.kind(), "Y/N");
        assert_eq!(
            mrs.index_variable().and_then(|index| index.property(SENTENCE_FORCE)),
            Some(INTERROGATIVE_FORCE)
        );
    }
}
