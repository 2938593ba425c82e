//! Dependency closure over a graph's predications.
//!
//! Predications reference each other implicitly: a role value names another
//! predication's label (directly or through a `qeq`), or another
//! predication's `ARG0`. The adjacency is recomputed per query from the
//! current state of the graph.

use std::collections::BTreeSet;

use tracing::trace;

use crate::role::{ARG0, CARG, is_argument_role};
use crate::{Mrs, MrsError, MrsResult, Sort, VariableRef};

/// Which roles a traversal follows. `ARG0` and `CARG` are never followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleScope {
    /// `ARG1` .. `ARGn`
    Arguments,
    /// Every role, including `RSTR`, `BODY` and the coordination roles
    All,
}

impl RoleScope {
    pub fn follows(&self, role: &str) -> bool {
        if role == ARG0 || role == CARG {
            return false;
        }
        match self {
            RoleScope::Arguments => is_argument_role(role),
            RoleScope::All => true,
        }
    }
}

/// Policy for computing a closure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traversal {
    pub roles: RoleScope,
    /// Also include the predications that (transitively) take the focus as
    /// a role value
    pub governors: bool,
}

impl Traversal {
    pub fn arguments() -> Self {
        Traversal {
            roles: RoleScope::Arguments,
            governors: false,
        }
    }

    pub fn all() -> Self {
        Traversal {
            roles: RoleScope::All,
            governors: false,
        }
    }

    pub fn with_governors(mut self) -> Self {
        self.governors = true;
        self
    }
}

/// What [`Mrs::mark`] marks for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mark everything outside the closure
    Keep,
    /// Mark the closure, sparing predications still referenced from outside
    Delete,
}

/// Predications selected for removal.
///
/// A set is bound to the graph revision it was computed against and is
/// consumed by [`Mrs::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marked {
    indices: BTreeSet<usize>,
    revision: u64,
}

impl Marked {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, at: usize) -> bool {
        self.indices.contains(&at)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn mark(&mut self, at: usize) {
        self.indices.insert(at);
    }

    /// Spare a predication. Returns true if it was marked.
    pub fn unmark(&mut self, at: usize) -> bool {
        self.indices.remove(&at)
    }
}

impl Mrs {
    /// An explicit set of positions, bound to the current revision
    pub fn marked(&self, indices: impl IntoIterator<Item = usize>) -> Marked {
        Marked {
            indices: indices.into_iter().collect(),
            revision: self.revision(),
        }
    }

    /// Predications the followed roles of `at` point at
    pub fn dependencies(&self, at: usize, roles: RoleScope) -> MrsResult<BTreeSet<usize>> {
        let predication = self
            .predication(at)
            .ok_or(MrsError::MissingPredication(at))?;
        let mut targets = BTreeSet::new();
        for pair in predication.roles.iter().filter(|pair| roles.follows(&pair.role)) {
            let Some(value) = pair.as_variable() else {
                continue;
            };
            match self.variable(value).as_handle() {
                Some(handle) => targets.extend(self.resolve_handle(handle)?),
                None => targets.extend(self.bound_by(value)),
            }
        }
        targets.remove(&at);
        Ok(targets)
    }

    /// The focus predications plus everything they depend on
    pub fn closure(&self, focus: &[usize], traversal: Traversal) -> MrsResult<BTreeSet<usize>> {
        let mut members = BTreeSet::new();
        let mut pending = Vec::new();
        for &at in focus {
            if at >= self.len() {
                return Err(MrsError::MissingPredication(at));
            }
            if members.insert(at) {
                pending.push(at);
            }
        }

        let index_bound = self.index().map(|index| self.bound_by(index)).unwrap_or_default();

        while let Some(at) = pending.pop() {
            let mut reached = self.dependencies(at, traversal.roles)?;

            let predication = &self.predications()[at];
            if let Some(arg0) = predication.arg0() {
                if self.variable(arg0).sort() == Sort::Individual {
                    reached.extend(self.bound_by(arg0));
                }
                for other in self.labelled(predication.label) {
                    if other != at
                        && !index_bound.contains(&other)
                        && self.takes(other, arg0, traversal.roles)
                    {
                        reached.insert(other);
                    }
                }
            }

            for next in reached {
                if members.insert(next) {
                    pending.push(next);
                }
            }
        }

        if traversal.governors {
            let governors = self.governors(focus, traversal.roles)?;
            trace!(count = governors.len(), "adding governors to closure");
            members.extend(governors);
        }

        Ok(members)
    }

    /// Predications that transitively take one of `focus` as a followed
    /// role value
    pub fn governors(&self, focus: &[usize], roles: RoleScope) -> MrsResult<BTreeSet<usize>> {
        let mut edges = Vec::with_capacity(self.len());
        for at in 0..self.len() {
            edges.push(self.dependencies(at, roles)?);
        }

        let mut governors = BTreeSet::new();
        let mut pending: Vec<usize> = focus.to_vec();
        while let Some(target) = pending.pop() {
            for (at, targets) in edges.iter().enumerate() {
                if targets.contains(&target) && !focus.contains(&at) && governors.insert(at) {
                    pending.push(at);
                }
            }
        }
        Ok(governors)
    }

    /// Compute the closure of `focus` and mark predications for removal
    /// according to `mode`
    pub fn mark(&self, focus: &[usize], traversal: Traversal, mode: Mode) -> MrsResult<Marked> {
        let closure = self.closure(focus, traversal)?;
        match mode {
            Mode::Keep => Ok(self.marked((0..self.len()).filter(|at| !closure.contains(at)))),
            Mode::Delete => {
                let mut marked = closure;
                loop {
                    let mut rescued = Vec::new();
                    for &at in marked.iter().filter(|at| !focus.contains(at)) {
                        if self.referenced_outside(at, &marked)? {
                            rescued.push(at);
                        }
                    }
                    if rescued.is_empty() {
                        break;
                    }
                    for at in rescued {
                        marked.remove(&at);
                    }
                }
                Ok(self.marked(marked))
            }
        }
    }

    /// True when `at` takes `variable` in a followed role
    fn takes(&self, at: usize, variable: VariableRef, roles: RoleScope) -> bool {
        self.predications()[at].roles.iter().any(|pair| {
            roles.follows(&pair.role)
                && pair
                    .as_variable()
                    .is_some_and(|value| self.same_variable(value, variable))
        })
    }

    /// True when a predication outside `marked` depends on `at`
    fn referenced_outside(&self, at: usize, marked: &BTreeSet<usize>) -> MrsResult<bool> {
        for other in (0..self.len()).filter(|other| !marked.contains(other)) {
            if self.dependencies(other, RoleScope::All)?.contains(&at) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
