//! Elementary predications.

use std::fmt;

use crate::role::{ARG0, RoleValue, Value};
use crate::{Handle, Predicate, VariableRef};

/// A character span `[start, end)` into the original sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// True when `other` lies entirely inside this span
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}:{}>", self.start, self.end)
    }
}

/// One predicate occurrence in a semantic graph.
///
/// `span` is `None` for predications synthesised by a rewrite; those are
/// written as `cfrom='-1' cto='-1'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predication {
    pub predicate: Predicate,
    pub label: Handle,
    pub roles: Vec<RoleValue>,
    pub span: Option<Span>,
}

impl Predication {
    pub fn new(predicate: Predicate, label: Handle) -> Self {
        Predication {
            predicate,
            label,
            roles: Vec::new(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_variable(mut self, role: impl Into<String>, variable: VariableRef) -> Self {
        self.roles.push(RoleValue::variable(role, variable));
        self
    }

    pub fn with_constant(mut self, role: impl Into<String>, constant: impl Into<String>) -> Self {
        self.roles.push(RoleValue::constant(role, constant));
        self
    }

    pub fn role(&self, role: &str) -> Option<&RoleValue> {
        self.roles.iter().find(|pair| pair.role == role)
    }

    /// The variable filling `role`, if it is filled by a variable
    pub fn variable(&self, role: &str) -> Option<VariableRef> {
        self.role(role).and_then(RoleValue::as_variable)
    }

    pub fn constant(&self, role: &str) -> Option<&str> {
        self.role(role).and_then(RoleValue::as_constant)
    }

    /// The predication's own variable
    pub fn arg0(&self) -> Option<VariableRef> {
        self.variable(ARG0)
    }

    /// Replace the filler of `role`, appending the role if it is absent
    pub fn set_role(&mut self, role: &str, value: Value) {
        match self.roles.iter_mut().find(|pair| pair.role == role) {
            Some(pair) => pair.value = value,
            None => self.roles.push(RoleValue {
                role: role.to_string(),
                value,
            }),
        }
    }

    /// Drop a role. Returns the value it held.
    pub fn remove_role(&mut self, role: &str) -> Option<Value> {
        let at = self.roles.iter().position(|pair| pair.role == role)?;
        Some(self.roles.remove(at).value)
    }

    /// Every variable this predication mentions, `ARG0` included
    pub fn variables(&self) -> impl Iterator<Item = VariableRef> + '_ {
        self.roles.iter().filter_map(RoleValue::as_variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_checks_span_containment() {
        let phrase = Span::new(14, 22);
        assert!(phrase.contains(&Span::new(17, 22)));
        assert!(phrase.contains(&phrase));
        assert!(!phrase.contains(&Span::new(10, 16)));
    }
}
