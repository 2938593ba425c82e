//! Handle constraints.

use std::fmt;

use crate::Handle;

/// The relation tag of every constraint the grammar produces
pub const QEQ: &str = "qeq";

/// Inner target of a handle constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// `<lo><var vid='n' sort='h'/></lo>`
    Handle(Handle),
    /// `<lo><label vid='n'/></lo>`
    Label(Handle),
}

impl Target {
    pub fn handle(&self) -> Handle {
        match self {
            Target::Handle(handle) | Target::Label(handle) => *handle,
        }
    }
}

/// A directed constraint from an outer handle to an inner label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandleConstraint {
    pub relation: String,
    pub hi: Handle,
    pub lo: Target,
}

impl HandleConstraint {
    /// `hi qeq lo`
    pub fn qeq(hi: Handle, lo: Handle) -> Self {
        HandleConstraint {
            relation: QEQ.into(),
            hi,
            lo: Target::Handle(lo),
        }
    }

    pub fn lo(&self) -> Handle {
        self.lo.handle()
    }
}

impl fmt::Display for HandleConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.hi, self.relation, self.lo())
    }
}
