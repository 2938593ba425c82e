//! Role-value pairs.

use crate::VariableRef;

pub const ARG0: &str = "ARG0";
pub const ARG1: &str = "ARG1";
pub const ARG2: &str = "ARG2";
pub const ARG3: &str = "ARG3";
pub const RSTR: &str = "RSTR";
pub const BODY: &str = "BODY";
pub const CARG: &str = "CARG";
pub const L_INDEX: &str = "L-INDEX";
pub const R_INDEX: &str = "R-INDEX";
pub const L_HNDL: &str = "L-HNDL";
pub const R_HNDL: &str = "R-HNDL";

/// True for `ARG1`..`ARGn`. `ARG0` is the predication's own variable and
/// is not an argument.
pub fn is_argument_role(role: &str) -> bool {
    role.strip_prefix("ARG")
        .is_some_and(|n| !n.is_empty() && n != "0" && n.chars().all(|c| c.is_ascii_digit()))
}

/// The filler of a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A variable owned by the graph
    Variable(VariableRef),
    /// A literal constant; only used for `CARG`
    Constant(String),
}

/// One named role of a predication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleValue {
    pub role: String,
    pub value: Value,
}

impl RoleValue {
    pub fn variable(role: impl Into<String>, variable: VariableRef) -> Self {
        RoleValue {
            role: role.into(),
            value: Value::Variable(variable),
        }
    }

    pub fn constant(role: impl Into<String>, constant: impl Into<String>) -> Self {
        RoleValue {
            role: role.into(),
            value: Value::Constant(constant.into()),
        }
    }

    pub fn as_variable(&self) -> Option<VariableRef> {
        match &self.value {
            Value::Variable(variable) => Some(*variable),
            Value::Constant(_) => None,
        }
    }

    pub fn as_constant(&self) -> Option<&str> {
        match &self.value {
            Value::Constant(constant) => Some(constant),
            Value::Variable(_) => None,
        }
    }

    /// See [`is_argument_role`]
    pub fn is_argument(&self) -> bool {
        is_argument_role(&self.role)
    }
}
