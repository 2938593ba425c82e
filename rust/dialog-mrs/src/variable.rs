//! Typed semantic variables.
//!
//! A [`Variable`] is one of the typed placeholders an MRS graph is built
//! from: handles (`h`), events (`e`), individuals (`x`) and the
//! underspecified sorts (`i`, `u`, `l`). All sorts share one flat numbering
//! space inside a graph, so `x4` and `e4` never both occur.
//!
//! Variables are owned by the graph's arena and referenced through
//! [`VariableRef`]. Two role values that denote the same entity hold the same
//! reference, which is what makes a property edit through one predication
//! visible from every other predication that mentions the variable.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::MrsError;

/// The sort of a semantic variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sort {
    /// `h`: a scope handle
    Handle,
    /// `e`: an eventuality
    Event,
    /// `x`: an individual
    Individual,
    /// `i`: event or individual
    Instance,
    /// `u`: fully underspecified
    Unknown,
    /// `l`: a label
    Label,
}

impl Sort {
    /// The single-letter prefix used in variable labels
    pub fn as_char(&self) -> char {
        match self {
            Sort::Handle => 'h',
            Sort::Event => 'e',
            Sort::Individual => 'x',
            Sort::Instance => 'i',
            Sort::Unknown => 'u',
            Sort::Label => 'l',
        }
    }

    /// Look up a sort by its prefix letter
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'h' => Some(Sort::Handle),
            'e' => Some(Sort::Event),
            'x' => Some(Sort::Individual),
            'i' => Some(Sort::Instance),
            'u' => Some(Sort::Unknown),
            'l' => Some(Sort::Label),
            _ => None,
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Sort {
    type Err = MrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Sort::from_char(c.to_ascii_lowercase()).ok_or(MrsError::UnknownSort(s.into()))
            }
            _ => Err(MrsError::UnknownSort(s.into())),
        }
    }
}

/// A scope handle such as `h5`.
///
/// Predication labels and handle constraints are expressed with handles
/// rather than arena variables; a handle-sorted role value names the same
/// scope when its id matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u32);

impl Handle {
    /// The numeric id of the handle
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// Reference to a variable owned by an [`crate::Mrs`] arena.
///
/// References are only meaningful for the graph that handed them out.
/// [`crate::Mrs::fork`] keeps references stable for the copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableRef(pub(crate) usize);

/// A typed semantic variable with an ordered property bag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    sort: Sort,
    id: u32,
    properties: IndexMap<String, String>,
}

impl Variable {
    pub fn new(sort: Sort, id: u32) -> Self {
        Variable {
            sort,
            id,
            properties: IndexMap::new(),
        }
    }

    /// Builder-style variant of [`Variable::set_property`]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(name, value);
        self
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Identity of the variable within its graph: sort plus id
    pub fn key(&self) -> (Sort, u32) {
        (self.sort, self.id)
    }

    /// The label, e.g. `x4`
    pub fn label(&self) -> String {
        format!("{}{}", self.sort, self.id)
    }

    pub fn is_handle(&self) -> bool {
        self.sort == Sort::Handle
    }

    pub fn is_event(&self) -> bool {
        self.sort == Sort::Event
    }

    pub fn is_individual(&self) -> bool {
        self.sort == Sort::Individual
    }

    /// True when this handle-sorted variable names the given scope
    pub fn names(&self, handle: Handle) -> bool {
        self.is_handle() && self.id == handle.0
    }

    /// This variable read as a handle, if it has the handle sort
    pub fn as_handle(&self) -> Option<Handle> {
        self.is_handle().then_some(Handle(self.id))
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Properties in insertion order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Set a property, keeping its position if it already exists
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Copy over every property this variable does not carry yet
    pub(crate) fn absorb(&mut self, other: &Variable) {
        for (name, value) in other.properties() {
            if !self.properties.contains_key(name) {
                self.properties.insert(name.to_string(), value.to_string());
            }
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sort, self.id)?;
        if !self.properties.is_empty() {
            write!(f, " [")?;
            for (i, (name, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{name}: {value}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Largest variable id accepted from input. Fresh ids are numbered above
/// the highest id in a graph, so input ids stay well clear of `u32::MAX`.
pub const MAX_VARIABLE_ID: u32 = 1 << 30;

/// Split a label such as `x12` into its sort and id
pub fn parse_label(label: &str) -> Result<(Sort, u32), MrsError> {
    let mut chars = label.chars();
    let sort = chars
        .next()
        .and_then(Sort::from_char)
        .ok_or_else(|| MrsError::UnknownSort(label.into()))?;
    let id = chars
        .as_str()
        .parse::<u32>()
        .ok()
        .filter(|id| *id <= MAX_VARIABLE_ID)
        .ok_or_else(|| MrsError::UnknownSort(label.into()))?;
    Ok((sort, id))
}
