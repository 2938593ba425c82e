//! Minimal Recursion Semantics graphs for sentence rewriting.
//!
//! This crate holds the semantic graph ([`Mrs`]) that the question generator
//! rewrites, together with the structural algorithms those rewrites are
//! built from and the MRX codec used to exchange graphs with the parser and
//! the generator.
//!
//! ## Architecture
//!
//! ```text
//!  MRX text ──read──▶ Mrs ──closure/mark──▶ Marked ──remove──▶ Mrs ──write──▶ MRX text
//!                      │                                        ▲
//!                      └──────────────fork / extract────────────┘
//! ```
//!
//! - [`Variable`]s live in an arena owned by the graph and are addressed
//!   with [`VariableRef`]. After [`Mrs::unify_coreferences`] every
//!   occurrence of a label shares one slot.
//! - [`Mrs::closure`] computes the predications a focus depends on;
//!   [`Mrs::mark`] turns it into a [`Marked`] set and [`Mrs::remove`]
//!   applies it and cleans the handle constraints.
//! - [`Mrs::extract`] forks a graph and keeps only the closure of a focus.
//!
//! ```
//! use dialog_mrs::{Traversal, read, write};
//!
//! let mrs = read(r#"<mrs><label vid='1'/><var vid='2'/>
//!   <ep cfrom='0' cto='6'><spred>_rain_v_1_rel</spred><label vid='3'/>
//!     <fvpair><rargname>ARG0</rargname><var vid='2' sort='e'/></fvpair></ep>
//!   <hcons hreln='qeq'><hi><var vid='1' sort='h'/></hi><lo><var vid='3' sort='h'/></lo></hcons>
//! </mrs>"#)?;
//! let copy = mrs.extract(&[0], Traversal::arguments())?;
//! assert_eq!(write(&copy)?, write(&mrs)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod variable;
pub use variable::*;

pub mod role;
pub use role::{RoleValue, Value};

mod predicate;
pub use predicate::*;

mod predication;
pub use predication::*;

mod constraint;
pub use constraint::*;

mod mrs;
pub use mrs::*;

mod closure;
pub use closure::*;

mod extract;

mod xml;
pub use xml::*;

mod error;
pub use error::*;

#[cfg(any(test, feature = "helpers"))]
mod helpers;
#[cfg(any(test, feature = "helpers"))]
pub use helpers::*;
