//! # Dialog Question — question generation by graph rewriting
//!
//! Turns the semantic graph of a declarative sentence into the graphs of
//! questions about it. A downstream generator realises each graph as text.
//!
//! ## Core Ideas
//!
//! - **Simplify first**: complex sentences are split into simple ones
//!   (coordinations into conjuncts, subordinate and relative clauses into
//!   sentences of their own) before any question is asked.
//! - **Ask by substitution**: a question replaces the phrase it asks about
//!   with a `WHICH_Q_REL`-bound placeholder noun and retags the graph.
//! - **Terms pick the focus**: named-entity terms decide what to ask about
//!   and which kind of question fits.
//!
//! ## Architecture
//!
//! ```text
//! Mrs → Causal → Subordinate → RelativeClause → Coordination → Apposition
//!   → Transformer (Y/N, WHO, WHAT, WHERE, WHEN, HOW MANY, HOW)
//!     → de-duplicate, cap → candidates
//! ```

mod error;
pub use error::*;

mod question;
pub use question::*;

mod term;
pub use term::*;

mod rule;
pub use rule::*;

mod coordination;
pub use coordination::*;

mod apposition;
pub use apposition::*;

mod relative;
pub use relative::*;

mod subordinate;
pub use subordinate::*;

mod causal;
pub use causal::*;

mod graft;
pub use graft::*;

mod transform;
pub use transform::*;

mod config;
pub use config::*;

mod pipeline;
pub use pipeline::*;

mod cli;
pub use cli::*;
