//! Error types for question generation.

use dialog_mrs::{CodecError, MrsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuestionError {
    /// A graph edit or query failed while applying a rule
    #[error(transparent)]
    Graph(#[from] MrsError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A rule matched a predication but the structure it needs around it is
    /// missing
    #[error("rule '{rule}' matched {predicate} but found no {companion}")]
    MissingCompanion {
        rule: &'static str,
        predicate: String,
        companion: &'static str,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type QuestionResult<T> = Result<T, QuestionError>;
