//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::{QuestionResult, Stage};

/// Adverbs that modify the main event without describing its manner
const MANNER_STOP_LIST: &[&str] = &[
    "also", "only", "even", "just", "still", "already", "then", "now", "again", "never", "not",
    "very", "too", "so", "really",
];

/// Settings for a [`crate::Pipeline`]. Every field has a default, so a
/// configuration file only needs the fields it changes.
///
/// ```json
/// { "stages": ["coordination"], "max_candidates": 16 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Decomposition stages, run in order
    pub stages: Vec<Stage>,
    /// Emit a yes/no question for every declarative graph
    pub yes_no: bool,
    /// Keep the decomposed declaratives among the candidates
    pub keep_declaratives: bool,
    /// Upper bound on the number of candidates a run returns
    pub max_candidates: usize,
    /// How many times a stage may split the output of its own splits
    pub max_split_depth: usize,
    /// Lemmas of modifiers that never yield a `HOW` question
    pub manner_stop_list: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stages: Stage::all(),
            yes_no: true,
            keep_declaratives: false,
            max_candidates: 64,
            max_split_depth: 8,
            manner_stop_list: MANNER_STOP_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> QuestionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
