//! End-to-end question generation for one parsed sentence.

use std::collections::HashSet;

use tracing::{info, warn};

use dialog_mrs::Mrs;

use crate::{Config, Term, Transformer};

/// Runs the configured decomposition stages, then the question transform,
/// and tidies the candidates
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Candidate graphs for `mrs`, questions first in generation order.
    ///
    /// Candidates that serialise identically are reported once, and at most
    /// `max_candidates` are returned.
    pub fn run(&self, mrs: Mrs, terms: &[Term]) -> Vec<Mrs> {
        let mut graphs = vec![mrs];
        for stage in &self.config.stages {
            graphs = stage.run(graphs, self.config.max_split_depth);
        }
        let decomposed = graphs.len();

        let mut candidates = Transformer::new(&self.config).transform(graphs, terms);
        if !self.config.keep_declaratives {
            candidates.retain(|candidate| !candidate.is_declarative());
        }

        let mut seen = HashSet::new();
        candidates.retain(|candidate| match dialog_mrs::write(candidate) {
            Ok(text) => seen.insert((candidate.kind().to_string(), text)),
            Err(error) => {
                warn!(kind = candidate.kind(), %error, "dropping unwritable candidate");
                false
            }
        });

        let generated = candidates.len();
        candidates.truncate(self.config.max_candidates);
        info!(
            decomposed,
            generated,
            returned = candidates.len(),
            "generated candidates"
        );
        candidates
    }
}
