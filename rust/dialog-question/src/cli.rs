use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use dialog_mrs::{ReadOptions, read_with, write};

use crate::{Config, Pipeline, Term};

#[derive(Debug, Parser)]
#[command(name = "dialog-question")]
#[command(bin_name = "dialog-question")]
#[command(about = "Generate questions from MRX semantic graphs", long_about = None)]
pub struct QuestionCli {
    /// MRX files, one parsed sentence each
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// JSON list of named-entity terms shared by every file
    #[arg(short, long)]
    pub terms: Option<PathBuf>,

    /// JSON pipeline configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fail on malformed elements instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Directory to write candidates to; printed to stdout otherwise
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl QuestionCli {
    /// Process every file and return the number of candidates produced
    pub fn run(&self) -> Result<usize> {
        let config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Config::from_json(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Config::default(),
        };
        let terms: Vec<Term> = match &self.terms {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading terms {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("parsing terms {}", path.display()))?
            }
            None => Vec::new(),
        };
        if let Some(out) = &self.out {
            std::fs::create_dir_all(out)
                .with_context(|| format!("creating {}", out.display()))?;
        }

        let options = ReadOptions {
            strict: self.strict,
        };
        let pipeline = Pipeline::new(config);
        let mut total = 0;
        for file in &self.files {
            let xml = std::fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            let mrs = read_with(&xml, &options)
                .with_context(|| format!("parsing {}", file.display()))?;

            let candidates = pipeline.run(mrs, &terms);
            let stem = file
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "mrs".to_string());
            for (n, candidate) in candidates.iter().enumerate() {
                let text = write(candidate)?;
                match &self.out {
                    Some(out) => {
                        let name = format!("{stem}.{n}.{}.mrx", file_kind(candidate.kind()));
                        let path = out.join(name);
                        std::fs::write(&path, text)
                            .with_context(|| format!("writing {}", path.display()))?;
                    }
                    None => println!("<!-- {} -->\n{text}", candidate.kind()),
                }
            }
            info!(file = %file.display(), candidates = candidates.len(), "processed file");
            total += candidates.len();
        }
        Ok(total)
    }
}

/// A sentence-type tag as it appears in file names: `HOW MANY` becomes
/// `how-many`, `Y/N` becomes `y-n`
fn file_kind(kind: &str) -> String {
    kind.to_ascii_lowercase().replace(['/', ' '], "-")
}
