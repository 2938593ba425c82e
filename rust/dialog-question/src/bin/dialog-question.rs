use anyhow::Result;
use clap::Parser;
use dialog_question::QuestionCli;
use tracing_subscriber::EnvFilter;

pub fn main() -> Result<()> {
    let cli = QuestionCli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    cli.run()?;
    Ok(())
}
