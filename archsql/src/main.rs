use anyhow::Result;
use archsql::config::{DEFAULT_ACCESSOR_PATH, DEFAULT_SQL_PATH};
use archsql::Config;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "archsql")]
#[command(about = "Generate a SQLite script and Python insert helpers from a Power Architect project")]
struct Args {
    /// Power Architect project file (*.architect, *.xml)
    script: PathBuf,

    /// SQL script output path
    #[arg(short, long, default_value = DEFAULT_SQL_PATH)]
    sqlite: PathBuf,

    /// Python accessor module output path
    #[arg(short, long, default_value = DEFAULT_ACCESSOR_PATH)]
    py: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::with_outputs(args.script, args.sqlite, args.py);
    archsql::run(&config)?;
    Ok(())
}
