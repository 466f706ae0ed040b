use crate::commands::{read_document, OutputArgs};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagekit_document::Breakpoint;
use pagekit_normalize::{sanitize, to_editing};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct EditingArgs {
    /// Stored page document
    pub document: PathBuf,

    /// Active breakpoint (overrides config)
    #[arg(short, long)]
    pub breakpoint: Option<Breakpoint>,

    /// Schema file (overrides config)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Resolve a stored document for one breakpoint and sanitize it.
pub fn editing(args: EditingArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let schema = config.load_schema(cwd, args.schema.as_deref())?;
    let breakpoint = args.breakpoint.unwrap_or(config.breakpoint);

    let stored = read_document(cwd, &args.document)?;
    let editing = sanitize(&to_editing(&stored, breakpoint), &schema);

    eprintln!(
        "{} {} at {}",
        "🔎 Resolved".bright_blue().bold(),
        args.document.display(),
        breakpoint.to_string().bright_white()
    );
    args.output.write(cwd, &editing.to_json_pretty()?)
}
