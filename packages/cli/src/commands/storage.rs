use crate::commands::{read_document, OutputArgs};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagekit_document::Breakpoint;
use pagekit_normalize::to_storage;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct StorageArgs {
    /// Previously stored page document
    #[arg(long)]
    pub original: PathBuf,

    /// Edited page document in editing form
    #[arg(long)]
    pub edited: PathBuf,

    /// Breakpoint the edits were made at (overrides config)
    #[arg(short, long)]
    pub breakpoint: Option<Breakpoint>,

    /// Breakpoint mode map file (overrides config)
    #[arg(short, long)]
    pub modes: Option<PathBuf>,

    /// Schema file (overrides config)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Fold an edited document back into its stored form.
pub fn storage(args: StorageArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let schema = config.load_schema(cwd, args.schema.as_deref())?;
    let mut modes = config.load_modes(cwd, args.modes.as_deref())?;
    let breakpoint = args.breakpoint.unwrap_or(config.breakpoint);

    let original = read_document(cwd, &args.original)?;
    let edited = read_document(cwd, &args.edited)?;
    modes.retain_instances(&edited, &schema);

    let stored = to_storage(&original, Some(&edited), breakpoint, Some(&schema), &modes);

    eprintln!(
        "{} {} at {}",
        "💾 Stored".bright_blue().bold(),
        args.edited.display(),
        breakpoint.to_string().bright_white()
    );
    args.output.write(cwd, &stored.to_json_pretty()?)
}
