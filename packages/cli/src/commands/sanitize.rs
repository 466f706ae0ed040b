use crate::commands::{read_document, OutputArgs};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagekit_normalize::sanitize as sanitize_document;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SanitizeArgs {
    /// Editing-form page document
    pub document: PathBuf,

    /// Schema file (overrides config)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn sanitize(args: SanitizeArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let schema = config.load_schema(cwd, args.schema.as_deref())?;

    let doc = read_document(cwd, &args.document)?;
    let clean = sanitize_document(&doc, &schema);

    eprintln!(
        "{} {}",
        "🧹 Sanitized".bright_blue().bold(),
        args.document.display()
    );
    args.output.write(cwd, &clean.to_json_pretty()?)
}
