pub mod compose;
pub mod editing;
pub mod init;
pub mod sanitize;
pub mod storage;

pub use compose::{compose, ComposeArgs};
pub use editing::{editing, EditingArgs};
pub use init::{init, InitArgs};
pub use sanitize::{sanitize, SanitizeArgs};
pub use storage::{storage, StorageArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use pagekit_document::PageDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a command writes its JSON result
#[derive(Debug, Clone, clap::Args)]
pub struct OutputArgs {
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl OutputArgs {
    pub fn write(&self, cwd: &Path, json: &str) -> Result<()> {
        match &self.out {
            Some(out) => {
                let path = cwd.join(out);
                fs::write(&path, format!("{}\n", json))
                    .with_context(|| format!("Cannot write {}", path.display()))?;
                eprintln!("  {} Wrote {}", "✓".green(), out.display());
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}

pub fn read_document(cwd: &Path, path: &Path) -> Result<PageDocument> {
    let path = cwd.join(path);
    let content =
        fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))?;
    PageDocument::from_json_str(&content)
        .with_context(|| format!("Invalid page document in {}", path.display()))
}
