use crate::config::{Config, DEFAULT_CONFIG_NAME, DEFAULT_SCHEMA_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

const EXAMPLE_SCHEMA: &str = r#"{
  "root": {
    "fields": {
      "title": { "type": "text", "label": "Page title" }
    },
    "defaultProps": { "title": "" }
  },
  "components": {
    "Heading": {
      "label": "Heading",
      "fields": {
        "text": { "type": "text" },
        "size": { "type": "select" },
        "spacing": {
          "type": "object",
          "objectFields": {
            "top": { "type": "number" },
            "bottom": { "type": "number" }
          }
        }
      },
      "defaultProps": { "text": "Heading", "size": "md" }
    },
    "Columns": {
      "label": "Columns",
      "fields": {
        "columns": {
          "type": "array",
          "arrayFields": { "span": { "type": "number" } }
        }
      },
      "defaultProps": { "columns": [{ "span": 6 }, { "span": 6 }] }
    }
  }
}
"#;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing pagekit project...".bright_blue().bold());

    let schema_path = cwd.join(DEFAULT_SCHEMA_NAME);
    if !schema_path.exists() || args.force {
        fs::write(&schema_path, EXAMPLE_SCHEMA)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_SCHEMA_NAME);
    }

    let config_json = serde_json::to_string_pretty(&Config::default())?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Describe your components in {}", DEFAULT_SCHEMA_NAME);
    println!("  2. Run: pagekit editing page.json --breakpoint md");

    Ok(())
}
