use crate::commands::OutputArgs;
use crate::config::{load_fragments, Config};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagekit_composer::{Composer, ComposeContext};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ComposeArgs {
    /// Root fragment descriptor files (defaults to the configured fragments)
    pub fragments: Vec<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Print the composite root schema built from fragment descriptors.
pub fn compose(args: ComposeArgs, cwd: &Path) -> Result<()> {
    let fragments = if args.fragments.is_empty() {
        load_fragments(cwd, &Config::load(cwd)?.fragments)?
    } else {
        load_fragments(cwd, &args.fragments)?
    };

    let root = Composer::new().compose(ComposeContext::new(fragments))?;

    eprintln!("{}", "🧩 Composed root fragments".bright_blue().bold());
    for fragment in root.fragments() {
        eprintln!(
            "  {} {} ({})",
            "✓".green(),
            fragment.fragment_id,
            fragment.display_name
        );
    }
    for rejection in root.rejected() {
        eprintln!("  {} {}", "✗".red(), rejection);
    }

    args.output
        .write(cwd, &serde_json::to_string_pretty(root.schema())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_composer::BUILTIN_FRAGMENT_ID;
    use pagekit_schema::ComponentSchema;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compose_writes_root_schema() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path();
        for name in ["a.json", "b.json"] {
            fs::write(
                cwd.join(name),
                r#"{ "fragmentId": "analytics", "displayName": "Analytics", "fields": { "tag": { "type": "text" } } }"#,
            )
            .unwrap();
        }

        compose(
            ComposeArgs {
                fragments: vec![PathBuf::from("a.json"), PathBuf::from("b.json")],
                output: OutputArgs {
                    out: Some(PathBuf::from("root.json")),
                },
            },
            cwd,
        )
        .unwrap();

        let root: ComponentSchema =
            serde_json::from_str(&fs::read_to_string(cwd.join("root.json")).unwrap()).unwrap();
        assert_eq!(
            root.fields.keys().collect::<Vec<_>>(),
            vec![BUILTIN_FRAGMENT_ID, "analytics", "content"]
        );
    }
}
