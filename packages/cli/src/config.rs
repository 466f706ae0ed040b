use anyhow::{Context, Result};
use pagekit_composer::{Composer, ComposeContext, RootFragment};
use pagekit_document::Breakpoint;
use pagekit_normalize::BreakpointModeMap;
use pagekit_schema::Schema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_NAME: &str = "pagekit.config.json";
pub const DEFAULT_SCHEMA_NAME: &str = "pagekit.schema.json";

/// Pagekit configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Component schema file
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Active breakpoint when a command does not name one
    #[serde(default = "default_breakpoint")]
    pub breakpoint: Breakpoint,

    /// Persisted breakpoint mode map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<String>,

    /// Root fragment descriptors composed into the root schema
    #[serde(default)]
    pub fragments: Vec<String>,
}

fn default_schema() -> String {
    DEFAULT_SCHEMA_NAME.to_string()
}

fn default_breakpoint() -> Breakpoint {
    Breakpoint::FALLBACK
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            breakpoint: default_breakpoint(),
            modes: None,
            fragments: vec![],
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Cannot read {}", config_path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config in {}", config_path.display()))?;
            debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn schema_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.schema)
    }

    /// Component schemas, with the root replaced by the composed fragments
    /// when any are configured.
    pub fn load_schema(&self, cwd: &Path, path: Option<&Path>) -> Result<Schema> {
        let path = match path {
            Some(path) => cwd.join(path),
            None => self.schema_path(cwd),
        };
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read schema {}", path.display()))?;
        let schema = Schema::from_json_str(&content)
            .with_context(|| format!("Invalid schema in {}", path.display()))?;
        schema
            .validate()
            .with_context(|| format!("Invalid schema in {}", path.display()))?;

        if self.fragments.is_empty() {
            return Ok(schema);
        }

        let fragments = load_fragments(cwd, &self.fragments)?;
        let root = Composer::new().compose(ComposeContext::new(fragments))?;
        info!(fragments = root.fragments().len(), "Composed root schema");
        Ok(root.attach_to(schema))
    }

    /// The configured mode map, or an empty one.
    pub fn load_modes(&self, cwd: &Path, path: Option<&Path>) -> Result<BreakpointModeMap> {
        let Some(path) = path
            .map(Path::to_path_buf)
            .or_else(|| self.modes.as_ref().map(PathBuf::from))
        else {
            return Ok(BreakpointModeMap::new());
        };
        let path = cwd.join(path);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read mode map {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid mode map in {}", path.display()))
    }
}

pub fn load_fragments<S: AsRef<Path>>(cwd: &Path, paths: &[S]) -> Result<Vec<RootFragment>> {
    paths
        .iter()
        .map(|path| {
            let path = cwd.join(path);
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Cannot read fragment {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid fragment in {}", path.display()))
        })
        .collect()
}
