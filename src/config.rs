use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub install: InstallConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallConfig {
    /// Bundle source locator used when none is given on the command line.
    pub source: Option<String>,
    /// Installation directory; `~/` is expanded.
    pub target: Option<String>,
    /// Home file that gets a courtesy backup; `~/` is expanded.
    pub home_file: Option<String>,
    /// Entries pruned in addition to the built-in list.
    #[serde(default)]
    pub prune: Vec<String>,
}

impl Config {
    /// Load config from `path`.
    /// Returns default config if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
        };
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(source) = &self.install.source {
            if source.trim().is_empty() {
                bail!("failed to parse {}: install.source must not be empty", path.display());
            }
        }
        for entry in &self.install.prune {
            // Prune entries are relative to the installation and must stay inside it.
            let p = Path::new(entry);
            if entry.is_empty()
                || p.is_absolute()
                || p.components().any(|c| matches!(c, std::path::Component::ParentDir))
            {
                bail!(
                    "failed to parse {}: install.prune entry '{entry}' must be a relative path inside the installation",
                    path.display()
                );
            }
        }
        Ok(())
    }
}
