//! Path resolution for the installer.
//!
//! Everything is anchored at the invoking user's home directory. The target
//! directory and home marker file can be overridden (CLI, env, config), but
//! the defaults below are what a bare `dotbundle` invocation touches.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Directory name of the installation under `$HOME`.
pub const TARGET_DIR_NAME: &str = ".claude";

/// Top-level descriptor file expected inside the installation.
pub const DESCRIPTOR_FILE: &str = "CLAUDE.md";

/// Subdirectory holding one file per role definition.
pub const ROLES_DIR: &str = "agents";

/// Well-known file directly under `$HOME` that gets a courtesy backup.
pub const HOME_MARKER_FILE: &str = "CLAUDE.md";

/// Resolve `$HOME`.
pub fn home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home))
}

/// `$HOME/.claude`
pub fn default_target(home: &Path) -> PathBuf {
    home.join(TARGET_DIR_NAME)
}

/// `$HOME/CLAUDE.md`
pub fn default_home_marker(home: &Path) -> PathBuf {
    home.join(HOME_MARKER_FILE)
}

/// Resolve the config file path.
/// Checks `DOTBUNDLE_CONFIG`, falls back to `$HOME/.config/dotbundle.toml`.
pub fn config_path(home: &Path) -> PathBuf {
    match std::env::var("DOTBUNDLE_CONFIG") {
        Ok(p) if !p.is_empty() => PathBuf::from(p),
        _ => home.join(".config").join("dotbundle.toml"),
    }
}

/// Expand a leading `~/` against `home`. Other paths are returned as-is.
pub fn expand_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}
