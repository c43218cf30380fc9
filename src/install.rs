//! The installation procedure.
//!
//! A strictly linear sequence with three abort points before verification:
//! the user declines, the backup rename fails, or the fetch fails. Nothing is
//! retried and nothing is rolled back; a backup made before a failed fetch is
//! left where it is for manual recovery.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use crate::fetch::Fetcher;
use crate::prompt::Confirm;
use crate::stamp::{backup_path, format_stamp, Clock};
use crate::verify;

/// Bundle fetched when no source is given. This is a placeholder locator:
/// deployments are expected to set `install.source` in the config file or
/// pass the source as the positional argument.
pub const DEFAULT_SOURCE: &str = "https://github.com/dotbundle/claude-config.git";

/// Authoring-only entries removed from a fresh installation.
pub const PRUNE_ENTRIES: &[&str] = &["README.md", ".git", ".vscode", "setup.sh"];

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("installation cancelled; {} left unchanged", .0.display())]
    Declined(PathBuf),

    #[error("failed to back up {} to {}", from.display(), to.display())]
    Backup {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {locator}: {reason}")]
    Fetch { locator: String, reason: String },

    #[error(
        "installation at {} is incomplete, missing: {}",
        target.display(),
        display_paths(missing)
    )]
    Verify {
        target: PathBuf,
        missing: Vec<PathBuf>,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything one installation needs to know up front.
#[derive(Debug, Clone)]
pub struct Plan {
    pub source: String,
    pub target: PathBuf,
    /// Home file that gets a courtesy copy before the bundle shadows it.
    pub home_file: Option<PathBuf>,
    /// Entries relative to `target` removed after fetching.
    pub prune: Vec<String>,
}

impl Plan {
    /// A plan with the built-in prune list.
    pub fn new(source: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            home_file: None,
            prune: PRUNE_ENTRIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_home_file(mut self, home_file: impl Into<PathBuf>) -> Self {
        self.home_file = Some(home_file.into());
        self
    }

    /// Append extra prune entries, skipping ones already listed.
    pub fn with_extra_prune<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for entry in extra {
            let entry = entry.into();
            if !self.prune.contains(&entry) {
                self.prune.push(entry);
            }
        }
        self
    }
}

/// Result of a successful installation.
#[derive(Debug, Serialize)]
pub struct InstallReport {
    pub source: String,
    pub target: PathBuf,
    pub backup: Option<PathBuf>,
    pub home_backup: Option<PathBuf>,
    pub pruned: Vec<String>,
    pub roles: Vec<String>,
}

/// Runs a [`Plan`] against injected collaborators.
pub struct Installer<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub confirm: &'a mut dyn Confirm,
    pub clock: &'a dyn Clock,
    /// Receives the human-readable phase lines.
    pub status: &'a mut dyn Write,
}

impl Installer<'_> {
    pub fn run(&mut self, plan: &Plan) -> Result<InstallReport> {
        let stamp = format_stamp(self.clock.now());
        let target = &plan.target;

        let backup = if exists(target) {
            writeln!(
                self.status,
                "Existing installation found at {}",
                target.display()
            )?;
            if !self
                .confirm
                .confirm("Replace it? The current directory will be kept as a backup.")?
            {
                log::info!("user declined overwrite of {}", target.display());
                return Err(InstallError::Declined(target.clone()).into());
            }
            let to = backup_path(target, &stamp);
            writeln!(
                self.status,
                "Backing up {} -> {}",
                target.display(),
                to.display()
            )?;
            std::fs::rename(target, &to).map_err(|source| InstallError::Backup {
                from: target.clone(),
                to: to.clone(),
                source,
            })?;
            Some(to)
        } else {
            None
        };

        writeln!(
            self.status,
            "Cloning {} into {}...",
            plan.source,
            target.display()
        )?;
        if let Err(e) = self.fetcher.fetch(&plan.source, target) {
            log::warn!("fetch failed: {e:#}");
            if let Some(b) = &backup {
                writeln!(
                    self.status,
                    "Previous installation kept at {}",
                    b.display()
                )?;
            }
            return Err(InstallError::Fetch {
                locator: plan.source.clone(),
                reason: format!("{e:#}"),
            }
            .into());
        }
        writeln!(self.status, "Clone complete")?;

        writeln!(self.status, "Cleaning up authoring files...")?;
        let pruned = prune(target, &plan.prune)?;
        for entry in &pruned {
            writeln!(self.status, "  removed {entry}")?;
        }

        let home_backup = match &plan.home_file {
            Some(file) => backup_home_file(file, &stamp)?,
            None => None,
        };
        if let (Some(file), Some(copy)) = (&plan.home_file, &home_backup) {
            writeln!(
                self.status,
                "Backed up {} -> {}",
                file.display(),
                copy.display()
            )?;
        }

        writeln!(self.status, "Verifying installation...")?;
        let v = verify::verify(target)?;
        write!(self.status, "{}", crate::output::format_roles(&v.roles))?;
        if !v.is_ok() {
            return Err(InstallError::Verify {
                target: target.clone(),
                missing: v.missing,
            }
            .into());
        }

        Ok(InstallReport {
            source: plan.source.clone(),
            target: target.clone(),
            backup,
            home_backup,
            pruned,
            roles: v.roles,
        })
    }
}

/// Remove `entries` from `root`. Absent entries are skipped.
/// Returns the entries that were actually removed.
pub fn prune(root: &Path, entries: &[String]) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    for entry in entries {
        let path = root.join(entry);
        let meta = match path.symlink_metadata() {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("failed to inspect {}", path.display()))
            }
        };
        let res = if meta.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        res.with_context(|| format!("failed to remove {}", path.display()))?;
        log::debug!("pruned {}", path.display());
        removed.push(entry.clone());
    }
    Ok(removed)
}

/// Copy `file` to a timestamped sibling if it exists.
pub fn backup_home_file(file: &Path, stamp: &str) -> Result<Option<PathBuf>> {
    if !file.is_file() {
        return Ok(None);
    }
    let to = backup_path(file, stamp);
    std::fs::copy(file, &to)
        .with_context(|| format!("failed to copy {} to {}", file.display(), to.display()))?;
    Ok(Some(to))
}

fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn prune_removes_files_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("README.md"), "readme").unwrap();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::write(root.join(".git/HEAD"), "ref").unwrap();
        fs::write(root.join("CLAUDE.md"), "keep").unwrap();

        let entries: Vec<String> = PRUNE_ENTRIES.iter().map(|s| s.to_string()).collect();
        let removed = prune(root, &entries).unwrap();

        assert_eq!(removed, vec!["README.md", ".git"]);
        assert!(!root.join("README.md").exists());
        assert!(!root.join(".git").exists());
        assert!(root.join("CLAUDE.md").exists());
    }

    #[test]
    fn prune_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let entries: Vec<String> = PRUNE_ENTRIES.iter().map(|s| s.to_string()).collect();
        assert!(prune(dir.path(), &entries).unwrap().is_empty());
        assert!(prune(dir.path(), &entries).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn prune_removes_symlink_not_its_target() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("keep.txt"), "x").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join(".vscode")).unwrap();

        let removed = prune(dir.path(), &[".vscode".to_string()]).unwrap();
        assert_eq!(removed, vec![".vscode"]);
        assert!(outside.path().join("keep.txt").exists());
    }

    #[test]
    fn home_file_backup_copies_and_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("CLAUDE.md");
        fs::write(&file, "mine").unwrap();

        let copy = backup_home_file(&file, "20260101_000000").unwrap().unwrap();
        assert_eq!(copy, dir.path().join("CLAUDE.md.backup.20260101_000000"));
        assert_eq!(fs::read_to_string(&copy).unwrap(), "mine");
        assert_eq!(fs::read_to_string(&file).unwrap(), "mine");
    }

    #[test]
    fn home_file_backup_skips_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let res = backup_home_file(&dir.path().join("CLAUDE.md"), "20260101_000000").unwrap();
        assert!(res.is_none());
    }

    #[test]
    fn plan_extra_prune_dedups() {
        let plan = Plan::new("src", "/tmp/t").with_extra_prune(["docs", "README.md"]);
        assert_eq!(
            plan.prune,
            vec!["README.md", ".git", ".vscode", "setup.sh", "docs"]
        );
    }

    #[test]
    fn verify_error_lists_missing_paths() {
        let err = InstallError::Verify {
            target: PathBuf::from("/h/.claude"),
            missing: vec![PathBuf::from("/h/.claude/agents")],
        };
        assert_eq!(
            err.to_string(),
            "installation at /h/.claude is incomplete, missing: /h/.claude/agents"
        );
    }
}
