use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::paths::{DESCRIPTOR_FILE, ROLES_DIR};

/// What an installation looks like on disk.
#[derive(Debug, PartialEq, Eq)]
pub struct Verification {
    /// Expected paths that are absent.
    pub missing: Vec<PathBuf>,
    /// Role names (file stems), sorted.
    pub roles: Vec<String>,
}

impl Verification {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check the descriptor file and the role directory inside `target`.
pub fn verify(target: &Path) -> Result<Verification> {
    let descriptor = target.join(DESCRIPTOR_FILE);
    let roles_dir = target.join(ROLES_DIR);

    let mut missing = Vec::new();
    if !descriptor.is_file() {
        missing.push(descriptor);
    }
    let roles = if roles_dir.is_dir() {
        list_roles(&roles_dir)?
    } else {
        missing.push(roles_dir);
        Vec::new()
    };
    Ok(Verification { missing, roles })
}

/// Regular, non-hidden files in `dir`, extension stripped.
pub fn list_roles(dir: &Path) -> Result<Vec<String>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
    let mut roles = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        // Follows symlinks so linked role files still count.
        if !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.is_empty() || stem.starts_with('.') {
            continue;
        }
        roles.push(stem.to_string());
    }
    roles.sort();
    Ok(roles)
}
