use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};

/// Materializes a bundle at `dest`. `dest` must not exist beforehand.
pub trait Fetcher {
    fn fetch(&self, source: &str, dest: &Path) -> Result<()>;
}

/// Clones with the `git` executable found on `PATH`.
pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".into(),
        }
    }
}

impl GitCli {
    /// Use a specific git binary instead of the one on `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Fetcher for GitCli {
    fn fetch(&self, source: &str, dest: &Path) -> Result<()> {
        log::debug!("{} clone {source} {}", self.program, dest.display());
        // stdout/stderr are inherited so git's progress and errors reach the user.
        let status = Command::new(&self.program)
            .arg("clone")
            .arg("--")
            .arg(source)
            .arg(dest)
            .stdin(Stdio::null())
            .status()
            .with_context(|| format!("failed to run {}", self.program))?;
        if !status.success() {
            match status.code() {
                Some(code) => bail!("{} clone exited with status {code}", self.program),
                None => bail!("{} clone was terminated by a signal", self.program),
            }
        }
        Ok(())
    }
}
