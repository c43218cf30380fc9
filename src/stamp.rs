use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

/// Source of the capture time used for backup suffixes.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a single instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Whole-second, locale-independent suffix: `20260131_235959`.
pub fn format_stamp(t: NaiveDateTime) -> String {
    t.format("%Y%m%d_%H%M%S").to_string()
}

/// `<path>.backup.<stamp>`, or `<path>.backup.<stamp>-N` when that name is
/// already taken.
pub fn backup_path(path: &Path, stamp: &str) -> PathBuf {
    let base = with_suffix(path, &format!(".backup.{stamp}"));
    if !exists(&base) {
        return base;
    }
    let mut n = 1u32;
    loop {
        let candidate = with_suffix(path, &format!(".backup.{stamp}-{n}"));
        if !exists(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

// Built from the final component so a trailing separator on `path` still
// yields a sibling rather than a child.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let Some(name) = path.file_name() else {
        let mut s: OsString = path.as_os_str().to_owned();
        s.push(suffix);
        return PathBuf::from(s);
    };
    let mut name: OsString = name.to_owned();
    name.push(suffix);
    match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

// Dangling symlinks count as taken.
fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
