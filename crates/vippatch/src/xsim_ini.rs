//! Line-level edits to the Vivado `xsim.ini` library registry.
//!
//! `xsim.ini` maps library names to compiled library directories, one
//! `name=dir` entry per line. Both edits here rewrite the file in full.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Remove every line that starts with `lib` from `ini`.
///
/// Returns the number of lines removed; the caller decides how many it
/// expected.
pub fn remove_library(ini: &Path, lib: &str) -> Result<usize> {
    let content =
        fs::read_to_string(ini).with_context(|| format!("reading {}", ini.display()))?;

    let mut kept = String::with_capacity(content.len());
    let mut removed = 0;
    for line in content.split_inclusive('\n') {
        if line.starts_with(lib) {
            removed += 1;
        } else {
            kept.push_str(line);
        }
    }

    fs::write(ini, kept).with_context(|| format!("rewriting {}", ini.display()))?;
    info!(lib, removed, ini = %ini.display(), "removed library entries");
    Ok(removed)
}

/// Append a `lib=dir` entry to `ini`.
pub fn append_library(ini: &Path, lib: &str, dir: &Path) -> Result<()> {
    let mut content =
        fs::read_to_string(ini).with_context(|| format!("reading {}", ini.display()))?;

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(&format!("{}={}\n", lib, dir.display()));

    fs::write(ini, content).with_context(|| format!("rewriting {}", ini.display()))?;
    info!(lib, ini = %ini.display(), "registered library");
    Ok(())
}
