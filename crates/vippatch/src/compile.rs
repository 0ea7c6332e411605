//! External compiler invocation for the patched VIP sources.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

/// Compile `sources` with `xvlog -sv` into the `work_dir` library directory.
///
/// The engine knows nothing about compilation; this is a plain blocking
/// subprocess call, and a non-zero exit carries the tool's stderr.
pub fn compile_library(sources: &[PathBuf], work_dir: &Path) -> Result<()> {
    let mut cmd = Command::new("xvlog");
    cmd.arg("-sv").arg("-work").arg(work_dir);
    for source in sources {
        cmd.arg(source);
    }

    debug!(?cmd, "running xvlog");
    let output = cmd
        .output()
        .context("failed to run xvlog; is Vivado on PATH?")?;

    if !output.status.success() {
        bail!(
            "xvlog failed with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    info!(work_dir = %work_dir.display(), "compiled patched library");
    Ok(())
}
