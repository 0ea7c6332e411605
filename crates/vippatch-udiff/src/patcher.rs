//! End-to-end patch application for a single file.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::applier;
use crate::backup;
use crate::error::Result;
use crate::parser;

/// Applies a unified diff to a single file, backing the file up first.
pub struct Patcher;

impl Patcher {
    /// Apply the patch in `patch_file` to `target` in place.
    ///
    /// A `.bak`/`.bakN` copy of `target` is created before anything else.
    /// The patched output is assembled in memory and written in a single
    /// truncate-and-rewrite, so on any error the target file is left with
    /// its original content; only the backup remains on disk.
    pub fn patch(target: &Path, patch_file: &Path) -> Result<()> {
        let backup = backup::create_backup(target)?;
        debug!(
            target = %target.display(),
            backup = %backup.display(),
            "backed up target"
        );

        let patch_text = fs::read_to_string(patch_file)?;
        let tokens = parser::tokenize(&patch_text)?;
        parser::verify(&tokens, target)?;
        let chunks = parser::assemble_chunks(&tokens)?;
        debug!(tokens = tokens.len(), chunks = chunks.len(), "parsed patch");

        let original = fs::read_to_string(target)?;
        let patched = applier::apply(&original, &chunks)?;

        fs::write(target, patched)?;
        info!(target = %target.display(), "patched");
        Ok(())
    }
}
