//! Error types for patch parsing and application.

use thiserror::Error;

/// Errors that can occur while parsing or applying a patch.
///
/// All of these are fatal: the caller is expected to halt its pipeline.
/// Because patched output is buffered in memory and written only on full
/// success, none of them leave the target file partially rewritten.
#[derive(Debug, Error)]
pub enum PatchError {
    /// Every candidate backup name next to the target already exists
    #[error("tried {0} backup names, all already exist")]
    BackupExhausted(usize),

    /// The first line of the patch is not a recognized diff header
    #[error("not a unified diff, first line: {0:?}")]
    MalformedPatchHeader(String),

    /// A `+++` line names a different file than the one being patched
    #[error("patch targets {patch_target:?}, not {target:?}")]
    PatchTargetMismatch {
        patch_target: String,
        target: String,
    },

    /// A line in the from/to region does not start with `+++` or `---`
    #[error("malformed from/to line: {0:?}")]
    MalformedFromToLine(String),

    /// A hunk header does not match `@@ -a,b +c,d @@`
    #[error("malformed chunk header: {0:?}")]
    MalformedChunkHeader(String),

    /// A context line in a chunk does not match the original file
    #[error("patch does not apply cleanly, expected {expected:?}, received {received:?}")]
    ContextMismatch { expected: String, received: String },

    /// The original file ended while the chunk starting at this line still
    /// expected more input
    #[error("unexpected end of file while applying chunk starting at line {0}")]
    PrematureEndOfFile(usize),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for patch operations.
pub type Result<T> = std::result::Result<T, PatchError>;
