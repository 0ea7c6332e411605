//! Unified diff application for vippatch.
//!
//! This crate parses a unified diff file into a typed token stream, groups
//! the tokens into chunks anchored to original-file line numbers, and
//! replays the chunks against the target file's lines to rewrite it in
//! place. A `.bak`/`.bakN` copy of the target is created before anything
//! is mutated.
//!
//! # Architecture
//!
//! This is an infrastructure crate:
//! - Depends on: nothing above the error/logging stack
//! - Used by: the `vippatch` CLI driver
//!
//! There is no fuzzy matching and no context realignment: a patch either
//! applies cleanly at the exact line numbers and content it records, or the
//! whole operation fails and the target file is left untouched.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vippatch_udiff::Patcher;
//!
//! Patcher::patch(Path::new("axi_vip_pkg.sv"), Path::new("fix.patch"))?;
//! ```

mod applier;
mod backup;
mod error;
mod parser;
mod patcher;

pub use applier::apply;
pub use backup::create_backup;
pub use error::{PatchError, Result};
pub use parser::{assemble_chunks, tokenize, verify, Chunk, ChunkLine, Token};
pub use patcher::Patcher;
