//! Tokenizer, verifier, and chunk assembly for unified diff files.
//!
//! Tokenization is a single-pass finite-state scan over the patch file's
//! lines. Each line is classified by the state the machine lands in *after*
//! looking at it, so the line that terminates a run (say, the first line
//! after the extended header) is classified under its new state, not the
//! old one.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PatchError, Result};

/// Matches `@@ -start,count +start,count @@` hunk headers.
static HUNK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@@ -(\d+),(\d+) \+(\d+),(\d+) @@").expect("valid regex"));

/// One line of a diff chunk. The one-character prefix is stripped; the
/// trailing newline is kept so content can be emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkLine {
    /// Context line (space prefix); must match the original file verbatim
    Context(String),
    /// Added line (`+` prefix); emitted without consuming an original line
    Add(String),
    /// Removed line (`-` prefix); consumes an original line without emitting
    Remove(String),
}

/// One classified line of a unified diff file, owning the exact source line
/// including its trailing newline (chunk lines lose their prefix only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The `diff --git ...` first line
    Header(String),
    /// `index`/`mode`/`new`/`deleted` lines following the header
    ExtendedHeader(String),
    /// A `---`/`+++` line; `is_add` is true for `+++`
    FromTo { line: String, is_add: bool },
    /// A `@@ -a,b +c,d @@` hunk header
    ChunkHeader(String),
    /// A line belonging to the current hunk
    Chunk(ChunkLine),
}

/// Tokenizer states. Held as a local during the scan, one value per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Header,
    ExtendedHeader,
    FromToLine,
    ChunkHeader,
    ChunkLine,
}

fn first_word(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

/// Tokenize the text of a unified diff file.
///
/// Inside a hunk, lines whose first character is not ` `, `+`, or `-`
/// produce no token and are silently dropped.
pub fn tokenize(patch_text: &str) -> Result<Vec<Token>> {
    let mut state = State::Idle;
    let mut tokens = Vec::new();

    for line in patch_text.split_inclusive('\n') {
        state = match state {
            State::Idle => State::Header,
            State::Header => State::ExtendedHeader,
            State::ExtendedHeader => {
                if matches!(first_word(line), "index" | "mode" | "new" | "deleted") {
                    State::ExtendedHeader
                } else {
                    State::FromToLine
                }
            }
            State::FromToLine => {
                if matches!(first_word(line), "+++" | "---") {
                    State::FromToLine
                } else {
                    State::ChunkHeader
                }
            }
            State::ChunkHeader => State::ChunkLine,
            State::ChunkLine => {
                if line.starts_with('@') {
                    State::ChunkHeader
                } else {
                    State::ChunkLine
                }
            }
        };

        match state {
            // The first line always moves the machine out of Idle.
            State::Idle => unreachable!(),
            State::Header => tokens.push(Token::Header(line.to_string())),
            State::ExtendedHeader => tokens.push(Token::ExtendedHeader(line.to_string())),
            State::FromToLine => {
                let is_add = match first_word(line) {
                    "+++" => true,
                    "---" => false,
                    _ => return Err(PatchError::MalformedFromToLine(line.to_string())),
                };
                tokens.push(Token::FromTo {
                    line: line.to_string(),
                    is_add,
                });
            }
            State::ChunkHeader => tokens.push(Token::ChunkHeader(line.to_string())),
            State::ChunkLine => {
                let mut chars = line.chars();
                match chars.next() {
                    Some(' ') => {
                        tokens.push(Token::Chunk(ChunkLine::Context(chars.as_str().to_string())))
                    }
                    Some('+') => {
                        tokens.push(Token::Chunk(ChunkLine::Add(chars.as_str().to_string())))
                    }
                    Some('-') => {
                        tokens.push(Token::Chunk(ChunkLine::Remove(chars.as_str().to_string())))
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(tokens)
}

/// Check that the patch is a diff at all and that it targets `target`.
///
/// Every `+++` line's basename must equal the target file's basename;
/// patches written for some other file are rejected before anything is
/// applied.
pub fn verify(tokens: &[Token], target: &Path) -> Result<()> {
    match tokens.first() {
        Some(Token::Header(line)) if line.contains("diff") => {}
        Some(Token::Header(line)) => return Err(PatchError::MalformedPatchHeader(line.clone())),
        _ => return Err(PatchError::MalformedPatchHeader(String::new())),
    }

    let target_name = target
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    for token in tokens {
        if let Token::FromTo { line, is_add: true } = token {
            let patch_target = from_to_basename(line);
            if patch_target != target_name {
                return Err(PatchError::PatchTargetMismatch {
                    patch_target: patch_target.to_string(),
                    target: target_name.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Basename of the path named by a `+++`/`---` line.
fn from_to_basename(line: &str) -> &str {
    let path = line.trim();
    let path = path
        .strip_prefix("+++")
        .or_else(|| path.strip_prefix("---"))
        .unwrap_or(path)
        .trim_start();
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// One contiguous edit region of the patch, anchored to original-file line
/// numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The `@@ ... @@` line this chunk was built from
    pub header: String,
    /// The chunk's lines, in patch order
    pub lines: Vec<ChunkLine>,
    /// First original-file line this chunk rewrites (1-based)
    pub start_lineno: usize,
    /// Last original-file line this chunk rewrites (1-based, inclusive)
    pub end_lineno: usize,
}

impl Chunk {
    fn new(header: String, lines: Vec<ChunkLine>) -> Result<Self> {
        let caps = HUNK_HEADER
            .captures(&header)
            .ok_or_else(|| PatchError::MalformedChunkHeader(header.clone()))?;
        let start: usize = caps[1]
            .parse()
            .map_err(|_| PatchError::MalformedChunkHeader(header.clone()))?;
        let count: usize = caps[2]
            .parse()
            .map_err(|_| PatchError::MalformedChunkHeader(header.clone()))?;

        Ok(Self {
            start_lineno: start,
            end_lineno: (start + count).saturating_sub(1),
            header,
            lines,
        })
    }
}

/// Group chunk-header and chunk-line tokens into `Chunk`s, in patch order.
///
/// A trailing header with no chunk lines is dropped.
pub fn assemble_chunks(tokens: &[Token]) -> Result<Vec<Chunk>> {
    let mut chunks = Vec::new();
    let mut cur_header: Option<&String> = None;
    let mut cur_lines: Vec<ChunkLine> = Vec::new();

    for token in tokens {
        match token {
            Token::ChunkHeader(header) => {
                if let Some(prev) = cur_header.replace(header) {
                    chunks.push(Chunk::new(prev.clone(), std::mem::take(&mut cur_lines))?);
                }
            }
            Token::Chunk(line) => cur_lines.push(line.clone()),
            _ => {}
        }
    }

    if let Some(header) = cur_header {
        if !cur_lines.is_empty() {
            chunks.push(Chunk::new(header.clone(), cur_lines)?);
        }
    }

    Ok(chunks)
}
