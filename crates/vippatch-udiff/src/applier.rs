//! Replays assembled chunks against the original file's line stream.

use crate::error::{PatchError, Result};
use crate::parser::{Chunk, ChunkLine};

/// Apply `chunks` to `original`, returning the patched content.
///
/// Original lines are numbered from 1. Lines outside any chunk's range pass
/// through unchanged. When the current line number hits the pending chunk's
/// `start_lineno` the chunk is replayed: context lines must match the
/// original verbatim and are re-emitted, added lines are emitted without
/// consuming an original line, and removed lines consume an original line
/// without emitting.
///
/// The result is built entirely in memory; callers write it out only after
/// the whole patch has applied.
pub fn apply(original: &str, chunks: &[Chunk]) -> Result<String> {
    let mut source = original
        .split_inclusive('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line));
    let mut remaining = chunks.iter();
    let mut chunk = remaining.next();

    let mut output = String::with_capacity(original.len());

    while let Some((mut lineno, mut line)) = source.next() {
        let Some(cur) = chunk.filter(|c| c.start_lineno == lineno) else {
            output.push_str(line);
            continue;
        };

        for chunk_line in &cur.lines {
            match chunk_line {
                ChunkLine::Context(content) => {
                    if content != line {
                        return Err(PatchError::ContextMismatch {
                            expected: content.trim_end_matches('\n').to_string(),
                            received: line.trim_end_matches('\n').to_string(),
                        });
                    }
                    output.push_str(content);
                    if lineno != cur.end_lineno {
                        (lineno, line) = source
                            .next()
                            .ok_or(PatchError::PrematureEndOfFile(cur.start_lineno))?;
                    }
                }
                ChunkLine::Add(content) => output.push_str(content),
                ChunkLine::Remove(_) => {
                    (lineno, line) = source
                        .next()
                        .ok_or(PatchError::PrematureEndOfFile(cur.start_lineno))?;
                }
            }
        }

        chunk = remaining.next();
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{assemble_chunks, tokenize};

    fn chunks_for(patch: &str) -> Vec<Chunk> {
        assemble_chunks(&tokenize(patch).unwrap()).unwrap()
    }

    #[test]
    fn test_apply_replaces_one_line() {
        let patch = "\
diff --git a/f.txt b/f.txt
index 1111111..2222222 100644
--- a/f.txt
+++ b/f.txt
@@ -1,3 +1,3 @@
 a
-b
+x
 c
";
        let result = apply("a\nb\nc\n", &chunks_for(patch)).unwrap();
        assert_eq!(result, "a\nx\nc\n");
    }

    #[test]
    fn test_apply_removes_a_line() {
        let patch = "\
diff --git a/f.txt b/f.txt
index 1111111..2222222 100644
--- a/f.txt
+++ b/f.txt
@@ -1,3 +1,2 @@
 a
-b
 c
";
        let result = apply("a\nb\nc\n", &chunks_for(patch)).unwrap();
        assert_eq!(result, "a\nc\n");
    }

    #[test]
    fn test_apply_appends_after_last_context_line() {
        let patch = "\
diff --git a/f.txt b/f.txt
index 1111111..2222222 100644
--- a/f.txt
+++ b/f.txt
@@ -1,1 +1,2 @@
 a
+z
";
        let result = apply("a\n", &chunks_for(patch)).unwrap();
        assert_eq!(result, "a\nz\n");
    }

    #[test]
    fn test_apply_multiple_chunks_with_passthrough_between() {
        let patch = "\
diff --git a/f.txt b/f.txt
index 1111111..2222222 100644
--- a/f.txt
+++ b/f.txt
@@ -2,3 +2,3 @@
 l2
-l3
+L3
 l4
@@ -5,2 +5,2 @@
-l5
+L5
 l6
";
        let original = "l1\nl2\nl3\nl4\nl5\nl6\n";
        let result = apply(original, &chunks_for(patch)).unwrap();
        assert_eq!(result, "l1\nl2\nL3\nl4\nL5\nl6\n");
    }

    #[test]
    fn test_apply_without_chunks_passes_everything_through() {
        let result = apply("a\nb\n", &[]).unwrap();
        assert_eq!(result, "a\nb\n");
    }

    #[test]
    fn test_apply_reports_context_mismatch() {
        let patch = "\
diff --git a/f.txt b/f.txt
index 1111111..2222222 100644
--- a/f.txt
+++ b/f.txt
@@ -1,2 +1,3 @@
 a
 b
+x
";
        let err = apply("a\nB\n", &chunks_for(patch)).unwrap_err();
        match err {
            PatchError::ContextMismatch { expected, received } => {
                assert_eq!(expected, "b");
                assert_eq!(received, "B");
            }
            other => panic!("expected ContextMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_errors_when_file_ends_inside_chunk() {
        let patch = "\
diff --git a/f.txt b/f.txt
index 1111111..2222222 100644
--- a/f.txt
+++ b/f.txt
@@ -1,2 +1,1 @@
 a
-b
";
        let err = apply("a\nb\n", &chunks_for(patch)).unwrap_err();
        assert!(matches!(err, PatchError::PrematureEndOfFile(1)));
    }

    #[test]
    fn test_apply_preserves_file_without_trailing_newline() {
        // The patch's last context line has no trailing newline, matching
        // the original's last line.
        let patch = "\
diff --git a/f.txt b/f.txt
index 1111111..2222222 100644
--- a/f.txt
+++ b/f.txt
@@ -1,3 +1,3 @@
 a
-b
+x
 c";
        let result = apply("a\nb\nc", &chunks_for(patch)).unwrap();
        assert_eq!(result, "a\nx\nc");
    }
}
