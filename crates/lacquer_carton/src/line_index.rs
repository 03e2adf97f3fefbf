//! Byte offset to line/column conversion.
//!
//! Diagnostics carry byte offsets; humans and editors want lines. The index
//! is built once per source in a single SIMD-accelerated newline scan.

use memchr::memchr_iter;

/// Precomputed line start offsets for a source text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset at which each line starts (always begins with 0)
    line_starts: Vec<u32>,
    /// Total source length in bytes
    len: u32,
}

impl LineIndex {
    /// Build a line index for `source`
    pub fn new(source: &str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr_iter(b'\n', source.as_bytes()).map(|pos| pos as u32 + 1));
        Self {
            line_starts,
            len: source.len() as u32,
        }
    }

    /// Convert a byte offset to a 1-based `(line, column)` pair.
    ///
    /// Columns count bytes. Offsets past the end clamp to the last position.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let column = offset - self.line_starts[line];
        (line as u32 + 1, column + 1)
    }
}
