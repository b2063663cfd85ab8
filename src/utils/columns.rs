//! Fixed-width column slicing for legacy narrative layouts

/// A character span `[start, start + width)` of a narrative line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub start: usize,
    pub width: usize,
}

impl Column {
    /// Create a new column
    pub const fn new(start: usize, width: usize) -> Self {
        Self { start, width }
    }

    /// First character position after this column
    pub const fn end(&self) -> usize {
        self.start + self.width
    }

    /// The part of `line` covered by this column
    ///
    /// Positions count characters, not bytes. Columns past the end of the
    /// line yield an empty slice.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        let begin = byte_offset(line, self.start);
        let end = byte_offset(line, self.end());
        &line[begin..end]
    }
}

fn byte_offset(line: &str, chars: usize) -> usize {
    line.char_indices()
        .nth(chars)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

/// Trimmed text, or `None` when nothing but whitespace is left
pub fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
