//! Text buffers and source positions.
//!
//! Positions are editor-shaped: a 0-based line plus a 0-based `character` counted in UTF-16 code units. Byte
//! offsets are kept alongside on tokens so diagnostics can still point into the raw `&str`.

use std::fmt;

/// A 0-based line / UTF-16 column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// Half-open source range between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty span at `pos`.
    pub const fn point(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Read access to a text buffer in editor coordinates.
///
/// The lexer only needs the raw text; position/offset conversion is used by callers that map diagnostics and
/// highlight records back onto the buffer.
pub trait TextBuffer {
    /// Full buffer contents.
    fn text(&self) -> &str;

    /// Number of lines. An empty buffer has one (empty) line.
    fn line_count(&self) -> usize;

    /// Convert a byte offset to a position. Offsets past the end clamp to the end of the buffer.
    fn position_at(&self, offset: usize) -> Position;

    /// Convert a position to a byte offset, or `None` when the position is outside the buffer.
    fn offset_at(&self, position: Position) -> Option<usize>;

    /// Raw text covered by `span`.
    fn slice(&self, span: Span) -> Option<&str> {
        let start = self.offset_at(span.start)?;
        let end = self.offset_at(span.end)?;
        self.text().get(start..end)
    }
}

/// An owned text buffer with a precomputed line-start index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    line_starts: Vec<usize>,
}

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { text, line_starts }
    }

    fn line_bounds(&self, line: usize) -> Option<(usize, usize)> {
        let start = *self.line_starts.get(line)?;
        let end = match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.text.len(),
        };
        Some((start, end))
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl TextBuffer for SourceText {
    fn text(&self) -> &str {
        &self.text
    }

    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn position_at(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let character = self.text[line_start..offset].encode_utf16().count();
        Position::new(line as u32, character as u32)
    }

    fn offset_at(&self, position: Position) -> Option<usize> {
        let (start, end) = self.line_bounds(position.line as usize)?;
        let mut units = 0u32;
        for (i, c) in self.text[start..end].char_indices() {
            if units == position.character {
                return Some(start + i);
            }
            units += c.len_utf16() as u32;
            if units > position.character {
                return None;
            }
        }
        (units == position.character).then_some(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lines_including_trailing_empty_line() {
        assert_eq!(SourceText::new("").line_count(), 1);
        assert_eq!(SourceText::new("a\nb").line_count(), 2);
        assert_eq!(SourceText::new("a\nb\n").line_count(), 3);
    }

    #[test]
    fn position_and_offset_agree() {
        let src = SourceText::new("let\n  x = 1\n");
        let pos = src.position_at(6);
        assert_eq!(pos, Position::new(1, 2));
        assert_eq!(src.offset_at(pos), Some(6));
    }

    #[test]
    fn characters_are_utf16_units() {
        // U+1F600 takes two UTF-16 units and four bytes.
        let src = SourceText::new("\u{1F600}x");
        assert_eq!(src.position_at(4), Position::new(0, 2));
        assert_eq!(src.offset_at(Position::new(0, 2)), Some(4));
        assert_eq!(src.offset_at(Position::new(0, 1)), None);
    }

    #[test]
    fn past_the_end_offsets_clamp() {
        let src = SourceText::new("ab");
        assert_eq!(src.position_at(99), Position::new(0, 2));
        assert_eq!(src.offset_at(Position::new(3, 0)), None);
        assert_eq!(src.offset_at(Position::new(0, 3)), None);
    }

    #[test]
    fn slice_extracts_span_text() {
        let src = SourceText::new("one\ntwo three");
        let span = Span::new(Position::new(1, 4), Position::new(1, 9));
        assert_eq!(src.slice(span), Some("three"));
    }

    #[test]
    fn span_merge_and_contains() {
        let a = Span::new(Position::new(0, 1), Position::new(0, 3));
        let b = Span::new(Position::new(1, 0), Position::new(1, 2));
        let m = a.merge(b);
        assert_eq!(m.start, Position::new(0, 1));
        assert_eq!(m.end, Position::new(1, 2));
        assert!(m.contains(Position::new(0, 9)));
        assert!(!m.contains(Position::new(1, 2)));
    }
}
