//! Line index
//!
//! Maps byte offsets to 0-based lines and character columns. Columns count characters
//! from the start of the line; every whitespace character (tabs included) is one column.

/// Start offsets of every line in a text.
///
/// A text of `n` newlines has `n + 1` lines; the last one may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            starts,
            len: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Offset of the first byte of `line`.
    pub fn line_start(&self, line: usize) -> usize {
        self.starts.get(line).copied().unwrap_or(self.len)
    }

    /// Offset of the newline ending `line`, or the end of the text.
    pub fn line_end(&self, line: usize) -> usize {
        match self.starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.len,
        }
    }

    /// Line containing `offset`. Offsets past the end map to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// Character column of `offset` within its line.
    pub fn column(&self, text: &str, offset: usize) -> usize {
        let start = self.line_start(self.line_of(offset));
        text.get(start..offset).map_or(0, |s| s.chars().count())
    }

    /// Width of the leading whitespace of `line`. Spaces and tabs are single bytes, so
    /// the width is both a byte count and a column.
    pub fn indentation(&self, text: &str, line: usize) -> usize {
        text[self.line_start(line)..self.line_end(line)]
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t'))
            .count()
    }

    /// Offset of the first non-whitespace byte of `line` (the line end when blank).
    pub fn content_start(&self, text: &str, line: usize) -> usize {
        self.line_start(line) + self.indentation(text, line)
    }

    pub fn is_blank(&self, text: &str, line: usize) -> bool {
        text[self.line_start(line)..self.line_end(line)]
            .trim_end_matches('\r')
            .bytes()
            .all(|b| matches!(b, b' ' | b'\t'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_boundaries() {
        let text = "ab\n\n  cd";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 3);
        assert_eq!((index.line_start(0), index.line_end(0)), (0, 2));
        assert_eq!((index.line_start(1), index.line_end(1)), (3, 3));
        assert_eq!((index.line_start(2), index.line_end(2)), (4, 8));
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let index = LineIndex::new("x\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_start(1), 2);
        assert_eq!(index.line_end(1), 2);
    }

    #[test]
    fn test_line_of_offset() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(index.line_of(0), 0);
        assert_eq!(index.line_of(2), 0);
        assert_eq!(index.line_of(3), 1);
        assert_eq!(index.line_of(6), 2);
        assert_eq!(index.line_of(100), 2);
    }

    #[test]
    fn test_columns_count_characters() {
        let text = "α = 1\n  β";
        let index = LineIndex::new(text);
        assert_eq!(index.column(text, text.find('=').unwrap()), 2);
        assert_eq!(index.column(text, text.find('β').unwrap()), 2);
        assert_eq!(index.indentation(text, 1), 2);
        assert_eq!(index.content_start(text, 1), text.find('β').unwrap());
    }

    #[test]
    fn test_blank_lines() {
        let text = "a\n   \n\t\r\nb";
        let index = LineIndex::new(text);
        assert!(!index.is_blank(text, 0));
        assert!(index.is_blank(text, 1));
        assert!(index.is_blank(text, 2));
        assert!(!index.is_blank(text, 3));
    }
}
