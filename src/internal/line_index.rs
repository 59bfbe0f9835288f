use log::trace;

use crate::Position;

/// Records the character offsets at which lines start.
/// It is used to calculate line and column numbers of offsets.
/// The line number is the index of the line offset in the vector plus one.
#[derive(Debug, Clone)]
pub(crate) struct LineIndex {
    // Always sorted in ascending order, the first entry is 0.
    line_offsets: Vec<usize>,
    // Number of characters recorded so far.
    char_len: usize,
}

impl LineIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut me = Self {
            line_offsets: vec![0],
            char_len: 0,
        };
        me.extend(text);
        me
    }

    /// Records the line starts of a chunk appended to the text.
    pub(crate) fn extend(&mut self, chunk: &str) {
        for c in chunk.chars() {
            self.char_len += 1;
            if c == '\n' {
                self.line_offsets.push(self.char_len);
            }
        }
        trace!(
            "Line index covers {} chars in {} lines",
            self.char_len,
            self.line_offsets.len()
        );
    }

    #[inline]
    pub(crate) fn char_len(&self) -> usize {
        self.char_len
    }

    /// Returns the line and column numbers of the given character offset.
    pub(crate) fn position(&self, offset: usize) -> Position {
        match self.line_offsets.binary_search(&offset) {
            Ok(i) => Position::new(i + 1, 1),
            Err(i) => Position::new(i, offset - self.line_offsets[i - 1] + 1),
        }
    }
}
