/// The scanner cursor.
///
/// The byte offset is used to slice the text and to feed the regex engine, the character offset is
/// the position reported to callers. Both always denote the same boundary in the text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) byte: usize,
    pub(crate) char: usize,
}

impl Cursor {
    /// Returns the cursor behind the given slice, which must start at this cursor.
    #[inline]
    pub(crate) fn advance_over(self, consumed: &str) -> Self {
        Self {
            byte: self.byte + consumed.len(),
            char: self.char + consumed.chars().count(),
        }
    }

    /// Returns the cursor `n` characters behind this one or `None` if fewer than `n` characters
    /// follow in `text`.
    pub(crate) fn forward(self, text: &str, n: usize) -> Option<Self> {
        let rest = &text[self.byte..];
        let byte = rest
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(rest.len()))
            .nth(n)?;
        Some(Self {
            byte: self.byte + byte,
            char: self.char + n,
        })
    }
}
