use std::ops::Range;

use regex_automata::util::captures::Captures;

use super::Cursor;
use crate::Span;

/// The outcome of the most recent successful match attempt.
///
/// A register is replaced wholesale by every match attempt and dropped on failure, so there is at
/// most one live register per scanner.
#[derive(Debug, Clone)]
pub(crate) struct MatchRegister {
    // Group slots in byte offsets, as reported by the regex engine.
    pub(crate) captures: Captures,
    // Byte range of the whole match.
    pub(crate) bytes: Range<usize>,
    // Character span of the whole match.
    pub(crate) span: Span,
    // Cursor before the attempt, only for attempts that advanced the cursor.
    unscan_to: Option<Cursor>,
}

impl MatchRegister {
    pub(crate) fn new(
        captures: Captures,
        bytes: Range<usize>,
        span: Span,
        unscan_to: Option<Cursor>,
    ) -> Self {
        debug_assert!(captures.is_match());
        Self {
            captures,
            bytes,
            span,
            unscan_to,
        }
    }

    #[inline]
    pub(crate) fn unscan_to(&self) -> Option<Cursor> {
        self.unscan_to
    }
}
