use regex_automata::{PatternID, Span as EngineSpan};
use rustc_hash::FxHashMap;

use crate::{internal::MatchRegister, Result, ScanError, ScanErrorKind, Span};

/// A view of the match register of a [crate::Scanner].
///
/// It borrows the scanner, so it cannot outlive the next mutating call.
/// Offsets reported by this type are character offsets into the whole text.
#[derive(Debug, Clone, Copy)]
pub struct MatchResult<'s> {
    text: &'s str,
    register: &'s MatchRegister,
}

impl<'s> MatchResult<'s> {
    pub(crate) fn new(text: &'s str, register: &'s MatchRegister) -> Self {
        Self { text, register }
    }

    /// Get the start of the match.
    #[inline]
    pub fn start(&self) -> usize {
        self.register.span.start
    }

    /// Get the end of the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.register.span.end
    }

    /// Get the span of the match.
    #[inline]
    pub fn span(&self) -> Span {
        self.register.span
    }

    /// Get the length of the match in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.register.span.len()
    }

    /// Check if the match is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.register.span.is_empty()
    }

    /// The whole matched text, i.e. group 0.
    #[inline]
    pub fn as_str(&self) -> &'s str {
        &self.text[self.register.bytes.clone()]
    }

    /// Returns the group with the given index.
    ///
    /// Index 0 is the whole match, positive indices are capturing groups in declaration order and
    /// negative indices count from the end, `-1` being the last group.
    /// `Ok(None)` means the group exists but did not participate in the match.
    pub fn group(&self, index: isize) -> Result<Option<&'s str>> {
        let len = self.register.captures.group_len();
        let resolved = if index < 0 {
            len as isize + index
        } else {
            index
        };
        if resolved < 0 || resolved as usize >= len {
            return Err(ScanError::new(ScanErrorKind::UnknownGroup(index.to_string())));
        }
        Ok(self.slice(self.register.captures.get_group(resolved as usize)))
    }

    /// Returns the group with the given name.
    /// `Ok(None)` means the group exists but did not participate in the match.
    pub fn named(&self, name: &str) -> Result<Option<&'s str>> {
        let index = self
            .register
            .captures
            .group_info()
            .to_index(PatternID::ZERO, name)
            .ok_or_else(|| ScanError::new(ScanErrorKind::UnknownGroup(name.to_string())))?;
        Ok(self.slice(self.register.captures.get_group(index)))
    }

    /// All capturing groups without group 0, in declaration order.
    pub fn captures(&self) -> Vec<Option<&'s str>> {
        (1..self.register.captures.group_len())
            .map(|i| self.slice(self.register.captures.get_group(i)))
            .collect()
    }

    /// All named capturing groups, keyed by their names.
    pub fn named_captures(&self) -> FxHashMap<&'s str, Option<&'s str>> {
        let captures = &self.register.captures;
        captures
            .group_info()
            .pattern_names(PatternID::ZERO)
            .enumerate()
            .filter_map(|(i, name)| name.map(|name| (name, self.slice(captures.get_group(i)))))
            .collect()
    }

    /// The text before the match.
    #[inline]
    pub fn pre_match(&self) -> &'s str {
        &self.text[..self.register.bytes.start]
    }

    /// The text after the match.
    #[inline]
    pub fn post_match(&self) -> &'s str {
        &self.text[self.register.bytes.end..]
    }

    #[inline]
    fn slice(&self, span: Option<EngineSpan>) -> Option<&'s str> {
        span.map(|span| &self.text[span.range()])
    }
}
