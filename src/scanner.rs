use std::fmt;

use log::{trace, warn};
use regex_automata::{Anchored, Input};
use rustc_hash::FxHashMap;

use crate::{
    internal::{Cursor, LineIndex, MatchRegister},
    MatchResult, Pattern, Position, PositionProvider, Result, ScanError, ScanErrorKind, Span,
};

/// Where a match attempt may start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Search {
    /// The match must start exactly at the cursor.
    Anchored,
    /// The leftmost match at or after the cursor wins.
    Ahead,
}

/// A string scanner.
///
/// The scanner owns a text and a cursor into it. Patterns are matched against the text at the
/// cursor, either anchored ([Scanner::scan], [Scanner::check], [Scanner::skip]) or searching ahead
/// ([Scanner::scan_until], [Scanner::check_until], [Scanner::skip_until]).
///
/// Each match attempt replaces the match register, which holds the outcome of the most recent
/// attempt. It can be queried with [Scanner::last_match] and the group accessors until the next
/// mutating call. A failed attempt clears the register and leaves the cursor untouched.
///
/// All positions and lengths are counted in characters.
///
/// ```rust
/// use strscan::{Pattern, Scanner};
///
/// let word = Pattern::new(r"\w+").unwrap();
/// let space = Pattern::new(r"\s+").unwrap();
///
/// let mut scanner = Scanner::new("tør bøf");
/// assert_eq!(scanner.scan(&word), Some("tør"));
/// assert_eq!(scanner.scan(&word), None);
/// assert_eq!(scanner.skip(&space), Some(1));
/// assert_eq!(scanner.position(), 4);
/// assert_eq!(scanner.pre_match(), Some("tør"));
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    text: String,
    cursor: Cursor,
    register: Option<MatchRegister>,
    lines: LineIndex,
}

impl Scanner {
    /// Creates a new scanner with the cursor at the start of the given text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineIndex::new(&text);
        Self {
            text,
            cursor: Cursor::default(),
            register: None,
            lines,
        }
    }

    /// The whole text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The length of the text in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.char_len()
    }

    /// Check if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Appends text. The cursor and the match register remain valid.
    pub fn concat(&mut self, more: &str) {
        trace!("Append {} bytes", more.len());
        self.lines.extend(more);
        self.text.push_str(more);
    }

    // ---------------------------------------------------------------------------------------------
    // Cursor and boundary queries
    // ---------------------------------------------------------------------------------------------

    /// The cursor position in characters.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.char
    }

    /// Moves the cursor to the given character position and clears the match register.
    /// Negative values count from the end of the text.
    pub fn set_position(&mut self, position: isize) -> Result<()> {
        let len = self.len();
        let resolved = if position < 0 {
            len as isize + position
        } else {
            position
        };
        if resolved < 0 || resolved as usize > len {
            return Err(ScanError::new(ScanErrorKind::OutOfRange { position, len }));
        }
        let target = resolved as usize;
        // Walk forward from the nearest known boundary.
        let from = if target >= self.cursor.char {
            self.cursor
        } else {
            Cursor::default()
        };
        self.cursor = from
            .forward(&self.text, target - from.char)
            .ok_or_else(|| ScanError::new(ScanErrorKind::OutOfRange { position, len }))?;
        self.register = None;
        trace!("Set position to {}", self.cursor.char);
        Ok(())
    }

    /// Returns the line and column of the cursor.
    pub fn line_column(&self) -> Position {
        self.lines.position(self.cursor.char)
    }

    /// Check if the cursor is at the start of the text.
    #[inline]
    pub fn at_start_of_string(&self) -> bool {
        self.cursor.byte == 0
    }

    /// Check if the cursor is at the end of the text.
    #[inline]
    pub fn at_end_of_string(&self) -> bool {
        self.cursor.byte == self.text.len()
    }

    /// Check if the cursor is at the start of the text or directly behind a newline.
    pub fn at_start_of_line(&self) -> bool {
        self.at_start_of_string() || self.text[..self.cursor.byte].ends_with('\n')
    }

    /// Check if the cursor is at the end of the text or directly before a newline.
    pub fn at_end_of_line(&self) -> bool {
        self.at_end_of_string() || self.remainder().starts_with('\n')
    }

    /// The text behind the cursor. Empty at the end of the text.
    #[inline]
    pub fn remainder(&self) -> &str {
        &self.text[self.cursor.byte..]
    }

    /// The number of characters behind the cursor.
    #[inline]
    pub fn rest_size(&self) -> usize {
        self.len() - self.cursor.char
    }

    /// Returns the next `n` characters without moving the cursor.
    /// Fails with [ScanErrorKind::OutOfRange] if fewer than `n` characters remain.
    pub fn peek(&self, n: usize) -> Result<&str> {
        match self.cursor.forward(&self.text, n) {
            Some(end) => Ok(&self.text[self.cursor.byte..end.byte]),
            None => Err(ScanError::new(ScanErrorKind::OutOfRange {
                position: isize::try_from(self.cursor.char.saturating_add(n))
                    .unwrap_or(isize::MAX),
                len: self.len(),
            })),
        }
    }

    /// Consumes the next `n` characters and returns them.
    /// Returns `None` and leaves the cursor unchanged if fewer than `n` characters remain.
    /// The match register is cleared in any case.
    pub fn read(&mut self, n: usize) -> Option<&str> {
        self.register = None;
        let start = self.cursor;
        self.cursor = start.forward(&self.text, n)?;
        trace!("Read {} chars, position {}", n, self.cursor.char);
        Some(&self.text[start.byte..self.cursor.byte])
    }

    /// Consumes the next character, see [Scanner::read].
    #[inline]
    pub fn read_char(&mut self) -> Option<&str> {
        self.read(1)
    }

    // ---------------------------------------------------------------------------------------------
    // Anchored matching
    // ---------------------------------------------------------------------------------------------

    /// Matches the pattern exactly at the cursor.
    /// On success the cursor is moved behind the match and the matched text is returned.
    pub fn scan(&mut self, pattern: &Pattern) -> Option<&str> {
        let (from, to) = self.attempt(pattern, Search::Anchored, true)?;
        Some(&self.text[from.byte..to.byte])
    }

    /// Matches the pattern exactly at the cursor like [Scanner::scan] but never moves the cursor.
    pub fn check(&mut self, pattern: &Pattern) -> Option<&str> {
        let (from, to) = self.attempt(pattern, Search::Anchored, false)?;
        Some(&self.text[from.byte..to.byte])
    }

    /// Like [Scanner::scan] but returns the length of the match in characters.
    pub fn skip(&mut self, pattern: &Pattern) -> Option<usize> {
        let (from, to) = self.attempt(pattern, Search::Anchored, true)?;
        Some(to.char - from.char)
    }

    // ---------------------------------------------------------------------------------------------
    // Search-ahead matching
    // ---------------------------------------------------------------------------------------------

    /// Searches the leftmost match at or after the cursor.
    /// On success the cursor is moved behind the match and the text from the old cursor position
    /// through the end of the match is returned.
    pub fn scan_until(&mut self, pattern: &Pattern) -> Option<&str> {
        let (from, to) = self.attempt(pattern, Search::Ahead, true)?;
        Some(&self.text[from.byte..to.byte])
    }

    /// Searches like [Scanner::scan_until] but never moves the cursor.
    pub fn check_until(&mut self, pattern: &Pattern) -> Option<&str> {
        let (from, to) = self.attempt(pattern, Search::Ahead, false)?;
        Some(&self.text[from.byte..to.byte])
    }

    /// Like [Scanner::scan_until] but returns the number of characters the cursor advanced.
    pub fn skip_until(&mut self, pattern: &Pattern) -> Option<usize> {
        let (from, to) = self.attempt(pattern, Search::Ahead, true)?;
        Some(to.char - from.char)
    }

    /// Runs one match attempt and updates the match register.
    /// Returns the cursor before the attempt and the cursor at the end of the match.
    fn attempt(
        &mut self,
        pattern: &Pattern,
        search: Search,
        advance: bool,
    ) -> Option<(Cursor, Cursor)> {
        let from = self.cursor;
        let regex = pattern.regex();
        let mut captures = regex.create_captures();
        let input = Input::new(self.text.as_str())
            .span(from.byte..self.text.len())
            .anchored(match search {
                Search::Anchored => Anchored::Yes,
                Search::Ahead => Anchored::No,
            });
        regex.search_captures(&input, &mut captures);

        let Some(found) = captures.get_match() else {
            trace!("{:?} '{}' at {}: no match", search, pattern, from.char);
            self.register = None;
            return None;
        };
        if found.start() < from.byte || (search == Search::Anchored && found.start() != from.byte) {
            warn!(
                "{:?} '{}' at {}: engine reported a match at byte {}, rejected",
                search,
                pattern,
                from.char,
                found.start()
            );
            self.register = None;
            return None;
        }

        let start = from.advance_over(&self.text[from.byte..found.start()]);
        let end = start.advance_over(&self.text[found.range()]);
        trace!(
            "{:?} '{}' at {}: matched {}..{}",
            search,
            pattern,
            from.char,
            start.char,
            end.char
        );
        self.register = Some(MatchRegister::new(
            captures,
            found.range(),
            Span::new(start.char, end.char),
            advance.then_some(from),
        ));
        if advance {
            self.cursor = end;
        }
        Some((from, end))
    }

    // ---------------------------------------------------------------------------------------------
    // Match register queries
    // ---------------------------------------------------------------------------------------------

    /// A view of the match register, `None` if the last attempt failed or nothing was matched yet.
    pub fn last_match(&self) -> Option<MatchResult<'_>> {
        self.register
            .as_ref()
            .map(|register| MatchResult::new(&self.text, register))
    }

    /// The whole text of the registered match.
    pub fn matched(&self) -> Option<&str> {
        self.last_match().map(|m| m.as_str())
    }

    /// The length of the registered match in characters.
    pub fn matched_size(&self) -> Option<usize> {
        self.last_match().map(|m| m.len())
    }

    /// Returns a group of the registered match by index, see [MatchResult::group].
    ///
    /// The outer `Option` is `None` if no match is registered, the inner one is `None` if the
    /// group did not participate in the match.
    pub fn group_at(&self, index: isize) -> Result<Option<Option<&str>>> {
        self.last_match().map(|m| m.group(index)).transpose()
    }

    /// Batch form of [Scanner::group_at].
    pub fn groups_at(&self, indices: &[isize]) -> Result<Option<Vec<Option<&str>>>> {
        self.last_match()
            .map(|m| indices.iter().map(|&i| m.group(i)).collect::<Result<Vec<_>>>())
            .transpose()
    }

    /// Returns a group of the registered match by name, see [MatchResult::named].
    pub fn named_group(&self, name: &str) -> Result<Option<Option<&str>>> {
        self.last_match().map(|m| m.named(name)).transpose()
    }

    /// Batch form of [Scanner::named_group].
    pub fn named_groups(&self, names: &[&str]) -> Result<Option<Vec<Option<&str>>>> {
        self.last_match()
            .map(|m| names.iter().map(|name| m.named(name)).collect::<Result<Vec<_>>>())
            .transpose()
    }

    /// All capturing groups of the registered match without group 0.
    pub fn captures(&self) -> Option<Vec<Option<&str>>> {
        self.last_match().map(|m| m.captures())
    }

    /// All named capturing groups of the registered match.
    pub fn named_captures(&self) -> Option<FxHashMap<&str, Option<&str>>> {
        self.last_match().map(|m| m.named_captures())
    }

    /// The text before the registered match.
    pub fn pre_match(&self) -> Option<&str> {
        self.last_match().map(|m| m.pre_match())
    }

    /// The text after the registered match.
    pub fn post_match(&self) -> Option<&str> {
        self.last_match().map(|m| m.post_match())
    }

    // ---------------------------------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------------------------------

    /// Moves the cursor to the start of the text and clears the match register.
    pub fn reset(&mut self) {
        trace!("Reset");
        self.cursor = Cursor::default();
        self.register = None;
    }

    /// Moves the cursor to the end of the text and clears the match register.
    pub fn terminate(&mut self) {
        trace!("Terminate");
        self.cursor = Cursor {
            byte: self.text.len(),
            char: self.len(),
        };
        self.register = None;
    }

    /// Moves the cursor back to where it was before the registered match and clears the match
    /// register.
    /// Only matches of [Scanner::scan], [Scanner::skip], [Scanner::scan_until] and
    /// [Scanner::skip_until] can be undone.
    pub fn unscan(&mut self) -> Result<()> {
        let previous = self
            .register
            .as_ref()
            .and_then(MatchRegister::unscan_to)
            .ok_or_else(|| ScanError::new(ScanErrorKind::NothingToUnscan))?;
        trace!("Unscan from {} to {}", self.cursor.char, previous.char);
        self.cursor = previous;
        self.register = None;
        Ok(())
    }
}

impl From<&str> for Scanner {
    fn from(text: &str) -> Self {
        Scanner::new(text)
    }
}

impl From<String> for Scanner {
    fn from(text: String) -> Self {
        Scanner::new(text)
    }
}

impl PositionProvider for Scanner {
    /// Returns the line and column numbers of the given character offset.
    fn position(&self, offset: usize) -> Position {
        self.lines.position(offset)
    }
}

/// Number of characters of context shown on each side of the cursor.
const CONTEXT_CHARS: usize = 5;

impl fmt::Display for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.at_end_of_string() {
            return write!(f, "#<Scanner fin>");
        }
        write!(f, "#<Scanner {}/{}", self.cursor.char, self.len())?;
        if !self.at_start_of_string() {
            let before = &self.text[..self.cursor.byte];
            let skip = self.cursor.char.saturating_sub(CONTEXT_CHARS);
            let shown: String = before.chars().skip(skip).collect();
            let ellipsis = if skip > 0 { "..." } else { "" };
            write!(f, " {:?}", format!("{ellipsis}{shown}"))?;
        }
        let after = self.remainder();
        let shown: String = after.chars().take(CONTEXT_CHARS).collect();
        let ellipsis = if shown.len() < after.len() { "..." } else { "" };
        write!(f, " @ {:?}>", format!("{shown}{ellipsis}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn pattern(p: &str) -> Pattern {
        Pattern::new(p).unwrap()
    }

    #[test]
    fn test_boundaries() {
        init();
        let mut scanner = Scanner::new("ab\ncd");
        assert!(scanner.at_start_of_string());
        assert!(scanner.at_start_of_line());
        assert!(!scanner.at_end_of_line());

        assert_eq!(scanner.read(2), Some("ab"));
        assert!(!scanner.at_start_of_line());
        assert!(scanner.at_end_of_line());
        assert_eq!(scanner.line_column(), Position::new(1, 3));

        assert_eq!(scanner.read_char(), Some("\n"));
        assert!(scanner.at_start_of_line());
        assert!(!scanner.at_end_of_line());
        assert_eq!(scanner.line_column(), Position::new(2, 1));

        scanner.terminate();
        assert!(scanner.at_end_of_string());
        assert!(scanner.at_end_of_line());
        assert_eq!(scanner.remainder(), "");
        assert_eq!(scanner.rest_size(), 0);
    }

    #[test]
    fn test_peek_and_read() {
        init();
        let mut scanner = Scanner::new("tør");
        assert_eq!(scanner.peek(2).unwrap(), "tø");
        assert_eq!(scanner.peek(0).unwrap(), "");
        assert_eq!(scanner.position(), 0);
        assert!(matches!(
            scanner.peek(4).unwrap_err().kind(),
            ScanErrorKind::OutOfRange {
                position: 4,
                len: 3
            }
        ));

        assert!(matches!(
            scanner.peek(usize::MAX).unwrap_err().kind(),
            ScanErrorKind::OutOfRange {
                position: isize::MAX,
                len: 3
            }
        ));

        assert!(scanner.scan(&pattern("t")).is_some());
        assert_eq!(scanner.read(5), None);
        assert_eq!(scanner.position(), 1);
        assert!(scanner.last_match().is_none());
        assert_eq!(scanner.read(2), Some("ør"));
        assert_eq!(scanner.read(1), None);
        assert_eq!(scanner.read(0), Some(""));
    }

    #[test]
    fn test_peek_huge_count_past_start() {
        init();
        let mut scanner = Scanner::new("abc");
        assert_eq!(scanner.read(1), Some("a"));
        assert!(matches!(
            scanner.peek(usize::MAX).unwrap_err().kind(),
            ScanErrorKind::OutOfRange {
                position: isize::MAX,
                len: 3
            }
        ));
        assert_eq!(scanner.position(), 1);
        assert_eq!(scanner.peek(2).unwrap(), "bc");
    }

    #[test]
    fn test_set_position() {
        init();
        let mut scanner = Scanner::new("tør bøf");
        scanner.set_position(4).unwrap();
        assert_eq!(scanner.remainder(), "bøf");
        scanner.set_position(-2).unwrap();
        assert_eq!(scanner.remainder(), "øf");
        scanner.set_position(2).unwrap();
        assert_eq!(scanner.remainder(), "r bøf");
        scanner.set_position(7).unwrap();
        assert!(scanner.at_end_of_string());

        assert!(scanner.check_until(&pattern("$")).is_some());
        assert!(scanner.set_position(8).is_err());
        assert!(scanner.set_position(-8).is_err());
        // Failed calls leave the state alone.
        assert_eq!(scanner.position(), 7);
        assert!(scanner.last_match().is_some());

        scanner.set_position(-7).unwrap();
        assert!(scanner.at_start_of_string());
        assert!(scanner.last_match().is_none());
    }

    #[test]
    fn test_check_does_not_move() {
        init();
        let mut scanner = Scanner::new("Fri Dec 12 1975");
        assert_eq!(scanner.check(&pattern(r"Fri")), Some("Fri"));
        assert_eq!(scanner.position(), 0);
        assert_eq!(scanner.matched(), Some("Fri"));
        assert_eq!(scanner.check(&pattern(r"12")), None);
        assert_eq!(scanner.position(), 0);
        assert_eq!(scanner.matched(), None);
        assert_eq!(scanner.check_until(&pattern(r"12")), Some("Fri Dec 12"));
        assert_eq!(scanner.position(), 0);
        assert_eq!(scanner.matched(), Some("12"));
        assert_eq!(scanner.matched_size(), Some(2));
    }

    #[test]
    fn test_anchoring_is_not_line_anchoring() {
        init();
        let mut scanner = Scanner::new("a\nb");
        let multi_line_b = crate::PatternBuilder::new()
            .multi_line(true)
            .build("^b")
            .unwrap();
        assert_eq!(scanner.scan(&multi_line_b), None);
        assert_eq!(scanner.scan_until(&multi_line_b), Some("a\nb"));

        scanner.reset();
        scanner.set_position(1).unwrap();
        // `\A` refers to the start of the text, not to the cursor.
        assert_eq!(scanner.scan(&pattern(r"\A\n")), None);
        assert_eq!(scanner.scan(&pattern(r"\n")), Some("\n"));
    }

    #[test]
    fn test_word_boundary_sees_text_before_cursor() {
        init();
        let mut scanner = Scanner::new("abc");
        scanner.set_position(1).unwrap();
        assert_eq!(scanner.scan(&pattern(r"\bbc")), None);
        assert_eq!(scanner.scan(&pattern(r"\Bbc")), Some("bc"));
    }

    #[test]
    fn test_empty_match() {
        init();
        let mut scanner = Scanner::new("abc");
        assert_eq!(scanner.scan(&pattern(r"\d*")), Some(""));
        assert_eq!(scanner.position(), 0);
        assert_eq!(scanner.skip_until(&pattern(r"x*")), Some(0));
        assert_eq!(scanner.matched(), Some(""));
    }

    #[test]
    fn test_skip_and_skip_until() {
        init();
        let mut scanner = Scanner::new("tør bøf.");
        assert_eq!(scanner.skip(&pattern(r"\w+")), Some(3));
        assert_eq!(scanner.position(), 3);
        assert_eq!(scanner.skip_until(&pattern(r"\.")), Some(5));
        assert_eq!(scanner.position(), 8);
        assert_eq!(scanner.skip(&pattern(r"\w+")), None);
        assert_eq!(scanner.skip_until(&pattern(r"\w+")), None);
        assert_eq!(scanner.position(), 8);
    }

    #[test]
    fn test_unscan() {
        init();
        let mut scanner = Scanner::new("tør bøf");
        assert!(matches!(
            scanner.unscan().unwrap_err().kind(),
            ScanErrorKind::NothingToUnscan
        ));
        assert_eq!(scanner.scan(&pattern(r"\w+")), Some("tør"));
        assert_eq!(scanner.scan_until(&pattern(r"ø")), Some(" bø"));
        assert_eq!(scanner.position(), 6);
        scanner.unscan().unwrap();
        assert_eq!(scanner.position(), 3);
        assert!(scanner.last_match().is_none());
        assert!(scanner.unscan().is_err());

        assert!(scanner.check(&pattern(r"\s")).is_some());
        assert!(scanner.unscan().is_err());
        assert_eq!(scanner.remainder(), " bøf");
    }

    #[test]
    fn test_concat() {
        init();
        let mut scanner = Scanner::new("Fri ");
        assert_eq!(scanner.scan(&pattern(r"\w+\s")), Some("Fri "));
        assert!(scanner.at_end_of_string());
        scanner.concat("Dec\n12");
        assert!(!scanner.at_end_of_string());
        assert_eq!(scanner.matched(), Some("Fri "));
        assert_eq!(scanner.post_match(), Some("Dec\n12"));
        assert_eq!(scanner.len(), 10);
        assert_eq!(scanner.scan_until(&pattern(r"\d+")), Some("Dec\n12"));
        assert_eq!(scanner.line_column(), Position::new(2, 3));
        assert_eq!(PositionProvider::position(&scanner, 8), Position::new(2, 1));
    }

    #[test]
    fn test_display() {
        init();
        let mut scanner = Scanner::new("test string here");
        assert_eq!(scanner.to_string(), r#"#<Scanner 0/16 @ "test ...">"#);
        scanner.read(7);
        assert_eq!(
            scanner.to_string(),
            r#"#<Scanner 7/16 "...st st" @ "ring ...">"#
        );
        scanner.read(5);
        assert_eq!(scanner.to_string(), r#"#<Scanner 12/16 "...ring " @ "here">"#);
        scanner.terminate();
        assert_eq!(scanner.to_string(), "#<Scanner fin>");
    }
}
