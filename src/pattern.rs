//! Module with the pattern types and their methods.
use log::trace;
use regex_automata::{meta::Regex, util::syntax, PatternID};

use crate::{Result, ScanError, ScanErrorKind};

/// A compiled pattern that the [crate::Scanner] matches against its text.
///
/// The pattern language is the one of the `regex-automata` crate, i.e. the syntax of the `regex`
/// crate. Named groups are written as `(?<name>...)` or `(?P<name>...)`.
/// Matching is leftmost-first, as with backtracking regex engines.
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern with the default syntax settings.
    pub fn new(pattern: &str) -> Result<Self> {
        PatternBuilder::new().build(pattern)
    }

    /// Compile a pattern that matches the given text literally.
    pub fn literal(text: &str) -> Result<Self> {
        PatternBuilder::new().build(&regex_syntax::escape(text))
    }

    /// Get the pattern text.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The number of capturing groups, not counting the implicit group of the whole match.
    #[inline]
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    /// The names of all named groups in declaration order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.regex
            .group_info()
            .pattern_names(PatternID::ZERO)
            .flatten()
    }

    #[inline]
    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern.escape_default())
    }
}

impl std::str::FromStr for Pattern {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::new(s)
    }
}

/// A builder for patterns with non-default syntax settings.
///
/// ```rust
/// use strscan::PatternBuilder;
///
/// let pattern = PatternBuilder::new()
///     .case_insensitive(true)
///     .build(r"select")
///     .expect("PatternBuilder error");
/// assert_eq!(pattern.pattern(), "select");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternBuilder {
    case_insensitive: bool,
    multi_line: bool,
    dot_matches_new_line: bool,
    ignore_whitespace: bool,
    swap_greed: bool,
    unicode: bool,
}

impl Default for PatternBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternBuilder {
    /// Creates a new pattern builder with the default syntax settings.
    pub fn new() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            ignore_whitespace: false,
            swap_greed: false,
            unicode: true,
        }
    }

    /// Match letters case insensitively, like the `i` flag.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Let `^` and `$` match at line boundaries, like the `m` flag.
    /// This does not relax the anchoring of [crate::Scanner::scan].
    pub fn multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    /// Let `.` match `\n`, like the `s` flag.
    pub fn dot_matches_new_line(mut self, yes: bool) -> Self {
        self.dot_matches_new_line = yes;
        self
    }

    /// Ignore whitespace and allow `#` comments in the pattern, like the `x` flag.
    pub fn ignore_whitespace(mut self, yes: bool) -> Self {
        self.ignore_whitespace = yes;
        self
    }

    /// Swap the meaning of greedy and lazy repetitions, like the `U` flag.
    pub fn swap_greed(mut self, yes: bool) -> Self {
        self.swap_greed = yes;
        self
    }

    /// Enable Unicode aware character classes. Enabled by default.
    pub fn unicode(mut self, yes: bool) -> Self {
        self.unicode = yes;
        self
    }

    /// Compiles the given pattern with the settings of this builder.
    pub fn build(self, pattern: &str) -> Result<Pattern> {
        trace!("Compile pattern '{}' with {:?}", pattern.escape_default(), self);
        let config = syntax::Config::new()
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .swap_greed(self.swap_greed)
            .unicode(self.unicode);
        let regex = Regex::builder()
            .syntax(config)
            .build(pattern)
            .map_err(|e| ScanError::new(ScanErrorKind::RegexBuildError(e, pattern.to_string())))?;
        Ok(Pattern {
            pattern: pattern.to_string(),
            regex,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[rstest]
    #[case::no_groups(r"\w+", 0, &[])]
    #[case::positional(r"(a)(b)?", 2, &[])]
    #[case::named(
        r"(?<date>(?<day>\w+) (?<month>\w+) (\d+))",
        4,
        &["date", "day", "month"]
    )]
    fn test_group_table(
        #[case] pattern: &str,
        #[case] expected_len: usize,
        #[case] expected_names: &[&str],
    ) {
        init();
        let pattern = Pattern::new(pattern).unwrap();
        assert_eq!(pattern.captures_len(), expected_len);
        assert_eq!(pattern.group_names().collect::<Vec<_>>(), expected_names);
    }

    #[test]
    fn test_invalid_pattern() {
        init();
        let err = Pattern::new(r"(unclosed").unwrap_err();
        assert!(matches!(
            err.kind(),
            ScanErrorKind::RegexBuildError(_, p) if p == "(unclosed"
        ));
    }

    #[test]
    fn test_literal_pattern() {
        init();
        let pattern = Pattern::literal("a.b*").unwrap();
        assert_eq!(pattern.pattern(), r"a\.b\*");
        assert!(pattern.regex().is_match("xa.b*"));
        assert!(!pattern.regex().is_match("aXbb"));
    }

    #[test]
    fn test_builder_flags() {
        init();
        let pattern = PatternBuilder::new()
            .case_insensitive(true)
            .build("select")
            .unwrap();
        assert!(pattern.regex().is_match("SeLeCt"));

        let pattern = PatternBuilder::new()
            .dot_matches_new_line(true)
            .build("a.b")
            .unwrap();
        assert!(pattern.regex().is_match("a\nb"));

        let pattern = PatternBuilder::new()
            .ignore_whitespace(true)
            .build(r"a b  # comment")
            .unwrap();
        assert!(pattern.regex().is_match("ab"));
    }

    #[test]
    fn test_from_str_and_display() {
        init();
        let pattern: Pattern = r"\d+".parse().unwrap();
        assert_eq!(pattern.to_string(), r"\\d+");
    }
}
