#![forbid(missing_docs)]
//! # `strscan`
//! The `strscan` crate provides a stateful string scanner for hand-written tokenizers and ad-hoc
//! parsers.
//! A [Scanner] owns a text and a cursor into it. The cursor is advanced by repeated pattern match
//! attempts, either anchored at the cursor or searching ahead of it. The outcome of the most recent
//! attempt, the match register, can be inspected afterwards: captured groups, named groups and the
//! text before and after the match.
//!
//! Patterns are compiled with the `regex-automata` crate, i.e. they use the syntax of the `regex`
//! crate. Positions and lengths are counted in characters, not in bytes.
//!
//! # Example
//! ```rust
//! use strscan::{Pattern, Scanner};
//!
//! let number = Pattern::new(r"\d+").expect("Pattern error");
//! let ident = Pattern::new(r"[a-zA-Z_]\w*").expect("Pattern error");
//! let assign = Pattern::new(r"\s*=\s*").expect("Pattern error");
//! let semicolon = Pattern::literal(";").expect("Pattern error");
//! let date = Pattern::new(r"(?<day>\w+) (?<month>\w+) (?<year>\d+)").expect("Pattern error");
//!
//! let mut scanner = Scanner::new("a = 10; Fri Dec 12 1975");
//! assert_eq!(scanner.scan(&ident), Some("a"));
//! assert_eq!(scanner.skip(&assign), Some(3));
//! // Look at the next token before consuming it.
//! assert_eq!(scanner.check(&number), Some("10"));
//! assert_eq!(scanner.scan(&number), Some("10"));
//! assert!(scanner.scan(&semicolon).is_some());
//!
//! // Search ahead and inspect the match register.
//! assert_eq!(scanner.scan_until(&date), Some(" Fri Dec 12"));
//! assert_eq!(scanner.named_group("month").unwrap(), Some(Some("Dec")));
//! assert_eq!(scanner.group_at(-1).unwrap(), Some(Some("12")));
//! assert_eq!(scanner.post_match(), Some(" 1975"));
//!
//! // A failed attempt clears the register and leaves the cursor alone.
//! assert_eq!(scanner.scan(&ident), None);
//! assert_eq!(scanner.post_match(), None);
//! assert_eq!(scanner.remainder(), " 1975");
//! ```
//!
//! # Crate features
//! - `serde`: Enabled by default. Derives `Serialize` and `Deserialize` for [Span] and [Position].

/// Module with error definitions
mod errors;
pub use errors::{Result, ScanError, ScanErrorKind};

/// The module with internal implementation details.
mod internal;

/// Module that provides a view of the match register
mod match_result;
pub use match_result::MatchResult;

/// Module that provides a Pattern type and a PatternBuilder type
mod pattern;
pub use pattern::{Pattern, PatternBuilder};

/// Module that provides a position type
mod position;
pub use position::{Position, PositionProvider};

/// The module with the scanner.
mod scanner;
pub use scanner::Scanner;

/// Module that provides a Span type
mod span;
pub use span::Span;
