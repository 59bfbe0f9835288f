use thiserror::Error;

/// The result type for the `strscan` crate.
pub type Result<T> = std::result::Result<T, ScanError>;

/// The error type for the `strscan` crate.
#[derive(Error, Debug)]
pub struct ScanError {
    /// The source of the error.
    pub source: Box<ScanErrorKind>,
}

impl ScanError {
    /// Create a new `ScanError`.
    pub fn new(kind: ScanErrorKind) -> Self {
        ScanError {
            source: Box::new(kind),
        }
    }

    /// Returns the kind of the error.
    #[inline]
    pub fn kind(&self) -> &ScanErrorKind {
        &self.source
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum ScanErrorKind {
    /// The regex engine rejected the pattern. The second field holds the pattern text.
    #[error("'{1}' {0}")]
    RegexBuildError(regex_automata::meta::BuildError, String),

    /// A character offset outside of `0..=len` was requested.
    #[error("Position {position} is out of range 0..={len}")]
    OutOfRange {
        /// The requested position, possibly negative.
        position: isize,
        /// The length of the text in characters.
        len: usize,
    },

    /// The pattern of the registered match has no such group.
    #[error("Unknown capture group: {0}")]
    UnknownGroup(String),

    /// `unscan` was called without a registered match of a cursor advancing operation.
    #[error("Nothing to unscan: the last operation was not a successful advancing match")]
    NothingToUnscan,
}

impl From<ScanErrorKind> for ScanError {
    fn from(kind: ScanErrorKind) -> Self {
        ScanError::new(kind)
    }
}
