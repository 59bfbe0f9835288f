/// Module that provides the cursor type with its byte and character offsets.
mod cursor;
pub(crate) use cursor::Cursor;

/// Module that records line starts for line and column reporting.
mod line_index;
pub(crate) use line_index::LineIndex;

/// Module that provides the match register.
mod match_register;
pub(crate) use match_register::MatchRegister;
