/// ROM Errors - failures while parsing a ROM listing

use std::fmt;

/// Errors that can occur when parsing a ROM listing. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RomError {
    /// Glyph line without a `:` between key and stroke words.
    MissingSeparator { line: usize },
    /// Nothing before the `:`.
    EmptyKey { line: usize },
    /// Key already defined on an earlier line.
    DuplicateKey { line: usize, key: String },
    /// Token that is not an 8-bit decimal, `0x` or `0b` number.
    InvalidValue { line: usize, token: String },
    /// Glyph length differs from the first glyph in the listing.
    LengthMismatch {
        line: usize,
        key: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RomError::MissingSeparator { line } => {
                write!(f, "line {}: expected `key: words`", line)
            }
            RomError::EmptyKey { line } => write!(f, "line {}: empty glyph key", line),
            RomError::DuplicateKey { line, key } => {
                write!(f, "line {}: glyph {:?} already defined", line, key)
            }
            RomError::InvalidValue { line, token } => {
                write!(f, "line {}: invalid stroke word {:?}", line, token)
            }
            RomError::LengthMismatch { line, key, expected, found } => write!(
                f,
                "line {}: glyph {:?} has {} strokes, expected {}",
                line, key, found, expected
            ),
        }
    }
}

impl std::error::Error for RomError {}
