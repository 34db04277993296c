//! Error types for TOON encoding and decoding operations.

use thiserror::Error;

/// An encoding failure.
///
/// The encoder is total on value trees containing only finite numbers;
/// the only failure modes are non-finite numbers and, in strict mode,
/// keys that cannot be written losslessly.
#[derive(Error, Debug, Clone)]
#[error("TOON encode error: {message}")]
pub struct EncodeError {
    message: String,
}

impl EncodeError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        EncodeError {
            message: message.into(),
        }
    }

    /// The human-readable failure description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Classification of decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Backslash not followed by `n`, `r`, `t`, `"`, or `\`.
    InvalidEscape,
    /// Opening `"` with no closing `"` on the token.
    UnterminatedString,
    /// Bracket header does not match any of the three array shapes.
    InvalidArrayHeader,
    /// Declared element count differs from observed elements or fields.
    CountMismatch,
    /// Non-array content line lacks a `:` separator.
    MissingColon,
    /// Tabs in indentation, or indent not a multiple of the configured width.
    BadIndentation,
    /// Blank line between array elements or rows (strict mode).
    BlankLineInArray,
    /// Content past the declared count at array indentation.
    ExtraRows,
    /// Incompatible types while merging expanded key paths (strict mode).
    PathExpansionConflict,
    /// The same key appears twice in one object (strict mode).
    DuplicateKey,
    /// Malformed document structure not covered by a more specific kind.
    InvalidSyntax,
}

/// A decoding failure with a 1-based line number.
#[derive(Error, Debug, Clone)]
#[error("TOON parse error at line {line}: {message}")]
pub struct DecodeError {
    kind: DecodeErrorKind,
    message: String,
    line: usize,
}

impl DecodeError {
    pub(crate) fn new(kind: DecodeErrorKind, line: usize, message: impl Into<String>) -> Self {
        DecodeError {
            kind,
            message: message.into(),
            line,
        }
    }

    /// The failure classification.
    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    /// The 1-based line number the error was detected on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The human-readable failure description.
    pub fn message(&self) -> &str {
        &self.message
    }
}
