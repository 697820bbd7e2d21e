//! Structured errors for unit parsing, formatting and conversion
//!
//! Every error carries the offending input so callers can build a
//! user-facing diagnostic without re-parsing anything.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNIT_PARSE: &str = "UNIT_PARSE";
    pub const FORMAT_STRING: &str = "FORMAT_STRING";
    pub const CONVERSION_OVERFLOW: &str = "CONVERSION_OVERFLOW";
    pub const CONFIG: &str = "CONFIG";
}

/// Why a unit or quantity string could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorReason {
    #[error("input is empty")]
    Empty,

    #[error("no unit with this symbol")]
    UnknownSymbol,

    #[error("expected a number")]
    MissingNumber,

    #[error("number is out of range")]
    InvalidNumber,
}

/// No entry of the symbol table matches the (trimmed) input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("cannot parse '{text}' at position {position}: {reason}")]
pub struct UnitParseError {
    /// The full input as given by the caller
    pub text: String,
    /// Byte offset into `text` where the offending part starts
    pub position: usize,
    pub reason: ParseErrorReason,
}

impl UnitParseError {
    pub fn new(text: impl Into<String>, position: usize, reason: ParseErrorReason) -> Self {
        Self {
            text: text.into(),
            position,
            reason,
        }
    }

    /// Unknown symbol, positioned at the first non-whitespace character
    pub fn unknown_symbol(text: &str) -> Self {
        let position = text.len() - text.trim_start().len();
        let reason = if text.trim().is_empty() {
            ParseErrorReason::Empty
        } else {
            ParseErrorReason::UnknownSymbol
        };
        Self::new(text, position, reason)
    }

    /// The part of the input starting at the error position
    pub fn remainder(&self) -> &str {
        self.text.get(self.position..).unwrap_or("")
    }
}

/// Why a format string (or symbol style) could not be turned into a parsed format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum FormatErrorReason {
    #[error("format is empty")]
    Empty,

    #[error("no unit matches the symbol part")]
    UnknownUnit,

    #[error("invalid value format '{0}'")]
    InvalidValueFormat(String),

    #[error("symbol '{0}' cannot be tokenized")]
    InvalidSymbol(String),

    #[error("invalid field width '{0}'")]
    InvalidWidth(String),

    #[error("format is for unit '{found}', not '{expected}'")]
    UnitMismatch { expected: String, found: String },
}

/// A format string that is not derivable into a parsed format for the unit it
/// was used with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("invalid format string '{format}': {reason}")]
pub struct FormatStringError {
    /// The format string exactly as requested
    pub format: String,
    pub reason: FormatErrorReason,
}

impl FormatStringError {
    pub fn new(format: impl Into<String>, reason: FormatErrorReason) -> Self {
        Self {
            format: format.into(),
            reason,
        }
    }
}

/// A conversion closure turned a finite input into NaN or an infinity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("converting {value} via '{symbol}' overflowed")]
pub struct ConversionOverflowError {
    pub symbol: String,
    pub value: f64,
}

/// Any error raised by the units engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitsError {
    #[error(transparent)]
    Parse(#[from] UnitParseError),

    #[error(transparent)]
    Format(#[from] FormatStringError),

    #[error(transparent)]
    Overflow(#[from] ConversionOverflowError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl UnitsError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            UnitsError::Parse(_) => codes::UNIT_PARSE,
            UnitsError::Format(_) => codes::FORMAT_STRING,
            UnitsError::Overflow(_) => codes::CONVERSION_OVERFLOW,
            UnitsError::Config(_) => codes::CONFIG,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            UnitsError::Parse(e) => match e.reason {
                ParseErrorReason::Empty => Some("Provide a unit symbol such as \"m\" or \"km\""),
                ParseErrorReason::UnknownSymbol => Some("Check the symbol against the units of this quantity"),
                ParseErrorReason::MissingNumber => Some("Start the quantity with a number, e.g. \"1.5 km\""),
                ParseErrorReason::InvalidNumber => None,
            },
            UnitsError::Format(e) => match e.reason {
                FormatErrorReason::InvalidValueFormat(_) => Some("Use F, N, E, G, R or a digit pattern like 0.00"),
                FormatErrorReason::UnitMismatch { .. } => Some("Use a format whose unit matches the value"),
                _ => None,
            },
            UnitsError::Overflow(_) => Some("Value is out of range for this unit"),
            UnitsError::Config(_) => None,
        }
    }
}
