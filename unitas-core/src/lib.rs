//! Unitas Core - Fundamental types
//!
//! This crate provides the types shared by the units engine:
//! - `UnitParseError`, `FormatStringError`, `ConversionOverflowError`: structured errors
//! - `ValueFormat`: rendering of the scalar part of a quantity
//! - `UnitsConfig` / `NumberLocale`: runtime configuration

mod config;
mod error;
mod number;

pub use config::{NumberLocale, UnitsConfig, DEFAULT_BUFFER_CAPACITY, DEFAULT_POOL_CAPACITY};
pub use error::{
    codes, ConversionOverflowError, FormatErrorReason, FormatStringError, ParseErrorReason,
    UnitParseError, UnitsError,
};
pub use number::{format_value, read_number, split_composite, DigitPattern, ValueFormat};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        FormatStringError, NumberLocale, UnitParseError, UnitsConfig, UnitsError, ValueFormat,
    };
}
