//! Unitas Units - unit symbol parsing and formatting
//!
//! Provides typed units and quantities for a fixed catalog of physical
//! quantities, each with its own symbol table and linear conversion to SI.
//!
//! Components:
//! - Symbol parsing: exact, whitespace-trimmed lookup; composite symbols
//!   ("m/s²", "kg*m^2") are tokenized for styles and alternative spellings
//! - Symbol styles: hat powers, superscripts, fractions
//! - Format cache: parsed, padded unit formats per quantity type
//! - Buffer pool: reusable render buffers returned on scope exit
//! - Formatter: value and unit rendering with graceful degradation
//!
//! All shared state lives in a [`UnitsContext`]; there is no global cache.
//!
//! ```ignore
//! use unitas_units::prelude::*;
//!
//! let ctx = UnitsContext::new();
//! let distance = Length::parse("3 km")?;
//! assert_eq!(distance.to_string_with(&ctx, "F1 m"), "3000.0 m");
//! ```

mod context;
mod format_cache;
mod formatter;
mod macros;
mod parse;
mod pool;
mod quantity;
mod symbol_format;
mod unit;
mod units;

pub use context::UnitsContext;
pub use format_cache::{CachedFormat, FormatCache, FormatKey, ParsedFormat, MAX_FIELD_WIDTH};
pub use formatter::{
    format_quantity, format_unit, format_unit_styled, try_format_composite, try_format_parts,
    try_format_quantity, try_format_unit,
};
pub use parse::{normalize, parse_quantity_string, parse_unit, tokenize_symbol, try_parse_unit, SymbolAndPower};
pub use pool::{BufferPool, PooledBuffer};
pub use quantity::Quantity;
pub use symbol_format::SymbolFormat;
pub use unit::{SymbolTable, Unit, UnitValue};
pub use units::*;

pub use unitas_core::{
    ConversionOverflowError, FormatErrorReason, FormatStringError, NumberLocale, ParseErrorReason,
    UnitParseError, UnitsConfig, UnitsError, ValueFormat,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::units::*;
    pub use crate::{Quantity, SymbolFormat, Unit, UnitsContext};
    pub use unitas_core::prelude::*;
}
