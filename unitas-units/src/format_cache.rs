//! Format cache - parsed, padding-resolved unit formats per quantity type
//!
//! Computing a `ParsedFormat` is pure, so two threads racing on the same key
//! compute equal values and whichever insert lands first is kept. Failed
//! computations are never stored. Both levels are sharded `DashMap`s, so a
//! miss only locks the shard it inserts into.

use std::any::TypeId;
use std::sync::Arc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use unitas_core::{FormatErrorReason, FormatStringError};
use crate::parse::tokenize_symbol;
use crate::symbol_format::SymbolFormat;
use crate::unit::Unit;

/// Widest field, in characters, a format may request with `,width`
pub const MAX_FIELD_WIDTH: u32 = 1024;

/// A unit rendering with its padding resolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedFormat {
    pub pre_padding: String,
    pub format: String,
    pub post_padding: String,
}

impl ParsedFormat {
    pub fn new(pre_padding: impl Into<String>, format: impl Into<String>, post_padding: impl Into<String>) -> Self {
        ParsedFormat {
            pre_padding: pre_padding.into(),
            format: format.into(),
            post_padding: post_padding.into(),
        }
    }

    /// Width in characters of the rendered field
    pub fn width(&self) -> usize {
        self.pre_padding.chars().count() + self.format.chars().count() + self.post_padding.chars().count()
    }

    /// Pad to `width` characters: positive right-aligns, negative left-aligns
    ///
    /// The width is clamped to [`MAX_FIELD_WIDTH`].
    pub fn pad_to(&mut self, width: i32) {
        let target = width.unsigned_abs().min(MAX_FIELD_WIDTH) as usize;
        let current = self.width();
        if target <= current {
            return;
        }
        let fill = " ".repeat(target - current);
        if width > 0 {
            self.pre_padding.insert_str(0, &fill);
        } else {
            self.post_padding.push_str(&fill);
        }
    }

    pub fn write_to(&self, out: &mut String) {
        out.push_str(&self.pre_padding);
        out.push_str(&self.format);
        out.push_str(&self.post_padding);
    }
}

/// A cache entry: the unit a format resolved to plus its parsed form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFormat {
    pub symbol: &'static str,
    pub format: ParsedFormat,
}

/// What a unit should be rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKey<'a> {
    /// A user format string such as `" km "` or `"m^2,8"`
    Text(&'a str),
    Style(SymbolFormat),
}

impl<'a> From<&'a str> for FormatKey<'a> {
    fn from(text: &'a str) -> Self {
        FormatKey::Text(text)
    }
}

impl From<SymbolFormat> for FormatKey<'_> {
    fn from(style: SymbolFormat) -> Self {
        FormatKey::Style(style)
    }
}

#[derive(Default)]
struct QuantityFormats {
    text: DashMap<String, Arc<CachedFormat>>,
    styled: DashMap<(&'static str, SymbolFormat), Arc<CachedFormat>>,
}

/// Cache of parsed formats, partitioned by quantity type
///
/// Entries live as long as the cache; the key space is bounded by the
/// formats callers actually request.
#[derive(Default)]
pub struct FormatCache {
    entries: DashMap<TypeId, Arc<QuantityFormats>>,
}

impl FormatCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or compute the format for a user format string of quantity `U`
    ///
    /// The returned entry names the unit the string resolved to, which is
    /// not necessarily the unit the caller is rendering.
    pub fn get_or_create<U: Unit>(&self, format: &str) -> Result<Arc<CachedFormat>, FormatStringError> {
        let formats = self.formats(TypeId::of::<U>());
        if let Some(cached) = formats.text.get(format) {
            return Ok(Arc::clone(cached.value()));
        }

        trace!(quantity = U::QUANTITY, format, "format cache miss");
        let computed = Arc::new(parse_text_format::<U>(format).inspect_err(|e| {
            debug!(quantity = U::QUANTITY, error = %e, "rejected format string");
        })?);

        let cached = Arc::clone(formats.text.entry(format.to_string()).or_insert(computed).value());
        Ok(cached)
    }

    /// Get or compute the rendering of `unit` in `style`
    pub fn get_or_create_styled<U: Unit>(&self, unit: U, style: SymbolFormat) -> Result<Arc<CachedFormat>, FormatStringError> {
        let formats = self.formats(TypeId::of::<U>());
        let key = (unit.symbol(), style);
        if let Some(cached) = formats.styled.get(&key) {
            return Ok(Arc::clone(cached.value()));
        }

        trace!(quantity = U::QUANTITY, symbol = unit.symbol(), %style, "format cache miss");
        let computed = Arc::new(styled_format(unit, style)?);

        let cached = Arc::clone(formats.styled.entry(key).or_insert(computed).value());
        Ok(cached)
    }

    /// The partition of one quantity type, created on first use
    fn formats(&self, type_id: TypeId) -> Arc<QuantityFormats> {
        if let Some(formats) = self.entries.get(&type_id) {
            return Arc::clone(formats.value());
        }
        Arc::clone(self.entries.entry(type_id).or_default().value())
    }

    /// Number of cached entries across all quantity types
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .map(|formats| formats.text.len() + formats.styled.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse `[ws]<unit>[ws][,width]` against the symbol table of `U`
fn parse_text_format<U: Unit>(format: &str) -> Result<CachedFormat, FormatStringError> {
    let (body, width) = split_width(format)?;
    let core = body.trim();
    if core.is_empty() {
        return Err(FormatStringError::new(format, FormatErrorReason::Empty));
    }

    let unit = U::symbol_table()
        .resolve(core)
        .ok_or_else(|| FormatStringError::new(format, FormatErrorReason::UnknownUnit))?;

    let pre_padding = &body[..body.len() - body.trim_start().len()];
    let post_padding = &body[body.trim_end().len()..];
    let mut parsed = ParsedFormat::new(pre_padding, core, post_padding);
    if let Some(width) = width {
        parsed.pad_to(width);
    }

    Ok(CachedFormat {
        symbol: unit.symbol(),
        format: parsed,
    })
}

/// Split off a trailing `,width`; symbols never contain commas
fn split_width(format: &str) -> Result<(&str, Option<i32>), FormatStringError> {
    let Some((body, width)) = format.rsplit_once(',') else {
        return Ok((format, None));
    };
    match width.trim().parse::<i32>() {
        Ok(w) if w.unsigned_abs() <= MAX_FIELD_WIDTH => Ok((body, Some(w))),
        _ => Err(FormatStringError::new(format, FormatErrorReason::InvalidWidth(width.to_string()))),
    }
}

fn styled_format<U: Unit>(unit: U, style: SymbolFormat) -> Result<CachedFormat, FormatStringError> {
    let symbol = unit.symbol();
    let mut rendered = String::with_capacity(symbol.len() + 4);
    if style == SymbolFormat::Default {
        rendered.push_str(symbol);
    } else {
        let tokens = tokenize_symbol(symbol).map_err(|_| {
            FormatStringError::new(style.to_string(), FormatErrorReason::InvalidSymbol(symbol.to_string()))
        })?;
        style.render(symbol, &tokens, &mut rendered);
    }

    Ok(CachedFormat {
        symbol,
        format: ParsedFormat::new("", rendered, ""),
    })
}
