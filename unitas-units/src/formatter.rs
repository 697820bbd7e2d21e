//! Quantity formatter - scalar rendering plus cached unit rendering
//!
//! Layout is `{value}{pre}{unit}{post}`; when the unit format carries no
//! leading padding a single space separates value and unit.

use tracing::debug;
use unitas_core::{format_value, split_composite, FormatErrorReason, FormatStringError, ValueFormat};
use crate::context::UnitsContext;
use crate::format_cache::{CachedFormat, FormatKey, ParsedFormat};
use crate::symbol_format::SymbolFormat;
use crate::unit::Unit;

/// Render `unit` from a user format string such as `" km "` or `"km,6"`
///
/// A format that does not resolve to `unit` (unknown, malformed, or cached
/// for another unit) is returned unchanged.
pub fn format_unit<U: Unit>(ctx: &UnitsContext, unit: U, format: &str) -> String {
    try_format_unit(ctx, unit, format).unwrap_or_else(|e| {
        debug!(quantity = U::QUANTITY, error = %e, "returning raw unit format");
        format.to_string()
    })
}

pub fn try_format_unit<U: Unit>(ctx: &UnitsContext, unit: U, format: &str) -> Result<String, FormatStringError> {
    let cached = ctx.cache().get_or_create::<U>(format)?;
    ensure_unit(unit, &cached, format)?;
    Ok(render(ctx, |out| cached.format.write_to(out)))
}

/// Render `unit` in a symbol style; falls back to the plain symbol
pub fn format_unit_styled<U: Unit>(ctx: &UnitsContext, unit: U, style: SymbolFormat) -> String {
    match ctx.cache().get_or_create_styled(unit, style) {
        Ok(cached) => render(ctx, |out| cached.format.write_to(out)),
        Err(e) => {
            debug!(quantity = U::QUANTITY, error = %e, "returning plain symbol");
            unit.symbol().to_string()
        }
    }
}

/// Render `value` (expressed in `unit`) followed by the unit
///
/// On failure only the symbol format text is returned (the plain symbol for
/// a style); the value format is dropped since it is not unit text.
pub fn format_quantity<U: Unit>(
    ctx: &UnitsContext,
    value: f64,
    unit: U,
    value_format: Option<&str>,
    symbol_format: FormatKey<'_>,
) -> String {
    try_format_quantity(ctx, value, unit, value_format, symbol_format).unwrap_or_else(|e| {
        debug!(quantity = U::QUANTITY, error = %e, "returning raw quantity format");
        match symbol_format {
            FormatKey::Text(text) => text.to_string(),
            FormatKey::Style(_) => unit.symbol().to_string(),
        }
    })
}

pub fn try_format_quantity<U: Unit>(
    ctx: &UnitsContext,
    value: f64,
    unit: U,
    value_format: Option<&str>,
    symbol_format: FormatKey<'_>,
) -> Result<String, FormatStringError> {
    let value_format = match value_format {
        Some(spec) => ValueFormat::parse(spec)?,
        None => ValueFormat::default(),
    };
    let cached = match symbol_format {
        FormatKey::Text(text) => {
            let cached = ctx.cache().get_or_create::<U>(text)?;
            ensure_unit(unit, &cached, text)?;
            cached
        }
        FormatKey::Style(style) => ctx.cache().get_or_create_styled(unit, style)?,
    };
    Ok(render_quantity(ctx, value, &value_format, &cached.format))
}

/// Render an SI scalar using a composite format such as `"F1 km"`
///
/// The unit named in the format selects the display unit. Returns the
/// display unit along with the text.
pub fn try_format_composite<U: Unit>(ctx: &UnitsContext, si_value: f64, format: &str) -> Result<(U, String), FormatStringError> {
    let (value_part, symbol_part) = split_composite(format);
    try_format_parts(ctx, si_value, Some(value_part), symbol_part).map_err(|e| FormatStringError::new(format, e.reason))
}

/// Like [`try_format_composite`] with the value and symbol formats given separately
pub fn try_format_parts<U: Unit>(
    ctx: &UnitsContext,
    si_value: f64,
    value_format: Option<&str>,
    symbol_format: &str,
) -> Result<(U, String), FormatStringError> {
    let value_format = ValueFormat::parse(value_format.unwrap_or(""))?;
    let cached = ctx.cache().get_or_create::<U>(symbol_format)?;
    let unit = U::symbol_table()
        .get(cached.symbol)
        .ok_or_else(|| FormatStringError::new(symbol_format, FormatErrorReason::UnknownUnit))?;

    let text = render_quantity(ctx, unit.from_si_unit(si_value), &value_format, &cached.format);
    Ok((unit, text))
}

fn render_quantity(ctx: &UnitsContext, value: f64, value_format: &ValueFormat, unit_format: &ParsedFormat) -> String {
    render(ctx, |out| {
        format_value(value, value_format, ctx.locale(), out);
        if unit_format.pre_padding.is_empty() {
            out.push(' ');
        }
        unit_format.write_to(out);
    })
}

/// Fill a pooled buffer and copy the result out
fn render(ctx: &UnitsContext, fill: impl FnOnce(&mut String)) -> String {
    let mut buffer = ctx.pool().borrow();
    fill(&mut *buffer);
    buffer.to_owned_string()
}

fn ensure_unit<U: Unit>(unit: U, cached: &CachedFormat, format: &str) -> Result<(), FormatStringError> {
    if cached.symbol == unit.symbol() {
        return Ok(());
    }
    Err(FormatStringError::new(
        format,
        FormatErrorReason::UnitMismatch {
            expected: unit.symbol().to_string(),
            found: cached.symbol.to_string(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitas_core::NumberLocale;
    use crate::units::{AreaUnit, LengthUnit, SpeedUnit, TimeUnit};

    #[test]
    fn test_format_unit() {
        let ctx = UnitsContext::new();
        assert_eq!(format_unit(&ctx, LengthUnit::KILOMETRES, "km"), "km");
        assert_eq!(format_unit(&ctx, LengthUnit::KILOMETRES, " km  "), " km  ");
        assert_eq!(format_unit(&ctx, LengthUnit::KILOMETRES, "km,5"), "   km");
        assert_eq!(format_unit(&ctx, AreaUnit::SQUARE_METRES, "m^2"), "m^2");
    }

    #[test]
    fn test_mismatched_format_is_returned_raw() {
        let ctx = UnitsContext::new();
        // cache the format for kilometres first
        assert_eq!(format_unit(&ctx, LengthUnit::KILOMETRES, " km,6"), "    km");
        assert_eq!(format_unit(&ctx, LengthUnit::METRES, " km,6"), " km,6");

        let err = try_format_unit(&ctx, LengthUnit::METRES, " km,6").unwrap_err();
        assert_eq!(
            err.reason,
            FormatErrorReason::UnitMismatch { expected: "m".into(), found: "km".into() }
        );
    }

    #[test]
    fn test_unknown_format_is_returned_raw() {
        let ctx = UnitsContext::new();
        assert_eq!(format_unit(&ctx, TimeUnit::SECONDS, "{unit}"), "{unit}");
        assert!(ctx.cache().is_empty());
    }

    #[test]
    fn test_format_unit_styled() {
        let ctx = UnitsContext::new();
        assert_eq!(format_unit_styled(&ctx, LengthUnit::METRES, SymbolFormat::SignedSuperScript), "m");
        assert_eq!(format_unit_styled(&ctx, SpeedUnit::KILOMETRES_PER_HOUR, SymbolFormat::SignedHatPowers), "km*h^-1");
        assert_eq!(format_unit_styled(&ctx, SpeedUnit::KILOMETRES_PER_HOUR, SymbolFormat::Default), "km/h");
    }

    #[test]
    fn test_format_quantity() {
        let ctx = UnitsContext::new();
        let text = format_quantity(&ctx, 3.0, LengthUnit::KILOMETRES, Some("F1"), FormatKey::Text(" km"));
        assert_eq!(text, "3.0 km");

        let text = format_quantity(&ctx, 3.0, LengthUnit::KILOMETRES, Some("F1"), FormatKey::Text("km"));
        assert_eq!(text, "3.0 km");

        let text = format_quantity(&ctx, 2.5, SpeedUnit::METRES_PER_SECOND, None, SymbolFormat::SignedSuperScript.into());
        assert_eq!(text, "2.5 m⋅s⁻¹");
    }

    #[test]
    fn test_format_quantity_degrades() {
        let ctx = UnitsContext::new();
        let text = format_quantity(&ctx, 3.0, LengthUnit::METRES, Some("F1"), FormatKey::Text(" km"));
        assert_eq!(text, " km");

        let text = format_quantity(&ctx, 3.0, LengthUnit::METRES, Some("Q"), SymbolFormat::Default.into());
        assert_eq!(text, "m");

        let text = format_quantity(&ctx, 3.0, LengthUnit::KILOMETRES, Some("F1"), FormatKey::Text("km,100000000"));
        assert_eq!(text, "km,100000000");

        let err = try_format_quantity(&ctx, 3.0, LengthUnit::METRES, Some("Q"), "m".into()).unwrap_err();
        assert_eq!(err.format, "Q");
    }

    #[test]
    fn test_format_composite_selects_unit() {
        let ctx = UnitsContext::new();
        let (unit, text) = try_format_composite::<LengthUnit>(&ctx, 3000.0, "F1 km").unwrap();
        assert_eq!(unit, LengthUnit::KILOMETRES);
        assert_eq!(text, "3.0 km");

        let (_, text) = try_format_composite::<LengthUnit>(&ctx, 1.5, "mm").unwrap();
        assert_eq!(text, "1500 mm");

        let err = try_format_composite::<LengthUnit>(&ctx, 1.0, "F1 lightyears").unwrap_err();
        assert_eq!(err.format, "F1 lightyears");
        assert_eq!(err.reason, FormatErrorReason::UnknownUnit);
    }

    #[test]
    fn test_format_parts() {
        let ctx = UnitsContext::new();
        let (unit, text) = try_format_parts::<TimeUnit>(&ctx, 90.0, Some("F1"), " min").unwrap();
        assert_eq!(unit, TimeUnit::MINUTES);
        assert_eq!(text, "1.5 min");

        let (_, text) = try_format_parts::<TimeUnit>(&ctx, 90.0, None, "s,5").unwrap();
        assert_eq!(text, "90    s");

        let err = try_format_parts::<TimeUnit>(&ctx, 90.0, Some("F1"), "days").unwrap_err();
        assert_eq!(err.format, "days");
    }

    #[test]
    fn test_padding_width_invariant() {
        let ctx = UnitsContext::new();
        for width in [4, 8, 12, 16] {
            let format = format!("F2 m,{}", width);
            let (_, text) = try_format_composite::<LengthUnit>(&ctx, 1.0, &format).unwrap();
            assert!(text.chars().count() >= width, "{:?}", text);
        }
    }

    #[test]
    fn test_aligned_columns() {
        let ctx = UnitsContext::new();
        let rows: Vec<String> = [1.0, 22.5, 333.25]
            .iter()
            .map(|&v| format_quantity(&ctx, v, LengthUnit::MILLIMETRES, Some("F2"), FormatKey::Text(" mm,-5")))
            .collect();
        assert_eq!(rows[0], "1.00 mm  ");
        assert_eq!(rows[2], "333.25 mm  ");
        assert_eq!(ctx.cache().len(), 1);
    }

    #[test]
    fn test_locale() {
        let ctx = UnitsContext::new().with_locale(NumberLocale::new(',', '.'));
        let text = format_quantity(&ctx, 1234.5, LengthUnit::METRES, Some("N1"), FormatKey::Text(" m"));
        assert_eq!(text, "1.234,5 m");
    }

    #[test]
    fn test_buffers_are_returned() {
        let ctx = UnitsContext::new();
        format_unit(&ctx, LengthUnit::METRES, "m");
        format_quantity(&ctx, 1.0, LengthUnit::METRES, None, "bogus".into());
        assert_eq!(ctx.pool().idle_count(), 1);
    }
}
