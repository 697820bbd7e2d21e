//! Quantity type - a scalar tagged with a unit of one physical quantity

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use tracing::debug;
use unitas_core::{
    format_value, ConversionOverflowError, FormatStringError, NumberLocale, UnitParseError, ValueFormat,
};
use crate::context::UnitsContext;
use crate::format_cache::FormatKey;
use crate::formatter::{format_quantity, try_format_composite, try_format_parts};
use crate::parse::parse_quantity_string;
use crate::symbol_format::SymbolFormat;
use crate::unit::Unit;

/// A physical quantity: a value stored in the SI unit plus the unit it is displayed in
///
/// Equality and ordering compare the SI value only, so `1 km == 1000 m`.
#[derive(Clone, Copy)]
pub struct Quantity<U: Unit> {
    si_value: f64,
    unit: U,
}

impl<U: Unit> Quantity<U> {
    /// Create a quantity of `value` expressed in `unit`
    pub fn new(value: f64, unit: U) -> Self {
        Quantity {
            si_value: unit.to_si_unit(value),
            unit,
        }
    }

    /// Create a quantity from a value in the SI unit
    pub fn from_si(si_value: f64) -> Self {
        Quantity {
            si_value,
            unit: U::si_unit(),
        }
    }

    /// Like [`Quantity::new`], but fails when the conversion overflows
    pub fn try_new(value: f64, unit: U) -> Result<Self, ConversionOverflowError> {
        Ok(Quantity {
            si_value: unit.checked_to_si_unit(value)?,
            unit,
        })
    }

    pub fn si_value(&self) -> f64 {
        self.si_value
    }

    pub fn si_unit(&self) -> U {
        U::si_unit()
    }

    /// The display unit
    pub fn unit(&self) -> U {
        self.unit
    }

    /// The value expressed in the display unit
    pub fn value(&self) -> f64 {
        self.unit.from_si_unit(self.si_value)
    }

    pub fn value_in(&self, unit: U) -> f64 {
        unit.from_si_unit(self.si_value)
    }

    /// The same quantity displayed in `unit`
    pub fn convert(&self, unit: U) -> Self {
        Quantity {
            si_value: self.si_value,
            unit,
        }
    }

    /// Parse text like "12.5 km" or "12.5km" with the invariant locale
    pub fn parse(text: &str) -> Result<Self, UnitParseError> {
        Self::parse_with(text, &NumberLocale::invariant())
    }

    pub fn parse_with(text: &str, locale: &NumberLocale) -> Result<Self, UnitParseError> {
        let (value, unit) = parse_quantity_string::<U>(text, locale)?;
        Ok(Quantity::new(value, unit))
    }

    pub fn try_parse(text: &str) -> Option<Self> {
        Self::parse(text).ok()
    }

    /// Format with a composite format such as `"F1 km"` or `"0.00 m²,10"`
    ///
    /// The unit named in the format is the one rendered. A format that cannot
    /// be applied is returned unchanged.
    pub fn to_string_with(&self, ctx: &UnitsContext, format: &str) -> String {
        self.try_to_string_with(ctx, format).unwrap_or_else(|e| {
            debug!(quantity = U::QUANTITY, error = %e, "returning raw quantity format");
            format.to_string()
        })
    }

    pub fn try_to_string_with(&self, ctx: &UnitsContext, format: &str) -> Result<String, FormatStringError> {
        try_format_composite::<U>(ctx, self.si_value, format).map(|(_, text)| text)
    }

    /// Format with separate value and symbol formats, e.g. `(Some("F2"), " mm,8")`
    ///
    /// A symbol format that cannot be applied is returned unchanged.
    pub fn to_string_parts(&self, ctx: &UnitsContext, value_format: Option<&str>, symbol_format: &str) -> String {
        try_format_parts::<U>(ctx, self.si_value, value_format, symbol_format)
            .map(|(_, text)| text)
            .unwrap_or_else(|e| {
                debug!(quantity = U::QUANTITY, error = %e, "returning raw quantity format");
                symbol_format.to_string()
            })
    }

    /// Format in the display unit with its symbol rendered in `style`
    pub fn to_string_styled(&self, ctx: &UnitsContext, value_format: Option<&str>, style: SymbolFormat) -> String {
        format_quantity(ctx, self.value(), self.unit, value_format, FormatKey::Style(style))
    }
}

impl<U: Unit> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = String::new();
        format_value(self.value(), &ValueFormat::default(), &NumberLocale::invariant(), &mut value);
        write!(f, "{} {}", value, self.unit.symbol())
    }
}

impl<U: Unit> fmt::Debug for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quantity")
            .field("value", &self.value())
            .field("unit", &self.unit.symbol())
            .finish()
    }
}

impl<U: Unit> PartialEq for Quantity<U> {
    fn eq(&self, other: &Self) -> bool {
        self.si_value == other.si_value
    }
}

impl<U: Unit> PartialOrd for Quantity<U> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.si_value.partial_cmp(&other.si_value)
    }
}

impl<U: Unit> Add for Quantity<U> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Quantity {
            si_value: self.si_value + rhs.si_value,
            unit: self.unit,
        }
    }
}

impl<U: Unit> Sub for Quantity<U> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Quantity {
            si_value: self.si_value - rhs.si_value,
            unit: self.unit,
        }
    }
}

impl<U: Unit> Neg for Quantity<U> {
    type Output = Self;

    fn neg(self) -> Self {
        Quantity {
            si_value: -self.si_value,
            unit: self.unit,
        }
    }
}

impl<U: Unit> Mul<f64> for Quantity<U> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Quantity {
            si_value: self.si_value * rhs,
            unit: self.unit,
        }
    }
}

impl<U: Unit> Div<f64> for Quantity<U> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Quantity {
            si_value: self.si_value / rhs,
            unit: self.unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitas_core::{FormatErrorReason, ParseErrorReason};
    use crate::units::{Length, LengthUnit, Time, TimeUnit, Volume, VolumeUnit};

    #[test]
    fn test_new_and_values() {
        let q = Length::new(3.0, LengthUnit::KILOMETRES);
        assert_eq!(q.si_value(), 3000.0);
        assert_eq!(q.value(), 3.0);
        assert_eq!(q.unit(), LengthUnit::KILOMETRES);
        assert_eq!(q.si_unit(), LengthUnit::METRES);
        assert_eq!(q.value_in(LengthUnit::METRES), 3000.0);

        let q = Time::from_si(90.0);
        assert_eq!(q.unit(), TimeUnit::SECONDS);
        assert!((q.value_in(TimeUnit::MINUTES) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_try_new_overflow() {
        assert!(Length::try_new(1.0, LengthUnit::KILOMETRES).is_ok());
        let err = Length::try_new(f64::MAX, LengthUnit::MILES).unwrap_err();
        assert_eq!(err.symbol, "mi");
    }

    #[test]
    fn test_convert_keeps_si_value() {
        let q = Length::new(1.0, LengthUnit::KILOMETRES).convert(LengthUnit::METRES);
        assert_eq!(q.unit(), LengthUnit::METRES);
        assert_eq!(q.value(), 1000.0);
        assert_eq!(q, Length::new(1.0, LengthUnit::KILOMETRES));
    }

    #[test]
    fn test_arithmetic() {
        let a = Length::new(1.0, LengthUnit::KILOMETRES);
        let b = Length::new(500.0, LengthUnit::METRES);

        let sum = a + b;
        assert_eq!(sum.unit(), LengthUnit::KILOMETRES);
        assert_eq!(sum.value(), 1.5);
        assert_eq!((a - b).si_value(), 500.0);
        assert_eq!((-a).si_value(), -1000.0);
        assert_eq!((a * 2.0).value(), 2.0);
        assert_eq!((a / 4.0).si_value(), 250.0);
        assert!(b < a);
    }

    #[test]
    fn test_parse() {
        let q = Length::parse("12.5 km").unwrap();
        assert_eq!(q.unit(), LengthUnit::KILOMETRES);
        assert_eq!(q.value(), 12.5);

        let q = Length::parse(" 3mm ").unwrap();
        assert_eq!(q.unit(), LengthUnit::MILLIMETRES);

        let q = Time::parse("-2E3 µs").unwrap();
        assert!((q.si_value() + 0.002).abs() < 1e-15);
    }

    #[test]
    fn test_parse_with_locale() {
        let q = Volume::parse_with("1,5 L", &NumberLocale::new(',', '.')).unwrap();
        assert_eq!(q.unit(), VolumeUnit::LITRES);
        assert!((q.value() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_parse_errors() {
        let err = Length::parse("12 parsec").unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::UnknownSymbol);
        assert_eq!(err.position, 3);
        assert_eq!(err.remainder(), "parsec");

        let err = Length::parse("km").unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::MissingNumber);

        let err = Length::parse("12").unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::Empty);
        assert_eq!(err.position, 2);

        assert!(Time::try_parse("bogus").is_none());
        assert!(Time::try_parse("1 s").is_some());
    }

    #[test]
    fn test_to_string_with_selects_unit() {
        let ctx = UnitsContext::new();
        let q = Length::new(3.0, LengthUnit::KILOMETRES);
        assert_eq!(q.to_string_with(&ctx, "F1 km"), "3.0 km");
        assert_eq!(q.to_string_with(&ctx, "F0 m"), "3000 m");
        assert_eq!(q.to_string_with(&ctx, "km"), "3 km");
        assert_eq!(q.to_string_with(&ctx, "F1 km,6"), "3.0    km");
    }

    #[test]
    fn test_to_string_with_degrades() {
        let ctx = UnitsContext::new();
        let q = Length::new(3.0, LengthUnit::KILOMETRES);
        assert_eq!(q.to_string_with(&ctx, "F1 s"), "F1 s");

        let err = q.try_to_string_with(&ctx, "F1 s").unwrap_err();
        assert_eq!(err.format, "F1 s");
        assert_eq!(err.reason, FormatErrorReason::UnknownUnit);

        assert_eq!(q.to_string_with(&ctx, "F1 km,-100000000"), "F1 km,-100000000");
        let err = q.try_to_string_with(&ctx, "F1 km,-100000000").unwrap_err();
        assert_eq!(err.reason, FormatErrorReason::InvalidWidth("-100000000".into()));
        assert!(ctx.cache().is_empty());
    }

    #[test]
    fn test_to_string_parts() {
        let ctx = UnitsContext::new();
        let q = Time::new(1.5, TimeUnit::HOURS);
        assert_eq!(q.to_string_parts(&ctx, Some("F0"), " min"), "90 min");
        assert_eq!(q.to_string_parts(&ctx, None, "h"), "1.5 h");
        assert_eq!(q.to_string_parts(&ctx, Some("F0"), " fortnights"), " fortnights");
    }

    #[test]
    fn test_to_string_styled() {
        let ctx = UnitsContext::new();
        let q = Volume::new(2.0, VolumeUnit::CUBIC_CENTIMETRES);
        assert_eq!(q.to_string_styled(&ctx, Some("F1"), SymbolFormat::SignedHatPowers), "2.0 cm^3");
        assert_eq!(q.to_string_styled(&ctx, Some("F0"), SymbolFormat::Default), "2 cm³");
    }

    #[test]
    fn test_display() {
        assert_eq!(Length::new(12.5, LengthUnit::KILOMETRES).to_string(), "12.5 km");
        assert_eq!(Time::new(250.0, TimeUnit::MILLISECONDS).to_string(), "250 ms");
    }
}
