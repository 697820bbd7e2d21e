//! Unit string parsing - symbol lookup and composite symbol tokenizing
//!
//! Unit lookup is an exact match of the trimmed text against the symbol
//! table of one quantity; prefixed units like "mm" are separate entries,
//! never decomposed. The tokenizer splits composite symbols such as
//! "kg⋅m²/s²" into (symbol, power) pairs for rendering styles and for
//! recognizing alternative spellings in format strings.

use unitas_core::{read_number, NumberLocale, ParseErrorReason, UnitParseError};
use crate::unit::Unit;

/// One factor of a composite symbol, e.g. `s` with power `-2` in `m/s²`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolAndPower<'a> {
    pub symbol: &'a str,
    pub power: i32,
}

/// Parse a unit symbol for the quantity `U`
///
/// Leading and trailing whitespace is ignored; anything else must match a
/// registered symbol exactly.
pub fn parse_unit<U: Unit>(text: &str) -> Result<U, UnitParseError> {
    try_parse_unit(text).ok_or_else(|| UnitParseError::unknown_symbol(text))
}

/// Like [`parse_unit`] but reports failure as `None`
pub fn try_parse_unit<U: Unit>(text: &str) -> Option<U> {
    U::symbol_table().get(text.trim())
}

/// Parse a quantity string like "5 m" or "12.5km" into its scalar and unit
pub fn parse_quantity_string<U: Unit>(text: &str, locale: &NumberLocale) -> Result<(f64, U), UnitParseError> {
    let start = text.len() - text.trim_start().len();
    let body = &text[start..];

    if body.trim().is_empty() {
        return Err(UnitParseError::new(text, start, ParseErrorReason::Empty));
    }

    let (value, len) = read_number(body, locale)
        .ok_or_else(|| UnitParseError::new(text, start, ParseErrorReason::MissingNumber))?;
    if !value.is_finite() {
        return Err(UnitParseError::new(text, start, ParseErrorReason::InvalidNumber));
    }

    let unit_text = &body[len..];
    let unit_start = start + len + (unit_text.len() - unit_text.trim_start().len());
    let symbol = unit_text.trim();

    match U::symbol_table().get(symbol) {
        Some(unit) => Ok((value, unit)),
        None if symbol.is_empty() => Err(UnitParseError::new(text, unit_start, ParseErrorReason::Empty)),
        None => Err(UnitParseError::new(text, unit_start, ParseErrorReason::UnknownSymbol)),
    }
}

/// Split a composite symbol into factors
///
/// Supported forms:
/// - Simple: "m", "kat"
/// - Powers: "m^2", "s^-1", "m²", "s⁻¹"
/// - Products: "kg*m", "N⋅m", "N·m"
/// - Quotients: "m/s", "kg/m^3", "1/s" (a single `/`; every factor after it
///   is in the denominator)
pub fn tokenize_symbol(text: &str) -> Result<Vec<SymbolAndPower<'_>>, UnitParseError> {
    let mut reader = Reader { text, pos: 0 };
    let mut tokens = Vec::new();
    let mut sign = 1;
    let mut divided = false;

    reader.skip_whitespace();
    if reader.at_end() {
        return Err(UnitParseError::new(text, reader.pos, ParseErrorReason::Empty));
    }

    // Pure reciprocal: "1/s"
    if reader.peek() == Some('1') {
        let one = reader.pos;
        reader.bump();
        reader.skip_whitespace();
        if reader.peek() != Some('/') {
            return Err(reader.error_at(one));
        }
        reader.bump();
        sign = -1;
        divided = true;
    }

    loop {
        reader.skip_whitespace();
        let symbol = reader.read_identifier()?;
        let power = reader.read_power()?;
        tokens.push(SymbolAndPower { symbol, power: sign * power });

        reader.skip_whitespace();
        match reader.peek() {
            None => break,
            Some('⋅' | '·' | '*') => reader.bump(),
            Some('/') if !divided => {
                reader.bump();
                sign = -1;
                divided = true;
            }
            Some(_) => return Err(reader.error_at(reader.pos)),
        }
    }

    Ok(tokens)
}

/// Merge repeated factors, drop zero powers and sort by symbol
///
/// Two spellings denote the same unit when their normalized tokens are equal.
/// Returns `None` when merged powers overflow `i32`.
pub fn normalize(tokens: &[SymbolAndPower<'_>]) -> Option<Vec<(String, i32)>> {
    let mut merged: Vec<(String, i32)> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match merged.iter_mut().find(|(symbol, _)| symbol == token.symbol) {
            Some((_, power)) => *power = power.checked_add(token.power)?,
            None => merged.push((token.symbol.to_string(), token.power)),
        }
    }
    merged.retain(|(_, power)| *power != 0);
    merged.sort();
    Some(merged)
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '°' | '%' | '‰' | '′' | '″')
}

fn superscript_digit(c: char) -> Option<u32> {
    match c {
        '⁰' => Some(0),
        '¹' => Some(1),
        '²' => Some(2),
        '³' => Some(3),
        '⁴' => Some(4),
        '⁵' => Some(5),
        '⁶' => Some(6),
        '⁷' => Some(7),
        '⁸' => Some(8),
        '⁹' => Some(9),
        _ => None,
    }
}

struct Reader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn error_at(&self, position: usize) -> UnitParseError {
        let reason = if position >= self.text.len() {
            ParseErrorReason::Empty
        } else {
            ParseErrorReason::UnknownSymbol
        };
        UnitParseError::new(self.text, position, reason)
    }

    fn read_identifier(&mut self) -> Result<&'a str, UnitParseError> {
        let start = self.pos;
        while self.peek().is_some_and(is_symbol_char) {
            self.bump();
        }
        if self.pos == start {
            return Err(self.error_at(start));
        }
        Ok(&self.text[start..self.pos])
    }

    /// `^2`, `^-1`, `²`, `⁻¹`, or nothing (power 1)
    fn read_power(&mut self) -> Result<i32, UnitParseError> {
        let start = self.pos;
        let (negative, digits) = match self.peek() {
            Some('^') => {
                self.bump();
                let negative = match self.peek() {
                    Some('-' | '−') => {
                        self.bump();
                        true
                    }
                    Some('+') => {
                        self.bump();
                        false
                    }
                    _ => false,
                };
                (negative, self.read_digits(|c| c.to_digit(10)))
            }
            Some('⁻') => {
                self.bump();
                (true, self.read_digits(superscript_digit))
            }
            Some('⁺') => {
                self.bump();
                (false, self.read_digits(superscript_digit))
            }
            Some(c) if superscript_digit(c).is_some() => (false, self.read_digits(superscript_digit)),
            _ => return Ok(1),
        };

        match digits {
            Some(power) if power != 0 => Ok(if negative { -power } else { power }),
            _ => Err(self.error_at(start)),
        }
    }

    fn read_digits(&mut self, digit: impl Fn(char) -> Option<u32>) -> Option<i32> {
        let mut value: Option<i32> = None;
        while let Some(d) = self.peek().and_then(&digit) {
            self.bump();
            value = Some(value.unwrap_or(0).checked_mul(10)?.checked_add(d as i32)?);
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{LengthUnit, SpeedUnit, TimeUnit};

    fn tokens(text: &str) -> Vec<(&str, i32)> {
        tokenize_symbol(text)
            .unwrap()
            .into_iter()
            .map(|t| (t.symbol, t.power))
            .collect()
    }

    #[test]
    fn test_parse_simple_unit() {
        let unit: LengthUnit = parse_unit("km").unwrap();
        assert_eq!(unit, LengthUnit::KILOMETRES);
        assert_eq!(unit.to_si_unit(2.0), 2000.0);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_unit::<LengthUnit>("  mm\t").unwrap(), LengthUnit::MILLIMETRES);
        assert_eq!(parse_unit::<TimeUnit>(" µs ").unwrap(), TimeUnit::MICROSECONDS);
    }

    #[test]
    fn test_internal_whitespace_is_significant() {
        assert!(try_parse_unit::<SpeedUnit>("m / s").is_none());
        assert!(try_parse_unit::<SpeedUnit>("m/s").is_some());
    }

    #[test]
    fn test_no_prefix_decomposition() {
        // "Mm" is not registered even though "M" and "m" are meaningful
        assert!(try_parse_unit::<LengthUnit>("Mm").is_none());
    }

    #[test]
    fn test_try_parse_failure() {
        assert_eq!(try_parse_unit::<TimeUnit>("bogus"), None);
        assert_eq!(try_parse_unit::<TimeUnit>(""), None);
    }

    #[test]
    fn test_parse_error_context() {
        let err = parse_unit::<TimeUnit>("  bogus").unwrap_err();
        assert_eq!(err.text, "  bogus");
        assert_eq!(err.position, 2);
        assert_eq!(err.reason, ParseErrorReason::UnknownSymbol);
    }

    #[test]
    fn test_symbols_collide_across_quantities() {
        // "m" is metres here; minutes are "min"
        assert!(try_parse_unit::<LengthUnit>("m").is_some());
        assert!(try_parse_unit::<TimeUnit>("m").is_none());
    }

    #[test]
    fn test_parse_quantity_string() {
        let invariant = NumberLocale::invariant();
        let (value, unit) = parse_quantity_string::<LengthUnit>("5 m", &invariant).unwrap();
        assert_eq!(value, 5.0);
        assert_eq!(unit, LengthUnit::METRES);

        let (value, unit) = parse_quantity_string::<LengthUnit>(" -3.5km ", &invariant).unwrap();
        assert_eq!(value, -3.5);
        assert_eq!(unit, LengthUnit::KILOMETRES);
    }

    #[test]
    fn test_parse_quantity_string_errors() {
        let invariant = NumberLocale::invariant();

        let err = parse_quantity_string::<LengthUnit>("km", &invariant).unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::MissingNumber);
        assert_eq!(err.position, 0);

        let err = parse_quantity_string::<LengthUnit>("12 parsec", &invariant).unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::UnknownSymbol);
        assert_eq!(err.remainder(), "parsec");

        let err = parse_quantity_string::<LengthUnit>("12 ", &invariant).unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::Empty);

        let err = parse_quantity_string::<LengthUnit>("1e999 m", &invariant).unwrap_err();
        assert_eq!(err.reason, ParseErrorReason::InvalidNumber);
    }

    #[test]
    fn test_tokenize_simple() {
        assert_eq!(tokens("m"), vec![("m", 1)]);
        assert_eq!(tokens(" kat "), vec![("kat", 1)]);
        assert_eq!(tokens("µs"), vec![("µs", 1)]);
    }

    #[test]
    fn test_tokenize_powers() {
        assert_eq!(tokens("m^2"), vec![("m", 2)]);
        assert_eq!(tokens("m²"), vec![("m", 2)]);
        assert_eq!(tokens("s^-1"), vec![("s", -1)]);
        assert_eq!(tokens("s⁻¹"), vec![("s", -1)]);
        assert_eq!(tokens("s⁻¹²"), vec![("s", -12)]);
    }

    #[test]
    fn test_tokenize_products_and_quotients() {
        assert_eq!(tokens("kg⋅m²/s²"), vec![("kg", 1), ("m", 2), ("s", -2)]);
        assert_eq!(tokens("kg*m^2*s^-2"), vec![("kg", 1), ("m", 2), ("s", -2)]);
        assert_eq!(tokens("N·m"), vec![("N", 1), ("m", 1)]);
        assert_eq!(tokens("m / s"), vec![("m", 1), ("s", -1)]);
        assert_eq!(tokens("J/kg⋅K"), vec![("J", 1), ("kg", -1), ("K", -1)]);
        assert_eq!(tokens("1/s"), vec![("s", -1)]);
    }

    #[test]
    fn test_tokenize_errors() {
        for (text, position) in [("m^", 1), ("m^0", 1), ("m//s", 2), ("m/s/h", 3), ("2/s", 0), ("m*", 2), ("m s", 2)] {
            let err = tokenize_symbol(text).unwrap_err();
            assert_eq!(err.position, position, "{}", text);
        }
        assert_eq!(tokenize_symbol("  ").unwrap_err().reason, ParseErrorReason::Empty);
    }

    #[test]
    fn test_normalize_equivalent_spellings() {
        let a = normalize(&tokenize_symbol("m/s²").unwrap()).unwrap();
        let b = normalize(&tokenize_symbol("s^-2*m").unwrap()).unwrap();
        let c = normalize(&tokenize_symbol("m⋅s⋅s⁻³").unwrap()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_ne!(a, normalize(&tokenize_symbol("m/s").unwrap()).unwrap());
    }

    #[test]
    fn test_normalize_power_overflow() {
        let tokens = tokenize_symbol("m^2147483647*m").unwrap();
        assert_eq!(tokens, vec![SymbolAndPower { symbol: "m", power: i32::MAX }, SymbolAndPower { symbol: "m", power: 1 }]);
        assert_eq!(normalize(&tokens), None);

        let tokens = tokenize_symbol("s^-2147483647/s^2").unwrap();
        assert_eq!(normalize(&tokens), None);

        // large powers that cancel are fine
        let tokens = tokenize_symbol("m^2147483647/m^2147483647").unwrap();
        assert_eq!(normalize(&tokens), Some(vec![]));
    }
}
