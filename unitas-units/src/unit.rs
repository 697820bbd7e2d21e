//! Unit representation with conversion functions and symbol tables

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use unitas_core::ConversionOverflowError;
use crate::parse::{normalize, tokenize_symbol};
use crate::quantity::Quantity;

/// A unit of one quantity: its symbol plus linear conversions to and from the SI unit
///
/// Two unit values are the same unit when their symbols are equal; the
/// conversion functions do not take part in equality.
#[derive(Clone, Copy)]
pub struct UnitValue {
    symbol: &'static str,
    to_si: fn(f64) -> f64,
    from_si: fn(f64) -> f64,
}

impl UnitValue {
    pub const fn new(symbol: &'static str, to_si: fn(f64) -> f64, from_si: fn(f64) -> f64) -> Self {
        UnitValue { symbol, to_si, from_si }
    }

    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Convert a value in this unit to the SI unit
    pub fn to_si(&self, value: f64) -> f64 {
        (self.to_si)(value)
    }

    /// Convert a value in the SI unit to this unit
    pub fn from_si(&self, value: f64) -> f64 {
        (self.from_si)(value)
    }
}

impl PartialEq for UnitValue {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for UnitValue {}

impl Hash for UnitValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl fmt::Debug for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UnitValue").field(&self.symbol).finish()
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}

/// The capability set every quantity's unit type provides
///
/// Implementations are normally produced by [`unit_type!`](crate::unit_type).
pub trait Unit: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Name of the physical quantity, e.g. "Length"
    const QUANTITY: &'static str;

    fn unit_value(&self) -> UnitValue;

    /// The canonical unit all conversions pivot on
    fn si_unit() -> Self;

    /// Every registered unit of this quantity
    fn all() -> &'static [Self];

    fn symbol_table() -> &'static SymbolTable<Self>;

    fn symbol(&self) -> &'static str {
        self.unit_value().symbol()
    }

    fn to_si_unit(&self, value: f64) -> f64 {
        self.unit_value().to_si(value)
    }

    fn from_si_unit(&self, value: f64) -> f64 {
        self.unit_value().from_si(value)
    }

    /// Like [`Unit::to_si_unit`], but a finite input must give a finite result
    fn checked_to_si_unit(&self, value: f64) -> Result<f64, ConversionOverflowError> {
        checked(self.symbol(), value, self.to_si_unit(value))
    }

    fn checked_from_si_unit(&self, value: f64) -> Result<f64, ConversionOverflowError> {
        checked(self.symbol(), value, self.from_si_unit(value))
    }

    fn is_si_unit(&self) -> bool {
        *self == Self::si_unit()
    }

    /// Convert a value in this unit to `target`
    fn convert_to(&self, value: f64, target: Self) -> f64 {
        if *self == target {
            return value;
        }
        target.from_si_unit(self.to_si_unit(value))
    }

    fn create_quantity(&self, value: f64) -> Quantity<Self> {
        Quantity::new(value, *self)
    }

    /// The scalar of `quantity` expressed in this unit
    fn get_scalar_value(&self, quantity: &Quantity<Self>) -> f64 {
        self.from_si_unit(quantity.si_value())
    }
}

fn checked(symbol: &str, input: f64, output: f64) -> Result<f64, ConversionOverflowError> {
    if input.is_finite() && !output.is_finite() {
        return Err(ConversionOverflowError {
            symbol: symbol.to_string(),
            value: input,
        });
    }
    Ok(output)
}

/// Lookup structure over the finite set of units of one quantity
pub struct SymbolTable<U: 'static> {
    by_symbol: HashMap<&'static str, U>,
    /// Normalized tokens of each symbol, for alternative spellings
    tokenized: Vec<(Vec<(String, i32)>, U)>,
}

impl<U: Unit> SymbolTable<U> {
    /// Build a table; the first unit registered under a symbol wins
    pub fn new(units: &[U]) -> Self {
        let mut by_symbol = HashMap::with_capacity(units.len());
        let mut tokenized = Vec::with_capacity(units.len());

        for &unit in units {
            let symbol = unit.symbol();
            debug_assert!(
                !by_symbol.contains_key(symbol),
                "duplicate symbol '{}' for {}",
                symbol,
                U::QUANTITY
            );
            if by_symbol.contains_key(symbol) {
                continue;
            }
            by_symbol.insert(symbol, unit);
            if let Some(tokens) = tokenize_symbol(symbol).ok().and_then(|t| normalize(&t)) {
                tokenized.push((tokens, unit));
            }
        }

        SymbolTable { by_symbol, tokenized }
    }

    /// Exact symbol lookup
    pub fn get(&self, symbol: &str) -> Option<U> {
        self.by_symbol.get(symbol).copied()
    }

    /// Exact lookup, then equivalence of tokenized forms ("m^2" finds "m²")
    ///
    /// Spellings whose powers overflow match nothing.
    pub fn resolve(&self, spelling: &str) -> Option<U> {
        if let Some(unit) = self.get(spelling) {
            return Some(unit);
        }
        let tokens = normalize(&tokenize_symbol(spelling).ok()?)?;
        self.tokenized
            .iter()
            .find(|(candidate, _)| *candidate == tokens)
            .map(|(_, unit)| *unit)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&'static str> {
        self.by_symbol.keys().copied().collect()
    }
}
