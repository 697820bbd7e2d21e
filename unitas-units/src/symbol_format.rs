//! Rendering styles for unit symbols

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::parse::SymbolAndPower;

/// How to render the powers and quotients of a unit symbol
///
/// For `m/s²`:
/// - `Default`: `m/s²` (the symbol as registered)
/// - `SignedHatPowers`: `m*s^-2`
/// - `SignedSuperScript`: `m⋅s⁻²`
/// - `FractionHatPowers`: `m/s^2`
/// - `FractionSuperScript`: `m/s²`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolFormat {
    #[default]
    Default,
    SignedHatPowers,
    SignedSuperScript,
    FractionHatPowers,
    FractionSuperScript,
}

impl SymbolFormat {
    pub const ALL: [SymbolFormat; 5] = [
        SymbolFormat::Default,
        SymbolFormat::SignedHatPowers,
        SymbolFormat::SignedSuperScript,
        SymbolFormat::FractionHatPowers,
        SymbolFormat::FractionSuperScript,
    ];

    fn uses_superscript(self) -> bool {
        matches!(self, SymbolFormat::SignedSuperScript | SymbolFormat::FractionSuperScript)
    }

    fn uses_fraction(self) -> bool {
        matches!(self, SymbolFormat::FractionHatPowers | SymbolFormat::FractionSuperScript)
    }

    /// Hat styles are ASCII-only
    fn separator(self) -> char {
        if self.uses_superscript() { '⋅' } else { '*' }
    }

    /// Render `tokens` (the tokenized form of `symbol`) in this style
    pub fn render(self, symbol: &str, tokens: &[SymbolAndPower<'_>], out: &mut String) {
        if self == SymbolFormat::Default {
            out.push_str(symbol);
            return;
        }

        if !self.uses_fraction() {
            self.write_factors(tokens.iter().copied(), out);
            return;
        }

        let numerator = tokens.iter().copied().filter(|t| t.power > 0);
        let denominator: Vec<_> = tokens
            .iter()
            .filter(|t| t.power < 0)
            .map(|t| SymbolAndPower { symbol: t.symbol, power: -t.power })
            .collect();

        if tokens.iter().all(|t| t.power < 0) {
            out.push('1');
        } else {
            self.write_factors(numerator, out);
        }
        if !denominator.is_empty() {
            out.push('/');
            self.write_factors(denominator.into_iter(), out);
        }
    }

    fn write_factors<'a>(self, factors: impl Iterator<Item = SymbolAndPower<'a>>, out: &mut String) {
        for (i, factor) in factors.enumerate() {
            if i > 0 {
                out.push(self.separator());
            }
            out.push_str(factor.symbol);
            if factor.power != 1 {
                self.write_power(factor.power, out);
            }
        }
    }

    fn write_power(self, power: i32, out: &mut String) {
        if !self.uses_superscript() {
            out.push('^');
            out.push_str(&power.to_string());
            return;
        }
        for c in power.to_string().chars() {
            out.push(match c {
                '-' => '⁻',
                '0' => '⁰',
                '1' => '¹',
                '2' => '²',
                '3' => '³',
                '4' => '⁴',
                '5' => '⁵',
                '6' => '⁶',
                '7' => '⁷',
                '8' => '⁸',
                _ => '⁹',
            });
        }
    }
}

impl fmt::Display for SymbolFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolFormat::Default => "default",
            SymbolFormat::SignedHatPowers => "signed hat powers",
            SymbolFormat::SignedSuperScript => "signed superscript",
            SymbolFormat::FractionHatPowers => "fraction hat powers",
            SymbolFormat::FractionSuperScript => "fraction superscript",
        };
        f.write_str(name)
    }
}
