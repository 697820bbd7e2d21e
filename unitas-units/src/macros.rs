//! Declarative generator for per-quantity unit types

/// Declare the unit type of one physical quantity
///
/// The first entry, marked `si`, is the canonical unit all conversions pivot
/// on. Each entry is `CONST = (symbol, to_si, from_si)`; the conversion
/// functions must be linear and inverse to each other.
///
/// ```ignore
/// unit_type! {
///     /// A unit of time
///     pub struct TimeUnit: "Time" {
///         si SECONDS = ("s", |v| v, |v| v);
///         MINUTES = ("min", |v| v * 60.0, |v| v / 60.0),
///     }
/// }
/// ```
#[macro_export]
macro_rules! unit_type {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $quantity:literal {
            $(#[$si_meta:meta])*
            si $si:ident = ($si_symbol:literal, $si_to:expr, $si_from:expr);
            $(
                $(#[$unit_meta:meta])*
                $unit:ident = ($symbol:literal, $to_si:expr, $from_si:expr)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name($crate::UnitValue);

        impl $name {
            $(#[$si_meta])*
            pub const $si: $name = $name($crate::UnitValue::new($si_symbol, $si_to, $si_from));
            $(
                $(#[$unit_meta])*
                pub const $unit: $name = $name($crate::UnitValue::new($symbol, $to_si, $from_si));
            )*

            /// Every unit of this quantity, SI unit first
            pub const ALL: &'static [$name] = &[$name::$si, $($name::$unit),*];

            pub fn parse(text: &str) -> ::std::result::Result<Self, $crate::UnitParseError> {
                $crate::parse_unit(text)
            }

            pub fn try_parse(text: &str) -> ::std::option::Option<Self> {
                $crate::try_parse_unit(text)
            }

            pub fn create_quantity(&self, value: f64) -> $crate::Quantity<Self> {
                $crate::Quantity::new(value, *self)
            }

            pub fn get_scalar_value(&self, quantity: &$crate::Quantity<Self>) -> f64 {
                quantity.value_in(*self)
            }

            /// Render the symbol from a format such as `" km "` or `"km,6"`
            pub fn to_string_with(&self, ctx: &$crate::UnitsContext, format: &str) -> ::std::string::String {
                $crate::format_unit(ctx, *self, format)
            }

            pub fn to_string_styled(&self, ctx: &$crate::UnitsContext, style: $crate::SymbolFormat) -> ::std::string::String {
                $crate::format_unit_styled(ctx, *self, style)
            }
        }

        impl $crate::Unit for $name {
            const QUANTITY: &'static str = $quantity;

            fn unit_value(&self) -> $crate::UnitValue {
                self.0
            }

            fn si_unit() -> Self {
                $name::$si
            }

            fn all() -> &'static [Self] {
                $name::ALL
            }

            fn symbol_table() -> &'static $crate::SymbolTable<Self> {
                static TABLE: ::std::sync::LazyLock<$crate::SymbolTable<$name>> =
                    ::std::sync::LazyLock::new(|| $crate::SymbolTable::new($name::ALL));
                &TABLE
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.0.symbol())
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}({})", ::std::stringify!($name), self.0.symbol())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::UnitParseError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $name::parse(s)
            }
        }
    };
}
