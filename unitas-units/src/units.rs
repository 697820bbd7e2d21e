//! Unit catalog - one unit type per physical quantity
//!
//! Every conversion is a pure scale factor to the SI unit. Prefixed units
//! are registered as separate symbols.

use crate::quantity::Quantity;

crate::unit_type! {
    /// A unit of length
    pub struct LengthUnit: "Length" {
        si METRES = ("m", |v| v, |v| v);
        INCHES = ("in", |v| v * 0.0254, |v| v / 0.0254),
        MILES = ("mi", |v| v * 1609.344, |v| v / 1609.344),
        YARDS = ("yd", |v| v * 0.9144, |v| v / 0.9144),
        NAUTICAL_MILES = ("nmi", |v| v * 1852.0, |v| v / 1852.0),
        FEET = ("ft", |v| v * 0.3048, |v| v / 0.3048),
        NANOMETRES = ("nm", |v| v / 1e9, |v| v * 1e9),
        /// Greek small letter mu
        MICROMETRES = ("μm", |v| v / 1e6, |v| v * 1e6),
        MILLIMETRES = ("mm", |v| v / 1000.0, |v| v * 1000.0),
        CENTIMETRES = ("cm", |v| v / 100.0, |v| v * 100.0),
        DECIMETRES = ("dm", |v| v / 10.0, |v| v * 10.0),
        KILOMETRES = ("km", |v| v * 1000.0, |v| v / 1000.0),
    }
}

crate::unit_type! {
    /// A unit of time
    pub struct TimeUnit: "Time" {
        si SECONDS = ("s", |v| v, |v| v);
        HOURS = ("h", |v| v * 3600.0, |v| v / 3600.0),
        MINUTES = ("min", |v| v * 60.0, |v| v / 60.0),
        NANOSECONDS = ("ns", |v| v / 1e9, |v| v * 1e9),
        /// Micro sign
        MICROSECONDS = ("µs", |v| v / 1e6, |v| v * 1e6),
        MILLISECONDS = ("ms", |v| v / 1000.0, |v| v * 1000.0),
    }
}

crate::unit_type! {
    /// A unit of electric charge
    pub struct ElectricChargeUnit: "ElectricCharge" {
        si COULOMBS = ("C", |v| v, |v| v);
        NANOCOULOMBS = ("nC", |v| v / 1e9, |v| v * 1e9),
        MICROCOULOMBS = ("µC", |v| v / 1e6, |v| v * 1e6),
        MILLICOULOMBS = ("mC", |v| v / 1000.0, |v| v * 1000.0),
        KILOCOULOMBS = ("kC", |v| v * 1e3, |v| v / 1e3),
        MEGACOULOMBS = ("MC", |v| v * 1e6, |v| v / 1e6),
        GIGACOULOMBS = ("GC", |v| v * 1e9, |v| v / 1e9),
    }
}

crate::unit_type! {
    pub struct CatalyticActivityUnit: "CatalyticActivity" {
        si KATALS = ("kat", |v| v, |v| v);
    }
}

crate::unit_type! {
    pub struct SolidAngleUnit: "SolidAngle" {
        si STERADIANS = ("sr", |v| v, |v| v);
    }
}

crate::unit_type! {
    pub struct LuminousFluxUnit: "LuminousFlux" {
        si LUMENS = ("lm", |v| v, |v| v);
    }
}

crate::unit_type! {
    /// A unit of area
    pub struct AreaUnit: "Area" {
        si SQUARE_METRES = ("m²", |v| v, |v| v);
        SQUARE_MILLIMETRES = ("mm²", |v| v / 1e6, |v| v * 1e6),
        SQUARE_CENTIMETRES = ("cm²", |v| v / 1e4, |v| v * 1e4),
        SQUARE_KILOMETRES = ("km²", |v| v * 1e6, |v| v / 1e6),
        SQUARE_INCHES = ("in²", |v| v * 0.00064516, |v| v / 0.00064516),
        SQUARE_FEET = ("ft²", |v| v * 0.09290304, |v| v / 0.09290304),
        SQUARE_YARDS = ("yd²", |v| v * 0.83612736, |v| v / 0.83612736),
        HECTARES = ("ha", |v| v * 1e4, |v| v / 1e4),
    }
}

crate::unit_type! {
    /// A unit of volume
    pub struct VolumeUnit: "Volume" {
        si CUBIC_METRES = ("m³", |v| v, |v| v);
        CUBIC_MILLIMETRES = ("mm³", |v| v / 1e9, |v| v * 1e9),
        CUBIC_CENTIMETRES = ("cm³", |v| v / 1e6, |v| v * 1e6),
        LITRES = ("L", |v| v / 1000.0, |v| v * 1000.0),
        MILLILITRES = ("ml", |v| v / 1e6, |v| v * 1e6),
    }
}

crate::unit_type! {
    /// A unit of speed
    pub struct SpeedUnit: "Speed" {
        si METRES_PER_SECOND = ("m/s", |v| v, |v| v);
        KILOMETRES_PER_HOUR = ("km/h", |v| v / 3.6, |v| v * 3.6),
        MILLIMETRES_PER_SECOND = ("mm/s", |v| v / 1000.0, |v| v * 1000.0),
        CENTIMETRES_PER_SECOND = ("cm/s", |v| v / 100.0, |v| v * 100.0),
        MILES_PER_HOUR = ("mi/h", |v| v * 0.44704, |v| v / 0.44704),
    }
}

crate::unit_type! {
    /// A unit of acceleration
    pub struct AccelerationUnit: "Acceleration" {
        si METRES_PER_SECOND_SQUARED = ("m/s²", |v| v, |v| v);
        MILLIMETRES_PER_SECOND_SQUARED = ("mm/s²", |v| v / 1000.0, |v| v * 1000.0),
        CENTIMETRES_PER_SECOND_SQUARED = ("cm/s²", |v| v / 100.0, |v| v * 100.0),
    }
}

crate::unit_type! {
    /// A unit of frequency
    pub struct FrequencyUnit: "Frequency" {
        si HERTZ = ("Hz", |v| v, |v| v);
        MILLIHERTZ = ("mHz", |v| v / 1000.0, |v| v * 1000.0),
        KILOHERTZ = ("kHz", |v| v * 1e3, |v| v / 1e3),
        MEGAHERTZ = ("MHz", |v| v * 1e6, |v| v / 1e6),
        GIGAHERTZ = ("GHz", |v| v * 1e9, |v| v / 1e9),
    }
}

crate::unit_type! {
    /// A unit of spatial frequency
    pub struct WavenumberUnit: "Wavenumber" {
        si RECIPROCAL_METRES = ("1/m", |v| v, |v| v);
        RECIPROCAL_CENTIMETRES = ("1/cm", |v| v * 100.0, |v| v / 100.0),
    }
}

pub type Length = Quantity<LengthUnit>;
pub type Time = Quantity<TimeUnit>;
pub type ElectricCharge = Quantity<ElectricChargeUnit>;
pub type CatalyticActivity = Quantity<CatalyticActivityUnit>;
pub type SolidAngle = Quantity<SolidAngleUnit>;
pub type LuminousFlux = Quantity<LuminousFluxUnit>;
pub type Area = Quantity<AreaUnit>;
pub type Volume = Quantity<VolumeUnit>;
pub type Speed = Quantity<SpeedUnit>;
pub type Acceleration = Quantity<AccelerationUnit>;
pub type Frequency = Quantity<FrequencyUnit>;
pub type Wavenumber = Quantity<WavenumberUnit>;

/// Invoke a generic function once per catalog quantity: `for_each_quantity!(check)`
/// expands to `check::<LengthUnit>(); check::<TimeUnit>(); ...`
#[cfg(test)]
macro_rules! for_each_quantity {
    ($f:ident) => {
        $f::<$crate::units::LengthUnit>();
        $f::<$crate::units::TimeUnit>();
        $f::<$crate::units::ElectricChargeUnit>();
        $f::<$crate::units::CatalyticActivityUnit>();
        $f::<$crate::units::SolidAngleUnit>();
        $f::<$crate::units::LuminousFluxUnit>();
        $f::<$crate::units::AreaUnit>();
        $f::<$crate::units::VolumeUnit>();
        $f::<$crate::units::SpeedUnit>();
        $f::<$crate::units::AccelerationUnit>();
        $f::<$crate::units::FrequencyUnit>();
        $f::<$crate::units::WavenumberUnit>();
    };
}

#[cfg(test)]
pub(crate) use for_each_quantity;
