// src/core/units.rs
use crate::error::ConversionError;
use crate::models::ConversionOutcome;
use crate::utils::format_decimal;
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Length,
    Weight,
    Temperature,
    Area,
    Volume,
    Time,
    Speed,
    Energy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// Value of one unit expressed in the category's base unit.
    Factor(f64),
    Temperature(TemperatureScale),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub id: &'static str,
    pub name: &'static str,
    pub scale: Scale,
}

const fn linear(id: &'static str, name: &'static str, factor: f64) -> Unit {
    Unit {
        id,
        name,
        scale: Scale::Factor(factor),
    }
}

const fn thermal(id: &'static str, name: &'static str, scale: TemperatureScale) -> Unit {
    Unit {
        id,
        name,
        scale: Scale::Temperature(scale),
    }
}

// base: meter
const LENGTH: &[Unit] = &[
    linear("mm", "Millimeter", 0.001),
    linear("cm", "Centimeter", 0.01),
    linear("m", "Meter", 1.0),
    linear("km", "Kilometer", 1000.0),
    linear("in", "Inch", 0.0254),
    linear("ft", "Foot", 0.3048),
    linear("yd", "Yard", 0.9144),
    linear("mi", "Mile", 1609.344),
    linear("nm", "Nautical Mile", 1852.0),
];

// base: kilogram
const WEIGHT: &[Unit] = &[
    linear("mg", "Milligram", 0.000_001),
    linear("g", "Gram", 0.001),
    linear("kg", "Kilogram", 1.0),
    linear("oz", "Ounce", 0.028_349_5),
    linear("lb", "Pound", 0.453_592),
    linear("st", "Stone", 6.350_29),
    linear("ton", "Metric Ton", 1000.0),
];

const TEMPERATURE: &[Unit] = &[
    thermal("c", "Celsius", TemperatureScale::Celsius),
    thermal("f", "Fahrenheit", TemperatureScale::Fahrenheit),
    thermal("k", "Kelvin", TemperatureScale::Kelvin),
    thermal("r", "Rankine", TemperatureScale::Rankine),
];

// base: square meter
const AREA: &[Unit] = &[
    linear("mm2", "Square Millimeter", 0.000_001),
    linear("cm2", "Square Centimeter", 0.0001),
    linear("m2", "Square Meter", 1.0),
    linear("km2", "Square Kilometer", 1_000_000.0),
    linear("in2", "Square Inch", 0.000_645_16),
    linear("ft2", "Square Foot", 0.092_903),
    linear("yd2", "Square Yard", 0.836_127),
    linear("ac", "Acre", 4046.86),
    linear("ha", "Hectare", 10_000.0),
];

// base: liter
const VOLUME: &[Unit] = &[
    linear("ml", "Milliliter", 0.001),
    linear("l", "Liter", 1.0),
    linear("m3", "Cubic Meter", 1000.0),
    linear("in3", "Cubic Inch", 0.016_387_1),
    linear("ft3", "Cubic Foot", 28.3168),
    linear("gal", "Gallon (US)", 3.785_41),
    linear("qt", "Quart (US)", 0.946_353),
    linear("pt", "Pint (US)", 0.473_176),
    linear("cup", "Cup (US)", 0.236_588),
    linear("floz", "Fluid Ounce (US)", 0.029_573_5),
];

// base: second
const TIME: &[Unit] = &[
    linear("ms", "Millisecond", 0.001),
    linear("s", "Second", 1.0),
    linear("min", "Minute", 60.0),
    linear("h", "Hour", 3600.0),
    linear("d", "Day", 86_400.0),
    linear("wk", "Week", 604_800.0),
    linear("mo", "Month", 2_629_746.0),
    linear("yr", "Year", 31_556_952.0),
];

// base: meters per second
const SPEED: &[Unit] = &[
    linear("mps", "Meters per Second", 1.0),
    linear("kph", "Kilometers per Hour", 0.277_778),
    linear("mph", "Miles per Hour", 0.447_04),
    linear("fps", "Feet per Second", 0.3048),
    linear("knot", "Knot", 0.514_444),
];

// base: joule
const ENERGY: &[Unit] = &[
    linear("j", "Joule", 1.0),
    linear("kj", "Kilojoule", 1000.0),
    linear("cal", "Calorie", 4.184),
    linear("kcal", "Kilocalorie", 4184.0),
    linear("wh", "Watt Hour", 3600.0),
    linear("kwh", "Kilowatt Hour", 3_600_000.0),
    linear("btu", "BTU", 1055.06),
];

impl Category {
    pub const ALL: [Self; 8] = [
        Self::Length,
        Self::Weight,
        Self::Temperature,
        Self::Area,
        Self::Volume,
        Self::Time,
        Self::Speed,
        Self::Energy,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Weight => "weight",
            Self::Temperature => "temperature",
            Self::Area => "area",
            Self::Volume => "volume",
            Self::Time => "time",
            Self::Speed => "speed",
            Self::Energy => "energy",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Length => "Length",
            Self::Weight => "Weight",
            Self::Temperature => "Temperature",
            Self::Area => "Area",
            Self::Volume => "Volume",
            Self::Time => "Time",
            Self::Speed => "Speed",
            Self::Energy => "Energy",
        }
    }

    #[must_use]
    pub const fn units(self) -> &'static [Unit] {
        match self {
            Self::Length => LENGTH,
            Self::Weight => WEIGHT,
            Self::Temperature => TEMPERATURE,
            Self::Area => AREA,
            Self::Volume => VOLUME,
            Self::Time => TIME,
            Self::Speed => SPEED,
            Self::Energy => ENERGY,
        }
    }

    /// Looks a category up by its id, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidCategory`] for an unknown id.
    pub fn from_id(id: &str) -> Result<Self, ConversionError> {
        Self::ALL
            .into_iter()
            .find(|category| category.id().eq_ignore_ascii_case(id.trim()))
            .ok_or_else(|| ConversionError::InvalidCategory(id.to_owned()))
    }

    /// Finds a unit of this category by id, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidUnit`] when the category has no such unit.
    pub fn unit(self, id: &str) -> Result<&'static Unit, ConversionError> {
        self.units()
            .iter()
            .find(|unit| unit.id.eq_ignore_ascii_case(id.trim()))
            .ok_or_else(|| ConversionError::InvalidUnit {
                category: self.id().to_owned(),
                unit: id.to_owned(),
            })
    }

    /// The (from, to) pair a fresh converter starts with: the first two units.
    #[must_use]
    pub fn default_units(self) -> (&'static str, &'static str) {
        let units = self.units();
        match units {
            [first, second, ..] => (first.id, second.id),
            [only] => (only.id, only.id),
            [] => ("", ""),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl TemperatureScale {
    #[must_use]
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Self::Kelvin => value - 273.15,
            Self::Rankine => (value - 491.67) * 5.0 / 9.0,
        }
    }

    #[must_use]
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            Self::Kelvin => celsius + 273.15,
            Self::Rankine => celsius * 9.0 / 5.0 + 491.67,
        }
    }
}

/// Converts `value` between two units of the same category.
///
/// Linear categories scale through the base unit; temperature goes through
/// Celsius.
///
/// # Errors
///
/// * [`ConversionError::InvalidUnit`] if either unit id is not in the category
/// * [`ConversionError::ZeroFactor`] if the target unit would divide by zero
pub fn convert(value: f64, from: &str, to: &str, category: Category) -> Result<f64, ConversionError> {
    let source = category.unit(from)?;
    let target = category.unit(to)?;
    debug!(%category, from = source.id, to = target.id, value, "converting");

    let result = match (source.scale, target.scale) {
        (Scale::Factor(from_factor), Scale::Factor(to_factor)) => {
            if to_factor == 0.0 {
                return Err(ConversionError::ZeroFactor {
                    unit: target.id.to_owned(),
                });
            }
            value * from_factor / to_factor
        }
        (Scale::Temperature(from_scale), Scale::Temperature(to_scale)) => {
            to_scale.from_celsius(from_scale.to_celsius(value))
        }
        // Tables never mix scales within a category.
        (Scale::Factor(_), Scale::Temperature(_)) => {
            return Err(ConversionError::InvalidUnit {
                category: category.id().to_owned(),
                unit: target.id.to_owned(),
            });
        }
        (Scale::Temperature(_), Scale::Factor(_)) => {
            return Err(ConversionError::InvalidUnit {
                category: category.id().to_owned(),
                unit: source.id.to_owned(),
            });
        }
    };

    trace!(result, "converted");
    Ok(result)
}

/// Parses user input and converts it.
///
/// Empty, non-numeric or non-finite input yields
/// [`ConversionOutcome::InvalidInput`]; unit problems are still errors.
///
/// # Errors
///
/// Same as [`convert`]. Units are validated even when the input is invalid.
pub fn convert_input(
    input: &str,
    from: &str,
    to: &str,
    category: Category,
) -> Result<ConversionOutcome, ConversionError> {
    category.unit(from)?;
    category.unit(to)?;

    let Some(value) = parse_value(input) else {
        debug!(input, "not a number");
        return Ok(ConversionOutcome::InvalidInput);
    };

    let value = convert(value, from, to, category)?;
    Ok(ConversionOutcome::Converted {
        value,
        display: format_decimal(value),
    })
}

/// Expresses `value` in every unit of the category, in table order.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidUnit`] if `from` is not in the category.
pub fn convert_all(
    value: f64,
    from: &str,
    category: Category,
) -> Result<Vec<(&'static Unit, f64)>, ConversionError> {
    category
        .units()
        .iter()
        .map(|unit| convert(value, from, unit.id, category).map(|converted| (unit, converted)))
        .collect()
}

fn parse_value(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// The state behind one converter widget, kept apart from any rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterState {
    pub category: Category,
    pub from: String,
    pub to: String,
    pub input: String,
}

impl ConverterState {
    #[must_use]
    pub fn new(category: Category) -> Self {
        let (from, to) = category.default_units();
        Self {
            category,
            from: from.to_owned(),
            to: to.to_owned(),
            input: String::new(),
        }
    }

    /// Switches category and resets both units to that category's defaults.
    pub fn set_category(&mut self, category: Category) {
        let (from, to) = category.default_units();
        self.category = category;
        from.clone_into(&mut self.from);
        to.clone_into(&mut self.to);
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    /// # Errors
    ///
    /// Same as [`convert_input`].
    pub fn output(&self) -> Result<ConversionOutcome, ConversionError> {
        convert_input(&self.input, &self.from, &self.to, self.category)
    }
}
