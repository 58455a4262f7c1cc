use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, de::Error as _};
use thiserror::Error;
use uom::{
    si::f64::{
        Angle, Area, Length, Mass, MassDensity, MassRate, Pressure, ThermodynamicTemperature,
        Time, Volume,
    },
    str::ParseQuantityError,
};

/// Physical dimension of a unit accepted by [`parse_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Length,
    Area,
    Volume,
    Mass,
    Time,
    MassRate,
    MassDensity,
    Pressure,
    Temperature,
    Angle,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Length => "length",
            Self::Area => "area",
            Self::Volume => "volume",
            Self::Mass => "mass",
            Self::Time => "time",
            Self::MassRate => "mass flow rate",
            Self::MassDensity => "density",
            Self::Pressure => "pressure",
            Self::Temperature => "temperature",
            Self::Angle => "angle",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when parsing a unit-bearing string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuantityParseError {
    #[error("expected `<number> <unit>`, got `{0}`")]
    MissingUnit(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("unknown unit `{0}`")]
    UnknownUnit(String),

    /// The unit exists but measures a different physical dimension.
    #[error("unit `{unit}` measures {found}, expected {expected}")]
    DimensionalMismatch {
        unit: String,
        expected: Dimension,
        found: Dimension,
    },
}

/// A `uom` quantity that can be parsed from text like `"1.0 in"`.
///
/// Parsing itself is `uom`'s `FromStr`, which recognizes each unit's
/// abbreviation, singular and plural names.
pub trait Dimensioned: FromStr<Err = ParseQuantityError> {
    const DIMENSION: Dimension;

    /// Returns the value in SI base units.
    fn si_value(&self) -> f64;
}

macro_rules! dimensioned {
    ($quantity:ty, $dimension:ident) => {
        impl Dimensioned for $quantity {
            const DIMENSION: Dimension = Dimension::$dimension;

            fn si_value(&self) -> f64 {
                self.value
            }
        }
    };
}

dimensioned!(Length, Length);
dimensioned!(Area, Area);
dimensioned!(Volume, Volume);
dimensioned!(Mass, Mass);
dimensioned!(Time, Time);
dimensioned!(MassRate, MassRate);
dimensioned!(MassDensity, MassDensity);
dimensioned!(Pressure, Pressure);
dimensioned!(ThermodynamicTemperature, Temperature);
dimensioned!(Angle, Angle);

/// Returns the first supported dimension whose units accept `text`.
fn dimension_of(text: &str) -> Option<Dimension> {
    fn accepts<Q: Dimensioned>(text: &str) -> Option<Dimension> {
        text.parse::<Q>().ok().map(|_| Q::DIMENSION)
    }

    accepts::<Length>(text)
        .or_else(|| accepts::<Area>(text))
        .or_else(|| accepts::<Volume>(text))
        .or_else(|| accepts::<Mass>(text))
        .or_else(|| accepts::<Time>(text))
        .or_else(|| accepts::<MassRate>(text))
        .or_else(|| accepts::<MassDensity>(text))
        .or_else(|| accepts::<Pressure>(text))
        .or_else(|| accepts::<ThermodynamicTemperature>(text))
        .or_else(|| accepts::<Angle>(text))
}

/// Parses a string like `"1.75 in"` or `"70 °F"` into a quantity of type `Q`.
///
/// The number and unit are separated by a single space. Units are `uom`'s
/// abbreviations (`"kg/m³"`, `"°"`) or names (`"degree Fahrenheit"`).
///
/// # Errors
///
/// Returns [`QuantityParseError::DimensionalMismatch`] when the unit is known
/// but belongs to a different dimension than `Q`, and the other variants for
/// malformed text or unknown units.
///
/// # Example
///
/// ```
/// use hybrid_core::units::{QuantityParseError, parse_quantity};
/// use uom::si::f64::Length;
///
/// let port: Length = parse_quantity("1.0 in").unwrap();
/// assert!((port.value - 0.0254).abs() < 1e-12);
///
/// let err = parse_quantity::<Length>("1 kg").unwrap_err();
/// assert!(matches!(err, QuantityParseError::DimensionalMismatch { .. }));
/// ```
pub fn parse_quantity<Q: Dimensioned>(text: &str) -> Result<Q, QuantityParseError> {
    let trimmed = text.trim();
    let (number, symbol) = trimmed
        .split_once(' ')
        .map_or((trimmed, ""), |(number, symbol)| (number, symbol.trim()));

    let quantity = trimmed.parse::<Q>().map_err(|err| match err {
        ParseQuantityError::NoSeparator => QuantityParseError::MissingUnit(trimmed.to_string()),
        ParseQuantityError::ValueParseError => {
            QuantityParseError::InvalidNumber(number.to_string())
        }
        ParseQuantityError::UnknownUnit => match dimension_of(trimmed) {
            Some(found) => QuantityParseError::DimensionalMismatch {
                unit: symbol.to_string(),
                expected: Q::DIMENSION,
                found,
            },
            None => QuantityParseError::UnknownUnit(symbol.to_string()),
        },
    })?;

    if !quantity.si_value().is_finite() {
        return Err(QuantityParseError::InvalidNumber(number.to_string()));
    }
    Ok(quantity)
}

/// Deserializes a unit-bearing string into a quantity.
///
/// Intended for `#[serde(deserialize_with = "hybrid_core::units::deserialize")]`.
///
/// # Errors
///
/// Returns the deserializer's error if the value is not a string or if
/// [`parse_quantity`] rejects it.
pub fn deserialize<'de, D, Q>(deserializer: D) -> Result<Q, D::Error>
where
    D: Deserializer<'de>,
    Q: Dimensioned,
{
    let text = String::deserialize(deserializer)?;
    parse_quantity(&text).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        angle::degree,
        length::{inch, meter},
        mass_density::kilogram_per_cubic_meter,
        mass_rate::kilogram_per_second,
        pressure::atmosphere,
        thermodynamic_temperature::{degree_fahrenheit, kelvin},
        volume::liter,
    };

    #[test]
    fn parses_motor_inputs() {
        let port: Length = parse_quantity("1.0 in").unwrap();
        assert_relative_eq!(port.get::<meter>(), 0.0254);
        assert_relative_eq!(port.get::<inch>(), 1.0);

        let tank: Volume = parse_quantity("0.4139 L").unwrap();
        assert_relative_eq!(tank.get::<liter>(), 0.4139);

        let injector: MassRate = parse_quantity("0.0274 kg/s").unwrap();
        assert_relative_eq!(injector.get::<kilogram_per_second>(), 0.0274);

        let exit: Pressure = parse_quantity("1 atm").unwrap();
        assert_relative_eq!(exit.get::<atmosphere>(), 1.0);

        let half_angle: Angle = parse_quantity("15 °").unwrap();
        assert_relative_eq!(half_angle.get::<degree>(), 15.0, epsilon = 1e-12);

        let fuel: MassDensity = parse_quantity("3957 kg/m³").unwrap();
        assert_relative_eq!(fuel.get::<kilogram_per_cubic_meter>(), 3957.0);
    }

    #[test]
    fn temperature_offsets() {
        let t: ThermodynamicTemperature = parse_quantity("70 °F").unwrap();
        assert_relative_eq!(t.get::<degree_fahrenheit>(), 70.0, epsilon = 1e-9);
        assert_relative_eq!(t.get::<kelvin>(), 294.261_111, epsilon = 1e-5);

        let t: ThermodynamicTemperature = parse_quantity("-40 °C").unwrap();
        assert_relative_eq!(t.get::<degree_fahrenheit>(), -40.0, epsilon = 1e-9);

        let t: ThermodynamicTemperature = parse_quantity("90 degree Fahrenheit").unwrap();
        assert_relative_eq!(t.get::<degree_fahrenheit>(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn wrong_dimension_is_a_mismatch() {
        let err = parse_quantity::<Length>("3 kg").unwrap_err();
        assert_eq!(
            err,
            QuantityParseError::DimensionalMismatch {
                unit: "kg".to_string(),
                expected: Dimension::Length,
                found: Dimension::Mass,
            }
        );
        assert_eq!(err.to_string(), "unit `kg` measures mass, expected length");
    }

    #[test]
    fn malformed_text() {
        assert!(matches!(
            parse_quantity::<Length>("1.0"),
            Err(QuantityParseError::MissingUnit(_))
        ));
        assert!(matches!(
            parse_quantity::<Length>("one in"),
            Err(QuantityParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_quantity::<Length>("inf in"),
            Err(QuantityParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            parse_quantity::<Length>("2 cubits"),
            Err(QuantityParseError::UnknownUnit(_))
        ));
    }
}
