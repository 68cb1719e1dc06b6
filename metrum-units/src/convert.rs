//! Conversion engine - linear factor ratios plus the affine temperature path

use metrum_core::Number;
use tracing::debug;

use crate::dimension::TEMPERATURE;
use crate::parse::UnitParser;
use crate::{Dimension, Registry, Unit, UnitError};

/// Converts values between units resolved from a shared registry
#[derive(Debug, Clone, Copy)]
pub struct Converter<'r> {
    parser: UnitParser<'r>,
}

impl<'r> Converter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Converter {
            parser: UnitParser::new(registry),
        }
    }

    pub fn parser(&self) -> &UnitParser<'r> {
        &self.parser
    }

    /// Convert a value between two unit expressions
    pub fn convert(&self, value: &Number, from: &str, to: &str) -> Result<Number, UnitError> {
        let source = self.parser.parse(from)?;
        let target = self.parser.parse(to)?;
        convert_value(value, &source, &target)
    }

    /// Convert a value between two already-resolved units
    pub fn convert_units(
        &self,
        value: &Number,
        source: &Unit,
        target: &Unit,
    ) -> Result<Number, UnitError> {
        convert_value(value, source, target)
    }

    /// Check whether two unit expressions share a dimension
    pub fn is_compatible(&self, from: &str, to: &str) -> Result<bool, UnitError> {
        let source = self.parser.parse(from)?;
        let target = self.parser.parse(to)?;
        Ok(source.is_compatible(&target))
    }
}

/// Convert `value` from `source` to `target`
///
/// Both factors are relative to the same implicit base unit, so for linear
/// units the ratio of factors is the conversion multiplier. Plain
/// temperatures go through kelvin instead.
pub fn convert_value(value: &Number, source: &Unit, target: &Unit) -> Result<Number, UnitError> {
    if !source.is_compatible(target) {
        return Err(UnitError::IncompatibleUnits {
            from: source.dimension().to_string(),
            to: target.dimension().to_string(),
        });
    }

    if is_temperature(source.dimension()) {
        let kelvin = to_kelvin(value, source)?;
        let result = from_kelvin(&kelvin, target)?;
        debug!(from = %source, to = %target, path = "affine", "converted");
        return Ok(result);
    }

    let result = value.mul(source.factor()).checked_div(target.factor())?;
    debug!(from = %source, to = %target, path = "linear", "converted");
    Ok(result)
}

/// Express a temperature in kelvin
pub(crate) fn to_kelvin(value: &Number, unit: &Unit) -> Result<Number, UnitError> {
    let scale = TemperatureScale::detect(unit)?;
    let shifted = value.mul(unit.factor()).add(&scale.offset(unit)?);
    Ok(shifted.mul(&scale.degree_ratio()?))
}

/// Express a kelvin value in the given temperature unit
pub(crate) fn from_kelvin(kelvin: &Number, unit: &Unit) -> Result<Number, UnitError> {
    let scale = TemperatureScale::detect(unit)?;
    let shifted = kelvin.checked_div(&scale.degree_ratio()?)?.sub(&scale.offset(unit)?);
    Ok(shifted.checked_div(unit.factor())?)
}

pub(crate) fn is_temperature(dimension: &Dimension) -> bool {
    *dimension == Dimension::base(TEMPERATURE)
}

/// Temperature scales recognised by the affine path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TemperatureScale {
    Kelvin,
    Celsius,
    Fahrenheit,
    Rankine,
}

impl TemperatureScale {
    /// Detect the scale by the suffix of the canonical name, so "kilokelvin" is kelvin
    ///
    /// Composites such as "kelvin*second/minute" cannot contain an affine
    /// unit, so they are absolute and measured like kelvin.
    fn detect(unit: &Unit) -> Result<Self, UnitError> {
        let Some(name) = unit.name().as_atom() else {
            if unit.is_affine() {
                return Err(UnitError::Converter(format!("affine composite unit '{}'", unit)));
            }
            return Ok(TemperatureScale::Kelvin);
        };
        let scale = if name.ends_with("kelvin") {
            TemperatureScale::Kelvin
        } else if name.ends_with("celsius") {
            TemperatureScale::Celsius
        } else if name.ends_with("fahrenheit") {
            TemperatureScale::Fahrenheit
        } else if name.ends_with("rankine") {
            TemperatureScale::Rankine
        } else {
            return Err(UnitError::Converter(format!("unrecognised temperature unit '{}'", name)));
        };
        Ok(scale)
    }

    /// Size of one scale degree in kelvin
    fn degree_ratio(self) -> Result<Number, UnitError> {
        match self {
            TemperatureScale::Kelvin | TemperatureScale::Celsius => Ok(Number::one()),
            TemperatureScale::Fahrenheit | TemperatureScale::Rankine => {
                Ok(Number::from_ratio(5, 9)?)
            }
        }
    }

    /// Distance from the scale's zero to absolute zero, in scale degrees
    ///
    /// A unit carrying its own offset overrides the published value.
    fn offset(self, unit: &Unit) -> Result<Number, UnitError> {
        if let Some(offset) = unit.offset() {
            return Ok(offset.clone());
        }
        let published = match self {
            TemperatureScale::Kelvin | TemperatureScale::Rankine => Number::zero(),
            TemperatureScale::Celsius => Number::from_ratio(27315, 100)?,
            TemperatureScale::Fahrenheit => Number::from_ratio(45967, 100)?,
        };
        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        Number::from_str(s).unwrap()
    }

    #[test]
    fn test_convert_length() {
        let registry = Registry::standard().unwrap();
        let converter = Converter::new(&registry);
        assert_eq!(converter.convert(&num("1"), "kilometre", "metre").unwrap(), num("1000"));
        assert_eq!(converter.convert(&num("1"), "mi", "km").unwrap(), num("1.609344"));
        assert_eq!(converter.convert(&num("12"), "in", "ft").unwrap(), num("1"));
    }

    #[test]
    fn test_convert_composite() {
        let registry = Registry::standard().unwrap();
        let converter = Converter::new(&registry);
        assert_eq!(converter.convert(&num("36"), "km/h", "m/s").unwrap(), num("10"));
        assert_eq!(converter.convert(&num("1"), "kWh", "J").unwrap(), num("3600000"));
        assert_eq!(converter.convert(&num("1"), "N*m", "J").unwrap(), num("1"));
        assert_eq!(converter.convert(&num("1"), "KiB", "B").unwrap(), num("1024"));
    }

    #[test]
    fn test_convert_temperature() {
        let registry = Registry::standard().unwrap();
        let converter = Converter::new(&registry);
        assert_eq!(converter.convert(&num("0"), "celsius", "fahrenheit").unwrap(), num("32"));
        assert_eq!(converter.convert(&num("0"), "celsius", "kelvin").unwrap(), num("27315/100"));
        assert_eq!(converter.convert(&num("100"), "°C", "°F").unwrap(), num("212"));
        assert_eq!(converter.convert(&num("-40"), "degF", "degC").unwrap(), num("-40"));
        assert_eq!(converter.convert(&num("0"), "rankine", "kelvin").unwrap(), num("0"));
        assert_eq!(converter.convert(&num("491.67"), "°R", "°C").unwrap(), num("0"));
    }

    #[test]
    fn test_prefixed_kelvin() {
        let registry = Registry::standard().unwrap();
        let converter = Converter::new(&registry);
        assert_eq!(converter.convert(&num("1"), "kK", "K").unwrap(), num("1000"));
        assert_eq!(converter.convert(&num("1"), "kilokelvin", "celsius").unwrap(), num("726.85"));
        assert_eq!(converter.convert(&num("300"), "mK", "K").unwrap(), num("0.3"));
    }

    #[test]
    fn test_composite_temperature_is_linear() {
        let registry = Registry::standard().unwrap();
        let converter = Converter::new(&registry);
        assert_eq!(converter.convert(&num("60"), "K*s/min", "K").unwrap(), num("1"));
        assert_eq!(converter.convert(&num("1"), "K", "K*s/min").unwrap(), num("60"));
        assert_eq!(converter.convert(&num("60"), "K*s/min", "celsius").unwrap(), num("-272.15"));
        assert_eq!(converter.convert(&num("1"), "kK*h/h", "K").unwrap(), num("1000"));
    }

    #[test]
    fn test_round_trip() {
        let registry = Registry::standard().unwrap();
        let converter = Converter::new(&registry);
        let pairs = [
            ("km", "mi"),
            ("lb", "kg"),
            ("kph", "mph"),
            ("hp", "W"),
            ("psi", "bar"),
            ("celsius", "fahrenheit"),
            ("fahrenheit", "rankine"),
            ("kelvin", "celsius"),
            ("GiB", "Mb"),
        ];
        for (a, b) in pairs {
            for q in ["0", "1", "-17.5", "1/3", "98.6"] {
                let value = num(q);
                let there = converter.convert(&value, a, b).unwrap();
                let back = converter.convert(&there, b, a).unwrap();
                assert_eq!(back, value, "{} {} -> {} -> {}", q, a, b, a);
            }
        }
    }

    #[test]
    fn test_incompatible_units() {
        let registry = Registry::standard().unwrap();
        let converter = Converter::new(&registry);
        let err = converter.convert(&num("1"), "m", "s").unwrap_err();
        assert_eq!(
            err,
            UnitError::IncompatibleUnits { from: "length".to_string(), to: "time".to_string() }
        );
        assert!(matches!(
            converter.convert(&num("1"), "kelvin", "J/K"),
            Err(UnitError::IncompatibleUnits { .. })
        ));
    }

    #[test]
    fn test_invalid_unit_propagates() {
        let registry = Registry::standard().unwrap();
        let converter = Converter::new(&registry);
        assert_eq!(
            converter.convert(&num("1"), "furlong", "m"),
            Err(UnitError::InvalidUnit("furlong".to_string()))
        );
    }

    #[test]
    fn test_is_compatible() {
        let registry = Registry::standard().unwrap();
        let converter = Converter::new(&registry);
        assert!(converter.is_compatible("N", "kg*m/s^2").unwrap());
        assert!(converter.is_compatible("mph", "m/s").unwrap());
        assert!(!converter.is_compatible("W", "J").unwrap());
        assert!(converter.is_compatible("W", "nope").is_err());
    }

    #[test]
    fn test_unknown_temperature_name_is_internal_error() {
        let ratio = Number::from_ratio(5, 4).unwrap();
        let odd = Unit::named("reaumur", ratio, Dimension::base(TEMPERATURE), None);
        let kelvin = Unit::named("kelvin", Number::one(), Dimension::base(TEMPERATURE), None);
        let err = convert_value(&num("1"), &odd, &kelvin).unwrap_err();
        assert!(matches!(err, UnitError::Converter(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_convert_units_directly() {
        let registry = Registry::standard().unwrap();
        let converter = Converter::new(&registry);
        let km = registry.get_unit("km").unwrap();
        let m = converter.parser().parse("m").unwrap();
        assert_eq!(converter.convert_units(&num("2.5"), km, &m).unwrap(), num("2500"));
    }
}
