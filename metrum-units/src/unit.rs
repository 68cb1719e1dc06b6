//! Unit representation with conversion factors

use std::fmt;

use metrum_core::Number;
use serde::{Deserialize, Serialize};

use crate::dimension::write_exponents;
use crate::{Dimension, UnitError};

/// Canonical name of a unit as an exponent vector over unit names
///
/// `kilogram*metre/second^2` is {kilogram: 1, metre: 1, second: -2}, which
/// makes `kg*m/s^2` and `m*kg/s^2` name the same unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitName(Dimension);

impl UnitName {
    pub fn atom(name: &str) -> Self {
        UnitName(Dimension::base(name))
    }

    /// The name with no components, used by the identity unit
    pub fn empty() -> Self {
        UnitName::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_dimensionless()
    }

    /// The single unit name when this is not a composite
    pub fn as_atom(&self) -> Option<&str> {
        let mut iter = self.0.iter();
        match (iter.next(), iter.next()) {
            (Some((name, 1)), None) => Some(name),
            _ => None,
        }
    }

    /// Iterate `(unit name, exponent)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> + Clone {
        self.0.iter()
    }

    fn multiply(&self, other: &UnitName) -> Result<UnitName, UnitError> {
        Ok(UnitName(self.0.multiply(&other.0)?))
    }

    fn divide(&self, other: &UnitName) -> Result<UnitName, UnitError> {
        Ok(UnitName(self.0.divide(&other.0)?))
    }

    fn power(&self, exp: i32) -> Result<UnitName, UnitError> {
        Ok(UnitName(self.0.power(exp)?))
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_exponents(f, self.iter(), "1")
    }
}

/// Represents a resolved unit with its dimension and conversion factor
///
/// Units are plain values: they do not refer back to the registry they were
/// resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Canonical name (e.g. "metre", "kilogram*metre/second^2")
    name: UnitName,
    /// Factor relative to the implicit base unit of the dimension
    factor: Number,
    /// The dimensional signature
    dimension: Dimension,
    /// Offset to absolute zero for affine temperature scales
    #[serde(default, skip_serializing_if = "Option::is_none")]
    offset: Option<Number>,
}

impl Unit {
    /// Create a named unit
    pub fn named(name: &str, factor: Number, dimension: Dimension, offset: Option<Number>) -> Self {
        Unit {
            name: UnitName::atom(name),
            factor,
            dimension,
            offset,
        }
    }

    /// The multiplicative identity: factor 1, empty name, dimensionless
    pub fn one() -> Self {
        Unit {
            name: UnitName::empty(),
            factor: Number::one(),
            dimension: Dimension::dimensionless(),
            offset: None,
        }
    }

    pub fn name(&self) -> &UnitName {
        &self.name
    }

    pub fn factor(&self) -> &Number {
        &self.factor
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    pub fn offset(&self) -> Option<&Number> {
        self.offset.as_ref()
    }

    /// Check if this unit needs an additive offset to convert (celsius, fahrenheit, ...)
    pub fn is_affine(&self) -> bool {
        self.offset.is_some()
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Express a value of this unit in the dimension's base unit (linear units)
    pub fn to_base(&self, value: &Number) -> Number {
        value.mul(&self.factor)
    }

    /// Express a base-unit value in this unit (linear units)
    pub fn from_base(&self, value: &Number) -> Result<Number, UnitError> {
        Ok(value.checked_div(&self.factor)?)
    }

    /// Multiply two units (e.g. m * m -> m^2)
    pub fn multiply(&self, other: &Unit) -> Result<Unit, UnitError> {
        Ok(Unit {
            name: self.name.multiply(&other.name)?,
            factor: self.factor.mul(&other.factor),
            dimension: self.dimension.multiply(&other.dimension)?,
            offset: None,
        })
    }

    /// Divide two units (e.g. m / s -> m/s)
    pub fn divide(&self, other: &Unit) -> Result<Unit, UnitError> {
        Ok(Unit {
            name: self.name.divide(&other.name)?,
            factor: self.factor.checked_div(&other.factor)?,
            dimension: self.dimension.divide(&other.dimension)?,
            offset: None,
        })
    }

    /// Raise unit to a power (e.g. m^2, s^-1)
    pub fn power(&self, exp: i32) -> Result<Unit, UnitError> {
        if exp == 1 {
            return Ok(self.clone());
        }
        Ok(Unit {
            name: self.name.power(exp)?,
            factor: self.factor.pow(exp)?,
            dimension: self.dimension.power(exp)?,
            offset: None,
        })
    }

    /// Get the inverse unit (e.g. Hz -> s)
    pub fn invert(&self) -> Result<Unit, UnitError> {
        self.power(-1)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
