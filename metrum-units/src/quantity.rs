//! Quantity type - a value with an associated unit

use std::fmt;

use metrum_core::Number;
use serde::{Deserialize, Serialize};

use crate::convert::{convert_value, is_temperature, to_kelvin};
use crate::{Dimension, Unit, UnitError};

/// A physical quantity: an exact numeric value with an associated unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric value
    pub value: Number,
    /// The unit of measurement
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: Number, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: Number) -> Self {
        Quantity::new(value, Unit::one())
    }

    /// Get the dimension of this quantity
    pub fn dimension(&self) -> &Dimension {
        self.unit.dimension()
    }

    /// Check if two quantities have compatible dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Convert to another unit
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, UnitError> {
        let value = convert_value(&self.value, &self.unit, target)?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// The value in the dimension's implicit base unit
    ///
    /// Temperatures are expressed in kelvin.
    pub fn to_base(&self) -> Result<Number, UnitError> {
        if is_temperature(self.unit.dimension()) {
            return to_kelvin(&self.value, &self.unit);
        }
        Ok(self.unit.to_base(&self.value))
    }

    /// Multiply two quantities (dimensions are multiplied)
    pub fn mul(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        self.check_linear(other)?;
        Ok(Quantity::new(self.value.mul(&other.value), self.unit.multiply(&other.unit)?))
    }

    /// Divide two quantities (dimensions are divided)
    pub fn div(&self, other: &Quantity) -> Result<Quantity, UnitError> {
        self.check_linear(other)?;
        let value = self.value.checked_div(&other.value)?;
        Ok(Quantity::new(value, self.unit.divide(&other.unit)?))
    }

    fn check_linear(&self, other: &Quantity) -> Result<(), UnitError> {
        if let Some(affine) = [&self.unit, &other.unit].into_iter().find(|u| u.is_affine()) {
            return Err(UnitError::Composition {
                unit: affine.to_string(),
                expression: format!("({}) * ({})", self, other),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.name().is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}
