//! Dimensional analysis types
//!
//! A dimension is a sparse exponent vector over named base dimensions,
//! e.g. force = {length: 1, mass: 1, time: -2}. Absent names have exponent
//! zero and a zero exponent is never stored.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::UnitError;

/// Names of the base dimensions used by the standard library
pub const LENGTH: &str = "length";
pub const MASS: &str = "mass";
pub const TIME: &str = "time";
pub const CURRENT: &str = "current";
pub const TEMPERATURE: &str = "temperature";
pub const AMOUNT: &str = "amount";
pub const LUMINOSITY: &str = "luminosity";
pub const ANGLE: &str = "angle";
pub const INFORMATION: &str = "information";

/// Represents the dimensions of a physical quantity
/// as exponents of named base dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i32>", into = "BTreeMap<String, i32>")]
pub struct Dimension {
    exponents: BTreeMap<String, i32>,
}

impl Dimension {
    /// Dimensionless quantity (no exponents)
    pub fn dimensionless() -> Self {
        Dimension::default()
    }

    /// A single base dimension with exponent 1
    pub fn base(name: &str) -> Self {
        let mut exponents = BTreeMap::new();
        exponents.insert(name.to_string(), 1);
        Dimension { exponents }
    }

    /// Build from an explicit map; zero entries are dropped
    pub fn from_map<K: Into<String>>(map: impl IntoIterator<Item = (K, i32)>) -> Self {
        let exponents = map
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .filter(|(_, v)| *v != 0)
            .collect();
        Dimension { exponents }
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Exponent of a base dimension (zero when absent)
    pub fn exponent(&self, name: &str) -> i32 {
        self.exponents.get(name).copied().unwrap_or(0)
    }

    /// Iterate `(name, exponent)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> + Clone {
        self.exponents.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &Dimension) -> Result<Dimension, UnitError> {
        self.combine(other, 1)
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Result<Dimension, UnitError> {
        self.combine(other, -1)
    }

    fn combine(&self, other: &Dimension, sign: i32) -> Result<Dimension, UnitError> {
        let mut exponents = self.exponents.clone();
        for (name, exp) in &other.exponents {
            let current = exponents.get(name).copied().unwrap_or(0);
            let combined = exp
                .checked_mul(sign)
                .and_then(|e| current.checked_add(e))
                .ok_or_else(|| UnitError::ExponentOverflow(name.clone()))?;
            if combined == 0 {
                exponents.remove(name);
            } else {
                exponents.insert(name.clone(), combined);
            }
        }
        Ok(Dimension { exponents })
    }

    /// Raise to integer power (multiply exponents)
    pub fn power(&self, exp: i32) -> Result<Dimension, UnitError> {
        if exp == 0 {
            return Err(UnitError::InvalidExponent(exp));
        }
        let exponents = self
            .exponents
            .iter()
            .map(|(k, v)| {
                v.checked_mul(exp)
                    .map(|e| (k.clone(), e))
                    .ok_or_else(|| UnitError::ExponentOverflow(k.clone()))
            })
            .collect::<Result<_, _>>()?;
        Ok(Dimension { exponents })
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> Result<Dimension, UnitError> {
        Dimension::dimensionless().divide(self)
    }

    /// Get the dimension name if it matches a common derived dimension
    pub fn common_name(&self) -> Option<&'static str> {
        let shape: Vec<(&str, i32)> = self.iter().collect();
        match shape.as_slice() {
            [] => Some("dimensionless"),
            [(LENGTH, 1), (TIME, -1)] => Some("velocity"),
            [(LENGTH, 1), (TIME, -2)] => Some("acceleration"),
            [(LENGTH, 1), (MASS, 1), (TIME, -2)] => Some("force"),
            [(LENGTH, 2), (MASS, 1), (TIME, -2)] => Some("energy"),
            [(LENGTH, 2), (MASS, 1), (TIME, -3)] => Some("power"),
            [(LENGTH, -1), (MASS, 1), (TIME, -2)] => Some("pressure"),
            [(LENGTH, 2)] => Some("area"),
            [(LENGTH, 3)] => Some("volume"),
            [(TIME, -1)] => Some("frequency"),
            _ => None,
        }
    }
}

/// Render an exponent vector as `a*b^2/c*d^3`
///
/// `empty` is written when there are no entries at all.
pub(crate) fn write_exponents<'a>(
    f: &mut fmt::Formatter<'_>,
    entries: impl Iterator<Item = (&'a str, i32)> + Clone,
    empty: &str,
) -> fmt::Result {
    let term = |name: &str, exp: i32| {
        if exp == 1 {
            name.to_string()
        } else {
            format!("{}^{}", name, exp)
        }
    };

    let numerator: Vec<String> = entries
        .clone()
        .filter(|(_, e)| *e > 0)
        .map(|(n, e)| term(n, e))
        .collect();
    let denominator: Vec<String> = entries
        .filter(|(_, e)| *e < 0)
        .map(|(n, e)| term(n, -e))
        .collect();

    match (numerator.is_empty(), denominator.is_empty()) {
        (true, true) => write!(f, "{}", empty),
        (false, true) => write!(f, "{}", numerator.join("*")),
        (true, false) => write!(f, "1/{}", denominator.join("*")),
        (false, false) => write!(f, "{}/{}", numerator.join("*"), denominator.join("*")),
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_exponents(f, self.iter(), "dimensionless")
    }
}

impl TryFrom<BTreeMap<String, i32>> for Dimension {
    type Error = UnitError;

    fn try_from(map: BTreeMap<String, i32>) -> Result<Self, Self::Error> {
        Ok(Dimension::from_map(map))
    }
}

impl From<Dimension> for BTreeMap<String, i32> {
    fn from(dim: Dimension) -> Self {
        dim.exponents
    }
}
