//! Unit string parsing - resolve expressions like "km/h" or "kg*m/s^2"

use metrum_core::Number;
use tracing::trace;

use crate::normalize::normalize;
use crate::{Quantity, Registry, Unit, UnitError};

/// Separators accepted by [`UnitParser::parse_conversion`], tried in order
const CONVERSION_SEPARATORS: [&str; 4] = ["->", "→", " to ", " in "];

/// Largest exponent magnitude accepted on a single term, as in "m^3"
const MAX_TERM_EXPONENT: i32 = 1000;

/// Resolves unit names and composite expressions against a registry
///
/// Holds only a shared reference, so any number of parsers can read the
/// same registry at once.
#[derive(Debug, Clone, Copy)]
pub struct UnitParser<'r> {
    registry: &'r Registry,
}

impl<'r> UnitParser<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        UnitParser { registry }
    }

    /// Parse a unit string into a Unit
    ///
    /// Supported formats:
    /// - Simple: "m", "kilogram", "°C"
    /// - Powers: "m^2", "m2", "s^-1", "m²"
    /// - Products: "kg*m", "N·m"
    /// - Quotients: "m/s", "kg/m^2", "metres per second"
    /// - Combined: "kg*m/s^2", "m^2*kg/s^3"
    ///
    /// At most one `/` is allowed; everything after it is the denominator.
    pub fn parse(&self, text: &str) -> Result<Unit, UnitError> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Err(UnitError::InvalidUnit(text.to_string()));
        }

        // Try simple lookup first, this also covers registered composites
        if let Some(unit) = self.registry.lookup(&normalized) {
            trace!(text, unit = %unit, "resolved by direct lookup");
            return Ok(unit.clone());
        }

        if normalized.matches('/').count() > 1 {
            return Err(UnitError::MultipleDivision(text.to_string()));
        }

        if !normalized.contains(['*', '/']) {
            let unit = self.parse_term(&normalized, text)?;
            trace!(text, unit = %unit, "resolved as exponent term");
            return Ok(unit);
        }

        let unit = self.parse_expression(&normalized, text)?;
        trace!(text, unit = %unit, "resolved as composite expression");
        Ok(unit)
    }

    /// Parse a conversion specification like "kg->lb" or "C to F"
    pub fn parse_conversion(&self, text: &str) -> Result<(Unit, Unit), UnitError> {
        let (from, to) = CONVERSION_SEPARATORS
            .iter()
            .find_map(|sep| text.split_once(sep))
            .ok_or_else(|| UnitError::InvalidUnit(text.to_string()))?;

        Ok((self.parse(from)?, self.parse(to)?))
    }

    /// Parse a quantity string like "5 m", "100kg" or "-3.5 km/h"
    pub fn parse_quantity(&self, text: &str) -> Result<Quantity, UnitError> {
        let text = text.trim();

        let (num_str, unit_str) = match text.split_once(char::is_whitespace) {
            Some((num, unit)) if Number::from_str(num).is_ok() => (num, unit),
            _ => text.split_at(number_prefix_len(text)),
        };

        let value = Number::from_str(num_str)?;
        let unit_str = unit_str.trim();
        let unit = if unit_str.is_empty() {
            Unit::one()
        } else if unit_str.starts_with('/') {
            // "5/s" reads as five per second
            self.parse(&format!("1{}", unit_str))?
        } else {
            self.parse(unit_str)?
        };
        Ok(Quantity::new(value, unit))
    }

    /// Numerator and denominator groups split on the single `/`
    fn parse_expression(&self, normalized: &str, original: &str) -> Result<Unit, UnitError> {
        let (numerator, denominator) = match normalized.split_once('/') {
            Some((num, den)) => (num, Some(den)),
            None => (normalized, None),
        };

        let numerator = self.parse_product(numerator, original)?;
        let denominator = match denominator {
            Some(den) => self.parse_product(den, original)?,
            None => Unit::one(),
        };
        numerator.divide(&denominator)
    }

    /// Multiply together the `*`-separated terms of one group
    fn parse_product(&self, group: &str, original: &str) -> Result<Unit, UnitError> {
        let mut result = Unit::one();
        for term in group.split('*') {
            if term.is_empty() {
                return Err(UnitError::InvalidUnit(original.to_string()));
            }
            if term == "1" {
                continue;
            }
            let unit = self.parse_term(term, original)?;
            if unit.is_affine() {
                return Err(UnitError::Composition {
                    unit: unit.to_string(),
                    expression: original.to_string(),
                });
            }
            result = result.multiply(&unit)?;
        }
        Ok(result)
    }

    /// Parse a unit with optional power like "m^2", "m2" or "s^-1"
    fn parse_term(&self, term: &str, original: &str) -> Result<Unit, UnitError> {
        if let Some(unit) = self.registry.lookup(term) {
            return Ok(unit.clone());
        }

        let invalid = || UnitError::InvalidUnit(original.to_string());
        let (base, exp) = split_exponent(term).ok_or_else(invalid)?;
        let unit = self.registry.lookup(base).ok_or_else(invalid)?;

        if exp == 1 {
            return Ok(unit.clone());
        }
        if unit.is_affine() {
            return Err(UnitError::Composition {
                unit: unit.to_string(),
                expression: original.to_string(),
            });
        }
        unit.power(exp)
    }
}

/// Split a trailing exponent off a unit name: "m^2" -> ("m", 2), "s-1" -> ("s", -1)
///
/// A term without digits has exponent 1. Returns `None` for a bare number,
/// an exponent of zero, or one beyond [`MAX_TERM_EXPONENT`].
fn split_exponent(term: &str) -> Option<(&str, i32)> {
    let head = term.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &term[head.len()..];
    if digits.is_empty() {
        return Some((term, 1));
    }

    let (head, sign) = if let Some(h) = head.strip_suffix('-') {
        (h, -1)
    } else if let Some(h) = head.strip_suffix('+') {
        (h, 1)
    } else {
        (head, 1)
    };
    let head = head.strip_suffix('^').unwrap_or(head);
    if head.is_empty() {
        return None;
    }

    let exp = digits.parse::<i32>().ok()?.checked_mul(sign)?;
    if exp == 0 || exp.abs() > MAX_TERM_EXPONENT {
        return None;
    }
    Some((head, exp))
}

/// Length of the leading numeric literal in "100kg", "-2.5e3m" or "3/4 h"
fn number_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    let sign_at = |i: usize| matches!(bytes.get(i), Some(b'-' | b'+'));

    let mut end = 0;
    let mut seen_digit = false;
    while end < bytes.len() {
        let step = match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                1
            }
            b'+' | b'-' if end == 0 => 1,
            b'.' => 1,
            // a fraction bar only when a digit follows, so "5/s" keeps its unit
            b'/' if seen_digit && digit_at(end + 1) => 1,
            // an exponent only when a digit follows, so "2eV" keeps its unit
            b'e' | b'E' if seen_digit && digit_at(end + 1) => 1,
            b'e' | b'E' if seen_digit && sign_at(end + 1) && digit_at(end + 2) => 2,
            _ => break,
        };
        end += step;
    }
    end
}
