//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-ratio (RBig) for exact rational arithmetic. Unit factors such
//! as 0.3048 or 5/9 are stored without rounding, so chained conversions
//! round-trip exactly.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use dashu_int::{IBig, UBig};
use dashu_ratio::RBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow: result too large")]
    Overflow,
}

/// Largest decimal exponent accepted by `from_str`
const MAX_DECIMAL_EXPONENT: i64 = 4096;

/// Largest exponent magnitude accepted by `pow`
const MAX_POWER_EXPONENT: u32 = 4096;

/// Exact rational number
///
/// Always kept in lowest terms with a positive denominator.
/// All operations return Results or new Numbers - never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: RBig,
}

impl Number {
    // ========== Construction ==========

    /// Create from string representation
    /// Supports: "123", "3.14", "1/3", "1.5e10", "-42", "662607015e-42"
    ///
    /// Anything that cannot be represented exactly (NaN, infinities, junk)
    /// is rejected instead of being rounded.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        // Handle rational format "a/b"
        if let Some((num_str, den_str)) = s.split_once('/') {
            let num = parse_decimal(num_str.trim())
                .ok_or_else(|| NumberError::ParseError(s.to_string()))??;
            let den = parse_decimal(den_str.trim())
                .ok_or_else(|| NumberError::ParseError(s.to_string()))??;
            return Self { inner: num }.checked_div(&Self { inner: den });
        }

        let inner = parse_decimal(s).ok_or_else(|| NumberError::ParseError(s.to_string()))??;
        Ok(Self { inner })
    }

    /// Create from i64
    pub fn from_i64(n: i64) -> Self {
        Self { inner: RBig::from(IBig::from(n)) }
    }

    /// Create from ratio (exact division)
    pub fn from_ratio(num: i64, den: i64) -> Result<Self, NumberError> {
        Self::from_i64(num).checked_div(&Self::from_i64(den))
    }

    /// Zero
    pub fn zero() -> Self {
        Self { inner: RBig::ZERO }
    }

    /// One
    pub fn one() -> Self {
        Self { inner: RBig::ONE }
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == RBig::ZERO
    }

    /// Check if exactly one
    pub fn is_one(&self) -> bool {
        self.inner == RBig::ONE
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < RBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        *self.inner.denominator() == UBig::ONE
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Reciprocal
    pub fn recip(&self) -> Result<Self, NumberError> {
        Self::one().checked_div(self)
    }

    /// Negation
    pub fn neg(&self) -> Self {
        Self { inner: -self.inner.clone() }
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// Integer power (exact)
    ///
    /// Numerator and denominator are raised separately by squaring.
    pub fn pow(&self, exp: i32) -> Result<Self, NumberError> {
        let magnitude = exp.unsigned_abs();
        if magnitude > MAX_POWER_EXPONENT {
            return Err(NumberError::Overflow);
        }
        if exp < 0 && self.is_zero() {
            return Err(NumberError::DivisionByZero);
        }

        let n = magnitude as usize;
        let num = self.inner.numerator().pow(n);
        let den = self.inner.denominator().pow(n);
        let result = Self { inner: RBig::from_parts(num, den) };

        if exp < 0 {
            result.recip()
        } else {
            Ok(result)
        }
    }

    // ========== Conversion ==========

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        i64::try_from(self.inner.numerator().clone()).ok()
    }

    /// Numerator of the reduced fraction
    pub fn numerator(&self) -> &IBig {
        self.inner.numerator()
    }

    /// Denominator of the reduced fraction (always positive)
    pub fn denominator(&self) -> &UBig {
        self.inner.denominator()
    }

    // ========== Display ==========

    /// Render as decimal string with exactly `places` digits after the point,
    /// rounding half away from zero. Integer arithmetic only.
    pub fn as_decimal(&self, places: u32) -> String {
        let num = self.inner.numerator().clone();
        let den = IBig::from(self.inner.denominator().clone());
        let negative = num < IBig::ZERO;
        let magnitude = if negative { -num } else { num };

        let scale = IBig::from(10).pow(places as usize);
        let scaled = magnitude * scale;
        let mut quotient = &scaled / &den;
        let remainder = &scaled % &den;
        if remainder * IBig::from(2) >= den {
            quotient += IBig::ONE;
        }

        let mut digits = quotient.to_string();
        let places = places as usize;
        if digits.len() <= places {
            digits = format!("{}{}", "0".repeat(places + 1 - digits.len()), digits);
        }

        let mut out = String::new();
        if negative && digits.chars().any(|c| c != '0') {
            out.push('-');
        }
        if places == 0 {
            out.push_str(&digits);
        } else {
            let (int_part, frac_part) = digits.split_at(digits.len() - places);
            out.push_str(int_part);
            out.push('.');
            out.push_str(frac_part);
        }
        out
    }
}

/// Parse an unsigned-or-signed decimal with optional exponent into an exact rational.
///
/// Returns `None` when the text is not a decimal literal at all and
/// `Some(Err(..))` when it is one but the exponent is out of range.
fn parse_decimal(s: &str) -> Option<Result<RBig, NumberError>> {
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (mantissa, exponent) = match body.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let (int_digits, frac_digits) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_digits) || !all_digits(frac_digits) {
        return None;
    }

    let exp: i64 = match exponent {
        Some(e) => e.parse().ok()?,
        None => 0,
    };
    if exp.abs() > MAX_DECIMAL_EXPONENT {
        return Some(Err(NumberError::Overflow));
    }

    let digits = format!("{}{}", int_digits, frac_digits);
    let mut significand: IBig = IBig::from(digits.parse::<UBig>().ok()?);
    if negative {
        significand = -significand;
    }

    // value = significand * 10^(exp - frac_len)
    let shift = exp - frac_digits.len() as i64;
    let power = UBig::from(10u8).pow(shift.unsigned_abs() as usize);
    let value = if shift >= 0 {
        RBig::from(significand * IBig::from(power))
    } else {
        RBig::from_parts(significand, power)
    };
    Some(Ok(value))
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.inner.numerator())
        } else {
            write!(f, "{}/{}", self.inner.numerator(), self.inner.denominator())
        }
    }
}

impl std::str::FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::from_str(s)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::from_i64(n)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.numerator().hash(state);
        self.inner.denominator().hash(state);
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::zero()
    }
}
