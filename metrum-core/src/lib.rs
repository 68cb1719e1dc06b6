//! Metrum Core - Fundamental types
//!
//! This crate provides the core numeric type used throughout Metrum:
//! - `Number`: Arbitrary precision rational numbers
//! - `NumberError`: Parse and arithmetic failures

mod number;

pub use number::{Number, NumberError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError};
}

#[cfg(test)]
mod tests {
    use super::*;

    mod number_tests {
        use super::*;

        #[test]
        fn test_from_i64() {
            let n = Number::from_i64(42);
            assert_eq!(n.to_i64(), Some(42));
        }

        #[test]
        fn test_from_str_integer() {
            let n = Number::from_str("123").unwrap();
            assert_eq!(n.to_i64(), Some(123));

            let n = Number::from_str("-7").unwrap();
            assert_eq!(n.to_i64(), Some(-7));
        }

        #[test]
        fn test_from_str_decimal_is_exact() {
            let n = Number::from_str("0.3048").unwrap();
            assert_eq!(n, Number::from_ratio(381, 1250).unwrap());
            assert!(!n.is_integer());
        }

        #[test]
        fn test_from_str_fraction() {
            let n = Number::from_str("1/3").unwrap();
            assert!(!n.is_integer());
            assert_eq!(n.mul(&Number::from_i64(3)), Number::one());

            let n = Number::from_str("1.5/2").unwrap();
            assert_eq!(n, Number::from_ratio(3, 4).unwrap());
        }

        #[test]
        fn test_from_str_scientific() {
            let n = Number::from_str("1.5e2").unwrap();
            assert_eq!(n.to_i64(), Some(150));

            let n = Number::from_str("2E-3").unwrap();
            assert_eq!(n, Number::from_ratio(1, 500).unwrap());
        }

        #[test]
        fn test_from_str_scientific_integer_mantissa() {
            let avogadro = Number::from_str("602214076e15").unwrap();
            let expected = Number::from_str("602214076000000000000000").unwrap();
            assert_eq!(avogadro, expected);

            let h = Number::from_str("662607015e-42").unwrap();
            assert!(!h.is_zero());
            assert!(!h.is_negative());
        }

        #[test]
        fn test_from_str_rejects_inexact_input() {
            let rejected = [
                "", "NaN", "inf", "-inf", "1.2.3", "12abc", "e5", "1e", "--1", "1/0", "1/2/3", ".",
            ];
            for bad in rejected {
                assert!(Number::from_str(bad).is_err(), "should reject {:?}", bad);
            }
            assert_eq!(Number::from_str("1/0"), Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_from_str_rejects_huge_exponent() {
            assert_eq!(Number::from_str("1e99999"), Err(NumberError::Overflow));
        }

        #[test]
        fn test_from_ratio_zero_denominator() {
            assert_eq!(Number::from_ratio(1, 0), Err(NumberError::DivisionByZero));
        }

        #[test]
        fn test_arithmetic() {
            let a = Number::from_ratio(1, 3).unwrap();
            let b = Number::from_ratio(1, 6).unwrap();
            assert_eq!(a.add(&b), Number::from_ratio(1, 2).unwrap());
            assert_eq!(a.sub(&b), b);
            assert_eq!(a.mul(&b), Number::from_ratio(1, 18).unwrap());
            assert_eq!(a.checked_div(&b).unwrap(), Number::from_i64(2));
        }

        #[test]
        fn test_div_by_zero() {
            let a = Number::from_i64(5);
            assert!(a.checked_div(&Number::zero()).is_err());
            assert!(Number::zero().recip().is_err());
        }

        #[test]
        fn test_pow() {
            let ten = Number::from_i64(10);
            assert_eq!(ten.pow(3).unwrap(), Number::from_i64(1000));
            assert_eq!(ten.pow(-2).unwrap(), Number::from_ratio(1, 100).unwrap());
            assert_eq!(ten.pow(0).unwrap(), Number::one());
            assert!(Number::zero().pow(-1).is_err());
        }

        #[test]
        fn test_pow_large_and_negative_base() {
            let half = Number::from_ratio(-1, 2).unwrap();
            assert_eq!(half.pow(3).unwrap(), Number::from_ratio(-1, 8).unwrap());
            assert_eq!(half.pow(-3).unwrap(), Number::from_i64(-8));

            let thousand = Number::from_i64(1000);
            let big = thousand.pow(4000).unwrap();
            assert_eq!(big.numerator().to_string().len(), 12001);

            assert_eq!(thousand.pow(100_000), Err(NumberError::Overflow));
            assert_eq!(thousand.pow(i32::MIN), Err(NumberError::Overflow));
        }

        #[test]
        fn test_abs_and_neg() {
            let n = Number::from_ratio(-3, 4).unwrap();
            assert!(n.is_negative());
            assert_eq!(n.abs(), Number::from_ratio(3, 4).unwrap());
            assert_eq!(n.neg(), n.abs());
        }

        #[test]
        fn test_display() {
            assert_eq!(Number::from_i64(-12).to_string(), "-12");
            assert_eq!(Number::from_str("273.15").unwrap().to_string(), "5463/20");
            assert_eq!(Number::from_ratio(2, -4).unwrap().to_string(), "-1/2");
        }

        #[test]
        fn test_as_decimal() {
            let n = Number::from_ratio(1, 3).unwrap();
            assert_eq!(n.as_decimal(4), "0.3333");

            let n = Number::from_ratio(2, 3).unwrap();
            assert_eq!(n.as_decimal(2), "0.67");

            let n = Number::from_str("-1.005").unwrap();
            assert_eq!(n.as_decimal(2), "-1.01");

            let n = Number::from_i64(42);
            assert_eq!(n.as_decimal(0), "42");
            assert_eq!(n.as_decimal(3), "42.000");

            let n = Number::from_str("-0.0001").unwrap();
            assert_eq!(n.as_decimal(2), "0.00");
        }

        #[test]
        fn test_ordering() {
            let a = Number::from_ratio(1, 3).unwrap();
            let b = Number::from_ratio(1, 2).unwrap();
            assert!(a < b);
            assert_eq!(a.clone().max(b.clone()), b);
        }

        #[test]
        fn test_serde_roundtrip_as_string() {
            let n = Number::from_str("0.45359237").unwrap();
            let json = serde_json::to_string(&n).unwrap();
            assert_eq!(json, "\"45359237/100000000\"");
            let back: Number = serde_json::from_str(&json).unwrap();
            assert_eq!(back, n);
        }
    }
}
