//! Metric and binary prefix tables
//!
//! Tables are static data. Which table a unit may be scaled by is chosen
//! by the [`PrefixFamily`] tag on its definition.

use metrum_core::{Number, NumberError};
use serde::{Deserialize, Serialize};

/// A multiplicative modifier such as kilo (k, 10^3) or kibi (Ki, 2^10)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    pub name: &'static str,
    pub symbol: &'static str,
    base: u32,
    exponent: i32,
}

impl Prefix {
    const fn decimal(name: &'static str, symbol: &'static str, exponent: i32) -> Self {
        Prefix { name, symbol, base: 10, exponent }
    }

    const fn binary(name: &'static str, symbol: &'static str, exponent: i32) -> Self {
        Prefix { name, symbol, base: 2, exponent }
    }

    /// Exact multiplicative factor
    pub fn factor(&self) -> Result<Number, NumberError> {
        Number::from_i64(i64::from(self.base)).pow(self.exponent)
    }
}

/// SI prefixes, quecto (10^-30) through quetta (10^30)
pub static METRIC: [Prefix; 24] = [
    Prefix::decimal("quecto", "q", -30),
    Prefix::decimal("ronto", "r", -27),
    Prefix::decimal("yocto", "y", -24),
    Prefix::decimal("zepto", "z", -21),
    Prefix::decimal("atto", "a", -18),
    Prefix::decimal("femto", "f", -15),
    Prefix::decimal("pico", "p", -12),
    Prefix::decimal("nano", "n", -9),
    Prefix::decimal("micro", "µ", -6),
    Prefix::decimal("milli", "m", -3),
    Prefix::decimal("centi", "c", -2),
    Prefix::decimal("deci", "d", -1),
    Prefix::decimal("deca", "da", 1),
    Prefix::decimal("hecto", "h", 2),
    Prefix::decimal("kilo", "k", 3),
    Prefix::decimal("mega", "M", 6),
    Prefix::decimal("giga", "G", 9),
    Prefix::decimal("tera", "T", 12),
    Prefix::decimal("peta", "P", 15),
    Prefix::decimal("exa", "E", 18),
    Prefix::decimal("zetta", "Z", 21),
    Prefix::decimal("yotta", "Y", 24),
    Prefix::decimal("ronna", "R", 27),
    Prefix::decimal("quetta", "Q", 30),
];

/// IEC binary prefixes, kibi (2^10) through yobi (2^80)
pub static BINARY: [Prefix; 8] = [
    Prefix::binary("kibi", "Ki", 10),
    Prefix::binary("mebi", "Mi", 20),
    Prefix::binary("gibi", "Gi", 30),
    Prefix::binary("tebi", "Ti", 40),
    Prefix::binary("pebi", "Pi", 50),
    Prefix::binary("exbi", "Ei", 60),
    Prefix::binary("zebi", "Zi", 70),
    Prefix::binary("yobi", "Yi", 80),
];

/// Which prefix table a unit definition may be expanded with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixFamily {
    #[default]
    None,
    Metric,
    Binary,
    /// Metric kilo..quetta only
    Bit,
    /// Bit prefixes plus binary prefixes
    Byte,
    /// Every metric and binary prefix
    All,
}

impl PrefixFamily {
    /// Prefixes in this family, in table order
    pub fn prefixes(self) -> Vec<&'static Prefix> {
        let large_metric = || METRIC.iter().filter(|p| p.exponent >= 3);
        match self {
            PrefixFamily::None => Vec::new(),
            PrefixFamily::Metric => METRIC.iter().collect(),
            PrefixFamily::Binary => BINARY.iter().collect(),
            PrefixFamily::Bit => large_metric().collect(),
            PrefixFamily::Byte => large_metric().chain(BINARY.iter()).collect(),
            PrefixFamily::All => METRIC.iter().chain(BINARY.iter()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(name: &str) -> &'static Prefix {
        METRIC.iter().chain(BINARY.iter()).find(|p| p.name == name).unwrap()
    }

    #[test]
    fn test_factors() {
        assert_eq!(find("kilo").factor().unwrap(), Number::from_i64(1000));
        assert_eq!(find("milli").factor().unwrap(), Number::from_ratio(1, 1000).unwrap());
        assert_eq!(find("kibi").factor().unwrap(), Number::from_i64(1024));
        assert_eq!(find("quetta").factor().unwrap(), Number::from_str("1e30").unwrap());
        assert_eq!(find("quecto").factor().unwrap(), Number::from_str("1e-30").unwrap());
        assert_eq!(find("yobi").factor().unwrap(), Number::from_i64(2).pow(80).unwrap());
    }

    #[test]
    fn test_family_sizes() {
        assert!(PrefixFamily::None.prefixes().is_empty());
        assert_eq!(PrefixFamily::Metric.prefixes().len(), 24);
        assert_eq!(PrefixFamily::Binary.prefixes().len(), 8);
        assert_eq!(PrefixFamily::Bit.prefixes().len(), 10);
        assert_eq!(PrefixFamily::Byte.prefixes().len(), 18);
        assert_eq!(PrefixFamily::All.prefixes().len(), 32);
    }

    #[test]
    fn test_bit_family_starts_at_kilo() {
        let bit = PrefixFamily::Bit.prefixes();
        assert_eq!(bit.first().map(|p| p.name), Some("kilo"));
        assert_eq!(bit.last().map(|p| p.name), Some("quetta"));
    }

    #[test]
    fn test_symbols_unique_within_all() {
        let all = PrefixFamily::All.prefixes();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.symbol, b.symbol);
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_family_serde() {
        let f: PrefixFamily = serde_json::from_str("\"byte\"").unwrap();
        assert_eq!(f, PrefixFamily::Byte);
        let f: Option<PrefixFamily> = serde_json::from_str("null").unwrap();
        assert_eq!(f, None);
    }
}
