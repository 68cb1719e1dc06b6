//! Text normalization applied before every unit lookup
//!
//! The rules are plain data applied in order. No replacement produces text
//! that another rule would match again, so normalizing twice is the same as
//! normalizing once.

/// Ordered `(pattern, replacement)` rules
pub static RULES: &[(&str, &str)] = &[
    // superscript exponents
    ("⁰", "0"),
    ("¹", "1"),
    ("²", "2"),
    ("³", "3"),
    ("⁴", "4"),
    ("⁵", "5"),
    ("⁶", "6"),
    ("⁷", "7"),
    ("⁸", "8"),
    ("⁹", "9"),
    ("⁺", "+"),
    ("⁻", "-"),
    // multiplication glyphs
    ("⋅", "*"),
    ("·", "*"),
    ("×", "*"),
    // spelled-out division
    (" per ", "/"),
    // whitespace around operators
    (" *", "*"),
    ("* ", "*"),
    (" /", "/"),
    ("/ ", "/"),
    // greek mu to micro sign
    ("μ", "µ"),
    // regional spellings
    ("meter", "metre"),
    ("liter", "litre"),
];

/// Collapse whitespace runs, then apply [`RULES`] in order
pub fn normalize(text: &str) -> String {
    let mut out = text.split_whitespace().collect::<Vec<_>>().join(" ");
    for &(pattern, replacement) in RULES {
        if out.contains(pattern) {
            out = out.replace(pattern, replacement);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superscripts() {
        assert_eq!(normalize("m²"), "m2");
        assert_eq!(normalize("s⁻¹"), "s-1");
        assert_eq!(normalize("m⁺³"), "m+3");
    }

    #[test]
    fn test_multiplication_glyphs() {
        assert_eq!(normalize("N⋅m"), "N*m");
        assert_eq!(normalize("N·m"), "N*m");
        assert_eq!(normalize("kg × m"), "kg*m");
        assert_eq!(normalize("kg * m"), "kg*m");
    }

    #[test]
    fn test_per() {
        assert_eq!(normalize("metres per second"), "metres/second");
        assert_eq!(normalize("km / h"), "km/h");
    }

    #[test]
    fn test_regional_spelling() {
        assert_eq!(normalize("kilometer"), "kilometre");
        assert_eq!(normalize("milliliter"), "millilitre");
        assert_eq!(normalize("meters per second"), "metres/second");
    }

    #[test]
    fn test_micro_sign() {
        assert_eq!(normalize("μm"), "µm");
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(normalize("  metre \n"), "metre");
        assert_eq!(normalize("kg  *   m"), "kg*m");
        assert_eq!(normalize("metres  per\tsecond"), "metres/second");
    }

    #[test]
    fn test_idempotent() {
        let inputs = ["kg⋅m/s²", "meters per second", "  km × h⁻¹ ", "μs", "liter", "m * s / kg"];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_rules_are_data() {
        assert!(RULES.iter().any(|(p, r)| *p == " per " && *r == "/"));
        assert!(RULES.iter().all(|(p, _)| !p.is_empty()));
    }
}
