//! Built-in unit library organized by category
//!
//! Stands in for the definition files a loader would normally provide. Every
//! factor is relative to the implicit base unit of its dimension: metre,
//! kilogram, second, kelvin, ampere, mole, candela, degree and bit.

use metrum_core::Number;

use crate::dimension::{
    AMOUNT, ANGLE, CURRENT, INFORMATION, LENGTH, LUMINOSITY, MASS, TEMPERATURE, TIME,
};
use crate::{AliasRecord, Dimension, PrefixFamily, UnitDefinition, UnitError};

/// All standard unit definitions, in registration order
pub fn standard_definitions() -> Result<Vec<UnitDefinition>, UnitError> {
    let mut defs = Vec::new();
    length_units(&mut defs)?;
    mass_units(&mut defs)?;
    time_units(&mut defs)?;
    temperature_units(&mut defs)?;
    base_si_units(&mut defs)?;
    area_volume_units(&mut defs)?;
    derived_si_units(&mut defs)?;
    energy_power_pressure_units(&mut defs)?;
    angle_units(&mut defs)?;
    data_units(&mut defs)?;
    Ok(defs)
}

/// Standard alias record; targets may be composite expressions
pub fn standard_aliases() -> AliasRecord {
    [
        ("kph", "kilometre/hour"),
        ("kmh", "km/h"),
        ("mph", "mile/hour"),
        ("fps", "ft/s"),
        ("mps", "m/s"),
        ("gsm", "gram/metre^2"),
        ("sqm", "m^2"),
        ("sqft", "ft^2"),
        ("cc", "cm^3"),
        ("rpm", "turn/minute"),
    ]
    .into_iter()
    .map(|(alias, target)| (alias.to_string(), target.to_string()))
    .collect()
}

fn num(s: &str) -> Result<Number, UnitError> {
    Ok(Number::from_str(s)?)
}

fn dim(exponents: &[(&str, i32)]) -> Dimension {
    Dimension::from_map(exponents.iter().copied())
}

fn unit(name: &str, factor: &str, dimension: Dimension) -> Result<UnitDefinition, UnitError> {
    Ok(UnitDefinition::new(name, num(factor)?, dimension))
}

fn length_units(defs: &mut Vec<UnitDefinition>) -> Result<(), UnitError> {
    let length = || Dimension::base(LENGTH);

    defs.push(
        unit("metre", "1", length())?
            .with_symbols(&["m"])
            .with_aliases(&["metres"])
            .with_prefix(PrefixFamily::Metric),
    );

    // Imperial/US
    defs.push(unit("inch", "0.0254", length())?.with_symbols(&["in"]).with_aliases(&["inches"]));
    defs.push(unit("foot", "0.3048", length())?.with_symbols(&["ft"]).with_aliases(&["feet"]));
    defs.push(unit("yard", "0.9144", length())?.with_symbols(&["yd"]).with_aliases(&["yards"]));
    defs.push(unit("mile", "1609.344", length())?.with_symbols(&["mi"]).with_aliases(&["miles"]));
    defs.push(
        unit("nautical_mile", "1852", length())?
            .with_symbols(&["nmi"])
            .with_aliases(&["nautical mile"]),
    );

    // Astronomical
    defs.push(
        unit("astronomical_unit", "149597870700", length())?
            .with_symbols(&["au", "AU"])
            .with_aliases(&["astronomical unit"]),
    );
    defs.push(
        unit("light_year", "9460730472580800", length())?
            .with_symbols(&["ly"])
            .with_aliases(&["light year", "light years"]),
    );
    Ok(())
}

fn mass_units(defs: &mut Vec<UnitDefinition>) -> Result<(), UnitError> {
    let mass = || Dimension::base(MASS);

    // kilogram is the base, so the gram carries 1/1000
    defs.push(
        unit("gram", "0.001", mass())?
            .with_symbols(&["g"])
            .with_aliases(&["grams"])
            .with_prefix(PrefixFamily::Metric),
    );
    defs.push(
        unit("tonne", "1000", mass())?
            .with_symbols(&["t"])
            .with_aliases(&["tonnes", "metric ton"]),
    );

    defs.push(
        unit("pound", "0.45359237", mass())?
            .with_symbols(&["lb"])
            .with_aliases(&["pounds", "lbs"]),
    );
    defs.push(
        unit("ounce", "0.028349523125", mass())?
            .with_symbols(&["oz"])
            .with_aliases(&["ounces"]),
    );
    defs.push(unit("stone", "6.35029318", mass())?.with_symbols(&["st"]));
    Ok(())
}

fn time_units(defs: &mut Vec<UnitDefinition>) -> Result<(), UnitError> {
    let time = || Dimension::base(TIME);

    defs.push(
        unit("second", "1", time())?
            .with_symbols(&["s"])
            .with_aliases(&["seconds", "sec", "secs"])
            .with_prefix(PrefixFamily::Metric),
    );
    defs.push(
        unit("minute", "60", time())?
            .with_symbols(&["min"])
            .with_aliases(&["minutes", "mins"]),
    );
    defs.push(
        unit("hour", "3600", time())?
            .with_symbols(&["h", "hr"])
            .with_aliases(&["hours", "hrs"]),
    );
    defs.push(unit("day", "86400", time())?.with_symbols(&["d"]).with_aliases(&["days"]));
    defs.push(unit("week", "604800", time())?.with_symbols(&["wk"]).with_aliases(&["weeks"]));
    // Julian year
    defs.push(unit("year", "31557600", time())?.with_symbols(&["yr"]).with_aliases(&["years"]));
    Ok(())
}

fn temperature_units(defs: &mut Vec<UnitDefinition>) -> Result<(), UnitError> {
    let temperature = || Dimension::base(TEMPERATURE);

    defs.push(
        unit("kelvin", "1", temperature())?
            .with_symbols(&["K"])
            .with_prefix(PrefixFamily::Metric),
    );
    defs.push(
        unit("celsius", "1", temperature())?
            .with_symbols(&["°C", "degC"])
            .with_aliases(&["degree celsius", "degrees celsius"])
            .with_offset(num("273.15")?),
    );
    defs.push(
        unit("fahrenheit", "1", temperature())?
            .with_symbols(&["°F", "degF"])
            .with_aliases(&["degree fahrenheit", "degrees fahrenheit"])
            .with_offset(num("459.67")?),
    );
    defs.push(
        unit("rankine", "1", temperature())?
            .with_symbols(&["°R", "degR"])
            .with_offset(Number::zero()),
    );
    Ok(())
}

fn base_si_units(defs: &mut Vec<UnitDefinition>) -> Result<(), UnitError> {
    defs.push(
        unit("ampere", "1", Dimension::base(CURRENT))?
            .with_symbols(&["A"])
            .with_aliases(&["amperes", "amp", "amps"])
            .with_prefix(PrefixFamily::Metric),
    );
    defs.push(
        unit("mole", "1", Dimension::base(AMOUNT))?
            .with_symbols(&["mol"])
            .with_aliases(&["moles"])
            .with_prefix(PrefixFamily::Metric),
    );
    defs.push(
        unit("candela", "1", Dimension::base(LUMINOSITY))?
            .with_symbols(&["cd"])
            .with_prefix(PrefixFamily::Metric),
    );
    Ok(())
}

fn area_volume_units(defs: &mut Vec<UnitDefinition>) -> Result<(), UnitError> {
    let area = || dim(&[(LENGTH, 2)]);
    let volume = || dim(&[(LENGTH, 3)]);

    defs.push(unit("hectare", "10000", area())?.with_symbols(&["ha"]).with_aliases(&["hectares"]));
    defs.push(unit("acre", "4046.8564224", area())?.with_symbols(&["ac"]).with_aliases(&["acres"]));

    defs.push(
        unit("litre", "0.001", volume())?
            .with_symbols(&["L", "l"])
            .with_aliases(&["litres"])
            .with_prefix(PrefixFamily::Metric),
    );
    defs.push(
        unit("gallon", "0.003785411784", volume())?
            .with_symbols(&["gal"])
            .with_aliases(&["gallons"]),
    );
    defs.push(unit("imperial_gallon", "0.00454609", volume())?.with_aliases(&["imperial gallon"]));
    Ok(())
}

fn derived_si_units(defs: &mut Vec<UnitDefinition>) -> Result<(), UnitError> {
    let derived = [
        ("newton", "N", dim(&[(MASS, 1), (LENGTH, 1), (TIME, -2)])),
        ("joule", "J", dim(&[(MASS, 1), (LENGTH, 2), (TIME, -2)])),
        ("watt", "W", dim(&[(MASS, 1), (LENGTH, 2), (TIME, -3)])),
        ("pascal", "Pa", dim(&[(MASS, 1), (LENGTH, -1), (TIME, -2)])),
        ("hertz", "Hz", dim(&[(TIME, -1)])),
        ("coulomb", "C", dim(&[(CURRENT, 1), (TIME, 1)])),
        ("volt", "V", dim(&[(MASS, 1), (LENGTH, 2), (TIME, -3), (CURRENT, -1)])),
        ("ohm", "Ω", dim(&[(MASS, 1), (LENGTH, 2), (TIME, -3), (CURRENT, -2)])),
    ];

    for (name, symbol, dimension) in derived {
        defs.push(
            UnitDefinition::new(name, Number::one(), dimension)
                .with_symbols(&[symbol])
                .with_prefix(PrefixFamily::Metric),
        );
    }
    Ok(())
}

fn energy_power_pressure_units(defs: &mut Vec<UnitDefinition>) -> Result<(), UnitError> {
    let energy = || dim(&[(MASS, 1), (LENGTH, 2), (TIME, -2)]);
    let power = || dim(&[(MASS, 1), (LENGTH, 2), (TIME, -3)]);
    let pressure = || dim(&[(MASS, 1), (LENGTH, -1), (TIME, -2)]);
    let force = || dim(&[(MASS, 1), (LENGTH, 1), (TIME, -2)]);

    // Energy
    defs.push(
        unit("calorie", "4.184", energy())?
            .with_symbols(&["cal"])
            .with_aliases(&["calories"])
            .with_prefix(PrefixFamily::Metric),
    );
    defs.push(
        unit("electronvolt", "1.602176634e-19", energy())?
            .with_symbols(&["eV"])
            .with_prefix(PrefixFamily::Metric),
    );
    defs.push(
        unit("watt_hour", "3600", energy())?
            .with_symbols(&["Wh"])
            .with_prefix(PrefixFamily::Metric),
    );

    // Power: mechanical horsepower, 550 ft*lbf/s
    defs.push(unit("horsepower", "745.69987158227022", power())?.with_symbols(&["hp"]));

    // Pressure; "bar" is its own symbol, so it only has the name
    defs.push(unit("bar", "100000", pressure())?.with_prefix(PrefixFamily::Metric));
    defs.push(
        unit("atmosphere", "101325", pressure())?
            .with_symbols(&["atm"])
            .with_aliases(&["atmospheres"]),
    );

    let lbf = num("4.4482216152605")?;
    let square_inch = num("0.0254")?.pow(2)?;
    defs.push(
        UnitDefinition::new("pound_per_square_inch", lbf.checked_div(&square_inch)?, pressure())
            .with_symbols(&["psi"])
            .with_aliases(&["pound per square inch"]),
    );
    defs.push(UnitDefinition::new("pound_force", lbf, force()).with_symbols(&["lbf"]));

    let speed = dim(&[(LENGTH, 1), (TIME, -1)]);
    defs.push(
        UnitDefinition::new("knot", Number::from_ratio(1852, 3600)?, speed)
            .with_symbols(&["kn", "kt"])
            .with_aliases(&["knots"]),
    );
    Ok(())
}

fn angle_units(defs: &mut Vec<UnitDefinition>) -> Result<(), UnitError> {
    let angle = || Dimension::base(ANGLE);

    defs.push(
        unit("degree", "1", angle())?
            .with_symbols(&["deg", "°"])
            .with_aliases(&["degrees"]),
    );
    defs.push(
        UnitDefinition::new("arcminute", Number::from_ratio(1, 60)?, angle())
            .with_symbols(&["arcmin"])
            .with_aliases(&["arcminutes"]),
    );
    defs.push(
        UnitDefinition::new("arcsecond", Number::from_ratio(1, 3600)?, angle())
            .with_symbols(&["arcsec"])
            .with_aliases(&["arcseconds"]),
    );
    defs.push(
        unit("turn", "360", angle())?
            .with_symbols(&["rev"])
            .with_aliases(&["turns", "revolution", "revolutions"]),
    );
    Ok(())
}

fn data_units(defs: &mut Vec<UnitDefinition>) -> Result<(), UnitError> {
    let information = || Dimension::base(INFORMATION);

    defs.push(
        unit("bit", "1", information())?
            .with_symbols(&["b"])
            .with_aliases(&["bits"])
            .with_prefix(PrefixFamily::Bit),
    );
    defs.push(
        unit("byte", "8", information())?
            .with_symbols(&["B"])
            .with_aliases(&["bytes"])
            .with_prefix(PrefixFamily::Byte),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Registry, UnitParser};

    #[test]
    fn test_standard_registry_builds() {
        let registry = Registry::standard().unwrap();
        assert_eq!(registry.definitions().len(), standard_definitions().unwrap().len());
        let keys = [
            "m", "kg", "s", "K", "°C", "mol", "cd", "N", "kWh", "MiB", "Gb", "psi", "kph", "rpm",
        ];
        for key in keys {
            assert!(registry.contains(key), "missing {}", key);
        }
        assert!(!registry.contains("unknown_xyz"));
    }

    #[test]
    fn test_kilogram_is_base() {
        let registry = Registry::standard().unwrap();
        assert_eq!(registry.get_unit("kg").unwrap().factor(), &Number::one());
        assert_eq!(registry.get_unit("kilograms").unwrap().to_string(), "kilogram");
    }

    #[test]
    fn test_newton_matches_composite() {
        let registry = Registry::standard().unwrap();
        let parser = UnitParser::new(&registry);
        let composite = parser.parse("kg*m/s^2").unwrap();
        let newton = registry.get_unit("newton").unwrap();
        assert_eq!(composite.factor(), newton.factor());
        assert_eq!(composite.dimension(), newton.dimension());
    }

    #[test]
    fn test_derived_units_match_composites() {
        let registry = Registry::standard().unwrap();
        let parser = UnitParser::new(&registry);
        let pairs = [
            ("J", "N*m"),
            ("W", "J/s"),
            ("Pa", "N/m^2"),
            ("V", "W/A"),
            ("Ω", "V/A"),
            ("C", "A*s"),
        ];
        for (named, composite) in pairs {
            let a = parser.parse(named).unwrap();
            let b = parser.parse(composite).unwrap();
            assert_eq!(a.dimension(), b.dimension(), "{} vs {}", named, composite);
            assert_eq!(a.factor(), b.factor(), "{} vs {}", named, composite);
        }
    }

    #[test]
    fn test_kilo_and_kibi_factors() {
        let registry = Registry::standard().unwrap();
        for definition in registry.definitions() {
            let base = definition.factor();
            let prefixes = definition.prefix().prefixes();
            if let Some(kilo) = prefixes.iter().find(|p| p.name == "kilo") {
                let key = format!("{}{}", kilo.name, definition.name());
                let unit = registry.get_unit(&key).unwrap();
                assert_eq!(unit.factor(), &base.mul(&Number::from_i64(1000)));
            }
            if let Some(kibi) = prefixes.iter().find(|p| p.name == "kibi") {
                let key = format!("{}{}", kibi.name, definition.name());
                let unit = registry.get_unit(&key).unwrap();
                assert_eq!(unit.factor(), &base.mul(&Number::from_i64(1024)));
            }
        }
    }

    #[test]
    fn test_psi_factor() {
        let registry = Registry::standard().unwrap();
        let psi = registry.get_unit("psi").unwrap();
        let lbf = Number::from_str("4.4482216152605").unwrap();
        let square_inch = Number::from_str("0.00064516").unwrap();
        let expected = lbf.checked_div(&square_inch).unwrap();
        assert_eq!(psi.factor(), &expected);
        assert_eq!(psi.dimension().common_name(), Some("pressure"));
    }

    #[test]
    fn test_aliases_resolve() {
        let registry = Registry::standard().unwrap();
        let factor = |key: &str| registry.get_unit(key).unwrap().factor().clone();
        assert_eq!(factor("mph"), Number::from_str("0.44704").unwrap());
        assert_eq!(registry.get_unit("gsm").unwrap().to_string(), "gram/metre^2");
        assert_eq!(factor("cc"), Number::from_str("0.000001").unwrap());
        assert_eq!(
            registry.get_unit("pound per square inch").unwrap().to_string(),
            "pound_per_square_inch"
        );
    }

    #[test]
    fn test_temperature_scales_are_affine() {
        let registry = Registry::standard().unwrap();
        assert!(!registry.get_unit("K").unwrap().is_affine());
        for name in ["celsius", "fahrenheit", "rankine"] {
            assert!(registry.get_unit(name).unwrap().is_affine(), "{}", name);
        }
    }
}
