//! Metrum Units - dimensional analysis and exact unit conversion
//!
//! Units are resolved from a read-only [`Registry`] built once from unit
//! definitions. Prefixed variants (kilometre, kibibyte, ...) are generated
//! from the definition's prefix family. Expressions such as "kg*m/s^2" or
//! "metres per second" are normalized and parsed by [`UnitParser`], and
//! [`Converter`] converts values with exact rational arithmetic.
//!
//! Categories in the standard library:
//! - Length (m, km, ft, mi, nmi, au, ly)
//! - Mass (g, kg, t, lb, oz, st)
//! - Time (s, min, h, d, wk, yr)
//! - Temperature (K, °C, °F, °R)
//! - Current, amount, luminosity (A, mol, cd)
//! - Area and volume (ha, ac, L, gal)
//! - Derived SI (N, J, W, Pa, Hz, C, V, Ω)
//! - Energy, power, pressure (cal, eV, Wh, hp, bar, atm, psi)
//! - Angle (deg, arcmin, arcsec, rev)
//! - Data (b, B, kB, MiB, ...)

mod convert;
mod definition;
mod dimension;
mod error;
mod normalize;
mod parse;
mod prefix;
mod quantity;
mod registry;
mod unit;
pub mod units;

pub use convert::{convert_value, Converter};
pub use definition::{DefinitionRecord, RawDimension, RawFactor, UnitDefinition};
pub use dimension::{
    Dimension, AMOUNT, ANGLE, CURRENT, INFORMATION, LENGTH, LUMINOSITY, MASS, TEMPERATURE, TIME,
};
pub use error::{codes, UnitError};
pub use normalize::{normalize, RULES};
pub use parse::UnitParser;
pub use prefix::{Prefix, PrefixFamily, BINARY, METRIC};
pub use quantity::Quantity;
pub use registry::{AliasRecord, Registry};
pub use unit::{Unit, UnitName};
