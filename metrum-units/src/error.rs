//! Errors raised while loading, parsing and converting units
//!
//! Parsing and conversion errors are returned to the caller untouched.
//! Load-time errors abort registry construction as a whole.

use metrum_core::NumberError;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_UNIT: &str = "INVALID_UNIT";
    pub const DUPLICATE_UNIT: &str = "DUPLICATE_UNIT";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const COMPOSITION: &str = "COMPOSITION";
    pub const MULTIPLE_DIVISION: &str = "MULTIPLE_DIVISION";
    pub const DEFINITION: &str = "DEFINITION";
    pub const INVALID_EXPONENT: &str = "INVALID_EXPONENT";
    pub const EXPONENT_OVERFLOW: &str = "EXPONENT_OVERFLOW";
    pub const CONVERTER: &str = "CONVERTER";
    pub const NUMBER: &str = "NUMBER";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// Name or expression does not resolve to a known unit
    #[error("unknown unit: {0}")]
    InvalidUnit(String),

    /// Alias collision during registry construction
    #[error("duplicate unit name '{name}' (already registered for {existing})")]
    DuplicateUnit { name: String, existing: String },

    /// Source and target dimensions differ
    #[error("cannot convert {from} to {to}: incompatible dimensions")]
    IncompatibleUnits { from: String, to: String },

    /// Affine temperature unit used inside a composite expression
    #[error("cannot combine affine unit '{unit}' with other units in '{expression}'")]
    Composition { unit: String, expression: String },

    /// More than one division operator in a unit expression
    #[error("unsupported unit expression '{0}': multiple division operators are not supported")]
    MultipleDivision(String),

    /// Malformed or incomplete definition record
    #[error("invalid definition for unit '{unit}' in {file}: {reason}")]
    Definition { unit: String, file: String, reason: String },

    /// Zero exponent passed to a power operation
    #[error("invalid exponent: {0}")]
    InvalidExponent(i32),

    /// Combined exponent of a dimension or unit name does not fit in an i32
    #[error("exponent of '{0}' is out of range")]
    ExponentOverflow(String),

    /// Internal inconsistency detected during conversion
    #[error("converter error: {0}")]
    Converter(String),

    #[error(transparent)]
    Number(#[from] NumberError),
}

impl UnitError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            UnitError::InvalidUnit(_) => codes::INVALID_UNIT,
            UnitError::DuplicateUnit { .. } => codes::DUPLICATE_UNIT,
            UnitError::IncompatibleUnits { .. } => codes::INCOMPATIBLE_UNITS,
            UnitError::Composition { .. } => codes::COMPOSITION,
            UnitError::MultipleDivision(_) => codes::MULTIPLE_DIVISION,
            UnitError::Definition { .. } => codes::DEFINITION,
            UnitError::InvalidExponent(_) => codes::INVALID_EXPONENT,
            UnitError::ExponentOverflow(_) => codes::EXPONENT_OVERFLOW,
            UnitError::Converter(_) => codes::CONVERTER,
            UnitError::Number(_) => codes::NUMBER,
        }
    }

    /// Load-time and internal errors abort the caller; the rest are recoverable
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            UnitError::DuplicateUnit { .. }
                | UnitError::Definition { .. }
                | UnitError::InvalidExponent(_)
                | UnitError::Converter(_)
        )
    }

    pub(crate) fn definition(
        unit: impl Into<String>,
        file: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        UnitError::Definition {
            unit: unit.into(),
            file: file.into(),
            reason: reason.into(),
        }
    }
}
