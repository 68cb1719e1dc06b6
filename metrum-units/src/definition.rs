//! Unit definitions - templates for a base unit before prefix expansion
//!
//! Definitions come either from code (the standard library) or from raw
//! [`DefinitionRecord`]s handed over by a file loader.

use std::collections::BTreeMap;

use metrum_core::{Number, NumberError};
use serde::{Deserialize, Serialize};

use crate::dimension::{self, Dimension};
use crate::prefix::{Prefix, PrefixFamily};
use crate::{Unit, UnitError};

/// Source label used when a record does not say where it came from
const INLINE_SOURCE: &str = "<inline>";

/// One base unit before prefixing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDefinition {
    name: String,
    symbols: Vec<String>,
    aliases: Vec<String>,
    factor: Number,
    offset: Option<Number>,
    dimension: Dimension,
    prefix: PrefixFamily,
}

impl UnitDefinition {
    /// Create a definition with no symbols, aliases or prefixes
    pub fn new(name: &str, factor: Number, dimension: Dimension) -> Self {
        UnitDefinition {
            name: name.to_string(),
            symbols: Vec::new(),
            aliases: Vec::new(),
            factor,
            offset: None,
            dimension,
            prefix: PrefixFamily::None,
        }
    }

    /// Builder: set symbols
    pub fn with_symbols(mut self, symbols: &[&str]) -> Self {
        self.symbols = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Builder: set aliases
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Builder: set the affine offset (temperature scales only)
    pub fn with_offset(mut self, offset: Number) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Builder: set the prefix family
    pub fn with_prefix(mut self, prefix: PrefixFamily) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn factor(&self) -> &Number {
        &self.factor
    }

    pub fn offset(&self) -> Option<&Number> {
        self.offset.as_ref()
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    pub fn prefix(&self) -> PrefixFamily {
        self.prefix
    }

    /// Every string this definition answers to: name, symbols, then aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.symbols.iter().map(String::as_str))
            .chain(self.aliases.iter().map(String::as_str))
    }

    /// Derive the prefixed definition, e.g. metre -> kilometre.
    ///
    /// The result never carries a prefix family of its own, so it cannot be
    /// expanded again.
    pub fn apply_prefix(&self, prefix: &Prefix) -> Result<UnitDefinition, NumberError> {
        Ok(UnitDefinition {
            name: format!("{}{}", prefix.name, self.name),
            symbols: self.symbols.iter().map(|s| format!("{}{}", prefix.symbol, s)).collect(),
            aliases: self.aliases.iter().map(|a| format!("{}{}", prefix.name, a)).collect(),
            factor: self.factor.mul(&prefix.factor()?),
            offset: self.offset.clone(),
            dimension: self.dimension.clone(),
            prefix: PrefixFamily::None,
        })
    }

    /// The resolved unit this definition describes
    pub fn to_unit(&self) -> Unit {
        Unit::named(&self.name, self.factor.clone(), self.dimension.clone(), self.offset.clone())
    }

    /// Check the invariants a definition must satisfy before registration
    pub fn validate(&self, file: &str) -> Result<(), UnitError> {
        if self.name.trim().is_empty() {
            return Err(UnitError::definition(&self.name, file, "empty unit name"));
        }
        if let Some(empty) = self.names().find(|n| n.trim().is_empty()) {
            let reason = format!("empty symbol or alias {:?}", empty);
            return Err(UnitError::definition(&self.name, file, reason));
        }
        if self.factor.is_zero() || self.factor.is_negative() {
            let reason = format!("factor must be positive, got {}", self.factor);
            return Err(UnitError::definition(&self.name, file, reason));
        }
        if self.offset.is_some() && self.dimension != Dimension::base(dimension::TEMPERATURE) {
            let reason = "offset is only allowed on temperature units";
            return Err(UnitError::definition(&self.name, file, reason));
        }
        Ok(())
    }

    /// Build from a raw record, reporting missing or malformed fields
    pub fn from_record(record: &DefinitionRecord) -> Result<Self, UnitError> {
        let file = record.source.as_deref().unwrap_or(INLINE_SOURCE);
        let name = record.name.as_str();

        let factor = match &record.factor {
            Some(raw) => raw.to_number(name, file)?,
            None => return Err(UnitError::definition(name, file, "missing factor")),
        };
        let dimension = match &record.dimension {
            Some(raw) => raw.to_dimension(),
            None => return Err(UnitError::definition(name, file, "missing dimension")),
        };
        let offset = match &record.offset {
            Some(raw) => Some(raw.to_number(name, file)?),
            None => None,
        };

        let definition = UnitDefinition {
            name: name.to_string(),
            symbols: record.symbols.clone(),
            aliases: record.aliases.clone(),
            factor,
            offset,
            dimension,
            prefix: record.prefix.unwrap_or_default(),
        };
        definition.validate(file)?;
        Ok(definition)
    }
}

/// A raw definition as produced by a file loader
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionRecord {
    pub name: String,
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub factor: Option<RawFactor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<RawFactor>,
    #[serde(default)]
    pub dimension: Option<RawDimension>,
    #[serde(default)]
    pub prefix: Option<PrefixFamily>,
    /// File the record was read from; filled in by the loader
    #[serde(skip)]
    pub source: Option<String>,
}

/// A factor as written in a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFactor {
    Integer(i64),
    Text(String),
    /// Accepted by the deserializer only to be rejected with a clear message
    Float(f64),
}

impl RawFactor {
    fn to_number(&self, unit: &str, file: &str) -> Result<Number, UnitError> {
        match self {
            RawFactor::Integer(n) => Ok(Number::from_i64(*n)),
            RawFactor::Text(s) => Number::from_str(s).map_err(|e| {
                UnitError::definition(unit, file, format!("bad factor {:?}: {}", s, e))
            }),
            RawFactor::Float(f) => Err(UnitError::definition(
                unit,
                file,
                format!("factor {} is a float and may be inexact; write it as a string", f),
            )),
        }
    }
}

/// A dimension as written in a definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDimension {
    Name(String),
    Map(BTreeMap<String, i32>),
}

impl RawDimension {
    fn to_dimension(&self) -> Dimension {
        match self {
            RawDimension::Name(name) if name.is_empty() || name == "dimensionless" => {
                Dimension::dimensionless()
            }
            RawDimension::Name(name) => Dimension::base(name),
            RawDimension::Map(map) => Dimension::from_map(map.clone()),
        }
    }
}
