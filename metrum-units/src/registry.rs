//! Unit registry - the alias table every lookup goes through
//!
//! Built once from definitions plus a supplementary alias record, then
//! read-only. Construction is all-or-nothing: any error discards the
//! partially built table.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, trace};

use crate::definition::{DefinitionRecord, UnitDefinition};
use crate::normalize::normalize;
use crate::parse::UnitParser;
use crate::{units, Unit, UnitError};

/// Extra names mapped to unit expressions, e.g. "mph" -> "mile/hour"
pub type AliasRecord = BTreeMap<String, String>;

/// Source label for alias records in error messages
const ALIAS_SOURCE: &str = "<aliases>";

/// Source label for definitions supplied directly in code
const INLINE_SOURCE: &str = "<inline>";

/// Registry of all known units
///
/// Keys are stored normalized, so spelling variants of one key collide.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    aliases: HashMap<String, Unit>,
    definitions: Vec<UnitDefinition>,
}

impl Registry {
    /// Build from definitions, then resolve the alias record against them
    pub fn build(
        definitions: Vec<UnitDefinition>,
        aliases: &AliasRecord,
    ) -> Result<Registry, UnitError> {
        let mut registry = Registry::default();

        for definition in &definitions {
            definition.validate(INLINE_SOURCE)?;
            let before = registry.aliases.len();
            registry.add_unit(definition)?;
            debug!(
                unit = definition.name(),
                family = ?definition.prefix(),
                keys = registry.aliases.len() - before,
                "registered unit"
            );
        }
        registry.definitions = definitions;

        // Alias targets may name any unit, prefixed or composite, so they
        // are resolved only once every definition is in place.
        for (alias, target) in aliases {
            let unit = UnitParser::new(&registry).parse(target).map_err(|e| {
                let reason = format!("cannot resolve '{}': {}", target, e);
                UnitError::definition(alias, ALIAS_SOURCE, reason)
            })?;
            registry.add_alias(alias, unit)?;
        }

        info!(
            units = registry.definitions.len(),
            aliases = registry.aliases.len(),
            "unit registry built"
        );
        Ok(registry)
    }

    /// Build from raw records as produced by a file loader
    pub fn from_records(
        records: &[DefinitionRecord],
        aliases: &AliasRecord,
    ) -> Result<Registry, UnitError> {
        let definitions = records
            .iter()
            .map(UnitDefinition::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Registry::build(definitions, aliases)
    }

    /// Build the built-in standard unit library
    pub fn standard() -> Result<Registry, UnitError> {
        Registry::build(units::standard_definitions()?, &units::standard_aliases())
    }

    /// Get a unit by name, symbol or alias
    pub fn get_unit(&self, name: &str) -> Result<&Unit, UnitError> {
        self.lookup(&normalize(name))
            .ok_or_else(|| UnitError::InvalidUnit(name.to_string()))
    }

    /// Check whether a name, symbol or alias is known
    pub fn contains(&self, name: &str) -> bool {
        self.aliases.contains_key(&normalize(name))
    }

    /// Number of distinct lookup keys
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Canonical definitions in load order, before prefix expansion
    pub fn definitions(&self) -> &[UnitDefinition] {
        &self.definitions
    }

    /// Iterate every `(key, unit)` pair in key order
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &Unit)> {
        let mut entries: Vec<(&str, &Unit)> =
            self.aliases.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Lookup by an already normalized key
    pub(crate) fn lookup(&self, key: &str) -> Option<&Unit> {
        self.aliases.get(key)
    }

    fn add_unit(&mut self, definition: &UnitDefinition) -> Result<(), UnitError> {
        let unit = definition.to_unit();
        for name in definition.names() {
            self.add_alias(name, unit.clone())?;
        }

        for prefix in definition.prefix().prefixes() {
            let prefixed = definition.apply_prefix(prefix)?;
            self.add_unit(&prefixed)?;
        }
        Ok(())
    }

    fn add_alias(&mut self, name: &str, unit: Unit) -> Result<(), UnitError> {
        let key = normalize(name);
        if let Some(existing) = self.aliases.get(&key) {
            return Err(UnitError::DuplicateUnit {
                name: name.to_string(),
                existing: existing.to_string(),
            });
        }
        trace!(alias = %key, unit = %unit, "registered alias");
        self.aliases.insert(key, unit);
        Ok(())
    }
}
