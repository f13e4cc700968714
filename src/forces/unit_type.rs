//! Static unit-type catalog and category counter relationships

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::UnitTypeId;

/// Closed set of unit categories. `Support` stands in for any
/// category outside the counter table; it fights at neutral odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitCategory {
    Infantry,
    Armor,
    Artillery,
    Air,
    Support,
}

/// Static attributes of a unit type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitType {
    pub id: UnitTypeId,
    pub name: String,
    pub category: UnitCategory,
    /// Combat power contributed by each troop of this type.
    pub base_power: f64,
}

impl UnitType {
    pub fn new(id: UnitTypeId, name: &str, category: UnitCategory, base_power: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            category,
            base_power,
        }
    }
}

/// Effectiveness multiplier of `attacker` category against `defender`
/// category. Unlisted pairs are neutral (1.0). Total function, never
/// fails.
pub fn counter_multiplier(attacker: UnitCategory, defender: UnitCategory) -> f64 {
    use UnitCategory::*;
    match (attacker, defender) {
        (Infantry, Armor) => 0.7,
        (Infantry, Artillery) => 1.2,
        (Armor, Infantry) => 1.5,
        (Armor, Artillery) => 1.3,
        (Artillery, Infantry) => 1.4,
        (Artillery, Armor) => 1.2,
        (Air, Air) => 1.0,
        (Air, _) => 1.3,
        (_, Air) => 0.7,
        _ => 1.0,
    }
}

/// Lookup table of unit types, treated as read-mostly static data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitCatalog {
    types: AHashMap<UnitTypeId, UnitType>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, unit_type: UnitType) {
        self.types.insert(unit_type.id, unit_type);
    }

    pub fn get(&self, id: UnitTypeId) -> Option<&UnitType> {
        self.types.get(&id)
    }

    /// Lookup that classifies a missing unit type as an error.
    pub fn unit_type(&self, id: UnitTypeId) -> Result<&UnitType> {
        self.types.get(&id).ok_or(EngineError::UnitTypeNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_table_spot_checks() {
        use UnitCategory::*;
        assert_eq!(counter_multiplier(Armor, Infantry), 1.5);
        assert_eq!(counter_multiplier(Air, Armor), 1.3);
        assert_eq!(counter_multiplier(Infantry, Infantry), 1.0);
        assert_eq!(counter_multiplier(Infantry, Armor), 0.7);
        assert_eq!(counter_multiplier(Artillery, Air), 0.7);
        assert_eq!(counter_multiplier(Air, Air), 1.0);
    }

    #[test]
    fn unknown_categories_are_neutral() {
        use UnitCategory::*;
        assert_eq!(counter_multiplier(Support, Armor), 1.0);
        assert_eq!(counter_multiplier(Infantry, Support), 1.0);
        // Air superiority still applies against off-table ground units.
        assert_eq!(counter_multiplier(Air, Support), 1.3);
    }

    #[test]
    fn catalog_lookup() {
        let mut catalog = UnitCatalog::new();
        catalog.insert(UnitType::new(
            UnitTypeId(1),
            "Rifle Infantry",
            UnitCategory::Infantry,
            5.0,
        ));
        assert!(catalog.get(UnitTypeId(1)).is_some());
        assert_eq!(
            catalog.unit_type(UnitTypeId(2)).unwrap_err(),
            EngineError::UnitTypeNotFound(UnitTypeId(2))
        );
    }
}
