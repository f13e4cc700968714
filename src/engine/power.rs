//! Combat power: composition, morale and fatigue folded into a single
//! scalar per force.

use serde::{Deserialize, Serialize};

use crate::forces::force::{Force, ForceComposition, MAX_MORALE};
use crate::forces::unit_type::{counter_multiplier, UnitCatalog, UnitCategory};

/// The factors behind a force's combat power. `final_power` is the
/// product of the base power and both factors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerBreakdown {
    pub base_power: f64,
    pub morale_factor: f64,
    pub fatigue_factor: f64,
    pub final_power: f64,
}

/// Compute a force's combat power from its composition.
///
/// Composition rows referencing unknown unit types contribute nothing
/// rather than failing; a force with no composition rows has zero
/// power. Category-agnostic: see [`combat_power_against`] for the
/// counter-aware variant.
pub fn combat_power(
    force: &Force,
    composition: &[ForceComposition],
    catalog: &UnitCatalog,
) -> PowerBreakdown {
    weighted_power(force, composition, catalog, |_| 1.0)
}

/// Combat power with the counter relationship against a known
/// opposing category applied per composition row.
pub fn combat_power_against(
    force: &Force,
    composition: &[ForceComposition],
    catalog: &UnitCatalog,
    defender_category: UnitCategory,
) -> PowerBreakdown {
    weighted_power(force, composition, catalog, |category| {
        counter_multiplier(category, defender_category)
    })
}

fn weighted_power(
    force: &Force,
    composition: &[ForceComposition],
    catalog: &UnitCatalog,
    row_weight: impl Fn(UnitCategory) -> f64,
) -> PowerBreakdown {
    let base_power: f64 = composition
        .iter()
        .filter_map(|row| {
            catalog
                .get(row.unit_type)
                .map(|ut| ut.base_power * row.unit_count as f64 * row_weight(ut.category))
        })
        .sum();

    let morale_factor = force.morale / MAX_MORALE;
    let fatigue_factor = 1.0 - force.fatigue;
    let final_power = base_power * morale_factor * fatigue_factor;

    PowerBreakdown {
        base_power,
        morale_factor,
        fatigue_factor,
        final_power,
    }
}

/// The category fielding the most troops in a composition, for
/// counter-aware power queries against a mixed defender.
pub fn dominant_category(
    composition: &[ForceComposition],
    catalog: &UnitCatalog,
) -> Option<UnitCategory> {
    composition
        .iter()
        .filter_map(|row| catalog.get(row.unit_type).map(|ut| (ut.category, row.unit_count)))
        .max_by_key(|(_, count)| *count)
        .map(|(category, _)| category)
}
