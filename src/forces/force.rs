//! Forces: unit instances with position, composition and combat
//! resources. The engine reads these and proposes mutations; the
//! caller owns persistence.

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, ForceId, ServiceBranch, UnitTypeId};
use crate::forces::firepower::Firepower;
use crate::map::hex::HexCoord;

pub const MAX_MORALE: f64 = 100.0;

/// One composition row: how many troops of a unit type a force
/// fields. Multiple rows per force, unordered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForceComposition {
    pub unit_type: UnitTypeId,
    pub unit_count: u32,
}

impl ForceComposition {
    pub fn new(unit_type: UnitTypeId, unit_count: u32) -> Self {
        Self {
            unit_type,
            unit_count,
        }
    }
}

/// A military force on the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Force {
    pub id: ForceId,
    pub name: String,
    pub faction: Faction,
    pub service: ServiceBranch,
    pub position: HexCoord,
    pub troop_strength: f64,
    /// Morale in `[0, 100]`.
    pub morale: f64,
    /// Fatigue in `[0, 1]`; 0 is fresh.
    pub fatigue: f64,
    pub attack_firepower: Firepower,
    pub defense_firepower: Firepower,
    /// Battles this force may still join; one is consumed per
    /// participation.
    pub remaining_combat_times: u32,
    /// Per-turn movement budget consumed by path traversal.
    pub action_points: u32,
    pub visibility_radius: u32,
    /// Used only when this force commands a battle group.
    pub command_capability: f64,
    pub command_range: u32,
}

impl Force {
    pub fn new(id: ForceId, name: &str, faction: Faction, position: HexCoord) -> Self {
        Self {
            id,
            name: name.to_string(),
            faction,
            service: ServiceBranch::default(),
            position,
            troop_strength: 1000.0,
            morale: MAX_MORALE,
            fatigue: 0.0,
            attack_firepower: Firepower::default(),
            defense_firepower: Firepower::default(),
            remaining_combat_times: 1,
            action_points: 0,
            visibility_radius: 2,
            command_capability: 1.0,
            command_range: 1,
        }
    }

    pub fn with_service(mut self, service: ServiceBranch) -> Self {
        self.service = service;
        self
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.troop_strength = strength.max(0.0);
        self
    }

    pub fn with_morale(mut self, morale: f64) -> Self {
        self.morale = morale.clamp(0.0, MAX_MORALE);
        self
    }

    pub fn with_fatigue(mut self, fatigue: f64) -> Self {
        self.fatigue = fatigue.clamp(0.0, 1.0);
        self
    }

    pub fn with_firepower(mut self, attack: Firepower, defense: Firepower) -> Self {
        self.attack_firepower = attack;
        self.defense_firepower = defense;
        self
    }

    pub fn with_action_points(mut self, action_points: u32) -> Self {
        self.action_points = action_points;
        self
    }

    pub fn with_combat_times(mut self, times: u32) -> Self {
        self.remaining_combat_times = times;
        self
    }

    pub fn with_command(mut self, capability: f64, range: u32) -> Self {
        self.command_capability = capability;
        self.command_range = range;
        self
    }

    /// Deduct battle losses, clamped at zero. Returns the remaining
    /// strength.
    pub fn apply_losses(&mut self, amount: f64) -> f64 {
        self.troop_strength = (self.troop_strength - amount).max(0.0);
        self.troop_strength
    }

    /// Consume one battle participation.
    pub fn consume_combat_time(&mut self) {
        self.remaining_combat_times = self.remaining_combat_times.saturating_sub(1);
    }

    /// Turn upkeep: grant battle participations back.
    pub fn refresh_combat_times(&mut self, gain: u32) {
        self.remaining_combat_times += gain;
    }

    pub fn consume_action_points(&mut self, cost: u32) {
        self.action_points = self.action_points.saturating_sub(cost);
    }
}
