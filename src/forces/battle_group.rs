//! Battle groups: ad hoc coalitions of same-faction forces under one
//! commander, with jointly aggregated firepower.
//!
//! Membership changes recompute the joint firepower from scratch via
//! [`Firepower::aggregate`]; the aggregate fields are derived data and
//! never updated incrementally.

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::{BattleGroupId, Faction, ForceId};
use crate::forces::firepower::Firepower;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleGroup {
    pub id: BattleGroupId,
    pub faction: Faction,
    pub commander: ForceId,
    pub members: Vec<ForceId>,
    pub joint_attack: Firepower,
    pub joint_defense: Firepower,
}

impl BattleGroup {
    /// Create a group. The commander must be listed among the
    /// members; faction agreement of the members is checked by the
    /// world layer, which owns the force table.
    pub fn new(
        id: BattleGroupId,
        faction: Faction,
        commander: ForceId,
        members: Vec<ForceId>,
    ) -> Result<Self> {
        if members.is_empty() {
            return Err(EngineError::InvalidInput(
                "battle group needs at least one member".into(),
            ));
        }
        if !members.contains(&commander) {
            return Err(EngineError::NotAMember(commander));
        }
        Ok(Self {
            id,
            faction,
            commander,
            members,
            joint_attack: Firepower::default(),
            joint_defense: Firepower::default(),
        })
    }

    pub fn is_member(&self, force: ForceId) -> bool {
        self.members.contains(&force)
    }

    /// Add a member. Idempotent: re-adding an existing member is a
    /// no-op reported as "unchanged".
    pub fn add_member(&mut self, force: ForceId) -> bool {
        if self.is_member(force) {
            return false;
        }
        self.members.push(force);
        true
    }

    /// Remove a member. The commander can never be removed this way;
    /// reassign command first.
    pub fn remove_member(&mut self, force: ForceId) -> Result<()> {
        if !self.is_member(force) {
            return Err(EngineError::NotAMember(force));
        }
        if force == self.commander {
            return Err(EngineError::CommanderRemoval(force));
        }
        self.members.retain(|m| *m != force);
        Ok(())
    }

    /// Hand command to another current member.
    pub fn set_commander(&mut self, force: ForceId) -> Result<()> {
        if !self.is_member(force) {
            return Err(EngineError::NotAMember(force));
        }
        self.commander = force;
        Ok(())
    }
}
