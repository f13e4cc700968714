//! The world facade: one owner for the grid, the forces and their
//! compositions, the battle groups and the audit log. Engine functions
//! read through this and return proposals; `apply_*` is the only place
//! state changes.

use ahash::AHashMap;
use tracing::info;

use crate::core::error::{EngineError, Result};
use crate::core::types::{BattleGroupId, Faction, ForceId};
use crate::engine::battle::BattleReport;
use crate::engine::movement::MovementProposal;
use crate::engine::power::{combat_power, PowerBreakdown};
use crate::forces::battle_group::BattleGroup;
use crate::forces::firepower::Firepower;
use crate::forces::force::{Force, ForceComposition};
use crate::forces::unit_type::UnitCatalog;
use crate::log::{BattleRecord, LogRecord, MovementRecord};
use crate::map::grid::HexGrid;
use crate::map::hex::HexCoord;

#[derive(Debug, Clone)]
pub struct WorldState {
    pub grid: HexGrid,
    pub catalog: UnitCatalog,
    forces: AHashMap<ForceId, Force>,
    compositions: AHashMap<ForceId, Vec<ForceComposition>>,
    groups: AHashMap<BattleGroupId, BattleGroup>,
    log: Vec<LogRecord>,
}

impl WorldState {
    pub fn new(grid: HexGrid, catalog: UnitCatalog) -> Self {
        Self {
            grid,
            catalog,
            forces: AHashMap::new(),
            compositions: AHashMap::new(),
            groups: AHashMap::new(),
            log: Vec::new(),
        }
    }

    pub fn insert_force(&mut self, force: Force) {
        self.forces.insert(force.id, force);
    }

    /// Replace a force's composition rows. The force must already
    /// exist; rows referencing unknown unit types are kept and simply
    /// contribute no power.
    pub fn set_composition(&mut self, force: ForceId, rows: Vec<ForceComposition>) -> Result<()> {
        if !self.forces.contains_key(&force) {
            return Err(EngineError::ForceNotFound(force));
        }
        self.compositions.insert(force, rows);
        Ok(())
    }

    pub fn force(&self, id: ForceId) -> Result<&Force> {
        self.forces.get(&id).ok_or(EngineError::ForceNotFound(id))
    }

    pub fn force_mut(&mut self, id: ForceId) -> Result<&mut Force> {
        self.forces
            .get_mut(&id)
            .ok_or(EngineError::ForceNotFound(id))
    }

    pub fn forces(&self) -> impl Iterator<Item = &Force> {
        self.forces.values()
    }

    pub fn composition(&self, id: ForceId) -> &[ForceComposition] {
        self.compositions.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn group(&self, id: BattleGroupId) -> Result<&BattleGroup> {
        self.groups.get(&id).ok_or(EngineError::GroupNotFound(id))
    }

    /// Forces standing on a cell, ordered by id so callers that pick
    /// "the first defender" do so deterministically.
    pub fn forces_at(&self, coord: HexCoord) -> Vec<&Force> {
        let mut found: Vec<&Force> = self
            .forces
            .values()
            .filter(|f| f.position == coord)
            .collect();
        found.sort_by_key(|f| f.id);
        found
    }

    pub fn force_power(&self, id: ForceId) -> Result<PowerBreakdown> {
        let force = self.force(id)?;
        Ok(combat_power(force, self.composition(id), &self.catalog))
    }

    /// Create a battle group. Every member must exist and share the
    /// group's faction; the commander must be a member.
    pub fn create_group(
        &mut self,
        id: BattleGroupId,
        faction: Faction,
        commander: ForceId,
        members: Vec<ForceId>,
    ) -> Result<()> {
        for member in &members {
            let force = self.force(*member)?;
            if force.faction != faction {
                return Err(EngineError::FactionMismatch(*member));
            }
        }
        let group = BattleGroup::new(id, faction, commander, members)?;
        self.groups.insert(id, group);
        self.recompute_joint_firepower(id)
    }

    /// Add a force to a group. Returns `false` when it was already a
    /// member; the joint firepower is only recomputed on a real add.
    pub fn add_to_group(&mut self, group: BattleGroupId, force: ForceId) -> Result<bool> {
        let faction = {
            let f = self.force(force)?;
            f.faction
        };
        let g = self
            .groups
            .get_mut(&group)
            .ok_or(EngineError::GroupNotFound(group))?;
        if g.faction != faction {
            return Err(EngineError::FactionMismatch(force));
        }
        let added = g.add_member(force);
        if added {
            self.recompute_joint_firepower(group)?;
        }
        Ok(added)
    }

    /// Remove a member; removing the commander is rejected.
    pub fn remove_from_group(&mut self, group: BattleGroupId, force: ForceId) -> Result<()> {
        let g = self
            .groups
            .get_mut(&group)
            .ok_or(EngineError::GroupNotFound(group))?;
        g.remove_member(force)?;
        self.recompute_joint_firepower(group)
    }

    pub fn set_group_commander(&mut self, group: BattleGroupId, force: ForceId) -> Result<()> {
        let g = self
            .groups
            .get_mut(&group)
            .ok_or(EngineError::GroupNotFound(group))?;
        g.set_commander(force)
    }

    /// Full re-scan over the membership. Called on every membership
    /// change rather than patched incrementally.
    fn recompute_joint_firepower(&mut self, group: BattleGroupId) -> Result<()> {
        let members = self.group(group)?.members.clone();
        let mut attack = Vec::with_capacity(members.len());
        let mut defense = Vec::with_capacity(members.len());
        for member in members {
            let force = self.force(member)?;
            attack.push(force.attack_firepower);
            defense.push(force.defense_firepower);
        }
        let joint_attack = Firepower::aggregate(&attack);
        let joint_defense = Firepower::aggregate(&defense);
        let g = self
            .groups
            .get_mut(&group)
            .ok_or(EngineError::GroupNotFound(group))?;
        g.joint_attack = joint_attack;
        g.joint_defense = joint_defense;
        Ok(())
    }

    /// Apply an executed movement: reposition the force, charge its
    /// action points and log the move.
    pub fn apply_movement(&mut self, proposal: &MovementProposal) -> Result<()> {
        let force = self.force_mut(proposal.force)?;
        let from = force.position;
        force.position = proposal.destination;
        force.consume_action_points(proposal.cost);
        info!(
            force = force.id.0,
            ?from,
            to = ?proposal.destination,
            cost = proposal.cost,
            "movement applied"
        );
        self.log.push(LogRecord::Movement(MovementRecord {
            force: proposal.force,
            from,
            to: proposal.destination,
            cost: proposal.cost,
        }));
        Ok(())
    }

    /// Apply a resolved battle: deduct every side's losses, consume a
    /// combat time per participant and log the engagement.
    pub fn apply_battle(&mut self, report: &BattleReport) -> Result<()> {
        for (id, loss) in report.attacker_losses.iter().chain(&report.defender_losses) {
            let force = self.force_mut(*id)?;
            force.apply_losses(*loss);
            force.consume_combat_time();
        }
        info!(
            location = ?report.location,
            outcome = ?report.outcome,
            ratio = report.final_ratio,
            "battle applied"
        );
        self.log.push(LogRecord::Battle(BattleRecord {
            location: report.location,
            attackers: report.attackers.clone(),
            defenders: report.defenders.clone(),
            outcome: report.outcome,
            final_ratio: report.final_ratio,
            attacker_loss_rate: report.attacker_loss_rate,
            defender_loss_rate: report.defender_loss_rate,
        }));
        Ok(())
    }

    pub fn logs(&self) -> &[LogRecord] {
        &self.log
    }

    /// Coordinates a faction can currently see: cells within each own
    /// force's visibility radius, plus cells explicitly revealed to
    /// the faction.
    pub fn visible_coords(&self, faction: Faction) -> Vec<HexCoord> {
        let mut seen: AHashMap<HexCoord, ()> = AHashMap::new();
        for force in self.forces.values().filter(|f| f.faction == faction) {
            for cell in self.grid.cells_within(&force.position, force.visibility_radius) {
                seen.insert(cell.coord, ());
            }
        }
        for cell in self.grid.iter() {
            if cell.visible_to.contains(&faction) {
                seen.insert(cell.coord, ());
            }
        }
        let mut coords: Vec<HexCoord> = seen.into_keys().collect();
        coords.sort_by_key(|c| (c.row, c.col));
        coords
    }
}
