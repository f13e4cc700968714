//! Battle resolution. Power ratio times terrain (and, for battle
//! groups, command) modifiers picks an outcome tier; per-side loss
//! rates are the tier's base rates with a small uniform jitter,
//! clamped to the configured band. Resolution only proposes: the
//! report goes back through [`WorldState::apply_battle`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::{BattleGroupId, Faction, ForceId};
use crate::map::hex::HexCoord;
use crate::world::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    DecisiveVictory,
    MajorVictory,
    MinorVictory,
    Draw,
    MinorDefeat,
    MajorDefeat,
    DecisiveDefeat,
}

/// Outcome tier for a final power ratio, with the base loss rates
/// (attacker, defender) before jitter.
fn classify(final_ratio: f64) -> (BattleOutcome, f64, f64) {
    if final_ratio >= 3.0 {
        (BattleOutcome::DecisiveVictory, 0.05, 0.5)
    } else if final_ratio >= 2.0 {
        (BattleOutcome::MajorVictory, 0.1, 0.4)
    } else if final_ratio >= 1.5 {
        (BattleOutcome::MinorVictory, 0.15, 0.3)
    } else if final_ratio >= 0.67 {
        (BattleOutcome::Draw, 0.2, 0.2)
    } else if final_ratio >= 0.5 {
        (BattleOutcome::MinorDefeat, 0.3, 0.15)
    } else if final_ratio >= 0.33 {
        (BattleOutcome::MajorDefeat, 0.4, 0.1)
    } else {
        (BattleOutcome::DecisiveDefeat, 0.5, 0.05)
    }
}

/// A resolved battle, ready to apply. Losses are absolute troop
/// counts per participating force.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
    pub location: HexCoord,
    pub outcome: BattleOutcome,
    pub final_ratio: f64,
    pub attacker_loss_rate: f64,
    pub defender_loss_rate: f64,
    pub attackers: Vec<ForceId>,
    pub defenders: Vec<ForceId>,
    pub attacker_losses: Vec<(ForceId, f64)>,
    pub defender_losses: Vec<(ForceId, f64)>,
}

/// What a battle would look like before committing to it: the tier
/// and base rates at zero jitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattlePrediction {
    pub location: HexCoord,
    pub outcome: BattleOutcome,
    pub final_ratio: f64,
    pub attacker_power: f64,
    pub defender_power: f64,
    pub attacker_base_rate: f64,
    pub defender_base_rate: f64,
}

/// One side of an engagement after eligibility checks: who fights
/// and with how much power.
struct Side {
    forces: Vec<(ForceId, f64, f64)>, // (id, power, strength)
    power: f64,
}

impl Side {
    fn ids(&self) -> Vec<ForceId> {
        self.forces.iter().map(|(id, _, _)| *id).collect()
    }

    fn strength(&self) -> f64 {
        self.forces.iter().map(|(_, _, s)| *s).sum()
    }

    /// Distribute this side's total losses pro rata by power share,
    /// capping each member at its own strength. With zero total power
    /// nobody absorbs anything.
    fn distribute_losses(&self, rate: f64) -> Vec<(ForceId, f64)> {
        let total_loss = self.strength() * rate;
        if self.power <= 0.0 {
            return self.forces.iter().map(|(id, _, _)| (*id, 0.0)).collect();
        }
        self.forces
            .iter()
            .map(|(id, power, strength)| {
                let share = power / self.power;
                (*id, (total_loss * share).min(*strength))
            })
            .collect()
    }
}

fn side_of(world: &WorldState, ids: &[ForceId]) -> Result<Side> {
    let mut forces = Vec::with_capacity(ids.len());
    let mut power = 0.0;
    for id in ids {
        let breakdown = world.force_power(*id)?;
        let strength = world.force(*id)?.troop_strength;
        forces.push((*id, breakdown.final_power, strength));
        power += breakdown.final_power;
    }
    Ok(Side { forces, power })
}

/// Every force standing on the target cell. An empty cell has no
/// targets; a cell whose lead occupant shares the attacker's faction
/// is friendly fire. Friendlies stacked behind a hostile lead
/// defender fight on the defending side: they contribute power and
/// absorb defender losses.
fn cell_defenders(
    world: &WorldState,
    attacker_faction: Faction,
    target: HexCoord,
) -> Result<Vec<ForceId>> {
    let occupants = world.forces_at(target);
    match occupants.first() {
        None => return Err(EngineError::NoTargets(target)),
        Some(first) if first.faction == attacker_faction => {
            return Err(EngineError::FriendlyFire(attacker_faction))
        }
        Some(_) => {}
    }
    Ok(occupants.iter().map(|f| f.id).collect())
}

fn power_ratio(attacker_power: f64, defender_power: f64) -> f64 {
    if defender_power <= 0.0 {
        f64::INFINITY
    } else {
        attacker_power / defender_power
    }
}

fn jittered_rate<R: Rng>(base: f64, config: &EngineConfig, rng: &mut R) -> f64 {
    let jitter = rng.gen_range(-config.loss_jitter..=config.loss_jitter);
    (base + jitter).clamp(config.loss_rate_min, config.loss_rate_max)
}

fn resolve_sides<R: Rng>(
    location: HexCoord,
    attacker: Side,
    defender: Side,
    final_ratio: f64,
    config: &EngineConfig,
    rng: &mut R,
) -> BattleReport {
    let (outcome, attacker_base, defender_base) = classify(final_ratio);
    let attacker_loss_rate = jittered_rate(attacker_base, config, rng);
    let defender_loss_rate = jittered_rate(defender_base, config, rng);
    debug!(
        ?location,
        ?outcome,
        final_ratio,
        attacker_loss_rate,
        defender_loss_rate,
        "battle resolved"
    );
    BattleReport {
        location,
        outcome,
        final_ratio,
        attacker_loss_rate,
        defender_loss_rate,
        attackers: attacker.ids(),
        defenders: defender.ids(),
        attacker_losses: attacker.distribute_losses(attacker_loss_rate),
        defender_losses: defender.distribute_losses(defender_loss_rate),
    }
}

/// Resolve one force assaulting the occupants of a cell.
pub fn resolve_assault<R: Rng>(
    world: &WorldState,
    attacker: ForceId,
    target: HexCoord,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<BattleReport> {
    let (attacker_side, defender_side, final_ratio, location) =
        assault_sides(world, attacker, target, config)?;
    Ok(resolve_sides(
        location,
        attacker_side,
        defender_side,
        final_ratio,
        config,
        rng,
    ))
}

/// Resolve a battle group assaulting every occupant of a
/// cell. The commander's capability scales the ratio.
pub fn resolve_group_assault<R: Rng>(
    world: &WorldState,
    group: BattleGroupId,
    target: HexCoord,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<BattleReport> {
    let (attacker_side, defender_side, final_ratio, location) =
        group_assault_sides(world, group, target, config)?;
    Ok(resolve_sides(
        location,
        attacker_side,
        defender_side,
        final_ratio,
        config,
        rng,
    ))
}

/// What [`resolve_assault`] would report at zero jitter.
pub fn predict_assault(
    world: &WorldState,
    attacker: ForceId,
    target: HexCoord,
    config: &EngineConfig,
) -> Result<BattlePrediction> {
    let (attacker_side, defender_side, final_ratio, location) =
        assault_sides(world, attacker, target, config)?;
    Ok(prediction(location, &attacker_side, &defender_side, final_ratio))
}

/// What [`resolve_group_assault`] would report at zero jitter.
pub fn predict_group_assault(
    world: &WorldState,
    group: BattleGroupId,
    target: HexCoord,
    config: &EngineConfig,
) -> Result<BattlePrediction> {
    let (attacker_side, defender_side, final_ratio, location) =
        group_assault_sides(world, group, target, config)?;
    Ok(prediction(location, &attacker_side, &defender_side, final_ratio))
}

fn prediction(
    location: HexCoord,
    attacker: &Side,
    defender: &Side,
    final_ratio: f64,
) -> BattlePrediction {
    let (outcome, attacker_base, defender_base) = classify(final_ratio);
    BattlePrediction {
        location,
        outcome,
        final_ratio,
        attacker_power: attacker.power,
        defender_power: defender.power,
        attacker_base_rate: attacker_base,
        defender_base_rate: defender_base,
    }
}

fn assault_sides(
    world: &WorldState,
    attacker: ForceId,
    target: HexCoord,
    config: &EngineConfig,
) -> Result<(Side, Side, f64, HexCoord)> {
    let force = world.force(attacker)?;
    if force.remaining_combat_times == 0 {
        return Err(EngineError::NoCombatCapacity);
    }
    let cell = world.grid.cell(&target)?;
    let defenders = cell_defenders(world, force.faction, target)?;
    let defender_side = side_of(world, &defenders)?;
    let attacker_side = side_of(world, &[attacker])?;
    let ratio = power_ratio(attacker_side.power, defender_side.power);
    let final_ratio = ratio * config.terrain_modifier(cell.terrain);
    Ok((attacker_side, defender_side, final_ratio, target))
}

fn group_assault_sides(
    world: &WorldState,
    group: BattleGroupId,
    target: HexCoord,
    config: &EngineConfig,
) -> Result<(Side, Side, f64, HexCoord)> {
    let g = world.group(group)?;
    let mut able: Vec<ForceId> = Vec::with_capacity(g.members.len());
    for member in &g.members {
        if world.force(*member)?.remaining_combat_times > 0 {
            able.push(*member);
        }
    }
    if able.is_empty() {
        return Err(EngineError::NoCombatCapacity);
    }
    let commander = world.force(g.commander)?;
    let cell = world.grid.cell(&target)?;
    let defenders = cell_defenders(world, g.faction, target)?;
    let defender_side = side_of(world, &defenders)?;
    let attacker_side = side_of(world, &able)?;
    let ratio = power_ratio(attacker_side.power, defender_side.power);
    let final_ratio = ratio
        * config.terrain_modifier(cell.terrain)
        * config.command_modifier(commander.command_capability);
    Ok((attacker_side, defender_side, final_ratio, target))
}
