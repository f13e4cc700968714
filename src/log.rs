//! Append-only record of what the engine was asked to apply. Records
//! are plain serde values so a caller can persist or replay them.

use serde::{Deserialize, Serialize};

use crate::core::types::ForceId;
use crate::engine::battle::BattleOutcome;
use crate::map::hex::HexCoord;

/// One executed movement: the force, where it went and what it paid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementRecord {
    pub force: ForceId,
    pub from: HexCoord,
    pub to: HexCoord,
    pub cost: u32,
}

/// One resolved battle, reduced to the numbers a replay needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleRecord {
    pub location: HexCoord,
    pub attackers: Vec<ForceId>,
    pub defenders: Vec<ForceId>,
    pub outcome: BattleOutcome,
    pub final_ratio: f64,
    pub attacker_loss_rate: f64,
    pub defender_loss_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogRecord {
    Movement(MovementRecord),
    Battle(BattleRecord),
}
