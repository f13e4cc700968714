use thiserror::Error;

use crate::core::types::{BattleGroupId, Faction, ForceId, ServiceBranch, UnitTypeId};
use crate::map::hex::HexCoord;

/// Classified, recoverable failure conditions. The engine never
/// panics the host process; every operation returns one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("force not found: {0:?}")]
    ForceNotFound(ForceId),

    #[error("hex cell not found: {0:?}")]
    CellNotFound(HexCoord),

    #[error("unit type not found: {0:?}")]
    UnitTypeNotFound(UnitTypeId),

    #[error("battle group not found: {0:?}")]
    GroupNotFound(BattleGroupId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("path does not start at the current position of force {0:?}")]
    InvalidStart(ForceId),

    #[error("path is not continuous between {from:?} and {to:?}")]
    Discontinuous { from: HexCoord, to: HexCoord },

    #[error("cell {0:?} is impassable for service branch {1:?}")]
    Impassable(HexCoord, ServiceBranch),

    #[error("insufficient action points: need {needed}, have {available}")]
    InsufficientActionPoints { needed: u32, available: u32 },

    #[error("no target forces on hex {0:?}")]
    NoTargets(HexCoord),

    #[error("cannot attack friendly forces of faction {0:?}")]
    FriendlyFire(Faction),

    #[error("attacker has no combat capacity remaining")]
    NoCombatCapacity,

    #[error("force {0:?} is not a member of the battle group")]
    NotAMember(ForceId),

    #[error("commander {0:?} cannot be removed from its battle group")]
    CommanderRemoval(ForceId),

    #[error("force {0:?} does not match the battle group's faction")]
    FactionMismatch(ForceId),
}

pub type Result<T> = std::result::Result<T, EngineError>;
