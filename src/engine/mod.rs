pub mod battle;
pub mod movement;
pub mod power;

pub use battle::{BattleOutcome, BattlePrediction, BattleReport};
pub use movement::{MovementPlan, MovementProposal};
pub use power::PowerBreakdown;
