pub mod battle_group;
pub mod firepower;
pub mod force;
pub mod unit_type;

pub use battle_group::BattleGroup;
pub use firepower::Firepower;
pub use force::{Force, ForceComposition};
pub use unit_type::{counter_multiplier, UnitCatalog, UnitCategory, UnitType};
