//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for forces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ForceId(pub u32);

/// Unique identifier for unit types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitTypeId(pub u32);

/// Unique identifier for battle groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleGroupId(pub u32);

/// Faction a force or map cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Faction(pub u32);

/// Service branch of a force, used for per-cell passability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceBranch {
    Land,
    Sea,
    Air,
}

impl Default for ServiceBranch {
    fn default() -> Self {
        Self::Land
    }
}
