//! Terrain types affecting movement cost and battle modifiers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Plain,
    Forest,
    Mountain,
    River,
    Swamp,
    Hills,
    Desert,
}

impl Terrain {
    /// Extra action-point cost for entering a cell of this terrain,
    /// on top of the base step cost of 1.
    pub fn movement_cost(&self) -> u32 {
        match self {
            Self::Plain => 0,
            Self::Forest => 1,
            Self::Mountain => 2,
            Self::River => 3,
            Self::Swamp => 4,
            _ => 1,
        }
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::Plain
    }
}

/// Extra step cost for climbing from `current` to `next` elevation.
/// Descending or flat ground is free.
pub fn elevation_cost(current: f64, next: f64) -> u32 {
    let delta = next - current;
    if delta <= 0.0 {
        0
    } else if delta <= 100.0 {
        1
    } else if delta <= 300.0 {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_movement_cost() {
        assert_eq!(Terrain::Plain.movement_cost(), 0);
        assert_eq!(Terrain::Swamp.movement_cost(), 4);
        assert_eq!(Terrain::Desert.movement_cost(), 1);
    }

    #[test]
    fn elevation_cost_bands() {
        assert_eq!(elevation_cost(200.0, 100.0), 0);
        assert_eq!(elevation_cost(0.0, 0.0), 0);
        assert_eq!(elevation_cost(0.0, 100.0), 1);
        assert_eq!(elevation_cost(0.0, 100.1), 2);
        assert_eq!(elevation_cost(0.0, 300.0), 2);
        assert_eq!(elevation_cost(0.0, 301.0), 3);
    }
}
