//! Engine configuration with documented constants
//!
//! The tunable numbers of the battle model are collected here so a
//! caller can supply its own calibration without touching the
//! resolution algorithm.

use crate::map::terrain::Terrain;

/// Tunables for battle resolution.
///
/// The defaults reproduce the reference balance; scenario authors can
/// override individual fields to recalibrate.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Half-width of the uniform jitter applied to each base loss
    /// rate. A draw in `[-loss_jitter, +loss_jitter]` is added
    /// independently per side.
    pub loss_jitter: f64,

    /// Lower clamp for post-jitter loss rates. Keeps any engagement
    /// from being entirely free for either side.
    pub loss_rate_min: f64,

    /// Upper clamp for post-jitter loss rates. A single battle never
    /// wipes out more than this fraction of a side.
    pub loss_rate_max: f64,

    /// Slope of the command modifier around a neutral capability of
    /// 1.0: `modifier = 1 + (capability - 1) * command_slope`.
    pub command_slope: f64,

    /// Clamp bounds for the command modifier, so an extreme commander
    /// rating cannot dominate the power ratio.
    pub command_modifier_min: f64,
    pub command_modifier_max: f64,

    /// Defender-side combat modifiers per terrain of the defended
    /// cell. Values below 1.0 shrink the attacker's power ratio
    /// (defensible ground), values above 1.0 grow it (exposed ground).
    pub terrain_modifiers: TerrainModifiers,
}

/// Per-terrain combat modifier table applied to the power ratio.
#[derive(Debug, Clone)]
pub struct TerrainModifiers {
    pub plain: f64,
    pub forest: f64,
    pub mountain: f64,
    pub river: f64,
    pub swamp: f64,
    pub hills: f64,
    pub desert: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            loss_jitter: 0.05,
            loss_rate_min: 0.01,
            loss_rate_max: 0.9,
            command_slope: 0.25,
            command_modifier_min: 0.8,
            command_modifier_max: 1.5,
            terrain_modifiers: TerrainModifiers::default(),
        }
    }
}

impl Default for TerrainModifiers {
    fn default() -> Self {
        Self {
            plain: 1.0,
            forest: 0.85,
            mountain: 0.7,
            river: 1.1,
            swamp: 0.8,
            hills: 0.9,
            desert: 1.0,
        }
    }
}

impl EngineConfig {
    /// Combat modifier for the terrain of the defended cell.
    pub fn terrain_modifier(&self, terrain: Terrain) -> f64 {
        let t = &self.terrain_modifiers;
        match terrain {
            Terrain::Plain => t.plain,
            Terrain::Forest => t.forest,
            Terrain::Mountain => t.mountain,
            Terrain::River => t.river,
            Terrain::Swamp => t.swamp,
            Terrain::Hills => t.hills,
            Terrain::Desert => t.desert,
        }
    }

    /// Multiplier contributed by a battle-group commander's command
    /// capability. Capability 1.0 is neutral.
    pub fn command_modifier(&self, capability: f64) -> f64 {
        (1.0 + (capability - 1.0) * self.command_slope)
            .clamp(self.command_modifier_min, self.command_modifier_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_modifier_neutral_at_one() {
        let config = EngineConfig::default();
        assert_eq!(config.command_modifier(1.0), 1.0);
    }

    #[test]
    fn command_modifier_clamped() {
        let config = EngineConfig::default();
        assert_eq!(config.command_modifier(100.0), config.command_modifier_max);
        assert_eq!(config.command_modifier(-100.0), config.command_modifier_min);
    }
}
