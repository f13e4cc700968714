//! The hex map: cells keyed by coordinate, with neighbor and range
//! queries resolved by exact id lookup.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::{Faction, ServiceBranch};
use crate::map::hex::HexCoord;
use crate::map::terrain::Terrain;

/// Per-service-branch passability of a cell. An unset entry means
/// passable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Passability {
    #[serde(default)]
    pub land: Option<bool>,
    #[serde(default)]
    pub sea: Option<bool>,
    #[serde(default)]
    pub air: Option<bool>,
}

impl Passability {
    pub fn allows(&self, branch: ServiceBranch) -> bool {
        let entry = match branch {
            ServiceBranch::Land => self.land,
            ServiceBranch::Sea => self.sea,
            ServiceBranch::Air => self.air,
        };
        entry.unwrap_or(true)
    }

    pub fn deny(mut self, branch: ServiceBranch) -> Self {
        match branch {
            ServiceBranch::Land => self.land = Some(false),
            ServiceBranch::Sea => self.sea = Some(false),
            ServiceBranch::Air => self.air = Some(false),
        }
        self
    }
}

/// A single cell of the hex map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexCell {
    pub coord: HexCoord,
    pub terrain: Terrain,
    pub elevation: f64,
    #[serde(default)]
    pub passability: Passability,
    #[serde(default)]
    pub controller: Option<Faction>,
    /// Factions this cell is currently visible to.
    #[serde(default)]
    pub visible_to: Vec<Faction>,
    #[serde(default)]
    pub objective: bool,
}

impl HexCell {
    pub fn new(coord: HexCoord, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            elevation: 0.0,
            passability: Passability::default(),
            controller: None,
            visible_to: Vec::new(),
            objective: false,
        }
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn with_passability(mut self, passability: Passability) -> Self {
        self.passability = passability;
        self
    }

    pub fn with_objective(mut self) -> Self {
        self.objective = true;
        self
    }

    pub fn is_visible_to(&self, faction: Faction) -> bool {
        self.visible_to.contains(&faction)
    }

    pub fn reveal_to(&mut self, faction: Faction) {
        if !self.visible_to.contains(&faction) {
            self.visible_to.push(faction);
        }
    }
}

/// The hex map.
#[derive(Debug, Clone, Default)]
pub struct HexGrid {
    cells: AHashMap<HexCoord, HexCell>,
}

impl HexGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a rectangular map with pseudo-random terrain and
    /// elevation, deterministic in `seed`.
    pub fn generate_simple(rows: i32, cols: i32, seed: u64) -> Self {
        let mut grid = Self::new();
        for row in 0..rows {
            for col in 0..cols {
                let coord = HexCoord::new(row, col);
                let hash = Self::simple_hash(row, col, seed);
                let terrain = match hash % 10 {
                    0..=4 => Terrain::Plain,
                    5 | 6 => Terrain::Forest,
                    7 => Terrain::Hills,
                    8 => Terrain::Mountain,
                    _ => Terrain::Swamp,
                };
                let elevation = ((hash / 10) % 400) as f64;
                grid.insert(HexCell::new(coord, terrain).with_elevation(elevation));
            }
        }
        grid
    }

    fn simple_hash(row: i32, col: i32, seed: u64) -> u64 {
        let mut h = seed;
        h = h.wrapping_mul(31).wrapping_add(row as u64);
        h = h.wrapping_mul(31).wrapping_add(col as u64);
        h ^ (h >> 16)
    }

    pub fn insert(&mut self, cell: HexCell) {
        self.cells.insert(cell.coord, cell);
    }

    pub fn get(&self, coord: &HexCoord) -> Option<&HexCell> {
        self.cells.get(coord)
    }

    pub fn get_mut(&mut self, coord: &HexCoord) -> Option<&mut HexCell> {
        self.cells.get_mut(coord)
    }

    /// Lookup that classifies a missing cell as an error.
    pub fn cell(&self, coord: &HexCoord) -> Result<&HexCell> {
        self.cells
            .get(coord)
            .ok_or(EngineError::CellNotFound(*coord))
    }

    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.cells.contains_key(coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HexCell> {
        self.cells.values()
    }

    /// Distance between two existing cells.
    pub fn distance(&self, a: &HexCoord, b: &HexCoord) -> Result<u32> {
        let a = self.cell(a)?;
        let b = self.cell(b)?;
        Ok(a.coord.distance(&b.coord))
    }

    /// The existing cells adjacent to `coord`. Empty when the source
    /// cell is unknown, never an error.
    pub fn neighbors(&self, coord: &HexCoord) -> Vec<&HexCell> {
        if !self.contains(coord) {
            return Vec::new();
        }
        coord
            .neighbors()
            .iter()
            .filter_map(|c| self.cells.get(c))
            .collect()
    }

    /// Existing cells within `radius` of `center`, the center included.
    pub fn cells_within(&self, center: &HexCoord, radius: u32) -> Vec<&HexCell> {
        center
            .coords_within(radius)
            .iter()
            .filter_map(|c| self.cells.get(c))
            .collect()
    }
}
