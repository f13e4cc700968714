//! Hex coordinate math (offset-axial row/col coordinates)
//!
//! Distance goes through cube coordinates; adjacency uses the six
//! canonical direction vectors applied individually, never a
//! bounding-box scan (which would admit the two non-adjacent corners
//! of the surrounding rectangle).

use serde::{Deserialize, Serialize};

/// The six canonical `(row, col)` neighbor offsets.
const DIRECTIONS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, 1), (1, 0), (1, -1), (0, -1)];

/// Axial hex coordinate; doubles as the cell's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexCoord {
    pub row: i32,
    pub col: i32,
}

impl HexCoord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Cube coordinates: `x = col`, `z = row`, `y = -x - z`.
    pub fn to_cube(&self) -> (i32, i32, i32) {
        let x = self.col;
        let z = self.row;
        let y = -x - z;
        (x, y, z)
    }

    /// Hex distance via cube-coordinate Manhattan distance / 2.
    pub fn distance(&self, other: &Self) -> u32 {
        let (x1, y1, z1) = self.to_cube();
        let (x2, y2, z2) = other.to_cube();
        (((x1 - x2).abs() + (y1 - y2).abs() + (z1 - z2).abs()) / 2) as u32
    }

    /// The six adjacent coordinates.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        DIRECTIONS.map(|(dr, dc)| HexCoord::new(self.row + dr, self.col + dc))
    }

    /// All coordinates within `radius` steps (inclusive), the center
    /// included.
    pub fn coords_within(&self, radius: u32) -> Vec<HexCoord> {
        let range = radius as i32;
        let mut results = Vec::new();
        for dq in -range..=range {
            for dr in (-range).max(-dq - range)..=range.min(-dq + range) {
                results.push(HexCoord::new(self.row + dr, self.col + dq));
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_identity() {
        let a = HexCoord::new(3, -2);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn distance_examples() {
        assert_eq!(HexCoord::new(0, 0).distance(&HexCoord::new(1, 2)), 3);
        assert_eq!(HexCoord::new(0, 0).distance(&HexCoord::new(3, 0)), 3);
        assert_eq!(HexCoord::new(0, 0).distance(&HexCoord::new(1, -1)), 1);
    }

    #[test]
    fn neighbors_are_distance_one() {
        let center = HexCoord::new(4, 7);
        let neighbors = center.neighbors();
        assert_eq!(neighbors.len(), 6);
        for n in neighbors {
            assert_eq!(center.distance(&n), 1);
        }
    }

    #[test]
    fn neighbors_exclude_rectangle_corners() {
        // (row+1, col+1) and (row-1, col-1) sit inside the bounding
        // rectangle but are two steps away on the hex grid.
        let center = HexCoord::new(0, 0);
        let neighbors = center.neighbors();
        assert!(!neighbors.contains(&HexCoord::new(1, 1)));
        assert!(!neighbors.contains(&HexCoord::new(-1, -1)));
        assert_eq!(center.distance(&HexCoord::new(1, 1)), 2);
    }

    #[test]
    fn coords_within_counts() {
        // 1 + 3r(r+1) hexes inside radius r.
        let center = HexCoord::new(0, 0);
        assert_eq!(center.coords_within(0).len(), 1);
        assert_eq!(center.coords_within(1).len(), 7);
        assert_eq!(center.coords_within(2).len(), 19);
        for c in center.coords_within(2) {
            assert!(center.distance(&c) <= 2);
        }
    }
}
