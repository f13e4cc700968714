//! Movement planning and execution over a caller-supplied path.
//!
//! Every check is a pure function of the grid, the force and the
//! path. Execution returns a proposed mutation; nothing is applied
//! here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{EngineError, Result};
use crate::core::types::ForceId;
use crate::forces::force::Force;
use crate::map::grid::{HexCell, HexGrid};
use crate::map::hex::HexCoord;
use crate::map::terrain;

/// A costed, possibly truncated movement query. `path` is the part
/// that fits the force's action-point budget; `original_path` always
/// holds the full requested path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementPlan {
    pub force: ForceId,
    pub path: Vec<HexCoord>,
    pub original_path: Vec<HexCoord>,
    /// Cost of `path`.
    pub cost: u32,
    /// Cost of the full requested path.
    pub full_cost: u32,
    pub truncated: bool,
}

/// Proposed mutation from an executed movement. The caller persists
/// the new position and budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementProposal {
    pub force: ForceId,
    pub destination: HexCoord,
    pub path: Vec<HexCoord>,
    pub cost: u32,
    pub remaining_action_points: u32,
}

/// Cost of one step from `current` to `next`: a base of 1, plus the
/// terrain cost of the entered cell, plus the climb cost.
fn step_cost(current: &HexCell, next: &HexCell) -> u32 {
    1 + next.terrain.movement_cost() + terrain::elevation_cost(current.elevation, next.elevation)
}

/// Total action-point cost of a path. All cells must exist.
pub fn path_cost(grid: &HexGrid, path: &[HexCoord]) -> Result<u32> {
    let mut cost = 0;
    for pair in path.windows(2) {
        let current = grid.cell(&pair[0])?;
        let next = grid.cell(&pair[1])?;
        cost += step_cost(current, next);
    }
    Ok(cost)
}

/// Validate a path for a force: non-empty, anchored at the force's
/// position, continuous, and passable for its service branch.
fn validate(grid: &HexGrid, force: &Force, path: &[HexCoord]) -> Result<()> {
    if path.is_empty() {
        return Err(EngineError::InvalidInput("empty movement path".into()));
    }
    if path[0] != force.position {
        return Err(EngineError::InvalidStart(force.id));
    }
    for pair in path.windows(2) {
        grid.cell(&pair[0])?;
        grid.cell(&pair[1])?;
        if pair[0].distance(&pair[1]) != 1 {
            return Err(EngineError::Discontinuous {
                from: pair[0],
                to: pair[1],
            });
        }
    }
    for coord in path {
        let cell = grid.cell(coord)?;
        if !cell.passability.allows(force.service) {
            return Err(EngineError::Impassable(*coord, force.service));
        }
    }
    Ok(())
}

/// Greedy prefix of `path` whose cost fits `budget`: steps are taken
/// in order until the next one would overdraw. Deterministic and
/// order-preserving.
fn truncate(grid: &HexGrid, path: &[HexCoord], budget: u32) -> Result<(Vec<HexCoord>, u32)> {
    let mut prefix = vec![path[0]];
    let mut cost = 0;
    for pair in path.windows(2) {
        let current = grid.cell(&pair[0])?;
        let next = grid.cell(&pair[1])?;
        let step = step_cost(current, next);
        if cost + step > budget {
            break;
        }
        prefix.push(pair[1]);
        cost += step;
    }
    Ok((prefix, cost))
}

/// Non-committing query: validate and cost the path, truncating it to
/// the force's budget when the full path overdraws.
pub fn plan_movement(grid: &HexGrid, force: &Force, path: &[HexCoord]) -> Result<MovementPlan> {
    validate(grid, force, path)?;
    let full_cost = path_cost(grid, path)?;

    if full_cost <= force.action_points {
        return Ok(MovementPlan {
            force: force.id,
            path: path.to_vec(),
            original_path: path.to_vec(),
            cost: full_cost,
            full_cost,
            truncated: false,
        });
    }

    let (prefix, cost) = truncate(grid, path, force.action_points)?;
    debug!(
        force = force.id.0,
        full_cost,
        budget = force.action_points,
        reached = prefix.len(),
        "movement plan truncated to budget"
    );
    Ok(MovementPlan {
        force: force.id,
        path: prefix,
        original_path: path.to_vec(),
        cost,
        full_cost,
        truncated: true,
    })
}

/// Committing variant: the whole path must fit the budget. Returns
/// the proposed position/budget mutation for the caller to persist.
pub fn execute_movement(grid: &HexGrid, force: &Force, path: &[HexCoord]) -> Result<MovementProposal> {
    validate(grid, force, path)?;
    let cost = path_cost(grid, path)?;
    if cost > force.action_points {
        return Err(EngineError::InsufficientActionPoints {
            needed: cost,
            available: force.action_points,
        });
    }
    let destination = match path.last() {
        Some(last) => *last,
        None => return Err(EngineError::InvalidInput("empty path".to_string())),
    };
    debug!(
        force = force.id.0,
        cost,
        ?destination,
        "movement executed"
    );
    Ok(MovementProposal {
        force: force.id,
        destination,
        path: path.to_vec(),
        cost,
        remaining_action_points: force.action_points - cost,
    })
}
