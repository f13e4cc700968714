//! Hexfront - turn-based wargame simulation rules engine
//!
//! A stateless computation library: callers load entities, invoke the
//! movement planner or battle resolver, and persist the proposed
//! mutations returned to them. The engine itself performs no I/O.

pub mod core;
pub mod engine;
pub mod forces;
pub mod log;
pub mod map;
pub mod world;
