//! Core game types and logic (world, actors, AI, orchestration).
//!
//! Re-exports:
//! - `grid`: Level loading and spatial queries
//! - `actor`: Player state and slide collision
//! - `monster`: Monster behavior engine
//! - `session`: Per-tick orchestration and outcome signals

pub mod actor;
pub mod grid;
pub mod monster;
pub mod session;
