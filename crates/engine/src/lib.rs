//! stackbot-engine - placement search and input post-processing.
//!
//! Enumerates every resting placement reachable by rotate/left/right/down
//! from the spawn, with the shortest input path to each.

pub mod error;
pub mod inputs;
pub mod movegen;
pub mod position;

pub use error::SearchError;
pub use inputs::{hard_drop_reachable, optimize_inputs};
pub use movegen::{fast_drop, find_placements, generate_positions};
pub use position::{InputPath, Placement, Position, StateKey};
