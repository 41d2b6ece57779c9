//! Stackbot - falling-block game core with a two-ply placement AI.
//!
//! The workspace crates do the work; this crate ties them to a file
//! configuration and the `autoplay` binary.

pub mod config;

pub use config::{AiConfig, AutoplayConfig, Config, ConfigError};
pub use stackbot_core::{
    BoardConfig, Cell, Game, Grid, GridParseError, Movement, Piece, Playfield, Rotation, SevenBag,
};
pub use stackbot_engine::{generate_positions, optimize_inputs, Position, SearchError};
pub use stackbot_eval::{evaluate, EvalWeights};
pub use stackbot_search::{AiMove, SelectorError, TwoPlySelector};
