//! Stackbot search crate - two-ply move selection.

mod error;
mod selector;

pub use error::SelectorError;
pub use selector::{best_position, AiMove, TwoPlySelector};
