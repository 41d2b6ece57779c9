use stackbot_core::Piece;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Every live piece has at least one resting place, so an empty search
    /// means the playfield was handed over in a broken state.
    #[error("no reachable placement for {piece:?}")]
    NoPlacements { piece: Piece },
    #[error("playfield has no live piece")]
    NoLivePiece,
}
