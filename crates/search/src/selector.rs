use log::{debug, trace};
use stackbot_core::{Game, Movement, Piece};
use stackbot_engine::{generate_positions, optimize_inputs, Position, SearchError};
use stackbot_eval::{evaluate, EvalWeights};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::SelectorError;

/// The selector's answer for one piece.
#[derive(Clone, Debug, PartialEq)]
pub struct AiMove {
    /// Symbols to feed one at a time, ending with `Drop`.
    pub inputs: Vec<Movement>,
    /// Hold before applying `inputs`.
    pub uses_hold: bool,
    pub score: f64,
    /// Piece the inputs move.
    pub piece: Piece,
}

/// Picks the placement whose best follow-up with the next piece scores
/// highest, optionally after swapping through the hold slot.
pub struct TwoPlySelector {
    weights: EvalWeights,
    #[cfg(feature = "rayon")]
    pool: Option<rayon::ThreadPool>,
}

impl TwoPlySelector {
    /// Selector on rayon's global pool when parallel.
    pub fn new(weights: EvalWeights) -> Self {
        Self {
            weights,
            #[cfg(feature = "rayon")]
            pool: None,
        }
    }

    /// Selector with a dedicated pool of `threads` workers; 0 keeps the
    /// global pool.
    pub fn with_threads(weights: EvalWeights, threads: usize) -> Result<Self, SelectorError> {
        #[cfg(feature = "rayon")]
        {
            let pool = if threads == 0 {
                None
            } else {
                Some(rayon::ThreadPoolBuilder::new().num_threads(threads).build()?)
            };
            Ok(Self { weights, pool })
        }
        #[cfg(not(feature = "rayon"))]
        {
            debug!("built without rayon, ignoring {} threads", threads);
            Ok(Self::new(weights))
        }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Choose the next move for `game`'s live piece.
    pub fn compute_move(&self, game: &Game) -> Result<AiMove, SelectorError> {
        let mut candidates = generate_positions(game.field(), game.current(), game.next(), false)?;

        if game.can_hold() {
            let mut held = game.clone();
            if held.hold_piece() && !held.is_over() {
                candidates.extend(generate_positions(
                    held.field(),
                    held.current(),
                    held.next(),
                    true,
                )?);
            }
        }

        let scores = self.score_all(&candidates)?;
        for (candidate, score) in candidates.iter_mut().zip(scores) {
            trace!(
                "{:?} r{} ({}, {}) hold={} -> {:.3}",
                candidate.current,
                candidate.placement.field.rotation().index(),
                candidate.placement.field.x(),
                candidate.placement.field.y(),
                candidate.uses_hold,
                score
            );
            candidate.score = score;
        }

        let best = best_position(&candidates).ok_or(SearchError::NoPlacements {
            piece: game.current(),
        })?;

        let mut inputs = optimize_inputs(best.grid(), best.inputs());
        inputs.push(Movement::Drop);
        debug!(
            "chose {:?} of {} candidates, score {:.3}, hold {}, {} inputs",
            best.current,
            candidates.len(),
            best.score,
            best.uses_hold,
            inputs.len()
        );

        Ok(AiMove {
            inputs,
            uses_hold: best.uses_hold,
            score: best.score,
            piece: best.current,
        })
    }

    /// Score of `position` as the best evaluation over every placement of
    /// its next piece on the board it leaves behind. A board the next piece
    /// cannot spawn on is a top-out and scores negative infinity.
    pub fn sub_position_score(&self, position: &Position) -> Result<f64, SearchError> {
        let mut field = position.settle();
        if !field.spawn(position.next) {
            trace!("{:?} cannot spawn after this placement", position.next);
            return Ok(f64::NEG_INFINITY);
        }

        let mut followups =
            generate_positions(&field, position.next, position.next, position.uses_hold)?;
        for followup in &mut followups {
            followup.score = evaluate(followup.grid(), &self.weights);
        }
        best_position(&followups)
            .map(|best| best.score)
            .ok_or(SearchError::NoPlacements {
                piece: position.next,
            })
    }

    #[cfg(feature = "rayon")]
    fn score_all(&self, candidates: &[Position]) -> Result<Vec<f64>, SearchError> {
        let run = || {
            candidates
                .par_iter()
                .map(|candidate| self.sub_position_score(candidate))
                .collect::<Result<Vec<_>, _>>()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn score_all(&self, candidates: &[Position]) -> Result<Vec<f64>, SearchError> {
        candidates
            .iter()
            .map(|candidate| self.sub_position_score(candidate))
            .collect()
    }
}

/// Highest-scoring position; the earliest wins ties.
pub fn best_position(positions: &[Position]) -> Option<&Position> {
    positions.iter().fold(None, |best, position| match best {
        Some(best) if position.score <= best.score => Some(best),
        _ => Some(position),
    })
}
