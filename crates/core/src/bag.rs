use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Piece;

/// Bag randomizer: every shape once per bag, refilled when empty.
/// Each game owns its bag, RNG state included, so cloning a game clones
/// its future draws.
#[derive(Clone, Debug)]
pub struct SevenBag {
    remaining: Vec<Piece>,
    rng: StdRng,
}

impl SevenBag {
    pub fn new(rng: StdRng) -> Self {
        Self {
            remaining: Piece::ALL.to_vec(),
            rng,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn next_piece(&mut self) -> Piece {
        let index = self.rng.random_range(0..self.remaining.len());
        let piece = self.remaining.swap_remove(index);
        if self.remaining.is_empty() {
            self.remaining.extend_from_slice(&Piece::ALL);
        }
        piece
    }

    /// Shapes not yet drawn from the current bag.
    pub fn remaining(&self) -> &[Piece] {
        &self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bag_creation() {
        let bag = SevenBag::seeded(1);
        assert_eq!(bag.remaining().len(), 7);
    }

    #[test]
    fn test_every_bag_holds_each_piece_once() {
        let mut bag = SevenBag::seeded(42);
        for _ in 0..20 {
            let mut drawn: Vec<Piece> = (0..7).map(|_| bag.next_piece()).collect();
            drawn.sort_by_key(|p| p.index());
            assert_eq!(drawn, Piece::ALL.to_vec());
        }
    }

    #[test]
    fn test_bag_remaining_shrinks_then_refills() {
        let mut bag = SevenBag::seeded(7);
        let first = bag.next_piece();
        assert_eq!(bag.remaining().len(), 6);
        assert!(!bag.remaining().contains(&first));
        for _ in 0..6 {
            bag.next_piece();
        }
        assert_eq!(bag.remaining().len(), 7);
    }

    #[test]
    fn test_cloned_bag_draws_identically() {
        let mut bag = SevenBag::seeded(99);
        bag.next_piece();
        let mut copy = bag.clone();
        for _ in 0..14 {
            assert_eq!(bag.next_piece(), copy.next_piece());
        }
    }
}
