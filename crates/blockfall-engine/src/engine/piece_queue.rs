use std::collections::{VecDeque, vec_deque};

use crate::core::Tetromino;

use super::piece_factory::PieceFactory;

/// Fixed-length lookahead of upcoming pieces.
///
/// Every piece taken from the front is replaced by a fresh random piece at
/// the back, so the length never changes after construction.
#[derive(Debug, Clone)]
pub struct PieceQueue<S> {
    pieces: VecDeque<Tetromino<S>>,
}

impl<S> PieceQueue<S>
where
    S: Clone,
{
    /// Draws `size` random pieces from `factory`.
    pub fn filled(size: usize, factory: &mut PieceFactory<S>) -> Self {
        let pieces = (0..size).map(|_| factory.random()).collect();
        Self { pieces }
    }

    /// Takes the front piece and appends a new random one.
    pub fn advance(&mut self, factory: &mut PieceFactory<S>) -> Tetromino<S> {
        let next = self.pieces.pop_front();
        self.pieces.push_back(factory.random());
        // an empty queue degenerates to drawing directly from the factory
        next.unwrap_or_else(|| factory.random())
    }
}

impl<S> PieceQueue<S> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[must_use]
    pub fn front(&self) -> Option<&Tetromino<S>> {
        self.pieces.front()
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Tetromino<S>> {
        self.pieces.iter()
    }
}

impl<'a, S> IntoIterator for &'a PieceQueue<S> {
    type Item = &'a Tetromino<S>;
    type IntoIter = vec_deque::Iter<'a, Tetromino<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        core::{BlockStyles, ShapeKind},
        engine::piece_factory::{PieceConfig, PieceSeed},
    };

    use super::*;

    fn factory() -> PieceFactory<()> {
        let config = PieceConfig {
            spawn_x: 5,
            spawn_y: 0,
            styles: BlockStyles::uniform(()),
        };
        PieceFactory::new(config, PieceSeed::from(42))
    }

    fn kinds(queue: &PieceQueue<()>) -> Vec<ShapeKind> {
        queue.iter().map(Tetromino::kind).collect()
    }

    #[test]
    fn test_advance_keeps_length_and_order() {
        let mut factory = factory();
        let mut queue = PieceQueue::filled(5, &mut factory);
        assert_eq!(queue.len(), 5);

        let before = kinds(&queue);
        let taken = queue.advance(&mut factory);
        let after = kinds(&queue);

        assert_eq!(taken.kind(), before[0]);
        assert_eq!(queue.len(), 5);
        assert_eq!(after[..4], before[1..]);
    }

    #[test]
    fn test_matches_direct_draws() {
        let mut direct = factory();
        let expected: Vec<_> = (0..8).map(|_| direct.random().kind()).collect();

        let mut factory = factory();
        let mut queue = PieceQueue::filled(3, &mut factory);
        let mut taken = vec![];
        for _ in 0..5 {
            taken.push(queue.advance(&mut factory).kind());
        }
        taken.extend(kinds(&queue));
        assert_eq!(taken, expected);
    }
}
