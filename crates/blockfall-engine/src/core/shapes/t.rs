use crate::core::piece::{Body, Shape};

use super::{Layout, ShapeKind};

/// ```text
///   3
/// 1 0 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TShape<S>(Body<S>);

impl<S> Shape<S> for TShape<S> {
    const KIND: ShapeKind = ShapeKind::T;
    const SPAWN: Layout = [(0, 0), (-1, 0), (1, 0), (0, -1)];
    const ROTATIONS: [Layout; 4] = [
        [(0, 0), (0, 1), (0, -1), (-1, 0)],
        [(0, 0), (1, 0), (-1, 0), (0, 1)],
        [(0, 0), (0, -1), (0, 1), (1, 0)],
        [(0, 0), (-1, 0), (1, 0), (0, -1)],
    ];

    fn from_body(body: Body<S>) -> Self {
        Self(body)
    }

    fn body(&self) -> &Body<S> {
        &self.0
    }

    fn body_mut(&mut self) -> &mut Body<S> {
        &mut self.0
    }

    fn into_body(self) -> Body<S> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shapes::test_util::{assert_full_turn, positions, spawn};

    #[test]
    fn test_spawn() {
        let shape = spawn::<TShape<()>>(5, 5);
        assert_eq!(positions(&shape), [(5, 5), (4, 5), (6, 5), (5, 4)]);
    }

    #[test]
    fn test_rotations() {
        let mut shape = spawn::<TShape<()>>(5, 5);
        shape.rotate();
        assert_eq!(positions(&shape), [(5, 5), (5, 6), (5, 4), (4, 5)]);
        shape.rotate();
        assert_eq!(positions(&shape), [(5, 5), (6, 5), (4, 5), (5, 6)]);
        shape.rotate();
        assert_eq!(positions(&shape), [(5, 5), (5, 4), (5, 6), (6, 5)]);
    }

    #[test]
    fn test_full_turn() {
        assert_full_turn::<TShape<()>>();
    }
}
