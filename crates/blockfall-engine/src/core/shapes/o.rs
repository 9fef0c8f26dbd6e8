use crate::core::piece::{Body, Shape};

use super::{Layout, ShapeKind};

/// The square piece.
///
/// ```text
/// 0 3
/// 1 2
/// ```
///
/// The square never changes its footprint, but each rotation moves every
/// block index one corner along, so per-block styles visibly cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OShape<S>(Body<S>);

impl<S> Shape<S> for OShape<S> {
    const KIND: ShapeKind = ShapeKind::O;
    const SPAWN: Layout = [(0, 0), (0, 1), (1, 1), (1, 0)];
    const ROTATIONS: [Layout; 4] = [
        [(0, 1), (1, 1), (1, 0), (0, 0)],
        [(1, 1), (1, 0), (0, 0), (0, 1)],
        [(1, 0), (0, 0), (0, 1), (1, 1)],
        [(0, 0), (0, 1), (1, 1), (1, 0)],
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
