use crate::core::piece::{Body, Shape};

use super::{Layout, ShapeKind};

/// ```text
/// 1 0
///   2 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZShape<S>(Body<S>);

impl<S> Shape<S> for ZShape<S> {
    const KIND: ShapeKind = ShapeKind::Z;
    const SPAWN: Layout = [(0, 0), (-1, 0), (0, 1), (1, 1)];
    const ROTATIONS: [Layout; 4] = [
        [(0, 0), (0, 1), (1, 0), (1, -1)],
        [(0, 0), (1, 0), (0, -1), (-1, -1)],
        [(0, 0), (0, -1), (-1, 0), (-1, 1)],
        [(0, 0), (-1, 0), (0, 1), (1, 1)],
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
