use crate::core::piece::{Body, Shape};

use super::{Layout, ShapeKind};

/// ```text
/// 2
/// 1
/// 0 3
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LShape<S>(Body<S>);

impl<S> Shape<S> for LShape<S> {
    const KIND: ShapeKind = ShapeKind::L;
    const SPAWN: Layout = [(0, 0), (0, -1), (0, -2), (1, 0)];
    const ROTATIONS: [Layout; 4] = [
        [(0, 0), (-1, 0), (-2, 0), (0, -1)],
        [(0, 0), (0, 1), (0, 2), (-1, 0)],
        [(0, 0), (1, 0), (2, 0), (0, 1)],
        [(0, 0), (0, -1), (0, -2), (1, 0)],
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
