//! Geometry of the seven tetrominoes.
//!
//! Every shape lives in its own module with literal spawn and rotation
//! tables. The tables are not derived from a rotation matrix, so each one is
//! tested against the coordinates it is expected to produce.

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

pub use self::{i::IShape, j::JShape, l::LShape, o::OShape, s::SShape, t::TShape, z::ZShape};

mod i;
mod j;
mod l;
mod o;
mod s;
mod t;
mod z;

/// Offsets of blocks `0..4` from a reference point.
pub type Layout = [(i32, i32); 4];

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// O-piece.
    O = 0,
    /// I-piece.
    I = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// L-piece.
    L = 4,
    /// J-piece.
    J = 5,
    /// T-piece.
    T = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        match rng.random_range(0..=6) {
            0 => ShapeKind::O,
            1 => ShapeKind::I,
            2 => ShapeKind::S,
            3 => ShapeKind::Z,
            4 => ShapeKind::L,
            5 => ShapeKind::J,
            _ => ShapeKind::T,
        }
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::O,
        Self::I,
        Self::S,
        Self::Z,
        Self::L,
        Self::J,
        Self::T,
    ];

    /// Returns the single character representation of this shape kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::O => 'O',
            ShapeKind::I => 'I',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::L => 'L',
            ShapeKind::J => 'J',
            ShapeKind::T => 'T',
        }
    }

    /// Parses a shape kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_char('S'), Some(ShapeKind::S));
    /// assert_eq!(ShapeKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'O' => Some(ShapeKind::O),
            'I' => Some(ShapeKind::I),
            'S' => Some(ShapeKind::S),
            'Z' => Some(ShapeKind::Z),
            'L' => Some(ShapeKind::L),
            'J' => Some(ShapeKind::J),
            'T' => Some(ShapeKind::T),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use crate::core::{block::Block, piece::Shape, style::ShapeStyle};

    pub(crate) fn spawn<T: Shape<()>>(x: i32, y: i32) -> T {
        T::spawn((x, y), &ShapeStyle::Uniform(()))
    }

    pub(crate) fn positions<T: Shape<()>>(shape: &T) -> Vec<(i32, i32)> {
        shape.body().blocks().iter().map(Block::position).collect()
    }

    /// Rotates four times and checks the piece ends where it started.
    pub(crate) fn assert_full_turn<T: Shape<()>>() {
        let mut shape = spawn::<T>(5, 5);
        let start = positions(&shape);
        for _ in 0..4 {
            shape.rotate();
        }
        assert_eq!(positions(&shape), start, "{:?}", T::KIND);
        assert_eq!(shape.body().rotation().value(), 0);
        assert_eq!(shape.body().anchor(), (5, 5));
    }
}
