use super::shapes::ShapeKind;

/// Style tokens for the four blocks of one shape.
///
/// A renderer either paints a whole piece the same way or distinguishes the
/// blocks by index (useful for debugging rotation tables).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeStyle<S> {
    /// One token shared by all four blocks.
    Uniform(S),
    /// One token per block index, `0..4`.
    PerBlock([S; 4]),
}

impl<S> ShapeStyle<S>
where
    S: Clone,
{
    /// Returns the token for the block at `index` (taken modulo 4).
    #[must_use]
    pub fn block(&self, index: usize) -> S {
        match self {
            ShapeStyle::Uniform(style) => style.clone(),
            ShapeStyle::PerBlock(styles) => styles[index % 4].clone(),
        }
    }
}

/// Style tokens for every shape kind, as reported by the user interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStyles<S> {
    pub o: ShapeStyle<S>,
    pub i: ShapeStyle<S>,
    pub s: ShapeStyle<S>,
    pub z: ShapeStyle<S>,
    pub l: ShapeStyle<S>,
    pub j: ShapeStyle<S>,
    pub t: ShapeStyle<S>,
}

impl<S> BlockStyles<S>
where
    S: Clone,
{
    /// Uses `style` for every block of every shape.
    #[must_use]
    pub fn uniform(style: S) -> Self {
        Self::from_fn(|_| ShapeStyle::Uniform(style.clone()))
    }

    /// Builds the table by asking `f` for each shape kind.
    pub fn from_fn(mut f: impl FnMut(ShapeKind) -> ShapeStyle<S>) -> Self {
        Self {
            o: f(ShapeKind::O),
            i: f(ShapeKind::I),
            s: f(ShapeKind::S),
            z: f(ShapeKind::Z),
            l: f(ShapeKind::L),
            j: f(ShapeKind::J),
            t: f(ShapeKind::T),
        }
    }

    #[must_use]
    pub fn get(&self, kind: ShapeKind) -> &ShapeStyle<S> {
        match kind {
            ShapeKind::O => &self.o,
            ShapeKind::I => &self.i,
            ShapeKind::S => &self.s,
            ShapeKind::Z => &self.z,
            ShapeKind::L => &self.l,
            ShapeKind::J => &self.j,
            ShapeKind::T => &self.t,
        }
    }
}
