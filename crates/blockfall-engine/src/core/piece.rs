use super::{
    block::Block,
    rules::{self, Dimensions},
    shapes::{IShape, JShape, LShape, Layout, OShape, SShape, ShapeKind, TShape, ZShape},
    style::ShapeStyle,
};

/// Rotation state of a piece.
///
/// Counts how many times the piece has been rotated since it spawned, modulo
/// 4. State `0` is the spawn orientation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rotation(u8);

impl Rotation {
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value % 4)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn advanced(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    pub(crate) const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// State shared by every shape: anchor, rotation state and the four blocks.
///
/// The anchor is the pivot that rotation tables are expressed against; it is
/// not a block itself and only moves on translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body<S> {
    anchor: (i32, i32),
    rotation: Rotation,
    blocks: [Block<S>; 4],
}

impl<S> Body<S> {
    pub(crate) fn spawn(anchor: (i32, i32), layout: &Layout, style: &ShapeStyle<S>) -> Self
    where
        S: Clone,
    {
        let (x, y) = anchor;
        let blocks = std::array::from_fn(|i| {
            let (dx, dy) = layout[i];
            Block::new(x + dx, y + dy, style.block(i))
        });
        Self {
            anchor,
            rotation: Rotation::default(),
            blocks,
        }
    }

    #[must_use]
    pub const fn anchor(&self) -> (i32, i32) {
        self.anchor
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn blocks(&self) -> &[Block<S>; 4] {
        &self.blocks
    }

    pub(crate) fn into_blocks(self) -> [Block<S>; 4] {
        self.blocks
    }

    /// Places the blocks at `layout` around the anchor and advances the
    /// rotation state.
    pub(crate) fn rotate_to(&mut self, layout: &Layout) {
        let (x, y) = self.anchor;
        for (block, (dx, dy)) in self.blocks.iter_mut().zip(layout) {
            block.set_position(x + dx, y + dy);
        }
        self.rotation = self.rotation.advanced();
    }

    fn move_down(&mut self) {
        self.anchor.1 += 1;
        self.blocks.iter_mut().for_each(Block::move_down);
    }

    fn move_left(&mut self) {
        self.anchor.0 -= 1;
        self.blocks.iter_mut().for_each(Block::move_left);
    }

    fn move_right(&mut self) {
        self.anchor.0 += 1;
        self.blocks.iter_mut().for_each(Block::move_right);
    }
}

/// Geometry of one tetromino kind.
///
/// Each implementation hard-codes its spawn layout and the four layouts its
/// rotation table produces. `ROTATIONS[r]` is where the blocks go when a piece
/// in rotation state `r` rotates, so the table describes transitions rather
/// than resting orientations.
pub trait Shape<S>: Sized {
    const KIND: ShapeKind;
    /// Block offsets from the spawn point at rotation state 0.
    const SPAWN: Layout;
    /// Block offsets from the anchor after rotating out of each state.
    const ROTATIONS: [Layout; 4];

    fn from_body(body: Body<S>) -> Self;
    fn body(&self) -> &Body<S>;
    fn body_mut(&mut self) -> &mut Body<S>;
    fn into_body(self) -> Body<S>;

    fn spawn(anchor: (i32, i32), style: &ShapeStyle<S>) -> Self
    where
        S: Clone,
    {
        Self::from_body(Body::spawn(anchor, &Self::SPAWN, style))
    }

    fn rotate(&mut self) {
        let layout = Self::ROTATIONS[self.body().rotation().as_usize()];
        self.body_mut().rotate_to(&layout);
    }
}

/// A falling piece of any of the seven kinds.
///
/// Movement and rotation never check bounds; callers consult the matching
/// `can_*` predicate immediately before mutating.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Dimensions, ShapeKind, ShapeStyle, Tetromino};
///
/// let mut piece = Tetromino::spawn(ShapeKind::T, (5, 5), &ShapeStyle::Uniform("t"));
/// let dims = Dimensions::new(20, 10).unwrap();
/// if piece.can_rotate(dims, &[]) {
///     piece.rotate();
/// }
/// assert_eq!(piece.rotation().value(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tetromino<S> {
    O(OShape<S>),
    I(IShape<S>),
    S(SShape<S>),
    Z(ZShape<S>),
    L(LShape<S>),
    J(JShape<S>),
    T(TShape<S>),
}

impl<S> Tetromino<S> {
    /// Creates a piece of `kind` whose spawn layout is placed around `anchor`.
    pub fn spawn(kind: ShapeKind, anchor: (i32, i32), style: &ShapeStyle<S>) -> Self
    where
        S: Clone,
    {
        match kind {
            ShapeKind::O => Self::O(OShape::spawn(anchor, style)),
            ShapeKind::I => Self::I(IShape::spawn(anchor, style)),
            ShapeKind::S => Self::S(SShape::spawn(anchor, style)),
            ShapeKind::Z => Self::Z(ZShape::spawn(anchor, style)),
            ShapeKind::L => Self::L(LShape::spawn(anchor, style)),
            ShapeKind::J => Self::J(JShape::spawn(anchor, style)),
            ShapeKind::T => Self::T(TShape::spawn(anchor, style)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::O(_) => ShapeKind::O,
            Self::I(_) => ShapeKind::I,
            Self::S(_) => ShapeKind::S,
            Self::Z(_) => ShapeKind::Z,
            Self::L(_) => ShapeKind::L,
            Self::J(_) => ShapeKind::J,
            Self::T(_) => ShapeKind::T,
        }
    }

    fn body(&self) -> &Body<S> {
        match self {
            Self::O(shape) => shape.body(),
            Self::I(shape) => shape.body(),
            Self::S(shape) => shape.body(),
            Self::Z(shape) => shape.body(),
            Self::L(shape) => shape.body(),
            Self::J(shape) => shape.body(),
            Self::T(shape) => shape.body(),
        }
    }

    fn body_mut(&mut self) -> &mut Body<S> {
        match self {
            Self::O(shape) => shape.body_mut(),
            Self::I(shape) => shape.body_mut(),
            Self::S(shape) => shape.body_mut(),
            Self::Z(shape) => shape.body_mut(),
            Self::L(shape) => shape.body_mut(),
            Self::J(shape) => shape.body_mut(),
            Self::T(shape) => shape.body_mut(),
        }
    }

    /// The four blocks in index order.
    ///
    /// The order is stable across moves and is the order renderers and
    /// rotation tables refer to.
    #[must_use]
    pub fn blocks(&self) -> &[Block<S>; 4] {
        self.body().blocks()
    }

    #[must_use]
    pub fn anchor(&self) -> (i32, i32) {
        self.body().anchor()
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.body().rotation()
    }

    #[must_use]
    pub fn into_blocks(self) -> [Block<S>; 4] {
        match self {
            Self::O(shape) => shape.into_body(),
            Self::I(shape) => shape.into_body(),
            Self::S(shape) => shape.into_body(),
            Self::Z(shape) => shape.into_body(),
            Self::L(shape) => shape.into_body(),
            Self::J(shape) => shape.into_body(),
            Self::T(shape) => shape.into_body(),
        }
        .into_blocks()
    }

    pub fn move_down(&mut self) {
        self.body_mut().move_down();
    }

    pub fn move_left(&mut self) {
        self.body_mut().move_left();
    }

    pub fn move_right(&mut self) {
        self.body_mut().move_right();
    }

    pub fn rotate(&mut self) {
        match self {
            Self::O(shape) => shape.rotate(),
            Self::I(shape) => shape.rotate(),
            Self::S(shape) => shape.rotate(),
            Self::Z(shape) => shape.rotate(),
            Self::L(shape) => shape.rotate(),
            Self::J(shape) => shape.rotate(),
            Self::T(shape) => shape.rotate(),
        }
    }

    #[must_use]
    pub fn can_move_down(&self, dims: Dimensions, settled: &[Block<S>]) -> bool {
        rules::can_move_down(self.blocks(), dims, settled)
    }

    #[must_use]
    pub fn can_move_right(&self, dims: Dimensions, settled: &[Block<S>]) -> bool {
        rules::can_move_right(self.blocks(), dims, settled)
    }

    #[must_use]
    pub fn can_move_left(&self, settled: &[Block<S>]) -> bool {
        rules::can_move_left(self.blocks(), settled)
    }

    /// Rotates a clone and checks whether the result fits.
    #[must_use]
    pub fn can_rotate(&self, dims: Dimensions, settled: &[Block<S>]) -> bool
    where
        S: Clone,
    {
        let mut preview = self.clone();
        preview.rotate();
        rules::fits(preview.blocks(), dims, settled)
    }
}
