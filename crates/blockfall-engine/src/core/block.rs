/// A single occupied cell of the playfield.
///
/// The style token is chosen when the owning piece is spawned and is carried
/// along unchanged; only the renderer interprets it.
///
/// # Coordinate System
///
/// - `x` grows to the right, `y` grows downward
/// - `(0, 0)` is the top-left cell of the board
/// - Negative `y` is legal for pieces that have not fully entered the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<S> {
    x: i32,
    y: i32,
    style: S,
}

impl<S> Block<S> {
    #[must_use]
    pub const fn new(x: i32, y: i32, style: S) -> Self {
        Self { x, y, style }
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[must_use]
    pub const fn style(&self) -> &S {
        &self.style
    }

    #[must_use]
    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    pub(crate) fn move_down(&mut self) {
        self.y += 1;
    }

    pub(crate) fn move_left(&mut self) {
        self.x -= 1;
    }

    pub(crate) fn move_right(&mut self) {
        self.x += 1;
    }

    pub(crate) fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let block = Block::new(3, -2, "red");
        assert_eq!(block.x(), 3);
        assert_eq!(block.y(), -2);
        assert_eq!(block.position(), (3, -2));
        assert_eq!(*block.style(), "red");
        assert!(block.is_at(3, -2));
        assert!(!block.is_at(-2, 3));
    }

    #[test]
    fn test_moves_keep_style() {
        let mut block = Block::new(5, 5, 'x');
        block.move_down();
        assert_eq!(block.position(), (5, 6));
        block.move_left();
        block.move_left();
        assert_eq!(block.position(), (3, 6));
        block.move_right();
        assert_eq!(block.position(), (4, 6));
        block.set_position(0, -1);
        assert_eq!(block.position(), (0, -1));
        assert_eq!(*block.style(), 'x');
    }
}
