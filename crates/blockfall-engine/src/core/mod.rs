pub use self::{block::*, piece::*, rules::*, shapes::*, style::*};

pub(crate) mod block;
pub(crate) mod piece;
pub(crate) mod rules;
pub(crate) mod shapes;
pub(crate) mod style;
