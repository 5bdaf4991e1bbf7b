use std::fmt::{Display, Formatter};

use crate::point::Point;

/// A grid value together with the coordinate it was read from.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Cell<T> {
    /// Where the value lives.
    pub point: Point,
    /// The value itself.
    pub value: T,
}

impl<T> Cell<T> {
    /// Pair up `point` and `value`.
    pub fn new(point: Point, value: T) -> Self {
        Self { point, value }
    }
}

impl<T: Display> Display for Cell<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.point, self.value)
    }
}
