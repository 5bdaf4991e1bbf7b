use std::fmt::{Display, Formatter};

use itertools::{Itertools, MinMaxResult};

use crate::direction::Direction;
use crate::point::{Coord, Point};

/// An axis-aligned rectangle of grid points, both corners included.
///
/// Built from any two opposite corners; the corners are normalized, so `Rectangle::new(a, b) == Rectangle::new(b, a)`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Rectangle {
    top_left: Point,
    bottom_right: Point,
}

impl Rectangle {
    /// The rectangle with `corner` and `opposite` as opposite corners.
    pub fn new(corner: Point, opposite: Point) -> Self {
        Self {
            top_left: Point(corner.x().min(opposite.x()), corner.y().min(opposite.y())),
            bottom_right: Point(corner.x().max(opposite.x()), corner.y().max(opposite.y())),
        }
    }

    /// Smallest rectangle holding every one of `points`, or [`None`] when there are none.
    pub fn bounding<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let points = points.into_iter().collect_vec();
        let (left, right) = span(points.iter().map(Point::x))?;
        let (top, bottom) = span(points.iter().map(Point::y))?;
        Some(Self::new(Point(left, top), Point(right, bottom)))
    }

    /// Smallest `y`.
    pub fn top(&self) -> Coord {
        self.top_left.y()
    }

    /// Largest `y`.
    pub fn bottom(&self) -> Coord {
        self.bottom_right.y()
    }

    /// Smallest `x`.
    pub fn left(&self) -> Coord {
        self.top_left.x()
    }

    /// Largest `x`.
    pub fn right(&self) -> Coord {
        self.bottom_right.x()
    }

    /// Corner with the smallest `x` and `y`.
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    /// Corner with the largest `x` and smallest `y`.
    pub fn top_right(&self) -> Point {
        Point(self.right(), self.top())
    }

    /// Corner with the smallest `x` and largest `y`.
    pub fn bottom_left(&self) -> Point {
        Point(self.left(), self.bottom())
    }

    /// Corner with the largest `x` and `y`.
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    /// Whether `point` lies inside or on the border.
    pub fn contains(&self, point: Point) -> bool {
        (self.left()..=self.right()).contains(&point.x()) && (self.top()..=self.bottom()).contains(&point.y())
    }

    /// Number of points covered.
    pub fn area(&self) -> usize {
        self.top_left.length_x(self.bottom_right) * self.top_left.length_y(self.bottom_right)
    }

    /// Whether the two rectangles share at least one point.
    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.left().max(other.left()) <= self.right().min(other.right())
            && self.top().max(other.top()) <= self.bottom().min(other.bottom())
    }

    /// This rectangle without its border, or [`None`] if nothing is left once the border is removed.
    pub fn inner_rectangle(&self) -> Option<Rectangle> {
        if self.right() - self.left() < 2 || self.bottom() - self.top() < 2 {
            return None;
        }
        Some(Self::new(self.top_left.step(Direction::DownRight), self.bottom_right.step(Direction::UpLeft)))
    }

    /// Whether the rectangle is a single row or a single column.
    pub fn is_flat(&self) -> bool {
        self.left() == self.right() || self.top() == self.bottom()
    }

    /// Every point of the rectangle, column by column.
    pub fn points(&self) -> Vec<Point> {
        self.top_left.enumerate_rectangle(self.bottom_right)
    }
}

impl From<(Point, Point)> for Rectangle {
    fn from((corner, opposite): (Point, Point)) -> Self {
        Self::new(corner, opposite)
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.top_left, self.bottom_right)
    }
}

fn span(values: impl Iterator<Item = Coord>) -> Option<(Coord, Coord)> {
    match values.minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(value) => Some((value, value)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}
