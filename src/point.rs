use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Sub};

use itertools::Itertools;
use ndarray::Ix;
use strum::VariantArray;
use thiserror::Error;

use crate::direction::Direction;

/// Signed coordinate component. Signed so that stepping off the top or left edge of a grid is representable.
pub type Coord = isize;

/// Reasons a [`Point`] operation may fail.
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum PointError {
    /// The two points do not touch, not even diagonally.
    #[error("point {to} is not adjacent to {from}")]
    NotAdjacent {
        /// Origin point.
        from: Point,
        /// Point that was expected to be adjacent to `from`.
        to: Point,
    },
    /// Only quarter turns are supported.
    #[error("rotation by {0} degrees is not a multiple of 90")]
    UnsupportedRotation(i32),
    /// [`Point::move_within`] needs an area at least one point wide and tall.
    #[error("boundaries {0:?} hold no point")]
    EmptyBoundaries(Boundaries),
}

/// A point `(x, y)`. The top left corner of a grid is `Point(0, 0)`; `y` indexes rows and `x` indexes columns.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct Point(pub Coord, pub Coord);

impl Point {
    /// Column component.
    #[inline]
    pub fn x(&self) -> Coord {
        self.0
    }

    /// Row component.
    #[inline]
    pub fn y(&self) -> Coord {
        self.1
    }

    /// Translate by `(dx, dy)`.
    ///
    /// Like plain integer arithmetic, this overflows when a component leaves the range of [`Coord`]; use
    /// [`Self::checked_offset_by`] near the edges of that range.
    pub fn offset_by(self, dx: Coord, dy: Coord) -> Self {
        Self(self.0 + dx, self.1 + dy)
    }

    /// Translate by `(dx, dy)`, or [`None`] if a component would overflow.
    pub fn checked_offset_by(self, dx: Coord, dy: Coord) -> Option<Self> {
        Some(Self(self.0.checked_add(dx)?, self.1.checked_add(dy)?))
    }

    /// Take a single step in `direction`, or [`None`] if a component would overflow.
    pub fn checked_step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        self.checked_offset_by(dx, dy)
    }

    /// Take a single step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        self.step_by(direction, 1)
    }

    /// Take `distance` steps in `direction`.
    pub fn step_by(self, direction: Direction, distance: Coord) -> Self {
        let (dx, dy) = direction.offset();
        self.offset_by(dx * distance, dy * distance)
    }

    /// Translate by `(dx, dy)` without leaving `boundaries`.
    ///
    /// When `wrap` is set, a coordinate leaving one side re-enters on the opposite side (floor modulo).
    /// Otherwise it is clamped to the nearest edge. Fails with [`PointError::EmptyBoundaries`] when `boundaries` holds
    /// no point.
    pub fn move_within(self, dx: Coord, dy: Coord, boundaries: Boundaries, wrap: bool) -> Result<Self, PointError> {
        if boundaries.max_x < 0 || boundaries.max_y < 0 {
            return Err(PointError::EmptyBoundaries(boundaries));
        }

        let Self(x, y) = self.offset_by(dx, dy);
        Ok(if wrap {
            Self(x.rem_euclid(boundaries.size_x()), y.rem_euclid(boundaries.size_y()))
        } else {
            Self(x.clamp(0, boundaries.max_x), y.clamp(0, boundaries.max_y))
        })
    }

    /// The four cardinal neighbors, in the order up, down, left, right.
    pub fn neighbors(&self) -> Vec<Point> {
        Direction::CARDINAL.iter().map(|direction| self.step(*direction)).collect_vec()
    }

    /// The 3x3 block around this point, top row first.
    /// The middle row omits `self` unless `include_self` is set.
    pub fn all_neighbors(&self, include_self: bool) -> Vec<Vec<Point>> {
        (-1..=1)
            .map(|dy| {
                (-1..=1)
                    .filter(|dx| include_self || *dx != 0 || dy != 0)
                    .map(|dx| self.offset_by(dx, dy))
                    .collect_vec()
            })
            .collect_vec()
    }

    /// The [`Direction`] leading from `self` to `other`, which must be one of its eight neighbors.
    pub fn direction_to_adjacent(&self, other: Point) -> Result<Direction, PointError> {
        Direction::VARIANTS
            .iter()
            .find(|direction| self.step(**direction) == other)
            .copied()
            .ok_or(PointError::NotAdjacent { from: *self, to: other })
    }

    /// Rotate around the origin by a multiple of 90 degrees.
    /// Positive values rotate clockwise, negative values counterclockwise.
    pub fn rotate(&self, degrees: i32) -> Result<Point, PointError> {
        match degrees.rem_euclid(360) {
            0 => Ok(*self),
            90 => Ok(Self(self.1, -self.0)),
            180 => Ok(Self(-self.0, -self.1)),
            270 => Ok(Self(-self.1, self.0)),
            _ => Err(PointError::UnsupportedRotation(degrees)),
        }
    }

    /// Swap `x` and `y`.
    pub fn transposed(&self) -> Point {
        Self(self.1, self.0)
    }

    /// Every point of the rectangle spanned by `self` and `other` as opposite corners, column by column.
    pub fn enumerate_rectangle(&self, other: Point) -> Vec<Point> {
        let (x1, x2) = (self.0.min(other.0), self.0.max(other.0));
        let (y1, y2) = (self.1.min(other.1), self.1.max(other.1));
        (x1..=x2)
            .cartesian_product(y1..=y2)
            .map(|(x, y)| Self(x, y))
            .collect_vec()
    }

    /// Every point from `self` to `other`, both ends included, in walking order.
    ///
    /// Only horizontal, vertical and 45 degree lines come out straight: otherwise the shorter axis stops at its
    /// target value while the longer one keeps going, e.g. `(0, 0)` to `(5, 2)` yields
    /// `(0, 0) (1, 1) (2, 2) (3, 2) (4, 2) (5, 2)`.
    pub fn enumerate_line(&self, other: Point) -> Vec<Point> {
        let len = self.length_x(other).max(self.length_y(other));
        let xs = toward(self.0, other.0);
        let ys = toward(self.1, other.1);
        (0..len)
            .map(|i| Self(xs[i.min(xs.len() - 1)], ys[i.min(ys.len() - 1)]))
            .collect_vec()
    }

    /// Number of columns covered between `self` and `other`, both included.
    pub fn length_x(&self, other: Point) -> usize {
        self.0.abs_diff(other.0) + 1
    }

    /// Number of rows covered between `self` and `other`, both included.
    pub fn length_y(&self, other: Point) -> usize {
        self.1.abs_diff(other.1) + 1
    }

    /// Euclidean distance.
    pub fn distance(&self, other: Point) -> f64 {
        let dx = (other.0 - self.0) as f64;
        let dy = (other.1 - self.1) as f64;
        dx.hypot(dy)
    }

    /// Manhattan (L1) distance.
    pub fn manhattan_distance(&self, other: Point) -> usize {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }
}

/// Walk a path given by its turning points: every point of every segment, in order.
///
/// A point where two segments meet appears once, but a point the path crosses again is repeated.
pub fn enumerate_lines(path: &[Point]) -> Vec<Point> {
    path.iter()
        .tuple_windows()
        .flat_map(|(from, to)| {
            let mut segment = from.enumerate_line(*to);
            segment.pop();
            segment
        })
        .chain(path.last().copied())
        .collect_vec()
}

/// Points walked by both paths (see [`enumerate_lines`]), minus the `ignored` ones.
pub fn intersections(path: &[Point], other: &[Point], ignored: &BTreeSet<Point>) -> BTreeSet<Point> {
    let walked = enumerate_lines(path).into_iter().collect::<BTreeSet<_>>();
    enumerate_lines(other)
        .into_iter()
        .filter(|point| walked.contains(point) && !ignored.contains(point))
        .collect()
}

/// Smallest `x` among `points`.
pub fn min_x(points: &[Point]) -> Option<Coord> {
    points.iter().map(Point::x).min()
}

/// Largest `x` among `points`.
pub fn max_x(points: &[Point]) -> Option<Coord> {
    points.iter().map(Point::x).max()
}

/// Smallest `y` among `points`.
pub fn min_y(points: &[Point]) -> Option<Coord> {
    points.iter().map(Point::y).min()
}

/// Largest `y` among `points`.
pub fn max_y(points: &[Point]) -> Option<Coord> {
    points.iter().map(Point::y).max()
}

// inclusive walk from `from` to `to`, descending if needed
fn toward(from: Coord, to: Coord) -> Vec<Coord> {
    if from <= to {
        (from..=to).collect_vec()
    } else {
        (to..=from).rev().collect_vec()
    }
}

impl From<(Ix, Ix)> for Point {
    /// From an ndarray `(row, col)` index.
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1 as Coord, value.0 as Coord)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        self.offset_by(rhs.0, rhs.1)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        self.offset_by(-rhs.0, -rhs.1)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Inclusive upper bounds of an area anchored at `Point(0, 0)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Boundaries {
    /// Largest valid `x`.
    pub max_x: Coord,
    /// Largest valid `y`.
    pub max_y: Coord,
}

impl Boundaries {
    /// Boundaries of an area `size_x` wide and `size_y` tall.
    pub fn of_size(size_x: Coord, size_y: Coord) -> Self {
        Self { max_x: size_x - 1, max_y: size_y - 1 }
    }

    /// Width.
    pub fn size_x(&self) -> Coord {
        self.max_x + 1
    }

    /// Height.
    pub fn size_y(&self) -> Coord {
        self.max_y + 1
    }
}
