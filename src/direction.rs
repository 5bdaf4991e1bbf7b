use strum::VariantArray;
use thiserror::Error;

use crate::point::Coord;

/// Reasons a character cannot be read as a [`Direction`].
#[derive(Copy, Clone, Debug, Error, Eq, PartialEq)]
pub enum DirectionError {
    /// The character is not one of the accepted spellings.
    #[error("can't read {0:?} as a direction")]
    UnknownChar(char),
}

/// The eight compass directions on a grid whose rows grow downward.
///
/// Variants are declared in neighbor enumeration order: the four cardinal directions (up, down, left, right),
/// then the diagonals (up-left, up-right, down-left, down-right). [`VARIANTS`](VariantArray::VARIANTS) preserves it.
#[derive(Copy, Clone, VariantArray, strum::Display, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Toward column 0.
    Left,
    /// Away from column 0.
    Right,
    /// Up and left.
    UpLeft,
    /// Up and right.
    UpRight,
    /// Down and left.
    DownLeft,
    /// Down and right.
    DownRight,
}

/// A relative change of heading, see [`Direction::turn`].
#[derive(Copy, Clone, VariantArray, strum::Display, Eq, PartialEq, Hash, Debug)]
pub enum Turn {
    /// A quarter turn clockwise.
    Right,
    /// A quarter turn counterclockwise.
    Left,
    /// Keep the current heading.
    Ahead,
}

impl Direction {
    /// The directions that share an edge with a cell, in enumeration order.
    pub const CARDINAL: &'static [Self] = &[Self::Up, Self::Down, Self::Left, Self::Right];

    /// The directions that only share a corner with a cell, in enumeration order.
    pub const DIAGONAL: &'static [Self] = &[Self::UpLeft, Self::UpRight, Self::DownLeft, Self::DownRight];

    /// Read `U`, `D`, `L` or `R`.
    pub fn from_udlr(udlr: char) -> Result<Self, DirectionError> {
        match udlr {
            'U' => Ok(Self::Up),
            'D' => Ok(Self::Down),
            'L' => Ok(Self::Left),
            'R' => Ok(Self::Right),
            other => Err(DirectionError::UnknownChar(other)),
        }
    }

    /// Read `^`, `v`, `<` or `>`.
    pub fn from_caret(caret: char) -> Result<Self, DirectionError> {
        match caret {
            '^' => Ok(Self::Up),
            'v' => Ok(Self::Down),
            '<' => Ok(Self::Left),
            '>' => Ok(Self::Right),
            other => Err(DirectionError::UnknownChar(other)),
        }
    }

    /// `(dx, dy)` of a single step.
    pub fn offset(&self) -> (Coord, Coord) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (1, -1),
            Self::DownLeft => (-1, 1),
            Self::DownRight => (1, 1),
        }
    }

    /// Whether this direction only shares a corner with the cell it leaves.
    pub fn is_diagonal(&self) -> bool {
        Self::DIAGONAL.contains(self)
    }

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::UpLeft => Self::DownRight,
            Self::UpRight => Self::DownLeft,
            Self::DownLeft => Self::UpRight,
            Self::DownRight => Self::UpLeft,
        }
    }

    /// Change heading by a quarter turn, or not at all for [`Turn::Ahead`].
    ///
    /// Diagonals rotate among themselves, e.g. up-left turned right is up-right.
    pub fn turn(&self, turn: Turn) -> Self {
        match turn {
            Turn::Ahead => *self,
            Turn::Right => self.clockwise(),
            // three clockwise quarter turns
            Turn::Left => self.clockwise().invert(),
        }
    }

    fn clockwise(&self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::UpLeft => Self::UpRight,
            Self::UpRight => Self::DownRight,
            Self::DownRight => Self::DownLeft,
            Self::DownLeft => Self::UpLeft,
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = DirectionError;

    /// Accepts both the `UDLR` and the caret spelling.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::from_udlr(value).or_else(|_| Self::from_caret(value))
    }
}
