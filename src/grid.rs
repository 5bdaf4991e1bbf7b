//! Rectangular grids addressed by `(row, col)` or [`Point`], and their segmentation into [`Region`]s.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::hash::Hash;
use std::str::FromStr;

use itertools::Itertools;
use ndarray::{Array2, ArrayView1, Axis, ShapeError};
use strum::VariantArray;
use thiserror::Error;

use crate::cell::Cell;
use crate::direction::Direction;
use crate::point::{Coord, Point};
use crate::region::{split_into_regions, Region};

/// Reasons a [`Grid`] operation may fail.
#[derive(Clone, Debug, Error)]
pub enum GridError {
    /// Construction was attempted without any row.
    #[error("grid must have at least one row")]
    EmptyGrid,
    /// Construction was attempted with zero-length rows.
    #[error("grid must have at least one column")]
    EmptyRow,
    /// Rows of a grid must all be as long as the first one.
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// A character other than `0`..=`9` was found while reading a digit grid.
    #[error("expected a digit at ({row}, {col}), found {found:?}")]
    NotADigit {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The character read.
        found: char,
    },
    /// Strict cell access outside the grid.
    #[error("({row}, {col}) is out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        /// Row index.
        row: Coord,
        /// Column index.
        col: Coord,
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
    /// [`Grid::row`] was given an index past the last row.
    #[error("row {index} is out of bounds for a grid with {rows} rows")]
    RowOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of rows.
        rows: usize,
    },
    /// [`Grid::column`] was given an index past the last column.
    #[error("column {index} is out of bounds for a grid with {cols} columns")]
    ColumnOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of columns.
        cols: usize,
    },
    /// [`Grid::first`] found nothing.
    #[error("grid contains no element matching the predicate")]
    NotFound,
    /// The backing array could not be shaped.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// A rectangular grid of values, addressed by `(row, col)` or by [`Point`] (where `y` is the row).
///
/// A grid always has at least one row and one column, and every row has the same length.
/// Cells are stored in an owned [`ndarray::Array2`], so the `copy_with_*` family produces grids that share no storage
/// with the grid they were derived from.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl<T> Grid<T> {
    /// Build a grid from its rows.
    ///
    /// Fails with [`GridError::EmptyGrid`], [`GridError::EmptyRow`] or [`GridError::RaggedRow`] when the rows do not
    /// form a non-empty rectangle.
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().ok_or(GridError::EmptyGrid)?.len();
        if width == 0 {
            return Err(GridError::EmptyRow);
        }

        if let Some((row, actual)) = rows.iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width) {
            return Err(GridError::RaggedRow { row, expected: width, actual });
        }

        let flat = rows.into_iter().flatten().collect_vec();
        Ok(Self { cells: Array2::from_shape_vec((height, width), flat)? })
    }

    /// Wrap an existing array, rejecting arrays with no rows or no columns.
    pub fn from_array(cells: Array2<T>) -> Result<Self, GridError> {
        if cells.nrows() == 0 {
            return Err(GridError::EmptyGrid);
        }
        if cells.ncols() == 0 {
            return Err(GridError::EmptyRow);
        }

        Ok(Self { cells })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// The backing array.
    pub fn as_array(&self) -> &Array2<T> {
        &self.cells
    }

    #[inline]
    fn index_of(&self, row: Coord, col: Coord) -> Option<(usize, usize)> {
        let row = usize::try_from(row).ok().filter(|row| *row < self.rows())?;
        let col = usize::try_from(col).ok().filter(|col| *col < self.cols())?;
        Some((row, col))
    }

    /// Whether `(row, col)` lies inside the grid. Never fails, whatever the input.
    pub fn contains(&self, row: Coord, col: Coord) -> bool {
        self.index_of(row, col).is_some()
    }

    /// Whether `point` lies inside the grid.
    pub fn contains_point(&self, point: Point) -> bool {
        self.contains(point.y(), point.x())
    }

    /// The value at `(row, col)`, or [`None`] outside the grid.
    pub fn get(&self, row: Coord, col: Coord) -> Option<&T> {
        self.index_of(row, col).and_then(|index| self.cells.get(index))
    }

    /// The value at `point`, or [`None`] outside the grid.
    pub fn get_at(&self, point: Point) -> Option<&T> {
        self.get(point.y(), point.x())
    }

    /// The value at `(row, col)`, failing with [`GridError::OutOfBounds`] outside the grid.
    pub fn try_get(&self, row: Coord, col: Coord) -> Result<&T, GridError> {
        self.get(row, col).ok_or(GridError::OutOfBounds { row, col, rows: self.rows(), cols: self.cols() })
    }

    /// The value at `point`, failing with [`GridError::OutOfBounds`] outside the grid.
    pub fn try_get_at(&self, point: Point) -> Result<&T, GridError> {
        self.try_get(point.y(), point.x())
    }

    /// A whole row.
    pub fn row(&self, index: usize) -> Result<ArrayView1<'_, T>, GridError> {
        if index >= self.rows() {
            return Err(GridError::RowOutOfBounds { index, rows: self.rows() });
        }
        Ok(self.cells.index_axis(Axis(0), index))
    }

    /// A whole column.
    pub fn column(&self, index: usize) -> Result<ArrayView1<'_, T>, GridError> {
        if index >= self.cols() {
            return Err(GridError::ColumnOutOfBounds { index, cols: self.cols() });
        }
        Ok(self.cells.index_axis(Axis(1), index))
    }

    /// In-bounds neighbor coordinates of `(row, col)`: up, down, left, right, then (if asked) up-left, up-right,
    /// down-left, down-right.
    fn neighbor_indices(&self, row: Coord, col: Coord, include_diagonal: bool) -> impl Iterator<Item = (usize, usize)> + '_ {
        let directions = if include_diagonal { Direction::VARIANTS } else { Direction::CARDINAL };
        directions.iter().filter_map(move |direction| {
            let (dx, dy) = direction.offset();
            self.index_of(row.checked_add(dy)?, col.checked_add(dx)?)
        })
    }

    /// Values around `(row, col)`, the center excluded.
    ///
    /// Order is up, down, left, right, then up-left, up-right, down-left, down-right when `include_diagonal` is set.
    /// Neighbors outside the grid are skipped, so the result holds between 0 and 4 (or 8) values.
    pub fn neighbors(&self, row: Coord, col: Coord, include_diagonal: bool) -> Vec<&T> {
        self.neighbor_indices(row, col, include_diagonal)
            .map(|index| &self.cells[index])
            .collect_vec()
    }

    /// Return the first position, in row-major order, whose value satisfies `predicate`.
    pub fn find_first<F>(&self, predicate: F) -> Option<Point>
    where
        F: Fn(&T) -> bool,
    {
        self.cells.indexed_iter()
            .find(|(_, value)| predicate(value))
            .map(|(index, _)| Point::from(index))
    }

    /// Like [`Self::find_first`], but failing with [`GridError::NotFound`] when nothing matches.
    pub fn first<F>(&self, predicate: F) -> Result<Point, GridError>
    where
        F: Fn(&T) -> bool,
    {
        self.find_first(predicate).ok_or(GridError::NotFound)
    }

    /// Replace the value at `point` in place, returning the previous one.
    /// Outside the grid nothing happens and [`None`] is returned.
    pub fn set_cell(&mut self, point: Point, value: T) -> Option<T> {
        let index = self.index_of(point.y(), point.x())?;
        Some(std::mem::replace(&mut self.cells[index], value))
    }
}

impl<T: PartialEq> Grid<T> {
    /// All positions holding `value`, in row-major order.
    pub fn find_all(&self, value: &T) -> Vec<Point> {
        self.cells.indexed_iter()
            .filter(|(_, cell)| *cell == value)
            .map(|(index, _)| Point::from(index))
            .collect_vec()
    }

    /// The first position holding `value`, in row-major order.
    pub fn first_by_value(&self, value: &T) -> Result<Point, GridError> {
        self.first(|cell| cell == value)
    }
}

impl<T: Clone> Grid<T> {
    /// The [`Cell`] at `(row, col)`, or [`None`] outside the grid.
    pub fn cell(&self, row: Coord, col: Coord) -> Option<Cell<T>> {
        self.get(row, col).map(|value| Cell::new(Point(col, row), value.clone()))
    }

    /// The [`Cell`] at `point`, or [`None`] outside the grid.
    pub fn cell_at(&self, point: Point) -> Option<Cell<T>> {
        self.cell(point.y(), point.x())
    }

    /// Every cell, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<T>> + '_ {
        self.cells.indexed_iter().map(|(index, value)| Cell::new(Point::from(index), value.clone()))
    }

    /// Same as [`Self::neighbors`], with coordinates attached.
    pub fn neighbor_cells(&self, row: Coord, col: Coord, include_diagonal: bool) -> Vec<Cell<T>> {
        self.neighbor_cells_matching(row, col, include_diagonal, |_| true)
    }

    /// Same as [`Self::neighbor_cells`], keeping only the cells accepted by `predicate`.
    pub fn neighbor_cells_matching<F>(&self, row: Coord, col: Coord, include_diagonal: bool, predicate: F) -> Vec<Cell<T>>
    where
        F: Fn(&Cell<T>) -> bool,
    {
        self.neighbor_indices(row, col, include_diagonal)
            .map(|index| Cell::new(Point::from(index), self.cells[index].clone()))
            .filter(|cell| predicate(cell))
            .collect_vec()
    }

    /// All cells whose value satisfies `predicate`, in row-major order.
    pub fn find_all_matching<F>(&self, predicate: F) -> Vec<Cell<T>>
    where
        F: Fn(&T) -> bool,
    {
        self.cells().filter(|cell| predicate(&cell.value)).collect_vec()
    }

    /// A fresh copy of this grid with `point` set to `value`. Points outside the grid are ignored.
    pub fn copy_with_cell_value(&self, point: Point, value: T) -> Self {
        self.copy_with_cells_value([point], value)
    }

    /// A fresh copy of this grid with every one of `points` set to `value`. Points outside the grid are ignored.
    pub fn copy_with_cells_value<I>(&self, points: I, value: T) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut copy = self.clone();
        for point in points {
            copy.set_cell(point, value.clone());
        }
        copy
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        Self { cells: Array2::from_shape_fn((self.cols(), self.rows()), |(row, col)| self.cells[(col, row)].clone()) }
    }
}

impl<T: Clone + Eq + Hash> Grid<T> {
    /// Positions of each distinct value, each list in row-major order.
    pub fn group_by_value(&self) -> HashMap<T, Vec<Point>> {
        self.cells.indexed_iter()
            .map(|(index, value)| (value.clone(), Point::from(index)))
            .into_group_map()
    }

    /// Split the grid into [`Region`]s: maximal 4-connected areas of equal value, sorted.
    pub fn regions(&self) -> Vec<Region> {
        let regions = self.group_by_value()
            .into_values()
            .flat_map(split_into_regions)
            .sorted()
            .collect_vec();
        log::debug!("segmented a {}x{} grid into {} regions", self.rows(), self.cols(), regions.len());
        regions
    }
}

impl Grid<u32> {
    /// Read a grid of single decimal digits, one row per line.
    pub fn from_digits(input: &str) -> Result<Self, GridError> {
        let rows = input.lines()
            .enumerate()
            .map(|(row, line)| line.chars()
                .enumerate()
                .map(|(col, found)| found.to_digit(10).ok_or(GridError::NotADigit { row, col, found }))
                .collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rows)
    }
}

impl FromStr for Grid<char> {
    type Err = GridError;

    /// One row per line, one cell per character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.lines().map(|line| line.chars().collect_vec()).collect_vec())
    }
}

impl<T: Display> Display for Grid<T> {
    /// Values separated by a space, rows by a newline.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lines = self.cells.rows()
            .into_iter()
            .map(|row| row.iter().join(" "))
            .join("\n");
        write!(f, "{}", lines)
    }
}
