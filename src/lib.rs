#![warn(missing_docs)]

//! # `latticework`
//!
//! A toolkit for grid-shaped puzzles: rectangular [`Grid`]s with bounds-aware neighbor queries and region
//! segmentation, directed [`Graph`]s built from those grids (or from plain adjacency lists) with path counting, and a
//! tiny [`DenseMatrix`] type for solving small linear systems exactly.
//!
//! Input is expected to be parsed already; nothing here performs I/O.
//!
//! # Coordinates
//! A [`Point`] is `(x, y)` with `y` growing downward. Grids are addressed either by `(row, col)` or by [`Point`],
//! where `row == y` and `col == x`.
//!
//! # Path counting
//! [`Graph::number_of_paths`] takes a [`PathCountPolicy`], because the two algorithms disagree on cyclic graphs:
//! [`PathCountPolicy::Acyclic`] is memoized and linear but assumes the reachable subgraph is a DAG (grids whose edges
//! only go "uphill", for instance), while [`PathCountPolicy::Backtracking`] enumerates simple paths and is always
//! correct but exponential.
//!
//! # Linear systems
//! [`DenseMatrix::inverse`] falls back to the identity for singular matrices instead of failing.
//! To find integer solutions, solve with [`DenseMatrix::solve_equation`] then check the result with
//! [`DenseMatrix::integer_solution`].
//!
//! Diagnostics go through the [`log`] facade; no logger is installed by this crate.

pub use builder::GridGraphBuilder;
pub use cell::Cell;
pub use direction::{Direction, DirectionError, Turn};
pub use graph::{Edge, EdgeDirection, Graph, PathCache, PathCountPolicy, Weight};
pub use grid::{Grid, GridError};
pub use linalg::{DenseMatrix, LinalgError, INTEGER_EPSILON};
pub use point::{enumerate_lines, intersections, max_x, max_y, min_x, min_y, Boundaries, Coord, Point, PointError};
pub use rectangle::Rectangle;
pub use region::{split_into_regions, Region};

pub mod builder;
pub(crate) mod cell;
pub(crate) mod direction;
pub mod graph;
pub mod grid;
pub mod linalg;
pub(crate) mod point;
pub(crate) mod rectangle;
pub mod region;
