//! Bridge from a [`Grid`] to a [`Graph`] of its cells.

use petgraph::graphmap::NodeTrait;

use crate::cell::Cell;
use crate::graph::{EdgeDirection, Graph};
use crate::grid::Grid;

type CellFilter<'a, T> = Box<dyn Fn(&Cell<T>) -> bool + 'a>;
type NeighborSelector<'a, T> = Box<dyn Fn(&Grid<T>, &Cell<T>) -> Vec<Cell<T>> + 'a>;
type NeighborConstraint<'a, T> = Box<dyn Fn(&Cell<T>, &Cell<T>) -> bool + 'a>;

/// Turns a [`Grid`] into a [`Graph`] whose vertices are the grid's [`Cell`]s.
///
/// Every cell accepted by the cell filter becomes a vertex. Then, for each such cell, every candidate returned by the
/// neighbor selector that passes the neighbor constraint gets an edge from the cell (and back, for
/// [`EdgeDirection::Undirected`]). Candidates rejected by the cell filter are never registered, so they own no
/// outgoing edge.
///
/// Defaults: directed edges, every cell kept, the four in-bounds cardinal neighbors as candidates, no constraint.
///
/// ```
/// use latticework::{GridGraphBuilder, Grid, Point, PathCountPolicy};
///
/// let grid = Grid::from_digits("012\n123").unwrap();
/// let graph = GridGraphBuilder::new(&grid)
///     .neighbor_constraint(|from, to| from.value + 1 == to.value)
///     .build();
/// let start = grid.cell_at(Point(0, 0)).unwrap();
/// let end = grid.cell_at(Point(2, 1)).unwrap();
/// assert_eq!(graph.number_of_paths(start, end, PathCountPolicy::Acyclic), 3);
/// ```
pub struct GridGraphBuilder<'a, T> {
    grid: &'a Grid<T>,
    edge_direction: EdgeDirection,
    cell_filter: CellFilter<'a, T>,
    neighbor_selector: NeighborSelector<'a, T>,
    neighbor_constraint: NeighborConstraint<'a, T>,
}

impl<'a, T> GridGraphBuilder<'a, T>
where
    T: Clone + 'a,
    Cell<T>: NodeTrait,
{
    /// Start from `grid` with the default settings.
    pub fn new(grid: &'a Grid<T>) -> Self {
        Self {
            grid,
            edge_direction: EdgeDirection::default(),
            cell_filter: Box::new(|_: &Cell<T>| true),
            neighbor_selector: Box::new(|grid: &Grid<T>, cell: &Cell<T>| grid.neighbor_cells(cell.point.y(), cell.point.x(), false)),
            neighbor_constraint: Box::new(|_: &Cell<T>, _: &Cell<T>| true),
        }
    }

    /// Insert single edges or reciprocal pairs.
    pub fn edge_direction(&mut self, edge_direction: EdgeDirection) -> &mut Self {
        self.edge_direction = edge_direction;
        self
    }

    /// Only cells accepted by `filter` become vertices.
    pub fn cell_filter<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(&Cell<T>) -> bool + 'a,
    {
        self.cell_filter = Box::new(filter);
        self
    }

    /// Choose the edge candidates of a cell, e.g. to include diagonals or to jump further than one step.
    pub fn neighbor_selector<F>(&mut self, selector: F) -> &mut Self
    where
        F: Fn(&Grid<T>, &Cell<T>) -> Vec<Cell<T>> + 'a,
    {
        self.neighbor_selector = Box::new(selector);
        self
    }

    /// Only add an edge `from -> to` when `constraint(from, to)` holds.
    pub fn neighbor_constraint<F>(&mut self, constraint: F) -> &mut Self
    where
        F: Fn(&Cell<T>, &Cell<T>) -> bool + 'a,
    {
        self.neighbor_constraint = Box::new(constraint);
        self
    }

    /// Build the graph. The builder can be reused afterwards.
    pub fn build(&self) -> Graph<Cell<T>> {
        let mut graph = Graph::new();

        // register first so that reciprocal edges toward later cells are kept
        let sources = self.grid.cells()
            .filter(|cell| (self.cell_filter)(cell))
            .map(|cell| graph.create_vertex(cell))
            .collect::<Vec<_>>();

        for source in sources {
            for destination in (self.neighbor_selector)(self.grid, &source) {
                if (self.neighbor_constraint)(&source, &destination) {
                    graph.add(self.edge_direction, source, destination, None);
                }
            }
        }

        log::debug!(
            "built {} graph from a {}x{} grid: {} vertices, {} edges",
            self.edge_direction, self.grid.rows(), self.grid.cols(), graph.vertex_count(), graph.edge_count(),
        );
        graph
    }
}
