//! Maximal 4-connected groups of points.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::direction::Direction;
use crate::point::Point;

/// A set of points connected through their up, down, left and right neighbors.
///
/// Points are kept ordered, so two regions holding the same points compare and hash equal.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Region {
    points: BTreeSet<Point>,
}

impl Region {
    /// The points of this region, in `(x, y)` order.
    pub fn points(&self) -> &BTreeSet<Point> {
        &self.points
    }

    /// Whether `point` belongs to this region.
    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }

    /// Number of points.
    pub fn area(&self) -> usize {
        self.points.len()
    }

    /// Number of unit edges between a point of this region and a point outside of it.
    pub fn perimeter(&self) -> usize {
        self.points.iter()
            .map(|point| point.neighbors().iter().filter(|neighbor| !self.contains(neighbor)).count())
            .sum()
    }

    /// Number of straight fence runs needed to enclose this region.
    ///
    /// For every cardinal direction, the points whose neighbor that way lies outside the region form runs along the
    /// perpendicular axis; each run is one side.
    pub fn sides(&self) -> usize {
        Direction::CARDINAL.iter()
            .map(|direction| split_into_regions(
                self.points.iter()
                    .copied()
                    .filter(|point| !self.contains(&point.step(*direction)))
            ).len())
            .sum()
    }
}

impl FromIterator<Point> for Region {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self { points: iter.into_iter().collect() }
    }
}

/// Partition `points` into maximal 4-connected [`Region`]s.
///
/// Points are folded in one at a time: every region already holding one of the new point's neighbors is pulled out,
/// merged together with the point, and put back. Merging is associative, so the result does not depend on the order
/// of `points`. Regions are returned sorted.
pub fn split_into_regions<I>(points: I) -> Vec<Region>
where
    I: IntoIterator<Item = Point>,
{
    let mut regions: Vec<Region> = Vec::new();

    for point in points {
        let neighbors = point.neighbors();
        let (touching, mut apart): (Vec<Region>, Vec<Region>) = regions.into_iter()
            .partition(|region| neighbors.iter().any(|neighbor| region.contains(neighbor)));

        let mut merged = touching.into_iter()
            .flat_map(|region| region.points)
            .collect::<BTreeSet<_>>();
        merged.insert(point);

        log::trace!("{} joins a region of {} points", point, merged.len());
        apart.push(Region { points: merged });
        regions = apart;
    }

    regions.into_iter().sorted().collect_vec()
}
