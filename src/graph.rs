//! Directed graphs keyed by vertex value, and the two path-counting policies.

use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use petgraph::algo::has_path_connecting;
use petgraph::graphmap::{DiGraphMap, NodeTrait};
use strum::{EnumString, VariantArray};

/// Edge weight type.
pub type Weight = i64;

/// A directed edge as reported by [`Graph::edges`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge<T> {
    /// Vertex the edge leaves.
    pub source: T,
    /// Vertex the edge enters.
    pub destination: T,
    /// Absent for unweighted edges.
    pub weight: Option<Weight>,
}

/// Whether [`Graph::add`] inserts one edge or a reciprocal pair.
#[derive(Copy, Clone, Debug, Default, strum::Display, EnumString, VariantArray, Eq, PartialEq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum EdgeDirection {
    /// Source to destination only.
    #[default]
    Directed,
    /// Both ways.
    Undirected,
}

/// How [`Graph::number_of_paths`] counts.
///
/// The two policies are not interchangeable; pick one per call site.
#[derive(Copy, Clone, Debug, strum::Display, EnumString, VariantArray, Eq, PartialEq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum PathCountPolicy {
    /// Memoized count, linear in the size of the reachable subgraph.
    ///
    /// Only correct when the subgraph reachable from the source is acyclic: a count cached before a cycle closes is
    /// reused as is, so cyclic input is undercounted (a warning is logged when that happens).
    Acyclic,
    /// Exhaustive search over simple paths. Correct on any graph, exponential in the worst case.
    Backtracking,
}

/// Caller-owned memo table for [`Graph::count_paths_acyclic`].
///
/// Holds, per vertex, the number of paths from that vertex to one fixed destination. Passing the same cache for
/// several sources and the same destination reuses the work; passing it with another destination starts over.
#[derive(Clone, Debug)]
pub struct PathCache<T: NodeTrait> {
    destination: Option<T>,
    counts: HashMap<T, u64>,
}

impl<T: NodeTrait> Default for PathCache<T> {
    fn default() -> Self {
        Self { destination: None, counts: HashMap::new() }
    }
}

impl<T: NodeTrait> PathCache<T> {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices whose count is known.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no count is known yet.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn bind(&mut self, destination: T) {
        if self.destination != Some(destination) {
            self.counts.clear();
            self.counts.insert(destination, 1);
            self.destination = Some(destination);
        }
    }
}

/// A directed graph keyed by vertex value, with optionally weighted edges.
///
/// Only vertices registered with [`Self::create_vertex`] own outgoing edges. Adding an edge from a vertex that was
/// never registered does nothing, and querying one behaves as if it had no edges. Between two given vertices at most
/// one edge is kept per direction: the first one added.
#[derive(Clone, Debug)]
pub struct Graph<T: NodeTrait> {
    adjacency: DiGraphMap<T, Option<Weight>>,
    registered: HashSet<T>,
}

impl<T: NodeTrait> Default for Graph<T> {
    fn default() -> Self {
        Self { adjacency: DiGraphMap::new(), registered: HashSet::new() }
    }
}

impl<T: NodeTrait> Graph<T> {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `source -> [destinations]` lists, registering every source.
    pub fn from_directed_map<I, J>(map: I) -> Self
    where
        I: IntoIterator<Item = (T, J)>,
        J: IntoIterator<Item = T>,
    {
        let mut graph = Self::new();
        for (source, destinations) in map {
            graph.create_vertex(source);
            for destination in destinations {
                graph.add_directed_edge(source, destination, None);
            }
        }
        graph
    }

    /// Register `data` as a vertex owning no outgoing edge.
    ///
    /// Registering a vertex again drops the outgoing edges it had.
    pub fn create_vertex(&mut self, data: T) -> T {
        if !self.registered.insert(data) {
            let targets = self.adjacency.neighbors(data).collect_vec();
            for target in targets {
                self.adjacency.remove_edge(data, target);
            }
        }
        self.adjacency.add_node(data)
    }

    /// Whether `vertex` was registered.
    pub fn contains_vertex(&self, vertex: T) -> bool {
        self.registered.contains(&vertex)
    }

    /// Number of registered vertices.
    pub fn vertex_count(&self) -> usize {
        self.registered.len()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Add an edge from `source` to `destination`.
    ///
    /// Discarded when `source` is not registered, or when the same edge already exists.
    pub fn add_directed_edge(&mut self, source: T, destination: T, weight: Option<Weight>) {
        if !self.contains_vertex(source) {
            log::trace!("dropping edge from unregistered vertex");
            return;
        }
        if self.adjacency.contains_edge(source, destination) {
            return;
        }
        self.adjacency.add_edge(source, destination, weight);
    }

    /// Add the edges `source -> destination` and `destination -> source`, under the rules of
    /// [`Self::add_directed_edge`].
    pub fn add_undirected_edge(&mut self, source: T, destination: T, weight: Option<Weight>) {
        self.add_directed_edge(source, destination, weight);
        self.add_directed_edge(destination, source, weight);
    }

    /// Add one edge or a reciprocal pair depending on `direction`.
    pub fn add(&mut self, direction: EdgeDirection, source: T, destination: T, weight: Option<Weight>) {
        match direction {
            EdgeDirection::Directed => self.add_directed_edge(source, destination, weight),
            EdgeDirection::Undirected => self.add_undirected_edge(source, destination, weight),
        }
    }

    /// Outgoing edges of `source`, in insertion order. Empty for unregistered vertices.
    pub fn edges(&self, source: T) -> Vec<Edge<T>> {
        if !self.contains_vertex(source) {
            return Vec::new();
        }
        self.adjacency.edges(source)
            .map(|(source, destination, weight)| Edge { source, destination, weight: *weight })
            .collect_vec()
    }

    fn successors(&self, source: T) -> Vec<T> {
        if !self.contains_vertex(source) {
            return Vec::new();
        }
        self.adjacency.neighbors(source).collect_vec()
    }

    /// Weight of the edge from `source` to `destination`, if there is such an edge and it is weighted.
    pub fn weight(&self, source: T, destination: T) -> Option<Weight> {
        if !self.contains_vertex(source) {
            return None;
        }
        self.adjacency.edge_weight(source, destination).copied().flatten()
    }

    /// Registered vertices without outgoing edges, in registration order.
    pub fn leaves(&self) -> Vec<T> {
        self.registered_vertices()
            .filter(|vertex| self.adjacency.neighbors(*vertex).next().is_none())
            .collect_vec()
    }

    /// Same as `self.leaves().len()`.
    pub fn count_leaves(&self) -> usize {
        self.leaves().len()
    }

    fn registered_vertices(&self) -> impl Iterator<Item = T> + '_ {
        self.adjacency.nodes().filter(|vertex| self.registered.contains(vertex))
    }

    /// Whether `destination` can be reached from `source` by following edges. A vertex always reaches itself.
    pub fn is_reachable(&self, source: T, destination: T) -> bool {
        if source == destination {
            return true;
        }
        if !self.contains_vertex(source) || !self.adjacency.contains_node(destination) {
            return false;
        }
        has_path_connecting(&self.adjacency, source, destination, None)
    }

    /// Count the paths from `source` to `destination` under the given `policy`.
    ///
    /// A path stops as soon as it reaches `destination`; `source == destination` counts as one path.
    /// [`PathCountPolicy::Acyclic`] gets a fresh [`PathCache`]: use [`Self::count_paths_acyclic`] directly to share one
    /// across calls.
    pub fn number_of_paths(&self, source: T, destination: T, policy: PathCountPolicy) -> u64 {
        match policy {
            PathCountPolicy::Acyclic => self.count_paths_acyclic(source, destination, &mut PathCache::new()),
            PathCountPolicy::Backtracking => self.count_paths_backtracking(source, destination),
        }
    }

    /// Memoized path count, see [`PathCountPolicy::Acyclic`] for the precondition.
    ///
    /// The traversal keeps its own stack, so deep graphs do not exhaust the call stack.
    pub fn count_paths_acyclic(&self, source: T, destination: T, cache: &mut PathCache<T>) -> u64 {
        cache.bind(destination);

        // (vertex, successors already pushed)
        let mut stack = vec![(source, false)];
        let mut in_progress = HashSet::new();

        while let Some((vertex, expanded)) = stack.pop() {
            if expanded {
                let count: u64 = self.successors(vertex)
                    .into_iter()
                    .map(|next| cache.counts.get(&next).copied().unwrap_or_else(|| {
                        log::warn!("cycle through a vertex reachable from the source, path count will be too low");
                        0
                    }))
                    .sum();
                in_progress.remove(&vertex);
                cache.counts.insert(vertex, count);
                continue;
            }

            if cache.counts.contains_key(&vertex) || !in_progress.insert(vertex) {
                continue;
            }

            stack.push((vertex, true));
            stack.extend(self.successors(vertex)
                .into_iter()
                .filter(|next| !cache.counts.contains_key(next) && !in_progress.contains(next))
                .map(|next| (next, false)));
        }

        cache.counts.get(&source).copied().unwrap_or(0)
    }

    /// Backtracking path count, see [`PathCountPolicy::Backtracking`].
    ///
    /// Counts simple paths: no vertex appears twice on a path. Uses an explicit stack of pending successors.
    pub fn count_paths_backtracking(&self, source: T, destination: T) -> u64 {
        if source == destination {
            return 1;
        }

        let mut count = 0;
        let mut on_path = HashSet::from([source]);
        let mut stack = vec![(source, self.successors(source))];

        while let Some((vertex, pending)) = stack.last_mut() {
            let vertex = *vertex;
            match pending.pop() {
                Some(next) if next == destination => count += 1,
                Some(next) => {
                    if on_path.insert(next) {
                        stack.push((next, self.successors(next)));
                    }
                }
                None => {
                    stack.pop();
                    on_path.remove(&vertex);
                }
            }
        }

        log::trace!("{} simple paths found", count);
        count
    }
}

impl<T: NodeTrait + Display> Display for Graph<T> {
    /// One line per registered vertex: `vertex -> [destination, weighted_destination (weight)]`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lines = self.registered_vertices()
            .map(|vertex| format!("{} -> [{}]", vertex, self.edges(vertex)
                .iter()
                .map(|edge| match edge.weight {
                    Some(weight) => format!("{} ({})", edge.destination, weight),
                    None => edge.destination.to_string(),
                })
                .join(", ")))
            .join("\n");
        write!(f, "{}", lines)
    }
}
