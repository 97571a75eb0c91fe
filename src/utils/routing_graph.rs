use crate::models::{Distance, Location, LocationIndex, Route};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Sparse undirected weighted graph over a fixed set of named locations.
///
/// Each undirected edge is stored as two directed entries. Adjacency scans
/// visit the most recently inserted entry first, and parallel edges are
/// kept as separate entries.
#[derive(Debug, Clone)]
pub struct RoutingGraph {
    graph: DiGraph<Location, Distance>,
}

/// One neighbor in an adjacency listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub location: String,
    pub distance: Distance,
}

/// Adjacency listing row for a single location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacencyEntry {
    pub location: String,
    pub neighbors: Vec<Neighbor>,
}

impl RoutingGraph {
    /// Create a graph with one vertex per name and no edges.
    /// Vertex indices follow the order of `names`.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = DiGraph::new();
        for (index, name) in names.into_iter().enumerate() {
            graph.add_node(Location::new(index, name));
        }
        RoutingGraph { graph }
    }

    /// Number of locations
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of undirected edges inserted so far
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count() / 2
    }

    fn node(&self, index: LocationIndex) -> Option<NodeIndex> {
        (index < self.len()).then(|| NodeIndex::new(index))
    }

    /// Insert an undirected edge. Out-of-range indices and negative or
    /// non-finite distances are ignored. Duplicates are not detected.
    pub fn add_edge(&mut self, from: LocationIndex, to: LocationIndex, distance: Distance) -> bool {
        let (Some(a), Some(b)) = (self.node(from), self.node(to)) else {
            warn!(from, to, locations = self.len(), "edge endpoint out of range, ignored");
            return false;
        };
        if !distance.is_finite() || distance < 0.0 {
            warn!(from, to, distance, "invalid edge distance, ignored");
            return false;
        }

        self.graph.add_edge(a, b, distance);
        self.graph.add_edge(b, a, distance);
        true
    }

    /// Adjacent locations of `index` with edge distances, in scan order
    pub fn neighbors(
        &self,
        index: LocationIndex,
    ) -> impl Iterator<Item = (LocationIndex, Distance)> + '_ {
        self.node(index).into_iter().flat_map(move |node| {
            self.graph
                .edges(node)
                .map(|edge| (edge.target().index(), *edge.weight()))
        })
    }

    /// Distance of the first adjacency entry from `from` to `to`.
    /// Zero for a location to itself, `None` when there is no edge.
    /// With parallel edges this is the first one found, not the minimum.
    pub fn get_distance(&self, from: LocationIndex, to: LocationIndex) -> Option<Distance> {
        self.node(from)?;
        if from == to {
            return Some(0.0);
        }
        self.neighbors(from)
            .find(|&(target, _)| target == to)
            .map(|(_, distance)| distance)
    }

    /// Minimum-distance path from `start` to `end`, both inclusive.
    /// Returns an empty path when `end` cannot be reached.
    ///
    /// O(N^2): every round scans all vertices for the closest unvisited
    /// one, lowest index winning ties.
    pub fn shortest_path(&self, start: LocationIndex, end: LocationIndex) -> Vec<LocationIndex> {
        let n = self.len();
        if start >= n || end >= n {
            warn!(start, end, locations = n, "shortest path endpoint out of range");
            return Vec::new();
        }

        let mut distances = vec![f64::INFINITY; n];
        let mut parents: Vec<Option<LocationIndex>> = vec![None; n];
        let mut visited = vec![false; n];
        distances[start] = 0.0;

        for _ in 0..n.saturating_sub(1) {
            let Some(current) = closest_unvisited(&distances, &visited) else {
                // graph exhausted
                break;
            };
            if current == end {
                break;
            }
            visited[current] = true;

            for (neighbor, edge_distance) in self.neighbors(current) {
                let candidate = distances[current] + edge_distance;
                if !visited[neighbor] && candidate < distances[neighbor] {
                    distances[neighbor] = candidate;
                    parents[neighbor] = Some(current);
                }
            }
        }

        if distances[end].is_infinite() {
            debug!(start, end, "no path");
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut current = Some(end);
        while let Some(vertex) = current {
            path.push(vertex);
            current = parents[vertex];
        }
        path.reverse();
        path
    }

    /// Sum of `get_distance` over consecutive pairs. Pairs without an edge
    /// contribute nothing.
    ///
    /// With parallel edges each pair costs its first-found entry, which may
    /// exceed the cheaper entry `shortest_path` relaxed through.
    pub fn path_cost(&self, path: &[LocationIndex]) -> Distance {
        path.windows(2)
            .filter_map(|pair| self.get_distance(pair[0], pair[1]))
            .filter(|distance| *distance > 0.0)
            .sum()
    }

    /// Shortest path together with its `path_cost`. The distance is not
    /// necessarily the Dijkstra minimum when parallel edges exist.
    pub fn route(&self, start: LocationIndex, end: LocationIndex) -> Route {
        let path = self.shortest_path(start, end);
        if path.is_empty() {
            return Route::unreachable();
        }
        let distance = self.path_cost(&path);
        Route::new(path, distance)
    }

    /// Index of the first location whose name contains `zone`
    pub fn location_index_by_zone_substring(&self, zone: &str) -> Option<LocationIndex> {
        self.locations()
            .find(|location| location.matches_zone(zone))
            .map(|location| location.index)
    }

    /// Display name of a location, or "Unknown"
    pub fn location_name(&self, index: LocationIndex) -> &str {
        self.node(index)
            .map(|node| self.graph[node].name.as_str())
            .unwrap_or("Unknown")
    }

    /// Locations in index order
    pub fn locations(&self) -> impl Iterator<Item = &Location> + '_ {
        self.graph.node_weights()
    }

    /// Per-location neighbor listing in adjacency scan order
    pub fn adjacency(&self) -> Vec<AdjacencyEntry> {
        self.locations()
            .map(|location| AdjacencyEntry {
                location: location.name.clone(),
                neighbors: self
                    .neighbors(location.index)
                    .map(|(target, distance)| Neighbor {
                        location: self.location_name(target).to_string(),
                        distance,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Render a path as "A -> B -> C"
    pub fn describe_path(&self, path: &[LocationIndex]) -> String {
        path.iter()
            .map(|&index| self.location_name(index))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Underlying directed storage, two entries per undirected edge
    pub fn as_graph(&self) -> &DiGraph<Location, Distance> {
        &self.graph
    }
}

fn closest_unvisited(distances: &[Distance], visited: &[bool]) -> Option<LocationIndex> {
    let mut closest = None;
    let mut min_distance = f64::INFINITY;
    for (vertex, &distance) in distances.iter().enumerate() {
        if !visited[vertex] && distance < min_distance {
            min_distance = distance;
            closest = Some(vertex);
        }
    }
    closest
}

impl fmt::Display for RoutingGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.adjacency() {
            write!(f, "{} -> ", entry.location)?;
            if entry.neighbors.is_empty() {
                write!(f, "No connections")?;
            }
            for (i, neighbor) in entry.neighbors.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}({}km)", neighbor.location, neighbor.distance)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
