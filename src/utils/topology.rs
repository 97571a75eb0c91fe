use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{DispatchError, Result};
use crate::models::{Distance, LocationIndex};

use super::routing_graph::RoutingGraph;

/// Built-in locations: three zones of three sub-locations plus the warehouse
pub const SEED_LOCATIONS: [&str; 10] = [
    "Zone-A-Center",
    "Zone-A-East",
    "Zone-A-West",
    "Zone-B-Center",
    "Zone-B-North",
    "Zone-B-South",
    "Zone-C-Center",
    "Zone-C-East",
    "Zone-C-West",
    "Warehouse",
];

/// Index of the warehouse in the built-in topology
pub const SEED_WAREHOUSE: LocationIndex = 9;

/// Built-in edges, inserted in this order
pub const SEED_EDGES: [(LocationIndex, LocationIndex, Distance); 12] = [
    // Zone A
    (0, 1, 3.5),
    (0, 2, 4.0),
    (0, 9, 8.0),
    // Zone B
    (3, 4, 5.0),
    (3, 5, 4.5),
    (3, 9, 10.0),
    // Zone C
    (6, 7, 3.0),
    (6, 8, 3.5),
    (6, 9, 12.0),
    // Inter-zone
    (0, 3, 15.0),
    (3, 6, 18.0),
    (0, 6, 20.0),
];

/// An undirected edge as it appears in a topology file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: LocationIndex,
    pub to: LocationIndex,
    pub distance: Distance,
}

/// Location names and edges used to build a routing graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub locations: Vec<String>,
    pub edges: Vec<EdgeSpec>,
}

impl Topology {
    /// The built-in ten-location topology
    pub fn seed() -> Self {
        Self {
            locations: SEED_LOCATIONS.iter().map(|name| name.to_string()).collect(),
            edges: SEED_EDGES
                .iter()
                .map(|&(from, to, distance)| EdgeSpec { from, to, distance })
                .collect(),
        }
    }

    /// Load a topology from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json_str = fs::read_to_string(path)?;
        let topology: Topology = serde_json::from_str(&json_str)?;
        if topology.locations.is_empty() {
            return Err(DispatchError::Config(format!(
                "topology {} has no locations",
                path.display()
            )));
        }
        info!(
            path = %path.display(),
            locations = topology.locations.len(),
            edges = topology.edges.len(),
            "loaded topology"
        );
        Ok(topology)
    }

    /// Build the routing graph by replaying every edge insertion
    pub fn build(&self) -> RoutingGraph {
        let mut graph = RoutingGraph::new(self.locations.iter().cloned());
        for edge in &self.edges {
            graph.add_edge(edge.from, edge.to, edge.distance);
        }
        graph
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::seed()
    }
}

/// Routing graph over the built-in topology
pub fn seed_routing_graph() -> RoutingGraph {
    Topology::seed().build()
}
