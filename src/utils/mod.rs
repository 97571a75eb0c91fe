pub mod routing_graph;
pub mod topology;

pub use self::routing_graph::{AdjacencyEntry, Neighbor, RoutingGraph};
pub use self::topology::{
    seed_routing_graph, EdgeSpec, Topology, SEED_EDGES, SEED_LOCATIONS, SEED_WAREHOUSE,
};
