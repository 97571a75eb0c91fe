// Route model for warehouse-to-zone paths

use crate::models::{Distance, LocationIndex};
use serde::{Deserialize, Serialize};

/// An ordered path through the routing graph with its accumulated distance.
/// An empty path means no route exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Location indices from source to destination, inclusive
    pub path: Vec<LocationIndex>,

    /// Total distance along the path, summed per hop from the first-found
    /// edge between each pair
    pub distance: Distance,
}

impl Route {
    /// Creates a new route
    pub fn new(path: Vec<LocationIndex>, distance: Distance) -> Self {
        Self { path, distance }
    }

    /// The "no path exists" route
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            distance: 0.0,
        }
    }

    /// True when the route carries no path. A same-location route is
    /// `[s]` with zero distance and is reachable.
    pub fn is_unreachable(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of edges traversed
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Derived price for the route at the given rate per distance unit
    pub fn estimated_price(&self, rate: f64) -> f64 {
        self.distance * rate
    }
}
