// Runtime settings for the dispatch core

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DispatchError, Result};
use crate::models::{DEFAULT_MAX_LOAD, DEFAULT_POOL_CAPACITY};
use crate::utils::{RoutingGraph, Topology};

/// Dispatch settings, loadable from JSON. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of couriers in the rotation. Fixed for the lifetime
    /// of a `DeliverySystem`; the dispatch contract assumes 10.
    pub courier_capacity: usize,

    /// Deliveries a courier can carry at once. Fixed for the lifetime of a
    /// `DeliverySystem`; the dispatch contract assumes 5.
    pub max_courier_load: u32,

    /// Label of the origin location for every route
    pub warehouse: String,

    /// Price per distance unit used for estimates
    pub price_per_km: f64,

    /// Topology file; the built-in topology is used when unset
    pub topology: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            courier_capacity: DEFAULT_POOL_CAPACITY,
            max_courier_load: DEFAULT_MAX_LOAD,
            warehouse: "Warehouse".to_string(),
            price_per_km: 1.5,
            topology: None,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file and validate them
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json_str = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json_str)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.courier_capacity == 0 {
            return Err(DispatchError::Config(
                "courier_capacity must be at least 1".to_string(),
            ));
        }
        if self.max_courier_load == 0 {
            return Err(DispatchError::Config(
                "max_courier_load must be at least 1".to_string(),
            ));
        }
        if !self.price_per_km.is_finite() || self.price_per_km < 0.0 {
            return Err(DispatchError::Config(format!(
                "price_per_km must be a non-negative number, got {}",
                self.price_per_km
            )));
        }
        if self.warehouse.trim().is_empty() {
            return Err(DispatchError::Config("warehouse label is empty".to_string()));
        }
        Ok(())
    }

    /// Routing graph from the configured topology file, or the built-in one
    pub fn routing_graph(&self) -> Result<RoutingGraph> {
        let topology = match &self.topology {
            Some(path) => Topology::from_file(path)?,
            None => Topology::seed(),
        };
        Ok(topology.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.courier_capacity, 10);
        assert_eq!(settings.max_courier_load, 5);
        assert_eq!(settings.warehouse, "Warehouse");
        assert_eq!(settings.price_per_km, 1.5);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"courier_capacity": 3}"#).unwrap();
        assert_eq!(settings.courier_capacity, 3);
        assert_eq!(settings.max_courier_load, 5);
        assert!(settings.topology.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_capacity = Settings {
            courier_capacity: 0,
            ..Settings::default()
        };
        assert!(zero_capacity.validate().is_err());

        let negative_price = Settings {
            price_per_km: -1.0,
            ..Settings::default()
        };
        assert!(matches!(
            negative_price.validate(),
            Err(DispatchError::Config(_))
        ));
    }

    #[test]
    fn test_builtin_routing_graph() {
        let graph = Settings::default().routing_graph().unwrap();
        assert_eq!(graph.len(), 10);
        assert_eq!(graph.edge_count(), 12);
    }
}
