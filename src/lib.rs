// Public modules
pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod system;
pub mod utils;

// Re-exports for convenience
pub use algorithms::dispatch::{BatchPlan, Dispatch, DispatchCoordinator, PlannedDelivery};
pub use algorithms::DispatchPlanner;
pub use config::Settings;
pub use error::{DispatchError, Result};
pub use models::{Appointment, AppointmentRegistry, Courier, CourierPool, Location, Route};
pub use system::DeliverySystem;
pub use utils::{RoutingGraph, Topology};
