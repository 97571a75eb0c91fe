// Models module - exports all model types

mod appointment;
mod courier;
mod courier_pool;
mod location;
mod route;
mod schedule;

// Re-export model types
pub use self::appointment::{Appointment, AppointmentStatus};
pub use self::courier::Courier;
pub use self::courier_pool::CourierPool;
pub use self::location::{zone_label, Location};
pub use self::route::Route;
pub use self::schedule::AppointmentRegistry;

// Common type aliases for improved code readability
pub type AppointmentId = u32;
pub type CourierId = u32;
pub type LocationIndex = usize;
pub type Priority = u8;
pub type Distance = f64;

/// Most urgent appointment priority
pub const HIGHEST_PRIORITY: Priority = 1;
/// Least urgent appointment priority
pub const LOWEST_PRIORITY: Priority = 5;
/// Default ceiling on concurrent deliveries per courier
pub const DEFAULT_MAX_LOAD: u32 = 5;
/// Default number of couriers the rotation can hold
pub const DEFAULT_POOL_CAPACITY: usize = 10;
