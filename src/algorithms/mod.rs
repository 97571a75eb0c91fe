pub mod dispatch;

// Common algorithm traits
use crate::error::Result;
use dispatch::{BatchPlan, Dispatch};

/// Trait for anything that turns pending appointments into dispatch decisions
pub trait DispatchPlanner {
    /// Commit the next pending appointment to a courier along a computed route
    fn dispatch_next(&mut self) -> Result<Dispatch>;

    /// Preview routes for every pending appointment without committing anything
    fn optimize_all(&self) -> BatchPlan;
}
