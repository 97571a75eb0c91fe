// Courier model representing a delivery driver in the rotation

use crate::models::CourierId;
use serde::{Deserialize, Serialize};

/// A courier with zone affinity and a bounded delivery load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Courier {
    pub id: CourierId,
    pub name: String,

    /// Zone the courier is currently serving, e.g. "Zone-A"
    pub zone: String,

    /// Maintained by the pool, not by the courier
    pub available: bool,

    pub load: u32,
    pub max_load: u32,
}

impl Courier {
    /// Creates an idle, available courier
    pub fn new(
        id: CourierId,
        name: impl Into<String>,
        zone: impl Into<String>,
        max_load: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            zone: zone.into(),
            available: true,
            load: 0,
            max_load,
        }
    }

    /// Can still take work beyond its home zone
    pub fn has_spare_capacity(&self) -> bool {
        self.load < self.max_load
    }

    /// Phase-one eligibility: available and either in the zone or not full
    pub fn prefers(&self, zone: &str) -> bool {
        self.available && (self.zone == zone || self.has_spare_capacity())
    }

    pub(crate) fn take_delivery(&mut self, zone: &str) {
        self.available = false;
        self.zone = zone.to_string();
        self.load = (self.load + 1).min(self.max_load);
    }

    pub(crate) fn finish_delivery(&mut self) {
        self.available = true;
        self.load = self.load.saturating_sub(1);
    }
}
