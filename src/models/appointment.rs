// Appointment model representing a single delivery job

use crate::models::{AppointmentId, Priority, HIGHEST_PRIORITY, LOWEST_PRIORITY};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an appointment. Completion is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "Pending"),
            AppointmentStatus::Completed => write!(f, "Done"),
        }
    }
}

/// A delivery job waiting to be dispatched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub customer: String,
    pub address: String,

    /// Zero-padded "HH:MM"; ordered lexicographically
    pub delivery_time: String,

    /// 1 is the most urgent, 5 the least
    pub priority: Priority,

    /// Zone label, e.g. "Zone-A"
    pub zone: String,

    pub completed: bool,
}

impl Appointment {
    /// Creates a pending appointment, clamping `priority` into [1, 5]
    pub fn new(
        id: AppointmentId,
        customer: impl Into<String>,
        address: impl Into<String>,
        delivery_time: impl Into<String>,
        priority: i32,
        zone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            customer: customer.into(),
            address: address.into(),
            delivery_time: delivery_time.into(),
            priority: clamp_priority(priority),
            zone: zone.into(),
            completed: false,
        }
    }

    /// Registry ordering key: priority first, then delivery time
    pub fn sort_key(&self) -> (Priority, &str) {
        (self.priority, self.delivery_time.as_str())
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }

    pub fn status(&self) -> AppointmentStatus {
        if self.completed {
            AppointmentStatus::Completed
        } else {
            AppointmentStatus::Pending
        }
    }
}

fn clamp_priority(priority: i32) -> Priority {
    priority.clamp(HIGHEST_PRIORITY as i32, LOWEST_PRIORITY as i32) as Priority
}
