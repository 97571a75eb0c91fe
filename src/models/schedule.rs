// Appointment registry keeping delivery jobs in dispatch order

use crate::models::{Appointment, AppointmentId};
use tracing::debug;

/// Delivery jobs sorted by (priority, delivery time). Positions never
/// change after insertion except through removal.
#[derive(Debug, Clone, Default)]
pub struct AppointmentRegistry {
    appointments: Vec<Appointment>,
}

impl AppointmentRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            appointments: Vec::new(),
        }
    }

    /// Inserts a new pending appointment at its sorted position.
    /// Equal keys keep insertion order.
    pub fn insert(
        &mut self,
        id: AppointmentId,
        customer: impl Into<String>,
        address: impl Into<String>,
        delivery_time: impl Into<String>,
        priority: i32,
        zone: impl Into<String>,
    ) {
        let appointment = Appointment::new(id, customer, address, delivery_time, priority, zone);
        self.insert_appointment(appointment);
    }

    /// Inserts an already constructed appointment at its sorted position
    pub fn insert_appointment(&mut self, appointment: Appointment) {
        let position = self
            .appointments
            .partition_point(|existing| existing.sort_key() <= appointment.sort_key());

        debug!(
            id = appointment.id,
            priority = appointment.priority,
            time = %appointment.delivery_time,
            position,
            "appointment queued"
        );
        self.appointments.insert(position, appointment);
    }

    /// Removes the first appointment with the given id
    pub fn remove(&mut self, id: AppointmentId) -> bool {
        match self.appointments.iter().position(|a| a.id == id) {
            Some(position) => {
                self.appointments.remove(position);
                true
            }
            None => false,
        }
    }

    /// First appointment in order that is not yet completed
    pub fn next_pending(&self) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.is_pending())
    }

    /// All pending appointments in dispatch order
    pub fn pending(&self) -> impl Iterator<Item = &Appointment> + '_ {
        self.appointments.iter().filter(|a| a.is_pending())
    }

    /// Marks the first matching, still pending appointment as completed
    pub fn mark_completed(&mut self, id: AppointmentId) -> bool {
        match self
            .appointments
            .iter_mut()
            .find(|a| a.id == id && a.is_pending())
        {
            Some(appointment) => {
                appointment.completed = true;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Number of appointments held, completed and pending together
    pub fn count(&self) -> usize {
        self.appointments.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Appointments in registry order
    pub fn iter(&self) -> std::slice::Iter<'_, Appointment> {
        self.appointments.iter()
    }
}

impl<'a> IntoIterator for &'a AppointmentRegistry {
    type Item = &'a Appointment;
    type IntoIter = std::slice::Iter<'a, Appointment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
