use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::algorithms::DispatchPlanner;
use crate::error::{DispatchError, Result};
use crate::models::{
    Appointment, AppointmentId, AppointmentRegistry, Courier, CourierPool, Distance,
    LocationIndex, Route,
};
use crate::utils::RoutingGraph;

/// A committed assignment of one appointment to one courier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dispatch {
    /// Appointment state after completion
    pub appointment: Appointment,

    /// Courier state after assignment
    pub courier: Courier,

    /// Warehouse-to-zone route; empty when the zone has no location
    pub route: Route,
}

impl Dispatch {
    pub fn estimated_price(&self, rate: f64) -> f64 {
        self.route.estimated_price(rate)
    }
}

/// Route preview for one pending appointment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedDelivery {
    pub appointment_id: AppointmentId,
    pub zone: String,
    pub route: Route,
}

/// Read-only preview over all pending appointments
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BatchPlan {
    pub deliveries: Vec<PlannedDelivery>,
    pub total_distance: Distance,
}

impl BatchPlan {
    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    pub fn estimated_cost(&self, rate: f64) -> f64 {
        self.total_distance * rate
    }

    /// Deliveries whose zone could not be routed from the warehouse
    pub fn unreachable(&self) -> impl Iterator<Item = &PlannedDelivery> + '_ {
        self.deliveries.iter().filter(|d| d.route.is_unreachable())
    }
}

/// Route from the warehouse to the first location matching `zone`
pub fn route_to_zone(graph: &RoutingGraph, warehouse: LocationIndex, zone: &str) -> Route {
    match graph.location_index_by_zone_substring(zone) {
        Some(target) => {
            let route = graph.route(warehouse, target);
            debug!(
                zone,
                path = %graph.describe_path(&route.path),
                distance = route.distance,
                "route computed"
            );
            route
        }
        None => {
            warn!(zone, "zone does not match any location");
            Route::unreachable()
        }
    }
}

/// Route every pending appointment from the warehouse, in registry order
pub fn plan_pending(
    graph: &RoutingGraph,
    appointments: &AppointmentRegistry,
    warehouse: LocationIndex,
) -> BatchPlan {
    let pending: Vec<&Appointment> = appointments.pending().collect();

    let deliveries: Vec<PlannedDelivery> = pending
        .par_iter()
        .map(|appointment| PlannedDelivery {
            appointment_id: appointment.id,
            zone: appointment.zone.clone(),
            route: route_to_zone(graph, warehouse, &appointment.zone),
        })
        .collect();

    let total_distance = deliveries.iter().map(|d| d.route.distance).sum();
    BatchPlan {
        deliveries,
        total_distance,
    }
}

/// Resolve a warehouse label to its location index
pub fn resolve_warehouse(graph: &RoutingGraph, label: &str) -> Result<LocationIndex> {
    graph
        .location_index_by_zone_substring(label)
        .ok_or_else(|| DispatchError::UnknownLocation {
            label: label.to_string(),
        })
}

/// Borrows the graph, registry and pool for the duration of a dispatch
pub struct DispatchCoordinator<'a> {
    graph: &'a RoutingGraph,
    appointments: &'a mut AppointmentRegistry,
    couriers: &'a mut CourierPool,
    warehouse: LocationIndex,
}

impl<'a> DispatchCoordinator<'a> {
    /// Creates a coordinator routing from the location matching `warehouse`
    pub fn new(
        graph: &'a RoutingGraph,
        appointments: &'a mut AppointmentRegistry,
        couriers: &'a mut CourierPool,
        warehouse: &str,
    ) -> Result<Self> {
        let warehouse = resolve_warehouse(graph, warehouse)?;
        Ok(Self::with_warehouse_index(
            graph,
            appointments,
            couriers,
            warehouse,
        ))
    }

    pub fn with_warehouse_index(
        graph: &'a RoutingGraph,
        appointments: &'a mut AppointmentRegistry,
        couriers: &'a mut CourierPool,
        warehouse: LocationIndex,
    ) -> Self {
        Self {
            graph,
            appointments,
            couriers,
            warehouse,
        }
    }

    pub fn warehouse(&self) -> LocationIndex {
        self.warehouse
    }
}

impl DispatchPlanner for DispatchCoordinator<'_> {
    fn dispatch_next(&mut self) -> Result<Dispatch> {
        let mut appointment = match self.appointments.next_pending() {
            Some(appointment) => appointment.clone(),
            None => {
                debug!("nothing to dispatch");
                return Err(DispatchError::NothingPending);
            }
        };

        let courier_id = match self.couriers.select_for_zone(&appointment.zone) {
            Some(courier) => courier.id,
            None => {
                warn!(appointment = appointment.id, zone = %appointment.zone, "no courier available");
                return Err(DispatchError::NoCourierAvailable {
                    appointment_id: appointment.id,
                });
            }
        };

        let route = route_to_zone(self.graph, self.warehouse, &appointment.zone);

        // Courier first, so an appointment is never completed without one
        if !self.couriers.assign(courier_id, &appointment.zone) {
            return Err(DispatchError::CourierNotFound { id: courier_id });
        }
        if !self.appointments.mark_completed(appointment.id) {
            return Err(DispatchError::AppointmentNotFound { id: appointment.id });
        }
        appointment.completed = true;

        let courier = self
            .couriers
            .get(courier_id)
            .cloned()
            .ok_or(DispatchError::CourierNotFound { id: courier_id })?;

        info!(
            appointment = appointment.id,
            courier = courier.id,
            zone = %appointment.zone,
            distance = route.distance,
            "delivery dispatched"
        );

        Ok(Dispatch {
            appointment,
            courier,
            route,
        })
    }

    fn optimize_all(&self) -> BatchPlan {
        plan_pending(self.graph, &*self.appointments, self.warehouse)
    }
}
