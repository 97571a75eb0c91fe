// Delivery system facade owning the graph, registry and courier pool

use tracing::info;

use crate::algorithms::dispatch::{
    plan_pending, resolve_warehouse, route_to_zone, BatchPlan, Dispatch, DispatchCoordinator,
};
use crate::algorithms::DispatchPlanner;
use crate::config::Settings;
use crate::error::{DispatchError, Result};
use crate::models::{
    zone_label, Appointment, AppointmentId, AppointmentRegistry, Courier, CourierId, CourierPool,
    LocationIndex, Route,
};
use crate::utils::{AdjacencyEntry, RoutingGraph};

/// Owns every piece of dispatch state and exposes the operator-facing
/// operations. Ids are issued sequentially from 1.
#[derive(Debug, Clone)]
pub struct DeliverySystem {
    graph: RoutingGraph,
    appointments: AppointmentRegistry,
    couriers: CourierPool,
    settings: Settings,
    warehouse: LocationIndex,
    next_appointment_id: AppointmentId,
    next_courier_id: CourierId,
}

impl DeliverySystem {
    /// Build a system from validated settings, loading the topology they name
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let graph = settings.routing_graph()?;
        Self::with_graph(settings, graph)
    }

    /// Build a system over an explicit routing graph
    pub fn with_graph(settings: Settings, graph: RoutingGraph) -> Result<Self> {
        let warehouse = resolve_warehouse(&graph, &settings.warehouse)?;
        let couriers = CourierPool::new(settings.courier_capacity, settings.max_courier_load);
        info!(
            locations = graph.len(),
            edges = graph.edge_count(),
            warehouse = graph.location_name(warehouse),
            "delivery system ready"
        );

        Ok(Self {
            graph,
            appointments: AppointmentRegistry::new(),
            couriers,
            settings,
            warehouse,
            next_appointment_id: 1,
            next_courier_id: 1,
        })
    }

    /// Queue a delivery and return its id. `zone` may be a short code ("A").
    pub fn add_appointment(
        &mut self,
        customer: &str,
        address: &str,
        delivery_time: &str,
        priority: i32,
        zone: &str,
    ) -> AppointmentId {
        let id = self.next_appointment_id;
        self.next_appointment_id += 1;
        self.appointments
            .insert(id, customer, address, delivery_time, priority, zone_label(zone));
        info!(id, customer, "appointment added");
        id
    }

    /// Enroll a courier and return its id. Fails when the pool is full.
    pub fn add_courier(&mut self, name: &str, zone: &str) -> Result<CourierId> {
        let id = self.next_courier_id;
        self.couriers.enroll(id, name, zone_label(zone))?;
        self.next_courier_id += 1;
        Ok(id)
    }

    /// Appointments in dispatch order
    pub fn appointments(&self) -> impl Iterator<Item = &Appointment> + '_ {
        self.appointments.iter()
    }

    /// Couriers in rotation order
    pub fn couriers(&self) -> impl Iterator<Item = &Courier> + '_ {
        self.couriers.iter()
    }

    pub fn remove_appointment(&mut self, id: AppointmentId) -> Result<()> {
        if self.appointments.remove(id) {
            info!(id, "appointment removed");
            Ok(())
        } else {
            Err(DispatchError::AppointmentNotFound { id })
        }
    }

    /// Mark a courier's delivery finished so it can be dispatched again
    pub fn release_courier(&mut self, id: CourierId) -> Result<()> {
        if self.couriers.release(id) {
            Ok(())
        } else {
            Err(DispatchError::CourierNotFound { id })
        }
    }

    pub fn dispatch_next(&mut self) -> Result<Dispatch> {
        let mut coordinator = DispatchCoordinator::with_warehouse_index(
            &self.graph,
            &mut self.appointments,
            &mut self.couriers,
            self.warehouse,
        );
        coordinator.dispatch_next()
    }

    /// Route preview for every pending appointment; changes nothing
    pub fn optimize_all(&self) -> BatchPlan {
        plan_pending(&self.graph, &self.appointments, self.warehouse)
    }

    /// Route from the warehouse to `zone`
    pub fn route_to(&self, zone: &str) -> Result<Route> {
        let label = zone_label(zone);
        let target = self
            .graph
            .location_index_by_zone_substring(&label)
            .ok_or_else(|| DispatchError::UnknownLocation {
                label: label.clone(),
            })?;
        let route = route_to_zone(&self.graph, self.warehouse, &label);
        if route.is_unreachable() {
            return Err(DispatchError::Unreachable {
                from: self.warehouse,
                to: target,
            });
        }
        Ok(route)
    }

    pub fn routing_graph(&self) -> &RoutingGraph {
        &self.graph
    }

    /// Adjacency listing per location
    pub fn show_routing_graph(&self) -> Vec<AdjacencyEntry> {
        self.graph.adjacency()
    }

    pub fn registry(&self) -> &AppointmentRegistry {
        &self.appointments
    }

    pub fn pool(&self) -> &CourierPool {
        &self.couriers
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn warehouse(&self) -> LocationIndex {
        self.warehouse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_system() -> DeliverySystem {
        DeliverySystem::new(Settings::default()).unwrap()
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut system = create_test_system();
        assert_eq!(system.add_appointment("Ana", "1 Elm St", "10:00", 2, "A"), 1);
        assert_eq!(system.add_appointment("Bo", "2 Elm St", "11:00", 2, "B"), 2);
        assert_eq!(system.add_courier("Rae", "C").unwrap(), 1);
        assert_eq!(system.add_courier("Sol", "A").unwrap(), 2);

        let zones: Vec<_> = system.appointments().map(|a| a.zone.as_str()).collect();
        assert_eq!(zones, vec!["Zone-A", "Zone-B"]);
        assert_eq!(system.couriers().next().unwrap().zone, "Zone-C");
    }

    #[test]
    fn test_full_pool_does_not_consume_ids() {
        let settings = Settings {
            courier_capacity: 1,
            ..Settings::default()
        };
        let mut system = DeliverySystem::new(settings).unwrap();
        assert_eq!(system.add_courier("Rae", "A").unwrap(), 1);
        assert!(system.add_courier("Sol", "A").is_err());
        assert_eq!(system.pool().len(), 1);
    }

    #[test]
    fn test_remove_appointment() {
        let mut system = create_test_system();
        let id = system.add_appointment("Ana", "1 Elm St", "10:00", 2, "A");
        assert!(system.remove_appointment(id).is_ok());
        assert!(matches!(
            system.remove_appointment(id),
            Err(DispatchError::AppointmentNotFound { .. })
        ));
    }

    #[test]
    fn test_dispatch_and_release_cycle() {
        let mut system = create_test_system();
        system.add_appointment("Ana", "1 Elm St", "10:00", 2, "B");
        system.add_appointment("Bo", "2 Elm St", "11:00", 2, "B");
        let courier = system.add_courier("Rae", "B").unwrap();

        let first = system.dispatch_next().unwrap();
        assert_eq!(first.route.path, vec![9, 3]);
        assert_eq!(first.route.distance, 10.0);
        assert!(system.dispatch_next().is_err());

        system.release_courier(courier).unwrap();
        let second = system.dispatch_next().unwrap();
        assert_eq!(second.appointment.id, 2);
        assert_eq!(second.courier.load, 1);
        assert!(matches!(
            system.dispatch_next(),
            Err(DispatchError::NothingPending)
        ));
        assert!(system.release_courier(99).is_err());
    }

    #[test]
    fn test_zone_prefix_is_case_insensitive() {
        let mut system = create_test_system();
        system.add_appointment("Ana", "1 Elm St", "10:00", 2, "zone-b");
        system.add_courier("Rae", "ZONE-b").unwrap();

        assert_eq!(system.appointments().next().unwrap().zone, "Zone-B");
        assert_eq!(system.couriers().next().unwrap().zone, "Zone-B");

        let dispatch = system.dispatch_next().unwrap();
        assert_eq!(dispatch.route.path, vec![9, 3]);
        assert_eq!(dispatch.route.distance, 10.0);
    }

    #[test]
    fn test_default_pool_limits() {
        let mut system = create_test_system();
        assert_eq!(system.pool().capacity(), 10);
        for i in 0..10 {
            system.add_courier(&format!("Courier {}", i), "A").unwrap();
        }
        assert!(system.pool().is_full());
        assert!(matches!(
            system.add_courier("Extra", "A"),
            Err(DispatchError::CapacityExceeded { .. })
        ));
        assert!(system.couriers().all(|c| c.max_load == 5));
    }

    #[test]
    fn test_route_to() {
        let system = create_test_system();
        assert_eq!(system.route_to("C").unwrap().distance, 12.0);
        assert!(matches!(
            system.route_to("Z"),
            Err(DispatchError::UnknownLocation { .. })
        ));
    }

    #[test]
    fn test_show_routing_graph() {
        let system = create_test_system();
        let listing = system.show_routing_graph();
        assert_eq!(listing.len(), 10);

        let warehouse = &listing[9];
        assert_eq!(warehouse.location, "Warehouse");
        let neighbors: Vec<_> = warehouse
            .neighbors
            .iter()
            .map(|n| n.location.as_str())
            .collect();
        assert_eq!(neighbors, vec!["Zone-C-Center", "Zone-B-Center", "Zone-A-Center"]);
    }
}
