// Bounded courier rotation with zone-aware selection

use crate::error::{DispatchError, Result};
use crate::models::{Courier, CourierId, DEFAULT_MAX_LOAD, DEFAULT_POOL_CAPACITY};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Fixed-capacity FIFO rotation of couriers.
///
/// Scan order is enrollment order. Assigning or releasing a courier never
/// moves it within the rotation.
#[derive(Debug, Clone)]
pub struct CourierPool {
    couriers: VecDeque<Courier>,
    capacity: usize,
    max_load: u32,
}

impl CourierPool {
    /// Creates an empty pool holding at most `capacity` couriers
    pub fn new(capacity: usize, max_load: u32) -> Self {
        Self {
            couriers: VecDeque::with_capacity(capacity),
            capacity,
            max_load,
        }
    }

    /// Enrolls a new courier at the back of the rotation.
    /// A full pool rejects the courier and is left unchanged.
    pub fn enroll(
        &mut self,
        id: CourierId,
        name: impl Into<String>,
        zone: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        if self.is_full() {
            warn!(id, name = %name, capacity = self.capacity, "courier pool is full");
            return Err(DispatchError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let courier = Courier::new(id, name, zone, self.max_load);
        info!(id, name = %courier.name, zone = %courier.zone, "courier enrolled");
        self.couriers.push_back(courier);
        Ok(())
    }

    /// Picks a courier for `zone`.
    ///
    /// First pass: the first available courier that is either already in
    /// the zone or still below its max load. Second pass: the first
    /// available courier at all.
    pub fn select_for_zone(&self, zone: &str) -> Option<&Courier> {
        if let Some(courier) = self.couriers.iter().find(|c| c.prefers(zone)) {
            debug!(id = courier.id, zone, "courier selected by affinity");
            return Some(courier);
        }

        let fallback = self.couriers.iter().find(|c| c.available);
        if let Some(courier) = fallback {
            debug!(id = courier.id, zone, "courier selected by fallback");
        }
        fallback
    }

    /// Marks the courier busy in `zone` and adds one delivery to its load
    pub fn assign(&mut self, id: CourierId, zone: &str) -> bool {
        match self.get_mut(id) {
            Some(courier) => {
                courier.take_delivery(zone);
                true
            }
            None => false,
        }
    }

    /// Marks the courier available again and removes one delivery from its load
    pub fn release(&mut self, id: CourierId) -> bool {
        match self.get_mut(id) {
            Some(courier) => {
                courier.finish_delivery();
                true
            }
            None => false,
        }
    }

    /// Removes and returns the oldest courier in the rotation
    pub fn dequeue(&mut self) -> Option<Courier> {
        self.couriers.pop_front()
    }

    /// Oldest courier in the rotation
    pub fn peek(&self) -> Option<&Courier> {
        self.couriers.front()
    }

    pub fn get(&self, id: CourierId) -> Option<&Courier> {
        self.couriers.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: CourierId) -> Option<&mut Courier> {
        self.couriers.iter_mut().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.couriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.couriers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.couriers.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Couriers in rotation order
    pub fn iter(&self) -> impl Iterator<Item = &Courier> + '_ {
        self.couriers.iter()
    }
}

impl Default for CourierPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY, DEFAULT_MAX_LOAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_pool() -> CourierPool {
        let mut pool = CourierPool::default();
        pool.enroll(1, "Rae", "Zone-A").unwrap();
        pool.enroll(2, "Sol", "Zone-B").unwrap();
        pool.enroll(3, "Tam", "Zone-C").unwrap();
        pool
    }

    #[test]
    fn test_enroll_respects_capacity() {
        let mut pool = CourierPool::new(2, 5);
        assert!(pool.enroll(1, "Rae", "Zone-A").is_ok());
        assert!(pool.enroll(2, "Sol", "Zone-B").is_ok());

        let err = pool.enroll(3, "Tam", "Zone-C").unwrap_err();
        assert!(matches!(err, DispatchError::CapacityExceeded { capacity: 2 }));
        assert_eq!(pool.len(), 2);
        assert!(pool.get(3).is_none());
    }

    #[test]
    fn test_select_prefers_first_eligible_in_rotation() {
        let pool = create_test_pool();

        // Everyone has spare capacity, so the oldest courier wins
        assert_eq!(pool.select_for_zone("Zone-C").map(|c| c.id), Some(1));
    }

    #[test]
    fn test_select_skips_busy_couriers() {
        let mut pool = create_test_pool();
        pool.assign(1, "Zone-B");

        assert_eq!(pool.select_for_zone("Zone-A").map(|c| c.id), Some(2));
    }

    #[test]
    fn test_select_falls_back_to_any_available() {
        let mut pool = CourierPool::new(10, 1);
        pool.enroll(1, "Rae", "Zone-A").unwrap();
        pool.assign(1, "Zone-A");
        // Full but available, and in another zone
        pool.get_mut(1).unwrap().available = true;

        let courier = pool.select_for_zone("Zone-C").unwrap();
        assert_eq!(courier.id, 1);
        assert!(!courier.has_spare_capacity());
    }

    #[test]
    fn test_select_none_available() {
        let mut pool = create_test_pool();
        for id in 1..=3 {
            pool.assign(id, "Zone-A");
        }
        assert!(pool.select_for_zone("Zone-A").is_none());
        assert!(CourierPool::default().select_for_zone("Zone-A").is_none());
    }

    #[test]
    fn test_assign_and_release() {
        let mut pool = create_test_pool();

        assert!(pool.assign(2, "Zone-C"));
        let courier = pool.get(2).unwrap();
        assert!(!courier.available);
        assert_eq!(courier.zone, "Zone-C");
        assert_eq!(courier.load, 1);

        assert!(pool.release(2));
        assert!(pool.release(2));
        let courier = pool.get(2).unwrap();
        assert!(courier.available);
        assert_eq!(courier.load, 0);

        assert!(!pool.assign(42, "Zone-A"));
        assert!(!pool.release(42));
    }

    #[test]
    fn test_release_keeps_rotation_position() {
        let mut pool = create_test_pool();
        pool.assign(1, "Zone-A");
        pool.release(1);

        let order: Vec<_> = pool.iter().map(|c| c.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_dequeue_and_peek() {
        let mut pool = create_test_pool();
        assert_eq!(pool.peek().map(|c| c.id), Some(1));
        assert_eq!(pool.dequeue().map(|c| c.id), Some(1));
        assert_eq!(pool.peek().map(|c| c.id), Some(2));
        assert_eq!(pool.len(), 2);
    }
}
