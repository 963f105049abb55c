use serde::Serialize;
use uuid::Uuid;

use crate::domain::kernel::{Location, ValidationError};
use super::errors::OrderError;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================

/// A delivery order.
///
/// Equality is by identity: two orders with the same id compare equal
/// regardless of their other fields.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    id: Uuid,
    courier_id: Option<Uuid>,
    location: Location,
    volume: i32,
    status: OrderStatus,
}

impl Order {
    pub fn new(id: Uuid, location: Location, volume: i32) -> Result<Self, OrderError> {
        if id.is_nil() {
            return Err(ValidationError::Required("order_id").into());
        }
        if volume <= 0 {
            return Err(ValidationError::not_positive("volume", volume).into());
        }

        Ok(Self {
            id,
            courier_id: None,
            location,
            volume,
            status: OrderStatus::Created,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn courier_id(&self) -> Option<Uuid> {
        self.courier_id
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn volume(&self) -> i32 {
        self.volume
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// `Created -> Assigned`. The courier id is recorded once and kept for
    /// the rest of the order's life.
    pub fn assign(&mut self, courier_id: Uuid) -> Result<(), OrderError> {
        if courier_id.is_nil() {
            return Err(ValidationError::Required("courier_id").into());
        }
        if self.status != OrderStatus::Created {
            return Err(OrderError::AlreadyAssigned);
        }

        self.courier_id = Some(courier_id);
        self.status = OrderStatus::Assigned;
        Ok(())
    }

    /// `Assigned -> Completed`.
    pub fn complete(&mut self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Assigned {
            return Err(OrderError::NotAssigned);
        }

        self.status = OrderStatus::Completed;
        Ok(())
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Order {}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kernel::ErrorKind;

    fn location(x: i32, y: i32) -> Location {
        Location::new(x, y).unwrap()
    }

    fn new_order() -> Order {
        Order::new(Uuid::new_v4(), location(5, 5), 10).unwrap()
    }

    #[test]
    fn test_new_order_starts_created() {
        let id = Uuid::new_v4();
        let order = Order::new(id, location(3, 7), 15).unwrap();

        assert_eq!(order.id(), id);
        assert_eq!(order.location(), location(3, 7));
        assert_eq!(order.volume(), 15);
        assert_eq!(order.status(), OrderStatus::Created);
        assert!(order.courier_id().is_none());
    }

    #[test]
    fn test_new_order_rejects_nil_id() {
        let err = Order::new(Uuid::nil(), location(5, 5), 10).unwrap_err();
        assert_eq!(err, OrderError::Validation(ValidationError::Required("order_id")));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_new_order_rejects_non_positive_volume() {
        for volume in [0, -5] {
            let err = Order::new(Uuid::new_v4(), location(5, 5), volume).unwrap_err();
            assert!(err.to_string().contains("volume"));
        }
    }

    #[test]
    fn test_assign_sets_courier_and_status() {
        let mut order = new_order();
        let courier_id = Uuid::new_v4();

        order.assign(courier_id).unwrap();

        assert_eq!(order.status(), OrderStatus::Assigned);
        assert_eq!(order.courier_id(), Some(courier_id));
    }

    #[test]
    fn test_assign_rejects_nil_courier() {
        let mut order = new_order();

        let err = order.assign(Uuid::nil()).unwrap_err();

        assert!(err.to_string().contains("courier_id"));
        assert_eq!(order.status(), OrderStatus::Created);
        assert!(order.courier_id().is_none());
    }

    #[test]
    fn test_assign_is_effective_once() {
        let mut order = new_order();
        let first = Uuid::new_v4();
        order.assign(first).unwrap();

        let err = order.assign(Uuid::new_v4()).unwrap_err();
        assert_eq!(err, OrderError::AlreadyAssigned);
        assert_eq!(err.kind(), ErrorKind::DomainRule);
        assert_eq!(order.status(), OrderStatus::Assigned);
        assert_eq!(order.courier_id(), Some(first));

        order.complete().unwrap();
        assert_eq!(order.assign(Uuid::new_v4()), Err(OrderError::AlreadyAssigned));
        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(order.courier_id(), Some(first));
    }

    #[test]
    fn test_complete_requires_assigned() {
        let mut order = new_order();
        assert_eq!(order.complete(), Err(OrderError::NotAssigned));
        assert_eq!(order.status(), OrderStatus::Created);

        order.assign(Uuid::new_v4()).unwrap();
        order.complete().unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);

        assert_eq!(order.complete(), Err(OrderError::NotAssigned));
        assert_eq!(order.status(), OrderStatus::Completed);
    }

    #[test]
    fn test_full_lifecycle_keeps_courier_id() {
        let mut order = new_order();
        let courier_id = Uuid::new_v4();

        order.assign(courier_id).unwrap();
        order.complete().unwrap();

        assert_eq!(order.status(), OrderStatus::Completed);
        assert_eq!(order.courier_id(), Some(courier_id));
    }

    #[test]
    fn test_equality_by_identity() {
        let a = new_order();
        let b = new_order();
        let same_id = Order::new(a.id(), location(3, 3), 5).unwrap();

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(a, same_id);
    }
}
