use serde::Deserialize;
use uuid::Uuid;

use crate::domain::kernel::{Location, ValidationError};
use super::aggregate::Order;
use super::errors::OrderError;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

/// Order intake request. The location is optional here so that a missing
/// one is reported as a validation error instead of being unrepresentable
/// in the request itself.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub order_id: Uuid,
    pub location: Option<Location>,
    pub volume: i32,
}

impl TryFrom<CreateOrder> for Order {
    type Error = OrderError;

    fn try_from(cmd: CreateOrder) -> Result<Self, Self::Error> {
        let location = cmd.location.ok_or(ValidationError::Required("location"))?;
        Order::new(cmd.order_id, location, cmd.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;

    #[test]
    fn test_create_order_builds_created_order() {
        let order_id = Uuid::new_v4();
        let cmd = CreateOrder {
            order_id,
            location: Some(Location::new(2, 8).unwrap()),
            volume: 4,
        };

        let order = Order::try_from(cmd).unwrap();
        assert_eq!(order.id(), order_id);
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[test]
    fn test_create_order_requires_location() {
        let cmd = CreateOrder { order_id: Uuid::new_v4(), location: None, volume: 4 };

        let err = Order::try_from(cmd).unwrap_err();
        assert_eq!(err, OrderError::Validation(ValidationError::Required("location")));
    }

    #[test]
    fn test_create_order_from_json() {
        let json = r#"{"order_id":"9b2f8f9e-2f7e-4d8a-9d43-2a3b8c3f0b11","location":{"x":4,"y":6},"volume":3}"#;
        let cmd: CreateOrder = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.location, Some(Location::new(4, 6).unwrap()));

        let missing = r#"{"order_id":"9b2f8f9e-2f7e-4d8a-9d43-2a3b8c3f0b11","location":null,"volume":3}"#;
        let cmd: CreateOrder = serde_json::from_str(missing).unwrap();
        assert!(Order::try_from(cmd).is_err());
    }
}
