use uuid::Uuid;

use crate::domain::kernel::{ErrorKind, ValidationError};

// ============================================================================
// Courier & Storage Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourierError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cannot store order of volume {volume} in storage place {place_id}")]
    CannotStore { place_id: Uuid, volume: i32 },

    /// `occupant` is `None` when the place was empty, `Some` when it holds
    /// a different order.
    #[error("Order {order_id} is not stored in this place (occupant: {occupant:?})")]
    OrderNotStoredHere {
        order_id: Uuid,
        occupant: Option<Uuid>,
    },

    #[error("Cannot find suitable storage for order {order_id} of volume {volume}")]
    NoSuitableStorage { order_id: Uuid, volume: i32 },

    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),
}

impl CourierError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CourierError::Validation(e) => e.kind(),
            CourierError::CannotStore { .. }
            | CourierError::OrderNotStoredHere { .. }
            | CourierError::OrderNotFound(_) => ErrorKind::DomainRule,
            CourierError::NoSuitableStorage { .. } => ErrorKind::NotFound,
        }
    }
}
