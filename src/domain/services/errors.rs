use uuid::Uuid;

use crate::domain::courier::CourierError;
use crate::domain::kernel::{ErrorKind, ValidationError};
use crate::domain::order::{OrderError, OrderStatus};

// ============================================================================
// Dispatch Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Order {order_id} is already assigned (status: {status})")]
    AlreadyAssigned { order_id: Uuid, status: OrderStatus },

    #[error("No courier can take order {0}")]
    NoCourierAvailable(Uuid),

    #[error("Courier rejected order: {0}")]
    Courier(#[from] CourierError),

    #[error("Order rejected assignment: {0}")]
    Order(#[from] OrderError),
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Validation(e) => e.kind(),
            DispatchError::AlreadyAssigned { .. } => ErrorKind::DomainRule,
            DispatchError::NoCourierAvailable(_) => ErrorKind::NotFound,
            DispatchError::Courier(e) => e.kind(),
            DispatchError::Order(e) => e.kind(),
        }
    }

    /// Short stable label, used as a metrics dimension.
    pub fn reason(&self) -> &'static str {
        match self {
            DispatchError::Validation(_) => "validation",
            DispatchError::AlreadyAssigned { .. } => "already_assigned",
            DispatchError::NoCourierAvailable(_) => "no_courier_available",
            DispatchError::Courier(_) => "courier_rejected",
            DispatchError::Order(_) => "order_rejected",
        }
    }
}
