use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::events::DomainEvent;
use crate::domain::kernel::Location;

// ============================================================================
// Order Events - Facts recorded by the dispatch orchestration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Created(OrderCreated),
    Assigned(OrderAssigned),
    Completed(OrderCompleted),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Created(_) => "OrderCreated",
            OrderEvent::Assigned(_) => "OrderAssigned",
            OrderEvent::Completed(_) => "OrderCompleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub location: Location,
    pub volume: i32,
}

/// `eta` is the distance/speed estimate at the moment of dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAssigned {
    pub courier_id: Uuid,
    pub eta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCompleted {
    pub courier_id: Uuid,
    pub location: Location,
}
