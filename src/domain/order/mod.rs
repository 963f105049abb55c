// ============================================================================
// Order Domain - Business Logic for Order Aggregate
// ============================================================================
//
// - Value objects (OrderStatus)
// - Commands (CreateOrder intake)
// - Events (OrderCreated, OrderAssigned, OrderCompleted)
// - Errors (OrderError enum)
// - Aggregate (Order with its lifecycle state machine)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
