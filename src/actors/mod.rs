// ============================================================================
// Actors Module
// ============================================================================
//
// The dispatch actor owns every courier and order in the process. Callers
// talk to it only through messages, so reservations are serialized by its
// mailbox.
//
// ============================================================================

// Private module declaration
mod dispatch_actor;

// Re-export for public API
pub use dispatch_actor::{
    AddCourier,
    CourierView,
    DispatchActor,
    DrainEvents,
    FleetSnapshot,
    GetFleetSnapshot,
    MoveCouriers,
    AssignOrders,
    SubmitOrder,
};
