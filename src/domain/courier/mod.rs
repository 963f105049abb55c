// ============================================================================
// Courier Domain - Business Logic for Courier Aggregate
// ============================================================================
//
// - StoragePlace (capacity slot, owned by a courier)
// - Errors (CourierError enum)
// - Aggregate (Courier: reservation, release, ETA, movement)
//
// ============================================================================

pub mod storage_place;
pub mod errors;
pub mod aggregate;

pub use storage_place::*;
pub use errors::*;
pub use aggregate::*;
