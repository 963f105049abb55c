// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Aggregates, value objects and the dispatch service. Nothing in here does
// I/O; callers hand in fully constructed values and get decisions back.
//
// - kernel/   - Location and shared validation errors
// - order/    - Order aggregate and its lifecycle
// - courier/  - Courier aggregate and its storage places
// - services/ - OrderDispatcher
//
// ============================================================================

pub mod kernel;
pub mod events;
pub mod order;
pub mod courier;
pub mod services;
