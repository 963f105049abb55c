// ============================================================================
// Domain Services - Logic spanning more than one aggregate
// ============================================================================

pub mod errors;
pub mod order_dispatcher;

pub use errors::*;
pub use order_dispatcher::*;
