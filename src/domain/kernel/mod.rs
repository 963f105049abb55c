// ============================================================================
// Shared Kernel - Value objects used by every aggregate
// ============================================================================

pub mod errors;
pub mod location;

pub use errors::*;
pub use location::*;
