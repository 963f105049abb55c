// ============================================================================
// Shared Validation Errors
// ============================================================================

/// Coarse classification every domain error maps onto.
///
/// Callers branch on this instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required value missing or value out of range.
    Validation,
    /// Operation attempted against an aggregate in the wrong state.
    DomainRule,
    /// Search space exhausted (no storage, no courier).
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Value is required: {0}")]
    Required(&'static str),

    #[error("Value {value} of {name} is out of range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl ValidationError {
    /// Out-of-range error for a value that must be strictly positive.
    pub fn not_positive(name: &'static str, value: i32) -> Self {
        Self::OutOfRange {
            name,
            value: value as i64,
            min: 1,
            max: i32::MAX as i64,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
