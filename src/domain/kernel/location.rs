use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ValidationError;

// ============================================================================
// Location Value Object
// ============================================================================

pub const MIN_COORDINATE: i32 = 1;
pub const MAX_COORDINATE: i32 = 10;

/// A point on the delivery grid.
///
/// Always within `[MIN_COORDINATE, MAX_COORDINATE]` on both axes. "No location"
/// is expressed as `Option<Location>` by the callers that need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Coordinates", into = "Coordinates")]
pub struct Location {
    x: i32,
    y: i32,
}

#[derive(Serialize, Deserialize)]
struct Coordinates {
    x: i32,
    y: i32,
}

impl Location {
    pub fn new(x: i32, y: i32) -> Result<Self, ValidationError> {
        check_axis("x", x)?;
        check_axis("y", y)?;
        Ok(Self { x, y })
    }

    /// Uniformly random grid point drawn from the supplied source.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x = rng.gen_range(MIN_COORDINATE..=MAX_COORDINATE);
        let y = rng.gen_range(MIN_COORDINATE..=MAX_COORDINATE);
        debug_assert!(
            Self::new(x, y).is_ok(),
            "random location ({x}, {y}) escaped the grid"
        );
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Manhattan distance.
    pub fn distance_to(&self, other: Location) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

fn check_axis(name: &'static str, value: i32) -> Result<(), ValidationError> {
    if !(MIN_COORDINATE..=MAX_COORDINATE).contains(&value) {
        return Err(ValidationError::OutOfRange {
            name,
            value: value as i64,
            min: MIN_COORDINATE as i64,
            max: MAX_COORDINATE as i64,
        });
    }
    Ok(())
}

impl TryFrom<Coordinates> for Location {
    type Error = ValidationError;

    fn try_from(c: Coordinates) -> Result<Self, Self::Error> {
        Location::new(c.x, c.y)
    }
}

impl From<Location> for Coordinates {
    fn from(l: Location) -> Self {
        Coordinates { x: l.x, y: l.y }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
