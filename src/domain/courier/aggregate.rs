use serde::Serialize;
use uuid::Uuid;

use crate::domain::kernel::{Location, ValidationError};
use crate::domain::order::Order;
use super::errors::CourierError;
use super::storage_place::StoragePlace;

// ============================================================================
// Courier Aggregate - Business Logic
// ============================================================================

pub const DEFAULT_STORAGE_NAME: &str = "Bag";
pub const DEFAULT_STORAGE_VOLUME: i32 = 10;

/// A courier with a speed budget per move and one or more storage places.
///
/// The first place is always the default bag. Places are only ever appended,
/// and nothing outside the courier gets mutable access to them.
#[derive(Debug, Clone, Serialize)]
pub struct Courier {
    id: Uuid,
    name: String,
    speed: i32,
    location: Location,
    places: Vec<StoragePlace>,
}

impl Courier {
    pub fn new(name: impl Into<String>, speed: i32, location: Location) -> Result<Self, CourierError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Required("name").into());
        }
        if speed <= 0 {
            return Err(ValidationError::not_positive("speed", speed).into());
        }

        let bag = StoragePlace::new(DEFAULT_STORAGE_NAME, DEFAULT_STORAGE_VOLUME)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            speed,
            location,
            places: vec![bag],
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn places(&self) -> &[StoragePlace] {
        &self.places
    }

    pub fn free_places(&self) -> usize {
        self.places.iter().filter(|p| !p.is_occupied()).count()
    }

    pub fn holds_order(&self, order_id: Uuid) -> bool {
        self.places.iter().any(|p| p.order_id() == Some(order_id))
    }

    pub fn add_storage_place(&mut self, name: impl Into<String>, volume: i32) -> Result<(), CourierError> {
        let place = StoragePlace::new(name, volume)?;
        self.places.push(place);
        Ok(())
    }

    /// True if any place can hold the order right now. Places that reject the
    /// volume as invalid simply don't count.
    pub fn can_take_order(&self, order: &Order) -> bool {
        self.first_fit(order.volume()).is_some()
    }

    /// Reserves the first place, in list order, that fits the order.
    pub fn take_order(&mut self, order: &Order) -> Result<(), CourierError> {
        let index = self.first_fit(order.volume()).ok_or(CourierError::NoSuitableStorage {
            order_id: order.id(),
            volume: order.volume(),
        })?;
        self.places[index].store(order.id(), order.volume())
    }

    /// Frees the place holding `order`.
    pub fn complete_order(&mut self, order: &Order) -> Result<(), CourierError> {
        let place = self
            .places
            .iter_mut()
            .find(|p| p.order_id() == Some(order.id()))
            .ok_or(CourierError::OrderNotFound(order.id()))?;
        place.clear(order.id())
    }

    pub fn calculate_time_to_location(&self, target: Location) -> f64 {
        let distance = target.distance_to(self.location);
        distance as f64 / self.speed as f64
    }

    /// One step towards `target`, spending the speed budget on X first and
    /// whatever is left on Y.
    pub fn move_towards(&mut self, target: Location) -> Result<(), CourierError> {
        let dx = (target.x() - self.location.x()).clamp(-self.speed, self.speed);
        let remaining = self.speed - dx.abs();
        let dy = (target.y() - self.location.y()).clamp(-remaining, remaining);

        self.location = Location::new(self.location.x() + dx, self.location.y() + dy)?;
        Ok(())
    }

    fn first_fit(&self, volume: i32) -> Option<usize> {
        self.places
            .iter()
            .position(|p| matches!(p.can_store(volume), Ok(true)))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
