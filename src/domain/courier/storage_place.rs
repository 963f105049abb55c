use serde::Serialize;
use uuid::Uuid;

use crate::domain::kernel::ValidationError;
use super::errors::CourierError;

// ============================================================================
// StoragePlace - a capacity slot holding at most one order
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct StoragePlace {
    id: Uuid,
    name: String,
    total_volume: i32,
    order_id: Option<Uuid>,
}

impl StoragePlace {
    pub fn new(name: impl Into<String>, total_volume: i32) -> Result<Self, CourierError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Required("name").into());
        }
        if total_volume <= 0 {
            return Err(ValidationError::not_positive("total_volume", total_volume).into());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            total_volume,
            order_id: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_volume(&self) -> i32 {
        self.total_volume
    }

    pub fn order_id(&self) -> Option<Uuid> {
        self.order_id
    }

    pub fn is_occupied(&self) -> bool {
        self.order_id.is_some()
    }

    /// Whether an order of `volume` fits right now. Never mutates.
    pub fn can_store(&self, volume: i32) -> Result<bool, CourierError> {
        if volume <= 0 {
            return Err(ValidationError::not_positive("volume", volume).into());
        }
        if self.is_occupied() || volume > self.total_volume {
            return Ok(false);
        }
        Ok(true)
    }

    pub fn store(&mut self, order_id: Uuid, volume: i32) -> Result<(), CourierError> {
        if order_id.is_nil() {
            return Err(ValidationError::Required("order_id").into());
        }
        if !self.can_store(volume)? {
            return Err(CourierError::CannotStore { place_id: self.id, volume });
        }

        self.order_id = Some(order_id);
        Ok(())
    }

    pub fn clear(&mut self, order_id: Uuid) -> Result<(), CourierError> {
        if order_id.is_nil() {
            return Err(ValidationError::Required("order_id").into());
        }
        if self.order_id != Some(order_id) {
            return Err(CourierError::OrderNotStoredHere {
                order_id,
                occupant: self.order_id,
            });
        }

        self.order_id = None;
        Ok(())
    }
}

impl PartialEq for StoragePlace {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StoragePlace {}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kernel::ErrorKind;

    #[test]
    fn test_new_storage_place() {
        let place = StoragePlace::new("Backpack", 20).unwrap();
        assert_eq!(place.name(), "Backpack");
        assert_eq!(place.total_volume(), 20);
        assert!(!place.is_occupied());
        assert!(place.order_id().is_none());
    }

    #[test]
    fn test_new_storage_place_validation() {
        assert_eq!(
            StoragePlace::new("", 10).unwrap_err(),
            CourierError::Validation(ValidationError::Required("name"))
        );
        for volume in [0, -1] {
            let err = StoragePlace::new("Bag", volume).unwrap_err();
            assert!(err.to_string().contains("total_volume"));
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn test_can_store() {
        let place = StoragePlace::new("Bag", 10).unwrap();
        assert!(place.can_store(10).unwrap());
        assert!(place.can_store(1).unwrap());
        assert!(!place.can_store(11).unwrap());
        assert!(place.can_store(0).is_err());
        assert!(place.can_store(-3).is_err());
    }

    #[test]
    fn test_store_occupies_place() {
        let mut place = StoragePlace::new("Bag", 10).unwrap();
        let order_id = Uuid::new_v4();

        place.store(order_id, 5).unwrap();

        assert!(place.is_occupied());
        assert_eq!(place.order_id(), Some(order_id));
        assert!(!place.can_store(1).unwrap());
    }

    #[test]
    fn test_store_rejects_second_order() {
        let mut place = StoragePlace::new("Bag", 10).unwrap();
        let first = Uuid::new_v4();
        place.store(first, 5).unwrap();

        let err = place.store(Uuid::new_v4(), 1).unwrap_err();
        assert!(matches!(err, CourierError::CannotStore { volume: 1, .. }));
        assert_eq!(err.kind(), ErrorKind::DomainRule);
        assert_eq!(place.order_id(), Some(first));
    }

    #[test]
    fn test_store_rejects_oversized_and_invalid_input() {
        let mut place = StoragePlace::new("Bag", 10).unwrap();
        assert!(matches!(
            place.store(Uuid::new_v4(), 11),
            Err(CourierError::CannotStore { .. })
        ));
        assert_eq!(
            place.store(Uuid::nil(), 5),
            Err(CourierError::Validation(ValidationError::Required("order_id")))
        );
        assert!(matches!(
            place.store(Uuid::new_v4(), 0),
            Err(CourierError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(!place.is_occupied());
    }

    #[test]
    fn test_store_then_clear_restores_capacity() {
        let mut place = StoragePlace::new("Bag", 10).unwrap();
        let before = place.can_store(7).unwrap();
        let order_id = Uuid::new_v4();

        place.store(order_id, 7).unwrap();
        place.clear(order_id).unwrap();

        assert!(!place.is_occupied());
        assert_eq!(place.can_store(7).unwrap(), before);
    }

    #[test]
    fn test_clear_empty_place() {
        let mut place = StoragePlace::new("Bag", 10).unwrap();
        let order_id = Uuid::new_v4();

        let err = place.clear(order_id).unwrap_err();
        assert_eq!(err, CourierError::OrderNotStoredHere { order_id, occupant: None });
    }

    #[test]
    fn test_clear_wrong_order() {
        let mut place = StoragePlace::new("Bag", 10).unwrap();
        let stored = Uuid::new_v4();
        let other = Uuid::new_v4();
        place.store(stored, 3).unwrap();

        let err = place.clear(other).unwrap_err();
        assert_eq!(
            err,
            CourierError::OrderNotStoredHere { order_id: other, occupant: Some(stored) }
        );
        assert_eq!(place.order_id(), Some(stored));

        assert!(place.clear(Uuid::nil()).is_err());
    }
}
