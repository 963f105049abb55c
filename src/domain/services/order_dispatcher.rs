use crate::domain::courier::Courier;
use crate::domain::kernel::ValidationError;
use crate::domain::order::{Order, OrderStatus};
use super::errors::DispatchError;

// ============================================================================
// Order Dispatcher - Nearest-courier matching
// ============================================================================
//
// Stateless: every decision is a function of the order and the pool passed
// in. Reservation on the courier and assignment on the order either both
// happen or neither does.
//
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct OrderDispatcher;

impl OrderDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Assigns `order` to the feasible courier with the lowest ETA.
    ///
    /// Ties keep the earliest courier in `couriers`, so slice order is the
    /// tie-break.
    pub fn dispatch<'a>(
        &self,
        order: &mut Order,
        couriers: &'a mut [Courier],
    ) -> Result<&'a Courier, DispatchError> {
        if order.status() != OrderStatus::Created {
            return Err(DispatchError::AlreadyAssigned {
                order_id: order.id(),
                status: order.status(),
            });
        }
        if couriers.is_empty() {
            return Err(ValidationError::Required("couriers").into());
        }

        let (index, eta) = find_courier(order, couriers)?;
        let courier = &mut couriers[index];

        tracing::debug!(
            order_id = %order.id(),
            courier_id = %courier.id(),
            eta,
            "Selected courier for order"
        );

        commit(order, courier)?;
        Ok(courier)
    }
}

fn find_courier(order: &Order, couriers: &[Courier]) -> Result<(usize, f64), DispatchError> {
    let mut best: Option<(usize, f64)> = None;

    for (index, courier) in couriers.iter().enumerate() {
        if !courier.can_take_order(order) {
            continue;
        }
        let eta = courier.calculate_time_to_location(order.location());
        if best.map_or(true, |(_, min)| eta < min) {
            best = Some((index, eta));
        }
    }

    best.ok_or(DispatchError::NoCourierAvailable(order.id()))
}

/// Reserve storage, then assign. A failed assignment releases the
/// reservation so the courier is left exactly as it was.
fn commit(order: &mut Order, courier: &mut Courier) -> Result<(), DispatchError> {
    courier.take_order(order)?;

    if let Err(err) = order.assign(courier.id()) {
        if let Err(release_err) = courier.complete_order(order) {
            tracing::error!(
                order_id = %order.id(),
                courier_id = %courier.id(),
                error = %release_err,
                "Failed to release reservation after rejected assignment"
            );
        }
        return Err(err.into());
    }

    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
