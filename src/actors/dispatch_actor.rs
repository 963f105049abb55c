use actix::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::courier::Courier;
use crate::domain::events::EventEnvelope;
use crate::domain::kernel::Location;
use crate::domain::order::{
    CreateOrder, Order, OrderAssigned, OrderCompleted, OrderCreated, OrderError, OrderEvent,
    OrderStatus,
};
use crate::domain::services::{DispatchError, OrderDispatcher};
use crate::metrics::DispatchMetrics;

// ============================================================================
// Actor Messages
// ============================================================================

#[derive(Message)]
#[rtype(result = "Uuid")]
pub struct AddCourier(pub Courier);

#[derive(Message)]
#[rtype(result = "Result<Uuid, OrderError>")]
pub struct SubmitOrder(pub CreateOrder);

/// Dispatch every pending order. Replies with the number assigned.
#[derive(Message)]
#[rtype(result = "usize")]
pub struct AssignOrders;

/// One movement step per busy courier. Replies with the ids of orders
/// delivered during the step.
#[derive(Message)]
#[rtype(result = "Vec<Uuid>")]
pub struct MoveCouriers;

#[derive(Message)]
#[rtype(result = "FleetSnapshot")]
pub struct GetFleetSnapshot;

#[derive(Message)]
#[rtype(result = "Vec<EventEnvelope<OrderEvent>>")]
pub struct DrainEvents;

#[derive(Debug, Clone, Serialize)]
pub struct CourierView {
    pub id: Uuid,
    pub name: String,
    pub speed: i32,
    pub location: Location,
    pub free_places: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FleetSnapshot {
    pub couriers: Vec<CourierView>,
    pub created: usize,
    pub assigned: usize,
    pub completed: usize,
}

// ============================================================================
// Outbox - in-memory record of order events, drained by the caller
// ============================================================================

#[derive(Default)]
struct Outbox {
    events: Vec<EventEnvelope<OrderEvent>>,
    sequence: i64,
}

impl Outbox {
    fn record(&mut self, aggregate_id: Uuid, event: OrderEvent) {
        self.sequence += 1;
        self.events.push(EventEnvelope::new(aggregate_id, self.sequence, event));
    }

    fn drain(&mut self) -> Vec<EventEnvelope<OrderEvent>> {
        std::mem::take(&mut self.events)
    }
}

// ============================================================================
// Dispatch Actor - single owner of the courier pool and order book
// ============================================================================
//
// Every read-then-mutate on courier storage or order status goes through
// this actor's mailbox, one message at a time. Concurrent callers can never
// both reserve the same storage place.
//
// ============================================================================

pub struct DispatchActor {
    dispatcher: OrderDispatcher,
    couriers: Vec<Courier>,
    orders: HashMap<Uuid, Order>,
    /// Created orders waiting for a courier, oldest first.
    pending: VecDeque<Uuid>,
    /// Assigned orders in assignment order.
    in_delivery: Vec<Uuid>,
    /// Delivered orders are evicted from `orders` and only counted here.
    completed: usize,
    outbox: Outbox,
    metrics: Arc<DispatchMetrics>,
}

impl DispatchActor {
    pub fn new(metrics: Arc<DispatchMetrics>) -> Self {
        Self {
            dispatcher: OrderDispatcher::new(),
            couriers: Vec::new(),
            orders: HashMap::new(),
            pending: VecDeque::new(),
            in_delivery: Vec::new(),
            completed: 0,
            outbox: Outbox::default(),
            metrics,
        }
    }

    fn add_courier(&mut self, courier: Courier) -> Uuid {
        let courier_id = courier.id();
        tracing::info!(
            courier_id = %courier_id,
            name = courier.name(),
            speed = courier.speed(),
            location = %courier.location(),
            "Courier joined the fleet"
        );
        self.couriers.push(courier);
        courier_id
    }

    fn submit_order(&mut self, cmd: CreateOrder) -> Result<Uuid, OrderError> {
        let order = Order::try_from(cmd)?;
        let order_id = order.id();

        if self.orders.contains_key(&order_id) {
            tracing::warn!(order_id = %order_id, "Order already accepted, ignoring resubmission");
            return Ok(order_id);
        }

        tracing::info!(
            order_id = %order_id,
            location = %order.location(),
            volume = order.volume(),
            "Order accepted"
        );

        self.outbox.record(
            order_id,
            OrderEvent::Created(OrderCreated {
                location: order.location(),
                volume: order.volume(),
            }),
        );
        self.orders.insert(order_id, order);
        self.pending.push_back(order_id);
        self.metrics.orders_created.inc();
        self.metrics.pending_orders.set(self.pending.len() as i64);

        Ok(order_id)
    }

    fn assign_orders(&mut self) -> usize {
        if self.couriers.is_empty() {
            tracing::debug!(pending = self.pending.len(), "Fleet is empty, nothing to dispatch");
            return 0;
        }

        let mut assigned = 0;
        let mut waiting = VecDeque::new();

        while let Some(order_id) = self.pending.pop_front() {
            let Some(order) = self.orders.get_mut(&order_id) else {
                continue;
            };

            match self.dispatcher.dispatch(order, &mut self.couriers) {
                Ok(courier) => {
                    let courier_id = courier.id();
                    let eta = courier.calculate_time_to_location(order.location());

                    tracing::info!(
                        order_id = %order_id,
                        courier_id = %courier_id,
                        eta,
                        "Order assigned"
                    );

                    self.metrics.record_dispatch(eta);
                    self.outbox.record(
                        order_id,
                        OrderEvent::Assigned(OrderAssigned { courier_id, eta }),
                    );
                    self.in_delivery.push(order_id);
                    assigned += 1;
                }
                Err(DispatchError::NoCourierAvailable(_)) => {
                    tracing::debug!(order_id = %order_id, "No courier available, order stays pending");
                    waiting.push_back(order_id);
                }
                Err(e) => {
                    tracing::warn!(order_id = %order_id, error = %e, "Dispatch failed, dropping order from queue");
                    self.metrics.record_dispatch_failure(e.reason());
                }
            }
        }

        self.pending = waiting;
        self.metrics.pending_orders.set(self.pending.len() as i64);
        assigned
    }

    fn move_couriers(&mut self) -> Vec<Uuid> {
        let mut delivered = Vec::new();
        let mut delivered_ids = HashSet::new();

        for courier in self.couriers.iter_mut() {
            let courier_id = courier.id();

            let target = self
                .in_delivery
                .iter()
                .filter_map(|id| self.orders.get(id))
                .find(|o| o.courier_id() == Some(courier_id))
                .map(|o| o.location());
            let Some(target) = target else {
                continue;
            };

            if let Err(e) = courier.move_towards(target) {
                tracing::warn!(courier_id = %courier_id, error = %e, "Courier failed to move");
                continue;
            }
            self.metrics.courier_moves.inc();

            let here = courier.location();
            let arrived: Vec<Uuid> = self
                .in_delivery
                .iter()
                .filter(|id| {
                    self.orders
                        .get(*id)
                        .is_some_and(|o| o.courier_id() == Some(courier_id) && o.location() == here)
                })
                .copied()
                .collect();

            for order_id in arrived {
                let Some(order) = self.orders.get_mut(&order_id) else {
                    continue;
                };
                if let Err(e) = courier.complete_order(order) {
                    tracing::warn!(order_id = %order_id, error = %e, "Courier could not release order");
                    continue;
                }
                if let Err(e) = order.complete() {
                    tracing::warn!(order_id = %order_id, error = %e, "Order could not be completed");
                    continue;
                }

                tracing::info!(order_id = %order_id, courier_id = %courier_id, location = %here, "Order delivered");

                self.metrics.orders_completed.inc();
                self.outbox.record(
                    order_id,
                    OrderEvent::Completed(OrderCompleted { courier_id, location: here }),
                );
                self.orders.remove(&order_id);
                self.completed += 1;
                delivered_ids.insert(order_id);
                delivered.push(order_id);
            }
        }

        self.in_delivery.retain(|id| !delivered_ids.contains(id));
        delivered
    }

    fn snapshot(&self) -> FleetSnapshot {
        let mut snapshot = FleetSnapshot {
            couriers: self
                .couriers
                .iter()
                .map(|c| CourierView {
                    id: c.id(),
                    name: c.name().to_string(),
                    speed: c.speed(),
                    location: c.location(),
                    free_places: c.free_places(),
                })
                .collect(),
            completed: self.completed,
            ..Default::default()
        };

        for order in self.orders.values() {
            match order.status() {
                OrderStatus::Created => snapshot.created += 1,
                OrderStatus::Assigned => snapshot.assigned += 1,
                OrderStatus::Completed => {}
            }
        }

        snapshot
    }
}

impl Actor for DispatchActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("DispatchActor started");
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Handler<AddCourier> for DispatchActor {
    type Result = MessageResult<AddCourier>;

    fn handle(&mut self, msg: AddCourier, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.add_courier(msg.0))
    }
}

impl Handler<SubmitOrder> for DispatchActor {
    type Result = MessageResult<SubmitOrder>;

    fn handle(&mut self, msg: SubmitOrder, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.submit_order(msg.0))
    }
}

impl Handler<AssignOrders> for DispatchActor {
    type Result = MessageResult<AssignOrders>;

    fn handle(&mut self, _msg: AssignOrders, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.assign_orders())
    }
}

impl Handler<MoveCouriers> for DispatchActor {
    type Result = MessageResult<MoveCouriers>;

    fn handle(&mut self, _msg: MoveCouriers, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.move_couriers())
    }
}

impl Handler<GetFleetSnapshot> for DispatchActor {
    type Result = MessageResult<GetFleetSnapshot>;

    fn handle(&mut self, _msg: GetFleetSnapshot, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.snapshot())
    }
}

impl Handler<DrainEvents> for DispatchActor {
    type Result = MessageResult<DrainEvents>;

    fn handle(&mut self, _msg: DrainEvents, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.outbox.drain())
    }
}

// ============================================================================
// Tests
// ============================================================================
