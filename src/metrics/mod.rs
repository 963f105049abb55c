// Private module declaration
mod server;

use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};

// Re-export for public API
pub use server::start_metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for dispatch observability
// ============================================================================
//
// Provides metrics for:
// - Order intake and dispatch outcomes
// - ETA distribution of successful dispatches
// - Courier movement and order completion
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

pub struct DispatchMetrics {
    registry: Registry,

    pub orders_created: IntCounter,
    pub orders_dispatched: IntCounter,
    pub dispatch_failures: IntCounterVec,
    pub dispatch_eta: Histogram,
    pub orders_completed: IntCounter,
    pub courier_moves: IntCounter,
    pub pending_orders: IntGauge,
}

impl DispatchMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounter::new(
            "orders_created_total",
            "Total orders accepted at intake",
        )?;
        registry.register(Box::new(orders_created.clone()))?;

        let orders_dispatched = IntCounter::new(
            "orders_dispatched_total",
            "Total orders assigned to a courier",
        )?;
        registry.register(Box::new(orders_dispatched.clone()))?;

        let dispatch_failures = IntCounterVec::new(
            Opts::new("dispatch_failures_total", "Dispatch attempts that did not assign the order"),
            &["reason"],
        )?;
        registry.register(Box::new(dispatch_failures.clone()))?;

        let dispatch_eta = Histogram::with_opts(
            HistogramOpts::new("dispatch_eta", "ETA of the selected courier at dispatch time")
                .buckets(vec![0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 18.0]),
        )?;
        registry.register(Box::new(dispatch_eta.clone()))?;

        let orders_completed = IntCounter::new(
            "orders_completed_total",
            "Total orders delivered",
        )?;
        registry.register(Box::new(orders_completed.clone()))?;

        let courier_moves = IntCounter::new(
            "courier_moves_total",
            "Total courier movement steps",
        )?;
        registry.register(Box::new(courier_moves.clone()))?;

        let pending_orders = IntGauge::new(
            "pending_orders",
            "Orders waiting for a courier",
        )?;
        registry.register(Box::new(pending_orders.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            orders_dispatched,
            dispatch_failures,
            dispatch_eta,
            orders_completed,
            courier_moves,
            pending_orders,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_dispatch(&self, eta: f64) {
        self.orders_dispatched.inc();
        self.dispatch_eta.observe(eta);
    }

    pub fn record_dispatch_failure(&self, reason: &str) {
        self.dispatch_failures.with_label_values(&[reason]).inc();
    }
}
