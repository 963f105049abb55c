use actix::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use courier_dispatch::actors::{
    AddCourier, AssignOrders, DispatchActor, DrainEvents, GetFleetSnapshot, MoveCouriers,
    SubmitOrder,
};
use courier_dispatch::config::SimulationConfig;
use courier_dispatch::domain::kernel::Location;
use courier_dispatch::domain::order::CreateOrder;
use courier_dispatch::metrics::{self, DispatchMetrics};

#[actix::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO, overridable with RUST_LOG
    // Example: RUST_LOG=courier_dispatch=trace cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,courier_dispatch=debug"))
        )
        .init();

    let config = SimulationConfig::from_env()?;
    tracing::info!(?config, "Starting courier dispatch simulation");

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    // === 1. Metrics and dispatch actor ===
    let metrics = Arc::new(DispatchMetrics::new()?);
    let dispatcher = DispatchActor::new(metrics.clone()).start();

    if let Some(port) = config.metrics_port {
        let shared = metrics.clone();
        let addr = dispatcher.clone();
        actix::spawn(async move {
            if let Err(e) = metrics::start_metrics_server(shared, addr, port).await {
                tracing::error!("Metrics server error: {}", e);
            }
        });
    }

    // === 2. Fleet ===
    for courier in config.build_fleet(&mut rng)? {
        dispatcher.send(AddCourier(courier)).await?;
    }

    // === 3. Ticks: intake, dispatch, movement ===
    let mut interval = tokio::time::interval(config.tick_interval());
    for tick in 1..=config.total_ticks {
        interval.tick().await;

        for _ in 0..config.orders_per_tick {
            let cmd = CreateOrder {
                order_id: Uuid::new_v4(),
                location: Some(Location::random(&mut rng)),
                volume: rng.gen_range(1..=config.max_order_volume),
            };
            if let Err(e) = dispatcher.send(SubmitOrder(cmd)).await? {
                tracing::warn!(error = %e, "Order rejected at intake");
            }
        }

        let assigned = dispatcher.send(AssignOrders).await?;
        let delivered = dispatcher.send(MoveCouriers).await?;
        tracing::debug!(tick, assigned, delivered = delivered.len(), "Tick finished");

        for envelope in dispatcher.send(DrainEvents).await? {
            match envelope.to_json() {
                Ok(json) => tracing::info!(event_type = %envelope.event_type, "{}", json),
                Err(e) => tracing::error!("Failed to serialize event: {}", e),
            }
        }
    }

    // === 4. Final state ===
    let snapshot = dispatcher.send(GetFleetSnapshot).await?;
    tracing::info!(
        created = snapshot.created,
        assigned = snapshot.assigned,
        completed = snapshot.completed,
        "Simulation finished"
    );
    tracing::info!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
