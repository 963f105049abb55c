use actix::Addr;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;

use super::DispatchMetrics;
use crate::actors::{DispatchActor, GetFleetSnapshot};

/// Serve /metrics, /health and /fleet until the system shuts down.
pub async fn start_metrics_server(
    metrics: Arc<DispatchMetrics>,
    dispatcher: Addr<DispatchActor>,
    port: u16,
) -> std::io::Result<()> {
    tracing::info!("Starting metrics server on http://0.0.0.0:{}/metrics", port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(metrics.clone()))
            .app_data(web::Data::new(dispatcher.clone()))
            .configure(routes)
    })
    .workers(1)
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(metrics_handler))
        .route("/health", web::get().to(health_handler))
        .route("/fleet", web::get().to(fleet_handler));
}

async fn metrics_handler(metrics: web::Data<Arc<DispatchMetrics>>) -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = metrics.registry().gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

async fn health_handler(metrics: web::Data<Arc<DispatchMetrics>>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "courier-dispatch",
        "pending_orders": metrics.pending_orders.get(),
    }))
}

async fn fleet_handler(dispatcher: web::Data<Addr<DispatchActor>>) -> impl Responder {
    match dispatcher.send(GetFleetSnapshot).await {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(e) => {
            tracing::warn!("Dispatch actor unavailable: {}", e);
            HttpResponse::ServiceUnavailable().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::AddCourier;
    use crate::domain::courier::Courier;
    use crate::domain::kernel::Location;
    use actix::Actor;
    use actix_web::test;

    fn metrics() -> Arc<DispatchMetrics> {
        Arc::new(DispatchMetrics::new().unwrap())
    }

    #[actix_web::test]
    async fn test_metrics_endpoint_exposes_counters() {
        let metrics = metrics();
        metrics.orders_created.inc();
        let dispatcher = DispatchActor::new(metrics.clone()).start();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(metrics))
                .app_data(web::Data::new(dispatcher))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();

        assert!(text.contains("orders_created_total 1"));
    }

    #[actix_web::test]
    async fn test_health_reports_pending_orders() {
        let metrics = metrics();
        metrics.pending_orders.set(3);
        let dispatcher = DispatchActor::new(metrics.clone()).start();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(metrics))
                .app_data(web::Data::new(dispatcher))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["pending_orders"], 3);
    }

    #[actix_web::test]
    async fn test_fleet_returns_snapshot() {
        let metrics = metrics();
        let dispatcher = DispatchActor::new(metrics.clone()).start();
        let courier = Courier::new("Walker", 1, Location::new(2, 3).unwrap()).unwrap();
        dispatcher.send(AddCourier(courier)).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(metrics))
                .app_data(web::Data::new(dispatcher))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/fleet").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["couriers"][0]["name"], "Walker");
        assert_eq!(body["couriers"][0]["location"]["x"], 2);
        assert_eq!(body["couriers"][0]["free_places"], 1);
        assert_eq!(body["created"], 0);
    }
}
