use axum::{
    body::Body,
    extract::Request,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{booking, health, slot, venue};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Venue Catalog
        .route("/api/v1/venue", get(venue::get_venue).put(venue::update_venue))

        // Slot Registry
        .route("/api/v1/slots", get(slot::list_slots))
        .route("/api/v1/slots/dates", get(slot::available_dates))
        .route("/api/v1/slots/seed", post(slot::seed_slots))
        .route("/api/v1/slots/{slot_id}", get(slot::get_slot))

        // Booking Ledger
        .route("/api/v1/slots/{slot_id}/book", post(booking::book_slot))
        .route("/api/v1/bookings", get(booking::my_bookings))
        .route("/api/v1/bookings/history", get(booking::booking_history))
        .route("/api/v1/bookings/dashboard", get(booking::my_dashboard))
        .route("/api/v1/bookings/{booking_id}/cancel", post(booking::cancel_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
