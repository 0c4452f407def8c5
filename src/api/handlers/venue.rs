use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::UpdateVenueRequest;
use crate::api::dtos::responses::VenueResponse;
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_venue(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let venue = state.venue_repo.get_or_create_canonical().await?;
    Ok(Json(VenueResponse::from(venue)))
}

pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateVenueRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(pct) = payload.advance_percentage {
        if !(0..=100).contains(&pct) {
            return Err(AppError::Validation("advance_percentage must be between 0 and 100".into()));
        }
    }
    if let Some(boxes) = payload.total_boxes {
        if boxes < 1 {
            return Err(AppError::Validation("total_boxes must be at least 1".into()));
        }
    }

    let mut venue = state.venue_repo.get_or_create_canonical().await?;

    if let Some(name) = payload.name { venue.name = name; }
    if let Some(v) = payload.has_seating { venue.has_seating = v; }
    if let Some(v) = payload.has_lighting { venue.has_lighting = v; }
    if let Some(v) = payload.has_restrooms { venue.has_restrooms = v; }
    if let Some(v) = payload.has_equipments { venue.has_equipments = v; }
    if let Some(v) = payload.has_parking { venue.has_parking = v; }
    if let Some(v) = payload.total_boxes { venue.total_boxes = v; }
    if let Some(v) = payload.weekday_price { venue.weekday_price = v; }
    if let Some(v) = payload.weekend_price { venue.weekend_price = v; }
    if let Some(v) = payload.advance_percentage { venue.advance_percentage = v; }
    if let Some(v) = payload.email { venue.email = v; }
    if let Some(v) = payload.phone { venue.phone = v; }
    if let Some(v) = payload.opening_time { venue.opening_time = v; }
    if let Some(v) = payload.closing_time { venue.closing_time = v; }
    if let Some(v) = payload.no_cancellation { venue.no_cancellation = v; }
    if let Some(v) = payload.no_reschedule { venue.no_reschedule = v; }

    let updated = state.venue_repo.update(&venue).await?;
    info!("Venue updated by user {}", user_id);
    Ok(Json(VenueResponse::from(updated)))
}
