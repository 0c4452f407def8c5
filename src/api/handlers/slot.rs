use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{SeedSlotsRequest, SlotListParams};
use crate::api::dtos::responses::{Paginated, SeedSlotsResponse, SlotResponse};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::slot::SlotWithOccupancy;
use crate::domain::ports::{SlotQuery, MAX_FILTER_DATES, SLOT_PAGE_SIZE};
use crate::domain::services::seeding::{sample_slots, DEFAULT_SEED_DAYS};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_slots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SlotListParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let query = SlotQuery {
        from_date: Utc::now().date_naive(),
        date: params.date,
        cricket_type: params.cricket_format,
        page,
    };

    let (slots, total) = state.slot_repo.list_open(&query).await?;
    let items: Vec<SlotResponse> = slots.into_iter().map(SlotResponse::from).collect();
    Ok(Json(Paginated::new(items, page, SLOT_PAGE_SIZE, total)))
}

pub async fn available_dates(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();
    let dates = state.slot_repo.distinct_dates(today, MAX_FILTER_DATES).await?;
    Ok(Json(dates))
}

pub async fn get_slot(
    State(state): State<Arc<AppState>>,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slot = state.slot_repo.find_by_id(&slot_id).await?
        .ok_or(AppError::NotFound("Slot not found".into()))?;

    let booked_count = state.booking_repo.occupancy(&slot.id).await?;
    Ok(Json(SlotResponse::from(SlotWithOccupancy { slot, booked_count })))
}

pub async fn seed_slots(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Option<Json<SeedSlotsRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let days = payload
        .and_then(|Json(p)| p.days)
        .unwrap_or(DEFAULT_SEED_DAYS);
    if !(1..=365).contains(&days) {
        return Err(AppError::Validation("days must be between 1 and 365".into()));
    }

    let today = Utc::now().date_naive();
    let plan = sample_slots(today, days);
    let planned = plan.len();

    let mut created = 0;
    for slot in &plan {
        if state.slot_repo.create_if_absent(slot).await? {
            created += 1;
        }
    }

    info!("Slot seeding by user {}: {} created, {} already present", user_id, created, planned - created);
    Ok(Json(SeedSlotsResponse { created, skipped: planned - created }))
}
