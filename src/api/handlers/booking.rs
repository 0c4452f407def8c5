use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::responses::{BookingHistoryResponse, MyDashboardResponse};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::booking::BookingStatus;
use crate::domain::services::ledger;
use crate::error::AppError;
use crate::state::AppState;

const PAST_BOOKINGS_LIMIT: i64 = 10;

pub async fn book_slot(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = ledger::place_booking(state.booking_repo.as_ref(), &user_id, &slot_id).await?;
    info!("Booking confirmed: {} (slot {}, user {})", booking.id, slot_id, user_id);
    Ok(Json(booking))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = ledger::cancel_booking(state.booking_repo.as_ref(), &booking_id, &user_id).await?;
    info!("Booking cancelled: {} (user {})", cancelled.id, user_id);
    Ok(Json(cancelled))
}

pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(&user_id).await?;
    Ok(Json(bookings))
}

pub async fn booking_history(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_user(&user_id).await?;
    let total_bookings = bookings.len();

    let (confirmed_bookings, rest): (Vec<_>, Vec<_>) = bookings
        .into_iter()
        .partition(|b| b.booking.status == BookingStatus::Confirmed);
    let cancelled_bookings = rest
        .into_iter()
        .filter(|b| b.booking.status == BookingStatus::Cancelled)
        .collect();

    Ok(Json(BookingHistoryResponse {
        confirmed_bookings,
        cancelled_bookings,
        total_bookings,
    }))
}

pub async fn my_dashboard(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();
    let upcoming_bookings = state.booking_repo.list_upcoming(&user_id, today).await?;
    let past_bookings = state.booking_repo.list_past(&user_id, today, PAST_BOOKINGS_LIMIT).await?;
    let total_bookings = state.booking_repo.count_by_user(&user_id).await?;

    Ok(Json(MyDashboardResponse {
        upcoming_bookings,
        past_bookings,
        total_bookings,
    }))
}
