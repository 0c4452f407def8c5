use crate::domain::models::booking::Booking;
use crate::domain::ports::BookingRepository;
use crate::error::AppError;
use tracing::warn;

/// Commits a booking, retrying once if the store reports a transient
/// serialization conflict. Every other failure kind is final.
pub async fn place_booking(
    repo: &dyn BookingRepository,
    user_id: &str,
    slot_id: &str,
) -> Result<Booking, AppError> {
    match repo.book(user_id, slot_id).await {
        Err(AppError::Conflict(msg)) => {
            warn!("book hit a serialization conflict, retrying once: {}", msg);
            repo.book(user_id, slot_id).await
        }
        other => other,
    }
}

/// Cancels a booking with the same single-retry discipline.
pub async fn cancel_booking(
    repo: &dyn BookingRepository,
    booking_id: &str,
    user_id: &str,
) -> Result<Booking, AppError> {
    match repo.cancel(booking_id, user_id).await {
        Err(AppError::Conflict(msg)) => {
            warn!("cancel hit a serialization conflict, retrying once: {}", msg);
            repo.cancel(booking_id, user_id).await
        }
        other => other,
    }
}
