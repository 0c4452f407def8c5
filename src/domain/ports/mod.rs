use crate::domain::models::{
    booking::{Booking, BookingWithSlot},
    slot::{CricketFormat, Slot, SlotWithOccupancy},
    venue::Venue,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Fixed page size for the public slot listing.
pub const SLOT_PAGE_SIZE: i64 = 6;

/// Maximum number of distinct dates offered to the date filter.
pub const MAX_FILTER_DATES: i64 = 30;

/// Typed filter/sort configuration for the slot listing read model.
#[derive(Debug, Clone)]
pub struct SlotQuery {
    pub from_date: NaiveDate,
    pub date: Option<NaiveDate>,
    pub cricket_type: Option<CricketFormat>,
    /// 1-based page number.
    pub page: u32,
}

#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Returns the canonical venue, lazily creating it with defaults.
    /// Idempotent and safe under concurrent first access.
    async fn get_or_create_canonical(&self) -> Result<Venue, AppError>;
    async fn update(&self, venue: &Venue) -> Result<Venue, AppError>;
}

#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Inserts the slot unless its identity triple already exists.
    /// Returns whether a row was created.
    async fn create_if_absent(&self, slot: &Slot) -> Result<bool, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Slot>, AppError>;
    /// Slots with date >= from_date, ordered by (date, time window),
    /// paginated at [`SLOT_PAGE_SIZE`]. Returns the page plus the total
    /// number of matching slots.
    async fn list_open(&self, query: &SlotQuery) -> Result<(Vec<SlotWithOccupancy>, i64), AppError>;
    async fn distinct_dates(&self, from_date: NaiveDate, limit: i64) -> Result<Vec<NaiveDate>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// The booking commit. Runs the duplicate check, the capacity check
    /// and the insert as one atomic transaction, serialized per slot, so
    /// two concurrent calls can never both take the last spot.
    async fn book(&self, user_id: &str, slot_id: &str) -> Result<Booking, AppError>;
    /// Transitions the caller's confirmed booking to cancelled, freeing
    /// one occupancy unit. Never double-frees: a lost race reports
    /// `NotCancellable`.
    async fn cancel(&self, booking_id: &str, user_id: &str) -> Result<Booking, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingWithSlot>, AppError>;
    async fn list_upcoming(&self, user_id: &str, today: NaiveDate) -> Result<Vec<BookingWithSlot>, AppError>;
    async fn list_past(&self, user_id: &str, today: NaiveDate, limit: i64) -> Result<Vec<BookingWithSlot>, AppError>;
    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError>;
    /// Count of confirmed bookings currently held against the slot.
    async fn occupancy(&self, slot_id: &str) -> Result<i64, AppError>;
}
