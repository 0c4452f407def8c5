use serde::Serialize;

use crate::domain::models::booking::BookingWithSlot;
use crate::domain::models::slot::{Slot, SlotWithOccupancy};
use crate::domain::models::venue::Venue;

#[derive(Serialize)]
pub struct VenueResponse {
    #[serde(flatten)]
    pub venue: Venue,
    pub weekday_advance_amount: f64,
    pub weekend_advance_amount: f64,
}

impl From<Venue> for VenueResponse {
    fn from(venue: Venue) -> Self {
        let weekday_advance_amount = venue.weekday_advance_amount();
        let weekend_advance_amount = venue.weekend_advance_amount();
        Self { venue, weekday_advance_amount, weekend_advance_amount }
    }
}

#[derive(Serialize)]
pub struct SlotResponse {
    #[serde(flatten)]
    pub slot: Slot,
    pub time_label: &'static str,
    pub format_label: &'static str,
    pub booked_count: i64,
    pub spots_left: i64,
    pub is_available: bool,
}

impl From<SlotWithOccupancy> for SlotResponse {
    fn from(occupied: SlotWithOccupancy) -> Self {
        let spots_left = occupied.spots_left();
        let is_available = occupied.is_available();
        Self {
            time_label: occupied.slot.time_slot.label(),
            format_label: occupied.slot.cricket_type.label(),
            booked_count: occupied.booked_count,
            spots_left,
            is_available,
            slot: occupied.slot,
        }
    }
}

#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: u32, page_size: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 { 0 } else { (total_items + page_size - 1) / page_size };
        Self { items, page, page_size, total_items, total_pages }
    }
}

#[derive(Serialize)]
pub struct SeedSlotsResponse {
    pub created: usize,
    pub skipped: usize,
}

#[derive(Serialize)]
pub struct BookingHistoryResponse {
    pub confirmed_bookings: Vec<BookingWithSlot>,
    pub cancelled_bookings: Vec<BookingWithSlot>,
    pub total_bookings: usize,
}

#[derive(Serialize)]
pub struct MyDashboardResponse {
    pub upcoming_bookings: Vec<BookingWithSlot>,
    pub past_bookings: Vec<BookingWithSlot>,
    pub total_bookings: i64,
}
