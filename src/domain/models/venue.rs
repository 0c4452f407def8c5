use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single trusted venue record. Persisted with `id` pinned to
/// [`CANONICAL_VENUE_ID`] by a CHECK constraint, so callers never have to
/// reason about "which row" - there is exactly one.
pub const CANONICAL_VENUE_ID: i64 = 1;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub has_seating: bool,
    pub has_lighting: bool,
    pub has_restrooms: bool,
    pub has_equipments: bool,
    pub has_parking: bool,
    pub total_boxes: i32,
    pub weekday_price: f64,
    pub weekend_price: f64,
    pub advance_percentage: i32,
    pub email: String,
    pub phone: String,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub no_cancellation: bool,
    pub no_reschedule: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Venue {
    /// Default attributes used when the canonical record is lazily created
    /// on first access.
    pub fn canonical_defaults() -> Self {
        let now = Utc::now();
        Self {
            id: CANONICAL_VENUE_ID,
            name: "Box Cricket Turf".to_string(),
            has_seating: true,
            has_lighting: true,
            has_restrooms: true,
            has_equipments: true,
            has_parking: true,
            total_boxes: 1,
            weekday_price: 600.0,
            weekend_price: 700.0,
            advance_percentage: 20,
            email: "contact@boxcricketturf.example".to_string(),
            phone: "+91 9000000000".to_string(),
            opening_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            closing_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            no_cancellation: true,
            no_reschedule: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance amount due when booking on a weekday.
    pub fn weekday_advance_amount(&self) -> f64 {
        self.weekday_price * f64::from(self.advance_percentage) / 100.0
    }

    /// Advance amount due when booking on a weekend.
    pub fn weekend_advance_amount(&self) -> f64 {
        self.weekend_price * f64::from(self.advance_percentage) / 100.0
    }
}
