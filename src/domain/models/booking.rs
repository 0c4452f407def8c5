use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::models::slot::{CricketFormat, TimeWindow};

/// Booking lifecycle: `pending -> confirmed -> cancelled`, with direct
/// creation at `confirmed`. `Pending` is reserved for a future
/// hold-and-confirm flow; no transition currently produces it.
/// `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub slot_id: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn confirmed(user_id: &str, slot_id: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            slot_id: slot_id.to_string(),
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A booking joined with the slot it references, for user-facing lists.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct BookingWithSlot {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub slot_date: NaiveDate,
    pub slot_time: TimeWindow,
    pub slot_format: CricketFormat,
    pub slot_price: f64,
}
