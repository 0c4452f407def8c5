use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The six bookable windows of a day. Stored codes are zero-padded 24h
/// ranges so a plain `ORDER BY time_slot` is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum TimeWindow {
    #[serde(rename = "06-07")]
    #[sqlx(rename = "06-07")]
    SixToSevenAm,
    #[serde(rename = "07-08")]
    #[sqlx(rename = "07-08")]
    SevenToEightAm,
    #[serde(rename = "08-09")]
    #[sqlx(rename = "08-09")]
    EightToNineAm,
    #[serde(rename = "17-18")]
    #[sqlx(rename = "17-18")]
    FiveToSixPm,
    #[serde(rename = "18-19")]
    #[sqlx(rename = "18-19")]
    SixToSevenPm,
    #[serde(rename = "19-20")]
    #[sqlx(rename = "19-20")]
    SevenToEightPm,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::SixToSevenAm,
        TimeWindow::SevenToEightAm,
        TimeWindow::EightToNineAm,
        TimeWindow::FiveToSixPm,
        TimeWindow::SixToSevenPm,
        TimeWindow::SevenToEightPm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::SixToSevenAm => "6:00 AM - 7:00 AM",
            TimeWindow::SevenToEightAm => "7:00 AM - 8:00 AM",
            TimeWindow::EightToNineAm => "8:00 AM - 9:00 AM",
            TimeWindow::FiveToSixPm => "5:00 PM - 6:00 PM",
            TimeWindow::SixToSevenPm => "6:00 PM - 7:00 PM",
            TimeWindow::SevenToEightPm => "7:00 PM - 8:00 PM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum CricketFormat {
    #[serde(rename = "box")]
    #[sqlx(rename = "box")]
    Box,
    #[serde(rename = "normal")]
    #[sqlx(rename = "normal")]
    Normal,
}

impl CricketFormat {
    pub const ALL: [CricketFormat; 2] = [CricketFormat::Box, CricketFormat::Normal];

    pub fn label(&self) -> &'static str {
        match self {
            CricketFormat::Box => "Box Cricket",
            CricketFormat::Normal => "Normal Cricket",
        }
    }
}

/// A bookable unit. The (date, time_slot, cricket_type) triple is the
/// slot's identity and carries a UNIQUE constraint in the schema.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Slot {
    pub id: String,
    pub date: NaiveDate,
    pub time_slot: TimeWindow,
    pub cricket_type: CricketFormat,
    pub price: f64,
    pub max_players: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Slot {
    pub fn new(
        date: NaiveDate,
        time_slot: TimeWindow,
        cricket_type: CricketFormat,
        price: f64,
        max_players: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            time_slot,
            cricket_type,
            price,
            max_players,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A slot together with its current occupancy, as computed by the store
/// in the same query that fetched the slot.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct SlotWithOccupancy {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub slot: Slot,
    pub booked_count: i64,
}

impl SlotWithOccupancy {
    pub fn spots_left(&self) -> i64 {
        (i64::from(self.slot.max_players) - self.booked_count).max(0)
    }

    pub fn is_available(&self) -> bool {
        self.booked_count < i64::from(self.slot.max_players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_codes_sort_chronologically() {
        let mut codes: Vec<String> = TimeWindow::ALL
            .iter()
            .map(|w| serde_json::to_string(w).unwrap())
            .collect();
        let original = codes.clone();
        codes.sort();
        assert_eq!(codes, original);
    }

    #[test]
    fn test_availability_from_occupancy() {
        let slot = Slot::new(
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            TimeWindow::SixToSevenAm,
            CricketFormat::Normal,
            400.0,
            11,
        );
        let open = SlotWithOccupancy { slot: slot.clone(), booked_count: 10 };
        assert!(open.is_available());
        assert_eq!(open.spots_left(), 1);

        let full = SlotWithOccupancy { slot, booked_count: 11 };
        assert!(!full.is_available());
        assert_eq!(full.spots_left(), 0);
    }
}
