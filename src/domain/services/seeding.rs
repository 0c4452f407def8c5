use chrono::{Duration, NaiveDate};

use crate::domain::models::slot::{CricketFormat, Slot, TimeWindow};

pub const DEFAULT_SEED_DAYS: u32 = 30;

/// Price and capacity a seeded slot gets for each format.
pub fn format_defaults(format: CricketFormat) -> (f64, i32) {
    match format {
        CricketFormat::Box => (500.0, 6),
        CricketFormat::Normal => (400.0, 11),
    }
}

/// Builds the seeding plan: one slot per (format, window) pair for each
/// of the next `days` days, starting tomorrow. The caller inserts them
/// with create-if-absent semantics, so re-running is harmless.
pub fn sample_slots(today: NaiveDate, days: u32) -> Vec<Slot> {
    let mut slots = Vec::new();
    for day in 1..=i64::from(days) {
        let date = today + Duration::days(day);
        for format in CricketFormat::ALL {
            let (price, max_players) = format_defaults(format);
            for window in TimeWindow::ALL {
                slots.push(Slot::new(date, window, format, price, max_players));
            }
        }
    }
    slots
}
