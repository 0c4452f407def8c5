use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::domain::models::slot::CricketFormat;

#[derive(Deserialize)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub has_seating: Option<bool>,
    pub has_lighting: Option<bool>,
    pub has_restrooms: Option<bool>,
    pub has_equipments: Option<bool>,
    pub has_parking: Option<bool>,
    pub total_boxes: Option<i32>,
    pub weekday_price: Option<f64>,
    pub weekend_price: Option<f64>,
    pub advance_percentage: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
    pub no_cancellation: Option<bool>,
    pub no_reschedule: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct SeedSlotsRequest {
    pub days: Option<u32>,
}

#[derive(Deserialize)]
pub struct SlotListParams {
    pub date: Option<NaiveDate>,
    pub cricket_format: Option<CricketFormat>,
    pub page: Option<u32>,
}
