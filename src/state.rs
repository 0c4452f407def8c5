use crate::config::Config;
use crate::domain::ports::{BookingRepository, SlotRepository, VenueRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub venue_repo: Arc<dyn VenueRepository>,
    pub slot_repo: Arc<dyn SlotRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
}
