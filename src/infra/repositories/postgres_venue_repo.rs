use crate::domain::models::venue::{Venue, CANONICAL_VENUE_ID};
use crate::domain::ports::VenueRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresVenueRepo {
    pool: PgPool,
}

impl PostgresVenueRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueRepository for PostgresVenueRepo {
    async fn get_or_create_canonical(&self) -> Result<Venue, AppError> {
        // ON CONFLICT DO NOTHING on the constant primary key makes
        // concurrent first access create exactly one row.
        let defaults = Venue::canonical_defaults();
        sqlx::query(
            "INSERT INTO venues (id, name, has_seating, has_lighting, has_restrooms, has_equipments, has_parking,
                                 total_boxes, weekday_price, weekend_price, advance_percentage, email, phone,
                                 opening_time, closing_time, no_cancellation, no_reschedule, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
             ON CONFLICT (id) DO NOTHING"
        )
            .bind(defaults.id).bind(&defaults.name)
            .bind(defaults.has_seating).bind(defaults.has_lighting).bind(defaults.has_restrooms)
            .bind(defaults.has_equipments).bind(defaults.has_parking)
            .bind(defaults.total_boxes).bind(defaults.weekday_price).bind(defaults.weekend_price)
            .bind(defaults.advance_percentage).bind(&defaults.email).bind(&defaults.phone)
            .bind(defaults.opening_time).bind(defaults.closing_time)
            .bind(defaults.no_cancellation).bind(defaults.no_reschedule)
            .bind(defaults.created_at).bind(defaults.updated_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;

        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(CANONICAL_VENUE_ID)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, venue: &Venue) -> Result<Venue, AppError> {
        sqlx::query_as::<_, Venue>(
            "UPDATE venues SET name=$1, has_seating=$2, has_lighting=$3, has_restrooms=$4, has_equipments=$5,
                               has_parking=$6, total_boxes=$7, weekday_price=$8, weekend_price=$9,
                               advance_percentage=$10, email=$11, phone=$12, opening_time=$13, closing_time=$14,
                               no_cancellation=$15, no_reschedule=$16, updated_at=$17
             WHERE id=$18
             RETURNING *"
        )
            .bind(&venue.name)
            .bind(venue.has_seating).bind(venue.has_lighting).bind(venue.has_restrooms)
            .bind(venue.has_equipments).bind(venue.has_parking)
            .bind(venue.total_boxes).bind(venue.weekday_price).bind(venue.weekend_price)
            .bind(venue.advance_percentage).bind(&venue.email).bind(&venue.phone)
            .bind(venue.opening_time).bind(venue.closing_time)
            .bind(venue.no_cancellation).bind(venue.no_reschedule)
            .bind(Utc::now())
            .bind(CANONICAL_VENUE_ID)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
