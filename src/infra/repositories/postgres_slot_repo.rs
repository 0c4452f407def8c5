use crate::domain::models::slot::{Slot, SlotWithOccupancy};
use crate::domain::ports::{SlotQuery, SlotRepository, SLOT_PAGE_SIZE};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresSlotRepo {
    pool: PgPool,
}

impl PostgresSlotRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for PostgresSlotRepo {
    async fn create_if_absent(&self, slot: &Slot) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO slots (id, date, time_slot, cricket_type, price, max_players, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (date, time_slot, cricket_type) DO NOTHING"
        )
            .bind(&slot.id).bind(slot.date).bind(slot.time_slot).bind(slot.cricket_type)
            .bind(slot.price).bind(slot.max_players).bind(slot.created_at).bind(slot.updated_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Slot>, AppError> {
        sqlx::query_as::<_, Slot>("SELECT * FROM slots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_open(&self, query: &SlotQuery) -> Result<(Vec<SlotWithOccupancy>, i64), AppError> {
        let offset = i64::from(query.page.saturating_sub(1)) * SLOT_PAGE_SIZE;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM slots
             WHERE date >= $1 AND ($2::DATE IS NULL OR date = $2) AND ($3::TEXT IS NULL OR cricket_type = $3)"
        )
            .bind(query.from_date)
            .bind(query.date)
            .bind(query.cricket_type)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;

        let slots = sqlx::query_as::<_, SlotWithOccupancy>(
            "SELECT s.*,
                    (SELECT COUNT(*) FROM bookings b WHERE b.slot_id = s.id AND b.status = 'confirmed') AS booked_count
             FROM slots s
             WHERE s.date >= $1 AND ($2::DATE IS NULL OR s.date = $2) AND ($3::TEXT IS NULL OR s.cricket_type = $3)
             ORDER BY s.date, s.time_slot
             LIMIT $4 OFFSET $5"
        )
            .bind(query.from_date)
            .bind(query.date)
            .bind(query.cricket_type)
            .bind(SLOT_PAGE_SIZE).bind(offset)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;

        Ok((slots, total))
    }

    async fn distinct_dates(&self, from_date: NaiveDate, limit: i64) -> Result<Vec<NaiveDate>, AppError> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT DISTINCT date FROM slots WHERE date >= $1 ORDER BY date LIMIT $2"
        )
            .bind(from_date).bind(limit)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
