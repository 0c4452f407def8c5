use crate::domain::models::slot::{Slot, SlotWithOccupancy};
use crate::domain::ports::{SlotQuery, SlotRepository, SLOT_PAGE_SIZE};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteSlotRepo {
    pool: SqlitePool,
}

impl SqliteSlotRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for SqliteSlotRepo {
    async fn create_if_absent(&self, slot: &Slot) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO slots (id, date, time_slot, cricket_type, price, max_players, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (date, time_slot, cricket_type) DO NOTHING"
        )
            .bind(&slot.id).bind(slot.date).bind(slot.time_slot).bind(slot.cricket_type)
            .bind(slot.price).bind(slot.max_players).bind(slot.created_at).bind(slot.updated_at)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Slot>, AppError> {
        sqlx::query_as::<_, Slot>("SELECT * FROM slots WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_open(&self, query: &SlotQuery) -> Result<(Vec<SlotWithOccupancy>, i64), AppError> {
        let offset = i64::from(query.page.saturating_sub(1)) * SLOT_PAGE_SIZE;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM slots
             WHERE date >= ? AND (? IS NULL OR date = ?) AND (? IS NULL OR cricket_type = ?)"
        )
            .bind(query.from_date)
            .bind(query.date).bind(query.date)
            .bind(query.cricket_type).bind(query.cricket_type)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;

        let slots = sqlx::query_as::<_, SlotWithOccupancy>(
            "SELECT s.*,
                    (SELECT COUNT(*) FROM bookings b WHERE b.slot_id = s.id AND b.status = 'confirmed') AS booked_count
             FROM slots s
             WHERE s.date >= ? AND (? IS NULL OR s.date = ?) AND (? IS NULL OR s.cricket_type = ?)
             ORDER BY s.date, s.time_slot
             LIMIT ? OFFSET ?"
        )
            .bind(query.from_date)
            .bind(query.date).bind(query.date)
            .bind(query.cricket_type).bind(query.cricket_type)
            .bind(SLOT_PAGE_SIZE).bind(offset)
            .fetch_all(&self.pool).await.map_err(AppError::Database)?;

        Ok((slots, total))
    }

    async fn distinct_dates(&self, from_date: NaiveDate, limit: i64) -> Result<Vec<NaiveDate>, AppError> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT DISTINCT date FROM slots WHERE date >= ? ORDER BY date LIMIT ?"
        )
            .bind(from_date).bind(limit)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
