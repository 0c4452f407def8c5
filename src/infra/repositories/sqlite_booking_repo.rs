use crate::domain::models::booking::{Booking, BookingStatus, BookingWithSlot};
use crate::domain::ports::BookingRepository;
use crate::error::{is_retryable_conflict, is_unique_violation, AppError};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_book_err(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        return AppError::AlreadyBooked;
    }
    if is_retryable_conflict(&e) {
        return AppError::Conflict("booking transaction lost the write lock".to_string());
    }
    AppError::Database(e)
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn book(&self, user_id: &str, slot_id: &str) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // No-op touch of the slot row. This escalates the transaction to
        // the writer lock before any check reads, so concurrent bookers
        // serialize here, and it doubles as the slot existence check.
        let touched = sqlx::query("UPDATE slots SET updated_at = updated_at WHERE id = ?")
            .bind(slot_id)
            .execute(&mut *tx).await.map_err(map_book_err)?;
        if touched.rows_affected() == 0 {
            return Err(AppError::NotFound("Slot not found".into()));
        }

        let active = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings
             WHERE user_id = ? AND slot_id = ? AND status IN ('pending', 'confirmed')"
        )
            .bind(user_id).bind(slot_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        if active > 0 {
            return Err(AppError::AlreadyBooked);
        }

        let max_players = sqlx::query_scalar::<_, i32>("SELECT max_players FROM slots WHERE id = ?")
            .bind(slot_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        let confirmed = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE slot_id = ? AND status = 'confirmed'"
        )
            .bind(slot_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        if confirmed >= i64::from(max_players) {
            return Err(AppError::SlotFull);
        }

        let booking = Booking::confirmed(user_id, slot_id);
        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, slot_id, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.user_id).bind(&booking.slot_id).bind(booking.status)
            .bind(booking.created_at).bind(booking.updated_at)
            .fetch_one(&mut *tx).await.map_err(map_book_err)?;

        tx.commit().await.map_err(map_book_err)?;
        Ok(created)
    }

    async fn cancel(&self, booking_id: &str, user_id: &str) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(booking_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

        if booking.user_id != user_id {
            return Err(AppError::NotOwner);
        }
        if booking.status != BookingStatus::Confirmed {
            return Err(AppError::NotCancellable);
        }

        // Conditional on status so a concurrent cancel can win at most
        // once; zero rows affected means the other call already freed
        // the capacity unit.
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'cancelled', updated_at = ?
             WHERE id = ? AND status = 'confirmed'
             RETURNING *"
        )
            .bind(Utc::now()).bind(booking_id)
            .fetch_optional(&self.pool).await
            .map_err(|e| if is_retryable_conflict(&e) {
                AppError::Conflict("cancel lost the write lock".to_string())
            } else {
                AppError::Database(e)
            })?
            .ok_or(AppError::NotCancellable)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingWithSlot>, AppError> {
        sqlx::query_as::<_, BookingWithSlot>(
            "SELECT b.*, s.date AS slot_date, s.time_slot AS slot_time, s.cricket_type AS slot_format, s.price AS slot_price
             FROM bookings b JOIN slots s ON s.id = b.slot_id
             WHERE b.user_id = ?
             ORDER BY b.created_at DESC"
        )
            .bind(user_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_upcoming(&self, user_id: &str, today: NaiveDate) -> Result<Vec<BookingWithSlot>, AppError> {
        sqlx::query_as::<_, BookingWithSlot>(
            "SELECT b.*, s.date AS slot_date, s.time_slot AS slot_time, s.cricket_type AS slot_format, s.price AS slot_price
             FROM bookings b JOIN slots s ON s.id = b.slot_id
             WHERE b.user_id = ? AND b.status = 'confirmed' AND s.date >= ?
             ORDER BY s.date, s.time_slot"
        )
            .bind(user_id).bind(today)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_past(&self, user_id: &str, today: NaiveDate, limit: i64) -> Result<Vec<BookingWithSlot>, AppError> {
        sqlx::query_as::<_, BookingWithSlot>(
            "SELECT b.*, s.date AS slot_date, s.time_slot AS slot_time, s.cricket_type AS slot_format, s.price AS slot_price
             FROM bookings b JOIN slots s ON s.id = b.slot_id
             WHERE b.user_id = ? AND b.status = 'confirmed' AND s.date < ?
             ORDER BY s.date DESC
             LIMIT ?"
        )
            .bind(user_id).bind(today).bind(limit)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn occupancy(&self, slot_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE slot_id = ? AND status = 'confirmed'"
        )
            .bind(slot_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
