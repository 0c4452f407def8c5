use crate::domain::models::booking::{Booking, BookingStatus, BookingWithSlot};
use crate::domain::ports::BookingRepository;
use crate::error::{is_retryable_conflict, is_unique_violation, AppError};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_book_err(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        return AppError::AlreadyBooked;
    }
    if is_retryable_conflict(&e) {
        return AppError::Conflict("booking transaction failed to serialize".to_string());
    }
    AppError::Database(e)
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn book(&self, user_id: &str, slot_id: &str) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Row lock on the slot serializes concurrent bookers of this
        // slot while leaving other slots unblocked.
        let max_players = sqlx::query_scalar::<_, i32>(
            "SELECT max_players FROM slots WHERE id = $1 FOR UPDATE"
        )
            .bind(slot_id)
            .fetch_optional(&mut *tx).await.map_err(map_book_err)?
            .ok_or_else(|| AppError::NotFound("Slot not found".into()))?;

        let active = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings
             WHERE user_id = $1 AND slot_id = $2 AND status IN ('pending', 'confirmed')"
        )
            .bind(user_id).bind(slot_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        if active > 0 {
            return Err(AppError::AlreadyBooked);
        }

        let confirmed = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE slot_id = $1 AND status = 'confirmed'"
        )
            .bind(slot_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        if confirmed >= i64::from(max_players) {
            return Err(AppError::SlotFull);
        }

        let booking = Booking::confirmed(user_id, slot_id);
        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, slot_id, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.user_id).bind(&booking.slot_id).bind(booking.status)
            .bind(booking.created_at).bind(booking.updated_at)
            .fetch_one(&mut *tx).await.map_err(map_book_err)?;

        tx.commit().await.map_err(map_book_err)?;
        Ok(created)
    }

    async fn cancel(&self, booking_id: &str, user_id: &str) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
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
            "UPDATE bookings SET status = 'cancelled', updated_at = $1
             WHERE id = $2 AND status = 'confirmed'
             RETURNING *"
        )
            .bind(Utc::now()).bind(booking_id)
            .fetch_optional(&self.pool).await
            .map_err(|e| if is_retryable_conflict(&e) {
                AppError::Conflict("cancel failed to serialize".to_string())
            } else {
                AppError::Database(e)
            })?
            .ok_or(AppError::NotCancellable)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingWithSlot>, AppError> {
        sqlx::query_as::<_, BookingWithSlot>(
            "SELECT b.*, s.date AS slot_date, s.time_slot AS slot_time, s.cricket_type AS slot_format, s.price AS slot_price
             FROM bookings b JOIN slots s ON s.id = b.slot_id
             WHERE b.user_id = $1
             ORDER BY b.created_at DESC"
        )
            .bind(user_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_upcoming(&self, user_id: &str, today: NaiveDate) -> Result<Vec<BookingWithSlot>, AppError> {
        sqlx::query_as::<_, BookingWithSlot>(
            "SELECT b.*, s.date AS slot_date, s.time_slot AS slot_time, s.cricket_type AS slot_format, s.price AS slot_price
             FROM bookings b JOIN slots s ON s.id = b.slot_id
             WHERE b.user_id = $1 AND b.status = 'confirmed' AND s.date >= $2
             ORDER BY s.date, s.time_slot"
        )
            .bind(user_id).bind(today)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_past(&self, user_id: &str, today: NaiveDate, limit: i64) -> Result<Vec<BookingWithSlot>, AppError> {
        sqlx::query_as::<_, BookingWithSlot>(
            "SELECT b.*, s.date AS slot_date, s.time_slot AS slot_time, s.cricket_type AS slot_format, s.price AS slot_price
             FROM bookings b JOIN slots s ON s.id = b.slot_id
             WHERE b.user_id = $1 AND b.status = 'confirmed' AND s.date < $2
             ORDER BY s.date DESC
             LIMIT $3"
        )
            .bind(user_id).bind(today).bind(limit)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_user(&self, user_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn occupancy(&self, slot_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bookings WHERE slot_id = $1 AND status = 'confirmed'"
        )
            .bind(slot_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
