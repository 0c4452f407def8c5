use cricket_booking_backend::{
    api::router::create_router,
    config::Config,
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_slot_repo::SqliteSlotRepo,
        sqlite_venue_repo::SqliteVenueRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
        };

        let state = Arc::new(AppState {
            config,
            venue_repo: Arc::new(SqliteVenueRepo::new(pool.clone())),
            slot_repo: Arc::new(SqliteSlotRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Inserts a slot row directly, bypassing the seeding path, so tests
    /// can control date/capacity precisely.
    pub async fn seed_slot(
        &self,
        date: NaiveDate,
        time_slot: &str,
        cricket_type: &str,
        price: f64,
        max_players: i32,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO slots (id, date, time_slot, cricket_type, price, max_players, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
            .bind(&id).bind(date).bind(time_slot).bind(cricket_type)
            .bind(price).bind(max_players).bind(now).bind(now)
            .execute(&self.pool).await
            .expect("Failed to seed slot");
        id
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri)
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn authed_get(&self, user: &str, uri: &str) -> Response<Body> {
        self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri)
                .header("X-User-Id", user)
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn authed_post(&self, user: &str, uri: &str, body: Value) -> Response<Body> {
        self.router.clone().oneshot(
            Request::builder().method("POST").uri(uri)
                .header("X-User-Id", user)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())).unwrap()
        ).await.unwrap()
    }

    pub async fn authed_put(&self, user: &str, uri: &str, body: Value) -> Response<Body> {
        self.router.clone().oneshot(
            Request::builder().method("PUT").uri(uri)
                .header("X-User-Id", user)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())).unwrap()
        ).await.unwrap()
    }

    pub async fn book(&self, user: &str, slot_id: &str) -> Response<Body> {
        self.router.clone().oneshot(
            Request::builder().method("POST")
                .uri(format!("/api/v1/slots/{}/book", slot_id))
                .header("X-User-Id", user)
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn cancel(&self, user: &str, booking_id: &str) -> Response<Body> {
        self.router.clone().oneshot(
            Request::builder().method("POST")
                .uri(format!("/api/v1/bookings/{}/cancel", booking_id))
                .header("X-User-Id", user)
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
