mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{parse_body, TestApp};

#[tokio::test]
async fn test_booking_a_slot_confirms_immediately() {
    let app = TestApp::new().await;
    let date = Utc::now().date_naive() + Duration::days(1);
    let slot_id = app.seed_slot(date, "06-07", "normal", 400.0, 11).await;

    let res = app.book("user-a", &slot_id).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["user_id"], "user-a");
    assert_eq!(body["slot_id"], slot_id);
}

#[tokio::test]
async fn test_booking_requires_identity() {
    let app = TestApp::new().await;
    let date = Utc::now().date_naive() + Duration::days(1);
    let slot_id = app.seed_slot(date, "06-07", "normal", 400.0, 11).await;

    let unauthed = axum::http::Request::builder()
        .method("POST")
        .uri(format!("/api/v1/slots/{}/book", slot_id))
        .body(axum::body::Body::empty())
        .unwrap();
    let res = tower::ServiceExt::oneshot(app.router.clone(), unauthed).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_unknown_slot_is_not_found() {
    let app = TestApp::new().await;
    let res = app.book("user-a", "no-such-slot").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_double_booking_same_slot_is_rejected() {
    let app = TestApp::new().await;
    let date = Utc::now().date_naive() + Duration::days(1);
    let slot_id = app.seed_slot(date, "06-07", "normal", 400.0, 11).await;

    let res = app.book("user-a", &slot_id).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.book("user-a", &slot_id).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "You have already booked this slot");

    // another user on the same slot is fine
    let res = app.book("user-b", &slot_id).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_full_slot_rejects_further_bookings() {
    let app = TestApp::new().await;
    let date = Utc::now().date_naive() + Duration::days(1);
    let slot_id = app.seed_slot(date, "06-07", "box", 500.0, 1).await;

    let res = app.book("user-a", &slot_id).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.book("user-b", &slot_id).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "This slot is no longer available. All spots are booked");
}

#[tokio::test]
async fn test_cancel_frees_capacity_for_another_user() {
    let app = TestApp::new().await;
    let date = Utc::now().date_naive() + Duration::days(1);
    let slot_id = app.seed_slot(date, "06-07", "box", 500.0, 1).await;

    let booking = parse_body(app.book("user-a", &slot_id).await).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let res = app.book("user-b", &slot_id).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app.cancel("user-a", &booking_id).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["status"], "cancelled");

    let occupancy = app.state.booking_repo.occupancy(&slot_id).await.unwrap();
    assert_eq!(occupancy, 0);

    let res = app.book("user-b", &slot_id).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_user_can_rebook_a_slot_they_cancelled() {
    let app = TestApp::new().await;
    let date = Utc::now().date_naive() + Duration::days(1);
    let slot_id = app.seed_slot(date, "06-07", "normal", 400.0, 11).await;

    let booking = parse_body(app.book("user-a", &slot_id).await).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();

    app.cancel("user-a", &booking_id).await;

    let res = app.book("user-a", &slot_id).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cancel_is_owner_only() {
    let app = TestApp::new().await;
    let date = Utc::now().date_naive() + Duration::days(1);
    let slot_id = app.seed_slot(date, "06-07", "normal", 400.0, 11).await;

    let booking = parse_body(app.book("user-a", &slot_id).await).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let res = app.cancel("user-b", &booking_id).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // booking untouched
    let occupancy = app.state.booking_repo.occupancy(&slot_id).await.unwrap();
    assert_eq!(occupancy, 1);
}

#[tokio::test]
async fn test_cancelling_twice_never_double_frees() {
    let app = TestApp::new().await;
    let date = Utc::now().date_naive() + Duration::days(1);
    let slot_id = app.seed_slot(date, "06-07", "box", 500.0, 2).await;

    let booking = parse_body(app.book("user-a", &slot_id).await).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();
    app.book("user-b", &slot_id).await;

    let res = app.cancel("user-a", &booking_id).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.cancel("user-a", &booking_id).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "This booking cannot be cancelled");

    let occupancy = app.state.booking_repo.occupancy(&slot_id).await.unwrap();
    assert_eq!(occupancy, 1);
}

#[tokio::test]
async fn test_cancel_unknown_booking_is_not_found() {
    let app = TestApp::new().await;
    let res = app.cancel("user-a", "no-such-booking").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_my_bookings_are_newest_first_with_slot_details() {
    let app = TestApp::new().await;
    let date = Utc::now().date_naive() + Duration::days(1);
    let first = app.seed_slot(date, "06-07", "box", 500.0, 6).await;
    let second = app.seed_slot(date, "07-08", "normal", 400.0, 11).await;

    app.book("user-a", &first).await;
    app.book("user-a", &second).await;
    app.book("user-b", &first).await;

    let res = app.authed_get("user-a", "/api/v1/bookings").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let items = body.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["slot_id"], second);
    assert_eq!(items[1]["slot_id"], first);
    assert_eq!(items[0]["slot_time"], "07-08");
    assert_eq!(items[0]["slot_format"], "normal");
    assert_eq!(items[0]["slot_price"], 400.0);
}

#[tokio::test]
async fn test_history_partitions_by_status() {
    let app = TestApp::new().await;
    let date = Utc::now().date_naive() + Duration::days(1);
    let kept = app.seed_slot(date, "06-07", "box", 500.0, 6).await;
    let dropped = app.seed_slot(date, "07-08", "box", 500.0, 6).await;

    app.book("user-a", &kept).await;
    let booking = parse_body(app.book("user-a", &dropped).await).await;
    app.cancel("user-a", booking["id"].as_str().unwrap()).await;

    let res = app.authed_get("user-a", "/api/v1/bookings/history").await;
    let body = parse_body(res).await;

    assert_eq!(body["total_bookings"], 2);
    assert_eq!(body["confirmed_bookings"].as_array().unwrap().len(), 1);
    assert_eq!(body["cancelled_bookings"].as_array().unwrap().len(), 1);
    assert_eq!(body["confirmed_bookings"][0]["slot_id"], kept);
    assert_eq!(body["cancelled_bookings"][0]["slot_id"], dropped);
}

#[tokio::test]
async fn test_dashboard_splits_upcoming_and_past() {
    let app = TestApp::new().await;
    let today = Utc::now().date_naive();
    let past_slot = app.seed_slot(today - Duration::days(3), "06-07", "box", 500.0, 6).await;
    let soon_slot = app.seed_slot(today + Duration::days(1), "06-07", "box", 500.0, 6).await;
    let later_slot = app.seed_slot(today + Duration::days(2), "06-07", "box", 500.0, 6).await;

    app.book("user-a", &past_slot).await;
    app.book("user-a", &later_slot).await;
    app.book("user-a", &soon_slot).await;

    let res = app.authed_get("user-a", "/api/v1/bookings/dashboard").await;
    let body = parse_body(res).await;

    assert_eq!(body["total_bookings"], 3);

    let upcoming = body["upcoming_bookings"].as_array().unwrap();
    assert_eq!(upcoming.len(), 2);
    // ordered by slot date, soonest first
    assert_eq!(upcoming[0]["slot_id"], soon_slot);
    assert_eq!(upcoming[1]["slot_id"], later_slot);

    let past = body["past_bookings"].as_array().unwrap();
    assert_eq!(past.len(), 1);
    assert_eq!(past[0]["slot_id"], past_slot);
}
