use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use car_rental_service::{
    build_router,
    models::{Booking, Car},
    store::JsonFileStore,
    AppState,
};

fn app(dir: &Path) -> Router {
    let cars = Arc::new(JsonFileStore::<Car>::new(dir.join("cars.json")));
    let bookings = Arc::new(JsonFileStore::<Booking>::new(dir.join("bookings.json")));
    build_router(AppState::new(cars, bookings))
}

fn write_json(path: &Path, value: Value) {
    std::fs::write(path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();
}

fn seeded(cars: Value) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_json(&dir.path().join("cars.json"), cars);
    write_json(&dir.path().join("bookings.json"), json!([]));
    dir
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn booking_body(car_id: Value) -> Value {
    json!({
        "carId": car_id,
        "customerName": "A",
        "customerEmail": "a@x.com",
        "startDate": "2024-01-01",
        "endDate": "2024-01-02",
    })
}

#[tokio::test]
async fn test_status_routes() {
    let dir = seeded(json!([]));

    let (status, body) = get(app(dir.path()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, body) = get(app(dir.path()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_booking_flow() {
    let dir = seeded(json!([
        { "id": 1, "make": "Toyota", "booked": false },
        { "id": 2, "make": "Honda", "booked": false },
        { "id": 3, "make": "Ford", "booked": true },
    ]));

    let (status, cars) = get(app(dir.path()), "/cars").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cars.as_array().unwrap().len(), 2);

    let (status, body) = post_json(app(dir.path()), "/book", booking_body(json!(1))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking successful");
    assert_eq!(body["booking"]["carId"], 1);
    assert!(body["booking"].get("customerPhone").is_none());

    let (_, cars) = get(app(dir.path()), "/cars").await;
    let ids: Vec<&Value> = cars.as_array().unwrap().iter().map(|c| &c["id"]).collect();
    assert_eq!(ids, vec![&json!(2)]);
    assert_eq!(cars[0]["make"], "Honda");

    let (status, bookings) = get(app(dir.path()), "/bookings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bookings, json!([body["booking"].clone()]));

    // Same request again: the car is taken now.
    let (status, body) = post_json(app(dir.path()), "/book", booking_body(json!(1))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Car is already booked");
}

#[tokio::test]
async fn test_unknown_car_is_404_and_changes_nothing() {
    let dir = seeded(json!([{ "id": 1, "booked": false }]));
    let before = std::fs::read(dir.path().join("cars.json")).unwrap();

    let (status, body) = post_json(app(dir.path()), "/book", booking_body(json!(42))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Car not found");

    assert_eq!(std::fs::read(dir.path().join("cars.json")).unwrap(), before);
    let (_, bookings) = get(app(dir.path()), "/bookings").await;
    assert_eq!(bookings, json!([]));
}

#[tokio::test]
async fn test_string_id_does_not_match_numeric_car() {
    let dir = seeded(json!([{ "id": 1, "booked": false }]));

    let (status, _) = post_json(app(dir.path()), "/book", booking_body(json!("1"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_fields_are_400() {
    let dir = seeded(json!([{ "id": 1, "booked": false }]));

    let mut body = booking_body(json!(1));
    body.as_object_mut().unwrap().remove("endDate");

    let (status, response) = post_json(app(dir.path()), "/book", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Missing required booking fields");

    let (_, cars) = get(app(dir.path()), "/cars").await;
    assert_eq!(cars.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_json_400() {
    let dir = seeded(json!([]));

    let request = Request::post("/book")
        .header("content-type", "application/json")
        .body(Body::from("{ nope"))
        .unwrap();
    let (status, body) = send(app(dir.path()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_unreadable_collections_are_500() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cars.json"), "not json").unwrap();

    let (status, body) = get(app(dir.path()), "/cars").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to load cars");
    assert!(body["error"].is_string());

    let (status, body) = get(app(dir.path()), "/bookings").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to load bookings");
}

#[tokio::test]
async fn test_collections_with_timestamp_ids_still_work() {
    let dir = seeded(json!([
        { "id": 1, "booked": true },
        { "id": 2, "booked": false },
    ]));
    write_json(
        &dir.path().join("bookings.json"),
        json!([{
            "id": 1700000000000i64,
            "carId": 1,
            "customerName": "A",
            "customerEmail": "a@x.com",
            "startDate": "2024-01-01",
            "endDate": "2024-01-02",
            "timestamp": "2024-01-01T00:00:00.000Z",
        }]),
    );

    let (status, bookings) = get(app(dir.path()), "/bookings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bookings[0]["id"], 1_700_000_000_000i64);

    let (status, body) = post_json(app(dir.path()), "/book", booking_body(json!(2))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["booking"]["id"].is_string());

    let (_, bookings) = get(app(dir.path()), "/bookings").await;
    assert_eq!(bookings.as_array().unwrap().len(), 2);
    assert_eq!(bookings[0]["id"], 1_700_000_000_000i64);
}

#[tokio::test]
async fn test_optional_fields_of_any_type_are_accepted() {
    let dir = seeded(json!([{ "id": 1, "booked": false }]));

    let mut body = booking_body(json!(1));
    body["customerPhone"] = json!(5550100);

    let (status, response) = post_json(app(dir.path()), "/book", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["booking"]["customerPhone"], "5550100");
}

#[tokio::test]
async fn test_failed_fleet_write_is_500_and_books_nothing() {
    let dir = seeded(json!([{ "id": 1, "booked": false }]));
    // A directory where the temp file must go makes the fleet write fail.
    std::fs::create_dir(dir.path().join("cars.json.tmp")).unwrap();

    let (status, body) = post_json(app(dir.path()), "/book", booking_body(json!(1))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to save cars");
    assert!(body["error"].is_string());

    let (_, bookings) = get(app(dir.path()), "/bookings").await;
    assert_eq!(bookings, json!([]));
    let (_, cars) = get(app(dir.path()), "/cars").await;
    assert_eq!(cars.as_array().unwrap().len(), 1);
}
