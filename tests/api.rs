//! HTTP contract tests.
//!
//! Drives the full router (layers included) over an in-memory store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use ticketing_server::config::Config;
use ticketing_server::routes::create_routes;
use ticketing_server::state::AppState;
use ticketing_server::store::MemoryStore;

fn app() -> Router {
    create_routes(
        AppState::new(Arc::new(MemoryStore::new())),
        &Config::default(),
    )
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

struct Seed {
    user_id: String,
    event_id: String,
    ticket_id: String,
}

async fn seed(app: &Router, quantity: i32) -> Seed {
    let (status, user) = send(
        app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Carla", "email": "carla@example.com", "role": "organizer" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = user["data"]["id"].as_str().unwrap().to_string();

    let (status, location) = send(
        app,
        Method::POST,
        "/locations",
        Some(json!({ "name": "Estádio", "address": "Av. Central 100", "capacity": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let location_id = location["data"]["id"].as_str().unwrap().to_string();

    let (status, event) = send(
        app,
        Method::POST,
        "/events",
        Some(json!({
            "organizerId": user_id,
            "locationId": location_id,
            "title": "Festival de Verão",
            "description": "Open air",
            "date": "2026-12-20",
            "time": "18:00:00",
            "category": "Music Festival"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let event_id = event["data"]["id"].as_str().unwrap().to_string();

    let (status, ticket) = send(
        app,
        Method::POST,
        "/tickets",
        Some(json!({
            "eventId": event_id,
            "type": "Pista",
            "price": "120.00",
            "quantity": quantity
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ticket["data"]["quantityTotal"], quantity);
    let ticket_id = ticket["data"]["id"].as_str().unwrap().to_string();

    Seed {
        user_id,
        event_id,
        ticket_id,
    }
}

async fn available(app: &Router, ticket_id: &str) -> i64 {
    let (status, body) = send(app, Method::GET, &format!("/tickets/{}", ticket_id), None).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["quantityAvailable"].as_i64().unwrap()
}

fn reservation_body(seed: &Seed, quantity: i32) -> Value {
    json!({
        "userId": seed.user_id,
        "eventId": seed.event_id,
        "ticketId": seed.ticket_id,
        "quantity": quantity
    })
}

#[tokio::test]
async fn test_health_check_sets_security_headers() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn test_reserve_reject_cancel_example() {
    let app = app();
    let seed = seed(&app, 5).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/reservations",
        Some(reservation_body(&seed, 3)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["quantity"], 3);
    assert_eq!(created["data"]["ticketId"], seed.ticket_id.as_str());
    assert_eq!(available(&app, &seed.ticket_id).await, 2);

    let (status, rejected) = send(
        &app,
        Method::POST,
        "/reservations",
        Some(reservation_body(&seed, 3)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(rejected["success"], false);
    assert_eq!(rejected["error"]["code"], "INSUFFICIENT_INVENTORY");
    assert_eq!(available(&app, &seed.ticket_id).await, 2);

    let id = created["data"]["id"].as_str().unwrap();
    let (status, cancelled) =
        send(&app, Method::DELETE, &format!("/reservations/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["data"], Value::Null);
    assert_eq!(cancelled["message"], "Reservation cancelled");
    assert_eq!(available(&app, &seed.ticket_id).await, 5);

    let (status, again) = send(&app, Method::DELETE, &format!("/reservations/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(again["error"]["code"], "NOT_FOUND");
    assert_eq!(available(&app, &seed.ticket_id).await, 5);
}

#[tokio::test]
async fn test_unknown_ticket_is_not_found() {
    let app = app();
    let seed = seed(&app, 5).await;
    let mut body = reservation_body(&seed, 1);
    body["ticketId"] = json!(uuid::Uuid::new_v4());

    let (status, response) = send(&app, Method::POST, "/reservations", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_zero_quantity_is_a_validation_error() {
    let app = app();
    let seed = seed(&app, 5).await;

    let (status, response) = send(
        &app,
        Method::POST,
        "/reservations",
        Some(reservation_body(&seed, 0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(available(&app, &seed.ticket_id).await, 5);
}

#[tokio::test]
async fn test_malformed_input_uses_error_envelope() {
    let app = app();

    let request = Request::post("/reservations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::GET, "/reservations/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, Method::GET, "/events?limit=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_reservations_nests_related_records() {
    let app = app();
    let seed = seed(&app, 10).await;
    send(
        &app,
        Method::POST,
        "/reservations",
        Some(reservation_body(&seed, 2)),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/reservations?userId={}", seed.user_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let list = body["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["user"]["email"], "carla@example.com");
    assert_eq!(list[0]["event"]["title"], "Festival de Verão");
    assert_eq!(list[0]["ticket"]["quantityAvailable"], 8);

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/reservations?userId={}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = app();
    let user = json!({ "name": "Rui", "email": "rui@example.com" });

    let (status, body) = send(&app, Method::POST, "/users", Some(user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "client");

    let (status, body) = send(&app, Method::POST, "/users", Some(user)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_event_listing_and_details() {
    let app = app();
    let seed = seed(&app, 4).await;

    let (_, body) = send(&app, Method::GET, "/events?category=festival", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::GET, "/events?date=2027-01-01", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, Method::GET, &format!("/events/{}", seed.event_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Festival de Verão");
    assert_eq!(body["data"]["organizer"]["id"], seed.user_id.as_str());
    assert_eq!(body["data"]["tickets"][0]["id"], seed.ticket_id.as_str());
}

#[tokio::test]
async fn test_event_with_reservations_cannot_be_deleted() {
    let app = app();
    let seed = seed(&app, 4).await;
    let (_, created) = send(
        &app,
        Method::POST,
        "/reservations",
        Some(reservation_body(&seed, 1)),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, &format!("/events/{}", seed.event_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let id = created["data"]["id"].as_str().unwrap();
    send(&app, Method::DELETE, &format!("/reservations/{}", id), None).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/events/{}", seed.event_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/tickets/{}", seed.ticket_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ticket_total_cannot_drop_below_reserved() {
    let app = app();
    let seed = seed(&app, 6).await;
    send(
        &app,
        Method::POST,
        "/reservations",
        Some(reservation_body(&seed, 4)),
    )
    .await;

    let uri = format!("/tickets/{}", seed.ticket_id);
    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "quantityTotal": 3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "quantityTotal": 10 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantityAvailable"], 6);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_do_not_oversell() {
    let app = app();
    let seed = seed(&app, 5).await;
    let body = reservation_body(&seed, 1);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let app = app.clone();
            let body = body.clone();
            tokio::spawn(async move {
                send(&app, Method::POST, "/reservations", Some(body)).await.0
            })
        })
        .collect();

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => rejected += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 5);
    assert_eq!(rejected, 15);
    assert_eq!(available(&app, &seed.ticket_id).await, 0);
}
