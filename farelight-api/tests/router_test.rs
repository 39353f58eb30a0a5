use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use farelight_api::{app, AppState};
use farelight_chat::{ChatOrchestrator, FlightSearchTool, LlmClient, LlmClientConfig};
use farelight_core::FlightRecord;
use farelight_engine::{EngineConfig, FlightQueryEngine, NO_RESULTS_MESSAGE};
use serde_json::{json, Value};
use tower::ServiceExt;

fn record(id: &str, airline: &str, total: f64, stops: u32) -> Value {
    json!({
        "id": id,
        "airline": airline,
        "airlineCode": "XX",
        "flightNumber": format!("XX{}", id),
        "departure": {
            "airport": "San Francisco International",
            "airportCode": "SFO",
            "city": "San Francisco",
            "country": "United States"
        },
        "arrival": {
            "airport": "John F. Kennedy International",
            "airportCode": "JFK",
            "city": "New York",
            "country": "United States"
        },
        "departureTime": "2024-03-15T08:00:00-07:00",
        "arrivalTime": "2024-03-15T16:30:00-04:00",
        "duration": 330,
        "price": { "base": total, "currency": "USD", "total": total },
        "stops": stops,
        "aircraft": { "type": "Boeing 737-800", "manufacturer": "Boeing", "model": "737-800" },
        "class": "economy",
        "baggage": { "carryOn": true, "checked": 1 },
        "amenities": ["WiFi"],
        "bookingClass": "Y",
        "availableSeats": 20,
        "refundable": false,
        "changeable": true,
        "lastUpdated": "2024-03-01T00:00:00Z"
    })
}

/// State over a two-record synthetic dataset. The LLM endpoint points at a
/// closed local port so the chat route fails fast and deterministically.
fn test_state() -> AppState {
    let records: Vec<FlightRecord> = serde_json::from_value(json!([
        record("united", "United Airlines", 300.0, 1),
        record("delta", "Delta Air Lines", 250.0, 0),
    ]))
    .expect("Failed to build fixture records");
    let records = Arc::new(records);

    let engine = FlightQueryEngine::new(EngineConfig::default());
    let llm = LlmClient::new(LlmClientConfig {
        base_url: "http://127.0.0.1:9/v1".to_string(),
        request_timeout_ms: 2_000,
        ..LlmClientConfig::default()
    })
    .expect("Failed to build LLM client");
    let tool = FlightSearchTool::new(engine.clone(), Arc::clone(&records));
    let chat = ChatOrchestrator::new(llm, tool, 4);

    AppState {
        records,
        engine: Arc::new(engine),
        chat: Arc::new(chat),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body was not JSON")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_healthz_reports_record_count() {
    let response = app(test_state())
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["flights"], 2);
}

#[tokio::test]
async fn test_search_route_filters_and_renders() {
    let response = app(test_state())
        .oneshot(post_json("/v1/flights/search", json!({ "maxStops": 0 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    let summary = body["summary"].as_str().unwrap();
    assert!(summary.contains("Delta Air Lines"));
    assert!(!summary.contains("United Airlines"));
}

#[tokio::test]
async fn test_search_route_empty_result_is_the_fixed_message() {
    let response = app(test_state())
        .oneshot(post_json("/v1/flights/search", json!({ "maxPrice": 100 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["summary"], NO_RESULTS_MESSAGE);
}

#[tokio::test]
async fn test_search_route_default_sort_is_price_ascending() {
    let response = app(test_state())
        .oneshot(post_json("/v1/flights/search", json!({})))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["count"], 2);
    let summary = body["summary"].as_str().unwrap();
    let delta = summary.find("Delta Air Lines").unwrap();
    let united = summary.find("United Airlines").unwrap();
    assert!(delta < united);
}

#[tokio::test]
async fn test_chat_route_maps_llm_failure_to_bad_gateway() {
    let response = app(test_state())
        .oneshot(post_json(
            "/v1/chat",
            json!({ "messages": [{ "role": "user", "content": "flights from SFO?" }] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("unavailable"));
}

#[tokio::test]
async fn test_chat_route_rejects_empty_conversation() {
    let response = app(test_state())
        .oneshot(post_json("/v1/chat", json!({ "messages": [] })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
