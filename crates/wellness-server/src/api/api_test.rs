use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use tower::ServiceExt;
use wellness_core::DEFAULT_REFERENCE_POINT;

use super::*;

fn test_state() -> AppState {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("facilities.yaml");
    let directory = wellness_core::load_facilities(&path).expect("load facilities.yaml");
    AppState {
        directory: Arc::new(directory),
        fallback_point: DEFAULT_REFERENCE_POINT,
        nearest_limit: 3,
    }
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = build_app(test_state());
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

fn ids(json: &serde_json::Value) -> Vec<String> {
    json["data"]["facilities"]
        .as_array()
        .expect("facilities array")
        .iter()
        .map(|f| f["id"].as_str().expect("id").to_string())
        .collect()
}

#[test]
fn normalize_limit_applies_defaults_and_bounds() {
    assert_eq!(normalize_limit(None, 3), 3);
    assert_eq!(normalize_limit(Some(0), 3), 1);
    assert_eq!(normalize_limit(Some(1_000), 3), 50);
    assert_eq!(normalize_limit(Some(7), 3), 7);
}

#[test]
fn api_error_codes_map_to_status() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let response = ApiError::new("req-1", "not_found", "missing").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = ApiError::new("req-1", "boom", "unexpected").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_dataset_size_and_echoes_request_id() {
    let app = build_app(test_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-abc")
    );
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["facilities"], 8);
    assert_eq!(json["meta"]["request_id"], "req-abc");
}

#[tokio::test]
async fn list_without_location_uses_fallback_and_sorts_by_distance() {
    let (status, json) = get_json("/api/v1/facilities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["reference"]["source"], "fallback");
    let ids = ids(&json);
    assert_eq!(ids.len(), 8);
    assert_eq!(ids[0], "8", "women's clinic is closest to the county centre");

    let distances: Vec<f64> = json["data"]["facilities"]
        .as_array()
        .expect("facilities array")
        .iter()
        .map(|f| f["distance_km"].as_f64().expect("distance"))
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]), "{distances:?}");
}

#[tokio::test]
async fn list_filters_by_category_and_emergency() {
    let (status, json) =
        get_json("/api/v1/facilities?category=hospital&emergency=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json), ["1", "2"]);
}

#[tokio::test]
async fn list_search_matches_services() {
    let (status, json) = get_json("/api/v1/facilities?search=dental").await;
    assert_eq!(status, StatusCode::OK);
    let mut found = ids(&json);
    found.sort();
    assert_eq!(found, ["2", "4"]);
}

#[tokio::test]
async fn list_rejects_unknown_category() {
    let (status, json) = get_json("/api/v1/facilities?category=Pharmacy").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn list_rejects_out_of_range_location() {
    let (status, json) = get_json("/api/v1/facilities?lat=95&lng=36.8").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn nearest_uses_live_location_and_limit() {
    let (status, json) =
        get_json("/api/v1/facilities/nearest?lat=-1.0382&lng=37.0834&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["reference"]["source"], "live");
    let ids = ids(&json);
    assert_eq!(ids.len(), 2);
    assert_eq!(ids[0], "2");
}

#[tokio::test]
async fn nearest_defaults_to_configured_limit() {
    let (status, json) = get_json("/api/v1/facilities/nearest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&json).len(), 3);
}

#[tokio::test]
async fn facility_detail_includes_status_schedule_and_links() {
    let (status, json) = get_json("/api/v1/facilities/1").await;
    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["name"], "Kiambu County Referral Hospital");
    assert_eq!(data["type"], "Hospital");
    assert_eq!(data["open_status"]["is_open"], true);
    assert_eq!(data["open_status"]["status"], "Open 24 hours");
    assert_eq!(data["distance_label"], "0.6 km away");
    assert_eq!(
        data["directions_url"],
        "https://www.google.com/maps/dir/?api=1&destination=-1.1761,36.8304"
    );
    assert_eq!(data["schedule"].as_array().map(Vec::len), Some(7));
    assert_eq!(data["schedule"][0]["day"], "Monday");
    assert!(data["map_offset"]["dx"].is_number());
}

#[tokio::test]
async fn unknown_facility_is_not_found() {
    let (status, json) = get_json("/api/v1/facilities/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn categories_count_every_type() {
    let (status, json) = get_json("/api/v1/categories").await;
    assert_eq!(status, StatusCode::OK);
    let counts: Vec<(String, u64)> = json["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|c| {
            (
                c["type"].as_str().expect("type").to_string(),
                c["count"].as_u64().expect("count"),
            )
        })
        .collect();
    assert_eq!(
        counts,
        vec![
            ("Hospital".to_string(), 3),
            ("Clinic".to_string(), 1),
            ("Maternity".to_string(), 1),
            ("Dental".to_string(), 1),
            ("Specialized".to_string(), 2),
        ]
    );
}

#[tokio::test]
async fn blank_form_fields_are_treated_as_absent() {
    let (status, json) =
        get_json("/api/v1/facilities?search=&category=&emergency=&lat=&lng=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["reference"]["source"], "fallback");
    let ids = ids(&json);
    assert_eq!(ids.len(), 8);
    assert_eq!(ids[0], "8");

    let (status, json) = get_json("/api/v1/facilities/nearest?lat=&lng=&limit=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["reference"]["source"], "fallback");
    assert_eq!(self::ids(&json).len(), 3);
}

#[tokio::test]
async fn malformed_query_values_use_error_envelope() {
    let app = build_app(test_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/facilities?lat=abc&lng=1")
                .header("x-request-id", "req-bad-lat")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
    assert_eq!(json["error"]["code"], "bad_request");
    assert_eq!(json["meta"]["request_id"], "req-bad-lat");

    let (status, json) = get_json("/api/v1/facilities/nearest?limit=many").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");

    let (status, json) = get_json("/api/v1/facilities/1?lng=east").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");

    let (status, json) = get_json("/api/v1/facilities?emergency=maybe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn list_with_only_latitude_uses_fallback() {
    let (status, json) = get_json("/api/v1/facilities?lat=-1.0382").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["reference"]["source"], "fallback");
    let (_, fallback) = get_json("/api/v1/facilities").await;
    assert_eq!(ids(&json), ids(&fallback));
}

#[tokio::test]
async fn detail_with_only_longitude_uses_fallback() {
    let (status, json) = get_json("/api/v1/facilities/1?lng=37.0834").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["reference"]["source"], "fallback");
    assert_eq!(json["data"]["distance_label"], "0.6 km away");
}
