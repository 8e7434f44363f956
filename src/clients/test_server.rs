//! Local fixture server standing in for the public APIs in tests.

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::net::TcpListener;

/// Starts the fixture server on an ephemeral port and returns its base URL.
pub(crate) async fn spawn_fixture_server() -> String {
    let app = Router::new()
        .route("/locationforecast/compact", get(compact))
        .route("/locationforecast/complete", get(unavailable))
        .route("/broken/compact", get(broken_forecast))
        .route("/missing/compact", get(unavailable))
        .route("/slow/complete", get(slow_ok))
        .route("/archive", get(archive))
        .route("/archive-ragged", get(archive_ragged))
        .route("/search", get(search));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fixture server");
    let addr = listener.local_addr().expect("Fixture server has no address");
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Fixture server stopped");
    });
    format!("http://{}", addr)
}

fn has_user_agent(headers: &HeaderMap) -> bool {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.starts_with("WeatherApp/"))
}

async fn compact(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    // MET Norway answers 403 to requests without an identifying user agent
    if !has_user_agent(&headers) {
        return StatusCode::FORBIDDEN.into_response();
    }
    let (Some(lat), Some(lon)) = (params.get("lat"), params.get("lon")) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    Json(json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [lon.parse::<f64>().unwrap_or(0.0), lat.parse::<f64>().unwrap_or(0.0), 10] },
        "properties": {
            "meta": { "updated_at": "2024-03-21T12:00:00Z" },
            "timeseries": [
                {
                    "time": "2024-03-21T12:00:00Z",
                    "data": {
                        "instant": { "details": { "air_temperature": -2.0, "wind_speed": 4.1 } },
                        "next_1_hours": { "details": { "precipitation_amount": 0.2 } }
                    }
                },
                {
                    "time": "2024-03-21T13:00:00Z",
                    "data": {
                        "instant": { "details": { "air_temperature": -1.5 } },
                        "next_3_hours": { "details": { "precipitation_amount": 1.1 } }
                    }
                }
            ]
        }
    }))
    .into_response()
}

async fn broken_forecast() -> Json<Value> {
    Json(json!({ "properties": { "meta": { "updated_at": "2024-03-21T12:00:00Z" } } }))
}

async fn unavailable() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn slow_ok() -> StatusCode {
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    StatusCode::OK
}

async fn archive(Query(params): Query<HashMap<String, String>>) -> Response {
    let required = ["latitude", "longitude", "start_date", "end_date", "hourly", "timezone"];
    if required.iter().any(|k| !params.contains_key(*k)) {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(json!({
        "latitude": 66.2,
        "longitude": 13.6,
        "utc_offset_seconds": 3600,
        "timezone": "Europe/Oslo",
        "hourly": {
            "time": ["2024-03-21T00:00", "2024-03-21T01:00", "2024-03-21T02:00"],
            "temperature_2m": [-3.1, -3.4, null],
            "relative_humidity_2m": [80, 82, 85],
            "pressure_msl": [1010.2, 1010.0, 1009.7],
            "wind_speed_10m": [2.5, 3.0, 3.1],
            "wind_direction_10m": [180, 190, 200],
            "cloud_cover": [100, 90, 75],
            "precipitation": [0.0, 0.4, 0.1]
        }
    }))
    .into_response()
}

async fn archive_ragged() -> Json<Value> {
    Json(json!({
        "utc_offset_seconds": 0,
        "hourly": {
            "time": ["2024-03-21T00:00", "2024-03-21T01:00"],
            "temperature_2m": [-3.1]
        }
    }))
}

async fn search(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    let language_ok = headers
        .get("accept-language")
        .and_then(|v| v.to_str().ok())
        == Some("en");
    let params_ok = params.get("format").map(String::as_str) == Some("json")
        && params.get("limit").map(String::as_str) == Some("5")
        && params.get("addressdetails").map(String::as_str) == Some("1");
    if !language_ok || !params_ok || !has_user_agent(&headers) {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(json!([
        {
            "place_id": 123456,
            "display_name": "Hemnes, Nordland, Norway",
            "address": { "municipality": "Hemnes", "country": "Norway" },
            "lat": "66.2167",
            "lon": "13.6167"
        },
        {
            "place_id": "987",
            "display_name": "Somewhere at sea",
            "address": {},
            "lat": "10.5",
            "lon": "-20.25"
        },
        {
            "place_id": 42,
            "display_name": "Broken, Nowhere",
            "address": { "country": "Nowhere" },
            "lat": "north",
            "lon": "13.6"
        }
    ]))
    .into_response()
}
