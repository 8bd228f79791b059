//! WCS endpoint tests
//!
//! Drives the router directly with `tower::ServiceExt::oneshot` and records
//! scheduled callbacks through a fake notifier, so no HTTP client or RMS
//! endpoint is involved.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use parking_lot::Mutex;
use sr_common::CallbackParams;
use sr_config::RmsConfig;
use sr_notify::Notifier;
use sr_station::api::{create_router, AppState};
use sr_station::OutboundGate;
use tower::ServiceExt;

#[derive(Default)]
struct RecordingNotifier {
    scheduled: Mutex<Vec<(Duration, String, CallbackParams)>>,
}

impl RecordingNotifier {
    fn scheduled(&self) -> Vec<(Duration, String, CallbackParams)> {
        self.scheduled.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn schedule(&self, delay: Duration, target_url: String, params: CallbackParams) {
        self.scheduled.lock().push((delay, target_url, params));
    }
}

fn test_state() -> (Router, Arc<RecordingNotifier>, Arc<OutboundGate>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let gate = Arc::new(OutboundGate::new());

    let mut rms = RmsConfig::default();
    rms.host = "10.0.0.5".to_string();
    rms.port = 9000;

    let state = AppState {
        notifier: notifier.clone(),
        gate: gate.clone(),
        rms,
        callback_delay: Duration::from_secs(3),
    };
    (create_router(state), notifier, gate)
}

async fn post_json(router: &Router, path: &str, body: serde_json::Value) -> serde_json::Value {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_prepare_schedules_dock_ready_callback() {
    let (router, notifier, _) = test_state();

    let body = post_json(
        &router,
        "/api/wcs/station/prepare",
        serde_json::json!({"serial": "S1", "robot_type": "R1", "station_id": "ST1"}),
    )
    .await;
    assert_eq!(body["code"], 0);

    let scheduled = notifier.scheduled();
    assert_eq!(scheduled.len(), 1);
    let (delay, url, params) = &scheduled[0];
    assert_eq!(*delay, Duration::from_secs(3));
    assert_eq!(url, "http://10.0.0.5:9000/api/rms/dock_ready");
    assert_eq!(params.get("serial").unwrap(), "S1");
    assert_eq!(params.get("station_id").unwrap(), "ST1");
    assert_eq!(params.get("robot_type").unwrap(), "R1");
}

#[tokio::test]
async fn test_prepare_rejects_missing_serial() {
    let (router, notifier, _) = test_state();

    let body = post_json(
        &router,
        "/api/wcs/station/prepare",
        serde_json::json!({"robot_type": "R1", "station_id": "ST1"}),
    )
    .await;
    assert_eq!(body["code"], 1);
    assert!(body["msg"].as_str().unwrap().contains("serial"));

    // A rejected request must not reach the notifier
    assert!(notifier.scheduled().is_empty());
}

#[tokio::test]
async fn test_prepare_rejects_blank_station_id() {
    let (router, notifier, _) = test_state();

    let body = post_json(
        &router,
        "/api/wcs/station/prepare",
        serde_json::json!({"serial": "S1", "robot_type": "R1", "station_id": "  "}),
    )
    .await;
    assert_eq!(body["code"], 1);
    assert!(notifier.scheduled().is_empty());
}

#[tokio::test]
async fn test_inbound_start_schedules_dock_finish_callback() {
    let (router, notifier, _) = test_state();

    let body = post_json(
        &router,
        "/api/wcs/inbound/order_materials/inboundstart",
        serde_json::json!({"serial": "S1", "robot_type": "R1", "station_id": "ST1"}),
    )
    .await;
    assert_eq!(body["code"], 0);

    let scheduled = notifier.scheduled();
    assert_eq!(scheduled.len(), 1);
    let (_, url, params) = &scheduled[0];
    assert_eq!(url, "http://10.0.0.5:9000/api/rms/dock_finish");
    assert_eq!(params.len(), 2);
    assert!(!params.contains_key("robot_type"));
}

#[tokio::test]
async fn test_station_full_probe() {
    let (router, _, _) = test_state();

    let request = Request::builder()
        .method("GET")
        .uri("/api/wcs/station/full?station_id=ST1")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 0);
    assert_eq!(body["is_full"], true);

    // Missing station_id is a validation error
    let request = Request::builder()
        .method("GET")
        .uri("/api/wcs/station/full")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 1);
}

#[tokio::test]
async fn test_outbound_flow_busy_then_refused() {
    let (router, notifier, gate) = test_state();

    // Fresh gate admits
    let body = post_json(
        &router,
        "/api/wcs/outbound/order_materials/outboundready",
        serde_json::json!({"station_id": "ST1"}),
    )
    .await;
    assert_eq!(body["code"], 0);

    // Starting an outbound run marks the bay busy and notifies RMS
    let body = post_json(
        &router,
        "/api/wcs/outbound/order_materials/outboundstart",
        serde_json::json!({"serial": "S1", "station_id": "ST1"}),
    )
    .await;
    assert_eq!(body["code"], 0);
    assert!(!gate.is_ready());

    let scheduled = notifier.scheduled();
    assert_eq!(scheduled.len(), 1);
    assert_eq!(scheduled[0].1, "http://10.0.0.5:9000/api/rms/dock_finish");

    // Inside the 20s window the next readiness check is refused
    let body = post_json(
        &router,
        "/api/wcs/outbound/order_materials/outboundready",
        serde_json::json!({"station_id": "ST1"}),
    )
    .await;
    assert_eq!(body["code"], 1);
    assert!(body["msg"].as_str().unwrap().contains("busy"));
}

#[tokio::test]
async fn test_box_checks_validate_fields() {
    let (router, _, _) = test_state();

    let body = post_json(
        &router,
        "/api/wcs/inbound/order_materials/checkM1100",
        serde_json::json!({"robot_type": "R1", "station_id": "ST1"}),
    )
    .await;
    assert_eq!(body["code"], 0);

    let body = post_json(
        &router,
        "/api/wcs/outbound/order_materials/checkM1108",
        serde_json::json!({"station_id": "ST1"}),
    )
    .await;
    assert_eq!(body["code"], 1);
    assert!(body["msg"].as_str().unwrap().contains("robot_type"));
}

#[tokio::test]
async fn test_mode_switches_and_stack_num() {
    let (router, notifier, _) = test_state();

    for path in [
        "/api/wcs/mode/inbound",
        "/api/wcs/mode/outbound",
        "/api/wcs/inbound/stack/num",
    ] {
        let body = post_json(&router, path, serde_json::json!({"station_id": "ST1"})).await;
        assert_eq!(body["code"], 0, "path {path}");

        let body = post_json(&router, path, serde_json::json!({})).await;
        assert_eq!(body["code"], 1, "path {path}");
    }

    // None of these endpoints talk to RMS
    assert!(notifier.scheduled().is_empty());
}

#[tokio::test]
async fn test_putup_accepts_partial_report() {
    let (router, _, _) = test_state();

    let body = post_json(
        &router,
        "/api/wcs/putup",
        serde_json::json!({"order_id": "O1", "boxnumber": "B1"}),
    )
    .await;
    assert_eq!(body["code"], 0);
}

#[tokio::test]
async fn test_rms_demo_acknowledges() {
    let (router, _, _) = test_state();

    let body = post_json(
        &router,
        "/api/rms/demo",
        serde_json::json!({"serial": "S1", "station_id": "ST1"}),
    )
    .await;
    assert_eq!(body["code"], 0);
}
