//! WCS-facing HTTP API
//!
//! Thin handlers over the gate and the notifier. Every endpoint replies
//! HTTP 200 with the `{code, msg}` envelope; validation failures and busy
//! refusals use `code == 1`. Endpoints that represent dock events schedule
//! the matching RMS callback before answering.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use sr_common::{ApiResponse, DockEventKind};
use sr_config::RmsConfig;
use sr_notify::Notifier;
use tracing::info;

use crate::events::notify_dock_event;
use crate::gate::{OutboundGate, OUTBOUND_COOLDOWN};

pub mod model;

use model::{
    CheckRequest, DockRequest, PutupRequest, StationFullQuery, StationFullResponse,
    StationRequest,
};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub notifier: Arc<dyn Notifier>,
    pub gate: Arc<OutboundGate>,
    pub rms: RmsConfig,
    /// Delay before the first callback attempt, reused as the retry interval.
    pub callback_delay: Duration,
}

/// Build the WCS router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/wcs/station/full", get(station_full))
        .route("/api/wcs/station/prepare", post(station_prepare))
        .route(
            "/api/wcs/inbound/order_materials/inboundstart",
            post(inbound_start),
        )
        .route(
            "/api/wcs/inbound/order_materials/checkM1100",
            post(check_m1100),
        )
        .route("/api/wcs/putup", post(putup))
        .route(
            "/api/wcs/outbound/order_materials/outboundready",
            post(outbound_ready),
        )
        .route(
            "/api/wcs/outbound/order_materials/outboundstart",
            post(outbound_start),
        )
        .route(
            "/api/wcs/outbound/order_materials/checkM1108",
            post(check_m1108),
        )
        .route("/api/wcs/mode/inbound", post(mode_inbound))
        .route("/api/wcs/mode/outbound", post(mode_outbound))
        .route("/api/wcs/inbound/stack/num", post(stack_num))
        .route("/api/rms/demo", post(rms_demo))
        .with_state(state)
}

type ApiResult = Result<Json<ApiResponse>, Json<ApiResponse>>;

/// Extract a required field, answering `code == 1` when absent or blank.
fn require<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, Json<ApiResponse>> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Json(ApiResponse::missing_field(field))),
    }
}

async fn station_full(
    Query(query): Query<StationFullQuery>,
) -> Result<Json<StationFullResponse>, Json<ApiResponse>> {
    let station_id = require(&query.station_id, "station_id")?;
    info!(station_id, "Station full probe");
    Ok(Json(StationFullResponse {
        code: 0,
        msg: "success".to_string(),
        is_full: true,
    }))
}

async fn station_prepare(
    State(state): State<AppState>,
    Json(req): Json<DockRequest>,
) -> ApiResult {
    let serial = require(&req.serial, "serial")?;
    let robot_type = require(&req.robot_type, "robot_type")?;
    let station_id = require(&req.station_id, "station_id")?;

    notify_dock_event(
        state.notifier.as_ref(),
        &state.rms,
        state.callback_delay,
        DockEventKind::Prepare,
        serial,
        station_id,
        Some(robot_type),
    );
    Ok(Json(ApiResponse::ok("success")))
}

async fn inbound_start(State(state): State<AppState>, Json(req): Json<DockRequest>) -> ApiResult {
    let serial = require(&req.serial, "serial")?;
    let _robot_type = require(&req.robot_type, "robot_type")?;
    let station_id = require(&req.station_id, "station_id")?;

    notify_dock_event(
        state.notifier.as_ref(),
        &state.rms,
        state.callback_delay,
        DockEventKind::Finish,
        serial,
        station_id,
        None,
    );
    Ok(Json(ApiResponse::ok("success")))
}

async fn check_m1100(Json(req): Json<CheckRequest>) -> ApiResult {
    let robot_type = require(&req.robot_type, "robot_type")?;
    let station_id = require(&req.station_id, "station_id")?;
    info!(robot_type, station_id, "M1100 box check");
    Ok(Json(ApiResponse::ok("success")))
}

async fn putup(Json(req): Json<PutupRequest>) -> Json<ApiResponse> {
    info!(
        order_id = req.order_id.as_deref().unwrap_or("-"),
        boxnumber = req.boxnumber.as_deref().unwrap_or("-"),
        location = req.location.as_deref().unwrap_or("-"),
        "Put-up reported"
    );
    Json(ApiResponse::ok("success"))
}

async fn outbound_ready(
    State(state): State<AppState>,
    Json(req): Json<StationRequest>,
) -> ApiResult {
    let station_id = require(&req.station_id, "station_id")?;

    if state.gate.check_and_admit(OUTBOUND_COOLDOWN) {
        info!(station_id, "Outbound admitted");
        Ok(Json(ApiResponse::ok("success")))
    } else {
        info!(station_id, "Outbound refused, bay still busy");
        Ok(Json(ApiResponse::error("station outbound is busy")))
    }
}

async fn outbound_start(State(state): State<AppState>, Json(req): Json<DockRequest>) -> ApiResult {
    let serial = require(&req.serial, "serial")?;
    let station_id = require(&req.station_id, "station_id")?;

    state.gate.mark_busy();
    notify_dock_event(
        state.notifier.as_ref(),
        &state.rms,
        state.callback_delay,
        DockEventKind::Finish,
        serial,
        station_id,
        None,
    );
    Ok(Json(ApiResponse::ok("success")))
}

async fn check_m1108(Json(req): Json<CheckRequest>) -> ApiResult {
    let robot_type = require(&req.robot_type, "robot_type")?;
    let station_id = require(&req.station_id, "station_id")?;
    info!(robot_type, station_id, "M1108 box check");
    Ok(Json(ApiResponse::ok("success")))
}

async fn mode_inbound(Json(req): Json<StationRequest>) -> ApiResult {
    let station_id = require(&req.station_id, "station_id")?;
    info!(station_id, "Station switched to inbound mode");
    Ok(Json(ApiResponse::ok("success")))
}

async fn mode_outbound(Json(req): Json<StationRequest>) -> ApiResult {
    let station_id = require(&req.station_id, "station_id")?;
    info!(station_id, "Station switched to outbound mode");
    Ok(Json(ApiResponse::ok("success")))
}

async fn stack_num(Json(req): Json<StationRequest>) -> ApiResult {
    let station_id = require(&req.station_id, "station_id")?;
    info!(station_id, "Inbound stack count requested");
    Ok(Json(ApiResponse::ok("success")))
}

/// Mock RMS callback sink, handy when pointing `rms.host` at this process
/// during local testing.
async fn rms_demo(Json(body): Json<serde_json::Value>) -> Json<ApiResponse> {
    info!(body = %body, "Demo RMS endpoint hit");
    Json(ApiResponse::ok("success"))
}
