//! Request/response bodies for the WCS-facing endpoints.
//!
//! Every field is optional at the wire level; handlers validate the fields
//! they need and answer `code == 1` when one is missing, so the station
//! controller always gets the `{code, msg}` envelope rather than a 4xx.

use serde::{Deserialize, Serialize};

/// Body of the dock lifecycle endpoints (prepare, inbound start, outbound
/// start).
#[derive(Debug, Clone, Deserialize)]
pub struct DockRequest {
    pub serial: Option<String>,
    pub station_id: Option<String>,
    pub robot_type: Option<String>,
}

/// Body of the M1100/M1108 box check endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    pub robot_type: Option<String>,
    pub station_id: Option<String>,
}

/// Body of endpoints that only identify the station (mode switches, stack
/// count, outbound readiness).
#[derive(Debug, Clone, Deserialize)]
pub struct StationRequest {
    pub station_id: Option<String>,
}

/// Query string of the station-full probe.
#[derive(Debug, Clone, Deserialize)]
pub struct StationFullQuery {
    pub station_id: Option<String>,
}

/// Body of the put-up report. All fields informational.
#[derive(Debug, Clone, Deserialize)]
pub struct PutupRequest {
    pub order_id: Option<String>,
    pub boxnumber: Option<String>,
    pub location: Option<String>,
}

/// Reply of the station-full probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationFullResponse {
    pub code: i32,
    pub msg: String,
    pub is_full: bool,
}
