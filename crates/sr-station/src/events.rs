//! Dock event to RMS callback translation.

use std::time::Duration;

use sr_common::{CallbackParams, DockEventKind};
use sr_config::RmsConfig;
use sr_notify::Notifier;
use tracing::info;

/// Schedule the RMS callback for a dock event.
///
/// Builds the params map for the event kind, resolves the target URL from
/// configuration and hands both to the notifier. Returns as soon as the
/// notification is scheduled; delivery happens in the background.
pub fn notify_dock_event(
    notifier: &dyn Notifier,
    rms: &RmsConfig,
    delay: Duration,
    kind: DockEventKind,
    serial: &str,
    station_id: &str,
    robot_type: Option<&str>,
) {
    let mut params = CallbackParams::new();
    params.insert("serial".to_string(), serial.to_string());
    params.insert("station_id".to_string(), station_id.to_string());
    if kind == DockEventKind::Prepare {
        if let Some(robot_type) = robot_type {
            params.insert("robot_type".to_string(), robot_type.to_string());
        }
    }

    let target_url = rms.callback_url(kind);
    info!(event = %kind, url = %target_url, serial, station_id, "Scheduling RMS callback");
    notifier.schedule(delay, target_url, params);
}
