//! Station-side domain logic and the WCS-facing HTTP API.
//!
//! The outbound bay is guarded by [`OutboundGate`]: once an outbound run is
//! started the gate refuses further admissions until a cool-down window has
//! elapsed. Dock events picked up by the API handlers are forwarded to RMS
//! through an injected [`sr_notify::Notifier`].

pub mod api;
pub mod events;
pub mod gate;

pub use gate::{OutboundGate, OUTBOUND_COOLDOWN};
