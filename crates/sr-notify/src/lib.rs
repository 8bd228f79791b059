//! Delayed, retrying RMS notification delivery.
//!
//! The station controller fires events faster than RMS can always absorb
//! them, and RMS may be briefly unreachable. [`RmsNotifier`] decouples the
//! two: scheduling is synchronous and cheap, delivery runs in an independent
//! background task that retries until RMS acknowledges.

mod notifier;

pub use notifier::{Notifier, NotifierConfig, RmsNotifier};
