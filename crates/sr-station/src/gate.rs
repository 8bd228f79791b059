//! Outbound readiness gate
//!
//! The outbound bay can physically hold one run at a time. After an outbound
//! start the gate is busy for a fixed cool-down window; recovery is lazy and
//! happens inside `check_and_admit` the first time it is polled after the
//! window has elapsed. There is no background timer.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

/// How long the outbound bay stays busy after an outbound start.
pub const OUTBOUND_COOLDOWN: Duration = Duration::from_secs(20);

struct GateState {
    ready: bool,
    last_busy_at: Instant,
}

/// Ready/busy tracker for the outbound bay.
///
/// All state lives behind one mutex, so the read-check-write in
/// `check_and_admit` is atomic with respect to concurrent `mark_busy` calls.
pub struct OutboundGate {
    state: Mutex<GateState>,
}

impl OutboundGate {
    /// A fresh gate is ready.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                ready: true,
                last_busy_at: Instant::now(),
            }),
        }
    }

    /// Check whether the outbound bay can accept a new run.
    ///
    /// Returns `true` when the gate is ready, or when the cool-down since the
    /// last busy transition has elapsed (in which case the gate flips back to
    /// ready before returning). Returns `false` while still inside the
    /// window; a refusal never changes state.
    pub fn check_and_admit(&self, cooldown: Duration) -> bool {
        let mut state = self.state.lock();

        if state.ready {
            return true;
        }

        let elapsed = state.last_busy_at.elapsed();
        if elapsed >= cooldown {
            debug!(?elapsed, "Outbound gate recovered after cool-down");
            state.ready = true;
            return true;
        }

        debug!(?elapsed, ?cooldown, "Outbound gate busy");
        false
    }

    /// Mark the bay busy and restart the cool-down window. Always succeeds,
    /// including while already busy.
    pub fn mark_busy(&self) {
        let mut state = self.state.lock();
        state.ready = false;
        state.last_busy_at = Instant::now();
    }

    /// Current readiness without the recovery side effect.
    pub fn is_ready(&self) -> bool {
        self.state.lock().ready
    }
}

impl Default for OutboundGate {
    fn default() -> Self {
        Self::new()
    }
}
