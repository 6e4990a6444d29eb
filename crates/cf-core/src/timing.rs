//! Wall-clock timers for solver throughput reporting.
//!
//! Timers are always cheap to start. Whether a *stopped* timer hands back
//! its measurement is gated globally, programmatically or through the
//! `CF_TIMING` environment variable, so instrumented call sites cost
//! nothing in normal runs. `elapsed` bypasses the gate for the few places
//! that always log, like the time loop's closing summary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static REPORTING: AtomicBool = AtomicBool::new(false);

/// Turn measurement reporting on for the whole process.
pub fn enable_timing() {
    REPORTING.store(true, Ordering::Relaxed);
}

/// Turn measurement reporting off again.
pub fn disable_timing() {
    REPORTING.store(false, Ordering::Relaxed);
}

/// Whether stopped timers report, from the flag or `CF_TIMING`.
pub fn is_enabled() -> bool {
    REPORTING.load(Ordering::Relaxed) || std::env::var_os("CF_TIMING").is_some()
}

/// A labeled wall-clock timer. The reporting gate is sampled once at
/// start, so a timer spanning a gate flip keeps its original decision.
pub struct Timer {
    label: &'static str,
    start: Instant,
    reporting: bool,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
            reporting: is_enabled(),
        }
    }

    /// Seconds since start, regardless of the reporting gate.
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Consume the timer; `Some(seconds)` only when reporting is on.
    pub fn stop(self) -> Option<f64> {
        self.reporting.then(|| self.start.elapsed().as_secs_f64())
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}
