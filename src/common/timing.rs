// src/common/timing.rs

use core::time::Duration;
use embedded_hal::delay::DelayNs;

// === Sensor protocol timing ===

/// Settle time after the wake-up transaction before the sensor accepts
/// register reads.
pub const WAKE_SETTLE_DELAY: Duration = Duration::from_millis(20);

/// Fixed delay between consecutive busy-flag polls.
pub const BUSY_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Maximum number of busy-flag polls before the sensor is declared
/// unresponsive and skipped. Combined with [`BUSY_POLL_INTERVAL`] this bounds
/// the per-sensor wait to one second.
pub const BUSY_POLL_MAX_ATTEMPTS: u32 = 20;

// === Connection polling ===

/// Delay between polls of a connection that returned `WouldBlock`.
pub const READ_POLL_INTERVAL: Duration = Duration::from_micros(100);

/// Maximum number of connection polls per byte before giving up on the
/// request. Combined with [`READ_POLL_INTERVAL`] this bounds the wait for a
/// stalled peer to two seconds.
pub const READ_POLL_MAX_ATTEMPTS: u32 = 20_000;

/// Blocks on the delay provider for the given duration.
///
/// All durations in this module fit comfortably in the `u32` nanosecond
/// argument of `DelayNs`.
pub(crate) fn pause<D: DelayNs>(delay: &mut D, duration: Duration) {
    delay.delay_ns(duration.as_nanos() as u32);
}
