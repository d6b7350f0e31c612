pub use core::time::Duration;
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub use web_time::{SystemTime, UNIX_EPOCH};

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the system clock or a mocked time
/// source in tests. The unit is **milliseconds since the Unix epoch**.
///
/// # Example
///
/// ```
/// use hexid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_735_689_600_000
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1_735_689_600_000);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

/// The system wall clock.
///
/// No skew correction is applied: if the clock steps backwards, so do the
/// timestamps of newly issued IDs.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        millis_since_epoch(SystemTime::now())
    }
}

/// Converts a point in time to milliseconds since the Unix epoch.
///
/// Times before the epoch clamp to zero.
#[must_use]
pub fn millis_since_epoch(ts: SystemTime) -> u64 {
    ts.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}
