//! Default values for configuration types.

/// Default interval between automatic refresh cycles, in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Default minimum visible duration of a refresh cycle, in milliseconds.
///
/// Below roughly 400 ms a spinner appears and disappears as a flicker
/// rather than as feedback, so fast cycles are padded up to this floor.
pub const DEFAULT_MINIMUM_DELAY_MS: u64 = 400;

/// Whether auto-refresh runs unless configured otherwise.
pub const DEFAULT_AUTO_ENABLED: bool = true;
