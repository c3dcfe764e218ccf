// XDR Protocol Constants
//
// Encoded sentinels and timer granularity used by the marshalling layer.
// Computed once by `NfsClient::init` and handed to the transport.

/// Default system clock resolution, in ticks per second
pub const DEFAULT_CLOCK_HZ: u32 = 100;

/// Default protocol timer interval, in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 5;

/// Immutable protocol constants shared with the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolConstants {
    /// XDR encoding of TRUE
    pub xdr_true: [u8; 4],
    /// XDR encoding of FALSE
    pub xdr_false: [u8; 4],
    /// XDR encoding of -1 as an unsigned word
    pub xdr_neg1: [u8; 4],
    /// Protocol timer interval expressed in clock ticks (never zero)
    pub ticks: u32,
}

impl ProtocolConstants {
    /// Compute the constants for a clock running at `clock_hz` ticks per
    /// second and a protocol interval of `tick_interval_ms` milliseconds.
    pub fn new(clock_hz: u32, tick_interval_ms: u32) -> Self {
        Self {
            xdr_true: 1u32.to_be_bytes(),
            xdr_false: 0u32.to_be_bytes(),
            xdr_neg1: (-1i32 as u32).to_be_bytes(),
            ticks: tick_count(clock_hz, tick_interval_ms),
        }
    }
}

impl Default for ProtocolConstants {
    fn default() -> Self {
        Self::new(DEFAULT_CLOCK_HZ, DEFAULT_TICK_INTERVAL_MS)
    }
}

/// Round `clock_hz * interval_ms / 1000` to nearest, minimum one tick
pub fn tick_count(clock_hz: u32, interval_ms: u32) -> u32 {
    let ticks = (u64::from(clock_hz) * u64::from(interval_ms) + 500) / 1000;
    ticks.clamp(1, u64::from(u32::MAX)) as u32
}
