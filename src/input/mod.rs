mod keyboard;
#[cfg(feature = "midi")]
mod midi;

use std::time::Instant;

pub use keyboard::{parse_line, spawn_keyboard};
#[cfg(feature = "midi")]
pub use midi::MidiTapInput;

/// Timestamp used for input events.
pub type Timestamp = Instant;

/// One discrete input event, processed in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    Tap { timestamp: Timestamp },
    Reset,
    Quit,
}

/// Milliseconds between `start` and `timestamp`, clamped to zero.
pub fn millis_since(start: Instant, timestamp: Timestamp) -> f64 {
    timestamp
        .checked_duration_since(start)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::millis_since;

    #[test]
    fn converts_to_milliseconds() {
        let start = Instant::now();
        let later = start + Duration::from_micros(1_500_250);
        assert!((millis_since(start, later) - 1500.25).abs() < 1e-6);
    }

    #[test]
    fn earlier_timestamps_clamp_to_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        assert_eq!(millis_since(start, Instant::now()), 0.0);
    }
}
