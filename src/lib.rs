pub mod config;
pub mod display;
pub mod error;
pub mod histogram;
pub mod input;
pub mod intervals;
pub mod tap_tempo;
pub mod tempo;
pub mod timestamp_log;
pub mod trim;

pub use config::Config;
pub use histogram::{Histogram, Markers, DEFAULT_BINS};
pub use tap_tempo::{Analysis, TapTempo};
pub use tempo::{BpmEstimate, TempoReading};
pub use timestamp_log::TimestampLog;
