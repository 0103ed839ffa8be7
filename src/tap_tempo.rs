use log::{debug, info};
use serde::Serialize;

use crate::histogram::{Histogram, Markers};
use crate::intervals::differences;
use crate::tempo::{estimate, ms_to_bpm, TempoReading};
use crate::timestamp_log::TimestampLog;

/// Tap-based tempo estimator.
///
/// Owns the tap log and recomputes every derived value from scratch after each
/// change. Typical usage:
///
/// ```
/// use tap_histogram::TapTempo;
///
/// let mut tapper = TapTempo::new(80);
/// for t in [0.0, 500.0, 1000.0, 1500.0] {
///     let analysis = tapper.add_tap(t);
///     if let Some(bpm) = analysis.reading.estimated {
///         println!("Detected tempo: {bpm:.3}");
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TapTempo {
    bin_count: usize,
    log: TimestampLog,
}

/// Everything a presenter needs after one tap or reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub reading: TempoReading,
    pub histogram: Histogram,
    pub markers: Markers,
    pub samples: usize,
}

impl TapTempo {
    /// Create an empty session whose histogram uses `bin_count` bins.
    pub fn new(bin_count: usize) -> Self {
        Self {
            bin_count,
            log: TimestampLog::new(),
        }
    }

    /// Register a tap at the supplied time (milliseconds) and recompute.
    pub fn add_tap(&mut self, now_ms: f64) -> Analysis {
        self.log.record(now_ms);
        info!("tap at {:.3}ms (total: {})", now_ms, self.log.size());

        let analysis = self.analysis();
        if let Some(bpm) = analysis.reading.estimated {
            info!(
                "tempo updated: {:.3} BPM ({} intervals)",
                bpm, analysis.samples
            );
        }
        analysis
    }

    /// Clear the tap history; the returned analysis carries no estimate.
    pub fn reset(&mut self) -> Analysis {
        self.log.reset();
        info!("tap history cleared");
        self.analysis()
    }

    pub fn len(&self) -> usize {
        self.log.size()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn timestamps(&self) -> &[f64] {
        self.log.as_slice()
    }

    /// Recompute the estimate, histogram and markers from the current log.
    pub fn analysis(&self) -> Analysis {
        let intervals = differences(self.log.as_slice());
        let estimated = estimate(&intervals);

        // the histogram shows every interval, outliers included
        let bpms: Vec<f64> = intervals.iter().copied().map(ms_to_bpm).collect();
        let histogram = Histogram::build(&bpms, self.bin_count);
        let markers = histogram.markers(&bpms, estimated.map(|e| e.bpm));

        debug!(
            "histogram start {:.3} width {:.5}, markers {:?}",
            histogram.bin_start, histogram.bin_width, markers
        );

        Analysis {
            reading: TempoReading::from(estimated),
            histogram,
            markers,
            samples: estimated.map_or(0, |e| e.samples),
        }
    }
}
