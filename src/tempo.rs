use serde::Serialize;

use crate::intervals::differences;
use crate::trim::trimmed_middle;

/// Convert a beat interval in milliseconds into beats per minute.
///
/// A zero interval yields an infinite BPM; callers get the raw IEEE result.
pub fn ms_to_bpm(interval_ms: f64) -> f64 {
    60_000.0 / interval_ms
}

/// Averaged tempo produced from a set of tap intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BpmEstimate {
    pub bpm: f64,
    /// Number of intervals that went into the average.
    pub samples: usize,
}

impl BpmEstimate {
    pub fn double(&self) -> f64 {
        self.bpm * 2.0
    }

    pub fn half(&self) -> f64 {
        self.bpm * 0.5
    }
}

/// Estimate the tempo from tap intervals in milliseconds.
///
/// The quartile-trimmed intervals are used when trimming leaves anything,
/// otherwise every interval is. Returns `None` for an empty input.
pub fn estimate(intervals: &[f64]) -> Option<BpmEstimate> {
    if intervals.is_empty() {
        return None;
    }

    let trimmed = trimmed_middle(intervals);
    let source: &[f64] = if trimmed.is_empty() {
        intervals
    } else {
        &trimmed
    };

    let bpms: Vec<f64> = source.iter().copied().map(ms_to_bpm).collect();
    mean(&bpms).map(|bpm| BpmEstimate {
        bpm,
        samples: bpms.len(),
    })
}

/// Estimate straight from tap timestamps; needs at least two taps.
pub fn estimate_from_timestamps(timestamps: &[f64]) -> Option<BpmEstimate> {
    if timestamps.len() < 2 {
        return None;
    }
    estimate(&differences(timestamps))
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// The three tempo values shown to the user, each absent without an estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TempoReading {
    pub estimated: Option<f64>,
    pub double: Option<f64>,
    pub half: Option<f64>,
}

impl From<Option<BpmEstimate>> for TempoReading {
    fn from(estimate: Option<BpmEstimate>) -> Self {
        Self {
            estimated: estimate.map(|e| e.bpm),
            double: estimate.map(|e| e.double()),
            half: estimate.map(|e| e.half()),
        }
    }
}
