use serde::Serialize;

/// Number of bins used by the tap display.
pub const DEFAULT_BINS: usize = 80;

/// Fraction of the observed range added on each side of the histogram.
const RANGE_PADDING: f64 = 0.05;

/// Equal-width histogram over a range derived from its own input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bin_start: f64,
    pub bin_width: f64,
    pub counts: Vec<u32>,
}

impl Histogram {
    /// Bin `values` into `bin_count` buckets spanning `[min, max]` widened by 5% of the
    /// range on each side.
    ///
    /// An empty input gives `bin_start = 0`, `bin_width = 1` and all-zero counts.
    /// Identical values give `bin_width = 0`; every index is then NaN and nothing
    /// is counted.
    pub fn build(values: &[f64], bin_count: usize) -> Self {
        let mut counts = vec![0u32; bin_count];

        let Some((min, max)) = min_max(values) else {
            return Self {
                bin_start: 0.0,
                bin_width: 1.0,
                counts,
            };
        };

        let padding = (max - min) * RANGE_PADDING;
        let bin_start = min - padding;
        let bin_end = max + padding;
        let bin_width = (bin_end - bin_start) / bin_count as f64;

        for &value in values {
            let index = ((value - bin_start) / bin_width).floor();
            // NaN fails both comparisons
            if index >= 0.0 && index < bin_count as f64 {
                counts[index as usize] += 1;
            }
        }

        Self {
            bin_start,
            bin_width,
            counts,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_end(&self) -> f64 {
        self.bin_start + self.bin_width * self.bin_count() as f64
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Bin-index coordinate of `value`, or `None` outside `[bin_start, bin_end]`.
    pub fn position_of(&self, value: f64) -> Option<f64> {
        if value >= self.bin_start && value <= self.bin_end() {
            Some((value - self.bin_start) / self.bin_width)
        } else {
            None
        }
    }

    /// Reference-line coordinates for the point estimate and the median of `values`.
    pub fn markers(&self, values: &[f64], estimate: Option<f64>) -> Markers {
        if values.is_empty() {
            return Markers::default();
        }

        let estimate_position = estimate.and_then(|bpm| self.position_of(bpm));
        let median = median(values);
        Markers {
            estimate: estimate_position,
            median: median.and_then(|m| self.position_of(m)),
            estimate_value: estimate_position.and(estimate),
            median_value: median,
        }
    }
}

/// Marker positions in bin-index space, for a renderer to draw reference lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Markers {
    pub estimate: Option<f64>,
    pub median: Option<f64>,
    /// Values behind the markers, so a renderer can label its lines.
    pub estimate_value: Option<f64>,
    pub median_value: Option<f64>,
}

/// Middle value after sorting; mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let (&first, rest) = values.split_first()?;
    Some(
        rest.iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::{median, Histogram, Markers, DEFAULT_BINS};

    #[test]
    fn empty_input_uses_default_range() {
        let hist = Histogram::build(&[], DEFAULT_BINS);

        assert_eq!(hist.bin_start, 0.0);
        assert_eq!(hist.bin_width, 1.0);
        assert_eq!(hist.counts, vec![0; DEFAULT_BINS]);
        assert_eq!(hist.markers(&[], Some(120.0)), Markers::default());
    }

    #[test]
    fn range_is_padded_by_five_percent() {
        let hist = Histogram::build(&[100.0, 200.0], DEFAULT_BINS);

        assert!((hist.bin_start - 95.0).abs() < 1e-9);
        assert!((hist.bin_end() - 205.0).abs() < 1e-9);
        assert!((hist.bin_width - 110.0 / 80.0).abs() < 1e-9);
    }

    #[test]
    fn every_value_lands_in_a_bin() {
        let values = [118.0, 119.5, 120.0, 120.0, 121.2, 90.0, 240.0];
        let hist = Histogram::build(&values, DEFAULT_BINS);

        assert_eq!(hist.total(), values.len() as u64);
        assert_eq!(hist.counts.len(), DEFAULT_BINS);
    }

    #[test]
    fn extremes_fall_in_edge_bins() {
        let hist = Histogram::build(&[0.0, 10.0], 10);

        // padding of 0.5 each side, width 1.1
        assert_eq!(hist.counts[0], 1);
        assert_eq!(hist.counts[9], 1);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn identical_values_give_zero_width_and_no_counts() {
        let hist = Histogram::build(&[120.0, 120.0, 120.0], DEFAULT_BINS);

        assert_eq!(hist.bin_start, 120.0);
        assert_eq!(hist.bin_width, 0.0);
        assert_eq!(hist.total(), 0);

        // the estimate sits exactly on bin_start, so it is "in range" with a NaN position
        let markers = hist.markers(&[120.0, 120.0, 120.0], Some(120.0));
        assert!(markers.estimate.unwrap().is_nan());
        assert!(markers.median.unwrap().is_nan());
    }

    #[test]
    fn markers_use_bin_index_space() {
        let values = [100.0, 110.0, 200.0];
        let hist = Histogram::build(&values, 10);
        // bin_start 95, width 11
        let markers = hist.markers(&values, Some(150.0));

        assert!((markers.estimate.unwrap() - 5.0).abs() < 1e-9);
        assert!((markers.median.unwrap() - 15.0 / 11.0).abs() < 1e-9);
        assert_eq!(markers.median_value, Some(110.0));
    }

    #[test]
    fn out_of_range_estimate_has_no_marker() {
        let values = [100.0, 200.0];
        let hist = Histogram::build(&values, DEFAULT_BINS);

        assert!(hist.markers(&values, Some(300.0)).estimate.is_none());
        assert!(hist.markers(&values, None).estimate.is_none());
        assert!(hist.markers(&values, None).median.is_some());
    }

    #[test]
    fn median_handles_odd_and_even_lengths() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }
}
