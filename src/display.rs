//! Text presentation of an [`Analysis`]: the three BPM values and a bar chart.

use std::fmt::Write;

use crate::histogram::{Histogram, Markers};
use crate::tap_tempo::Analysis;
use crate::tempo::TempoReading;

const BAR: char = '#';
const AXIS: char = '-';
const ESTIMATE_MARK: char = 'E';
const MEDIAN_MARK: char = 'M';
const SHARED_MARK: char = '*';

/// Three decimals, or `--` when there is no value.
pub fn format_bpm(bpm: Option<f64>) -> String {
    match bpm {
        Some(bpm) => format!("{bpm:.3}"),
        None => "--".into(),
    }
}

pub fn render_reading(reading: &TempoReading) -> String {
    format!(
        "BPM {}   x2 {}   x0.5 {}",
        format_bpm(reading.estimated),
        format_bpm(reading.double),
        format_bpm(reading.half)
    )
}

/// One column per bin, bars scaled so the fullest bin is `height` rows tall,
/// followed by an axis, a marker row and a legend.
pub fn render_histogram(histogram: &Histogram, markers: &Markers, height: usize) -> String {
    let bins = histogram.bin_count();
    let max = histogram.max_count();
    let mut out = String::new();

    if max > 0 {
        let rows: Vec<usize> = histogram
            .counts
            .iter()
            .map(|&count| bar_rows(count, max, height))
            .collect();

        for level in (1..=height).rev() {
            let line: String = rows
                .iter()
                .map(|&r| if r >= level { BAR } else { ' ' })
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    out.extend(std::iter::repeat(AXIS).take(bins));
    out.push('\n');

    let mut marker_row = vec![' '; bins];
    place_marker(&mut marker_row, markers.estimate, ESTIMATE_MARK);
    place_marker(&mut marker_row, markers.median, MEDIAN_MARK);
    let marker_line: String = marker_row.into_iter().collect();
    let marker_line = marker_line.trim_end();
    if !marker_line.is_empty() {
        out.push_str(marker_line);
        out.push('\n');
    }

    let _ = write!(
        out,
        "{:.3} .. {:.3}",
        histogram.bin_start,
        histogram.bin_end()
    );
    if drawable(markers.estimate) {
        let _ = write!(
            out,
            "   {ESTIMATE_MARK} est {}",
            format_bpm(markers.estimate_value)
        );
    }
    if drawable(markers.median) {
        let _ = write!(
            out,
            "   {MEDIAN_MARK} median {}",
            format_bpm(markers.median_value)
        );
    }
    out.push('\n');
    out
}

/// Reading plus, when `chart_height` is set, the histogram.
pub fn render_analysis(analysis: &Analysis, chart_height: Option<usize>) -> String {
    let mut out = render_reading(&analysis.reading);
    out.push('\n');
    if let Some(height) = chart_height {
        out.push_str(&render_histogram(
            &analysis.histogram,
            &analysis.markers,
            height,
        ));
    }
    out
}

fn bar_rows(count: u32, max: u32, height: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let scaled = (f64::from(count) / f64::from(max) * height as f64).round() as usize;
    scaled.max(1)
}

fn drawable(position: Option<f64>) -> bool {
    position.is_some_and(f64::is_finite)
}

fn place_marker(row: &mut [char], position: Option<f64>, mark: char) {
    let Some(position) = position.filter(|p| p.is_finite()) else {
        return;
    };
    let Some(last) = row.len().checked_sub(1) else {
        return;
    };

    // the right edge of the range maps to `bins`, which belongs to the last column
    let column = (position.floor().max(0.0) as usize).min(last);
    row[column] = if row[column] == ' ' { mark } else { SHARED_MARK };
}

#[cfg(test)]
mod tests {
    use super::{format_bpm, render_histogram, render_reading};
    use crate::histogram::{Histogram, Markers};
    use crate::tempo::TempoReading;

    #[test]
    fn formats_three_decimals_or_dashes() {
        assert_eq!(format_bpm(Some(120.0)), "120.000");
        assert_eq!(format_bpm(Some(93.33333)), "93.333");
        assert_eq!(format_bpm(None), "--");
    }

    #[test]
    fn empty_reading_shows_dashes() {
        assert_eq!(
            render_reading(&TempoReading::default()),
            "BPM --   x2 --   x0.5 --"
        );
    }

    #[test]
    fn empty_histogram_is_axis_only() {
        let hist = Histogram::build(&[], 8);
        let text = render_histogram(&hist, &Markers::default(), 4);

        assert_eq!(text, "--------\n0.000 .. 8.000\n");
    }

    #[test]
    fn bars_scale_to_the_tallest_bin() {
        let values = [0.0, 10.0, 10.0];
        let hist = Histogram::build(&values, 4);
        let text = render_histogram(&hist, &Markers::default(), 2);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "   #");
        assert_eq!(lines[1], "#  #");
        assert_eq!(lines[2], "----");
    }

    #[test]
    fn shared_column_uses_star() {
        // range -4..84 over 11 bins of width 8
        let values = [0.0, 40.0, 80.0];
        let hist = Histogram::build(&values, 11);
        let markers = hist.markers(&values, Some(40.0));
        let text = render_histogram(&hist, &markers, 1);

        assert!(text.contains("\n     *\n"));
        assert!(text.contains("E est 40.000"));
        assert!(text.contains("M median 40.000"));
    }

    #[test]
    fn nan_markers_are_not_drawn() {
        let values = [120.0, 120.0];
        let hist = Histogram::build(&values, 4);
        let markers = hist.markers(&values, Some(120.0));
        let text = render_histogram(&hist, &markers, 3);

        assert!(!text.contains('E'));
        assert!(!text.contains('*'));
    }
}
