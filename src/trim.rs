/// Sort ascending and keep the central half, dropping the lowest and highest quarter.
///
/// * two values or fewer: nothing survives.
/// * three values: only the middle one.
/// * otherwise `q = floor(n / 4)` values are cut from each end.
pub fn trimmed_middle(seq: &[f64]) -> Vec<f64> {
    let n = seq.len();
    if n <= 2 {
        return Vec::new();
    }

    let mut sorted = seq.to_vec();
    sorted.sort_by(f64::total_cmp);

    if n == 3 {
        return vec![sorted[1]];
    }

    let quarter = (n as f64 * 0.25).floor() as usize;
    sorted[quarter..n - quarter].to_vec()
}
