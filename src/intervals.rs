/// Consecutive differences `seq[i] - seq[i - 1]`, in input order.
///
/// Returns an empty vector for fewer than two values.
pub fn differences(seq: &[f64]) -> Vec<f64> {
    seq.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

#[cfg(test)]
mod tests {
    use super::differences;

    #[test]
    fn short_inputs_have_no_intervals() {
        assert!(differences(&[]).is_empty());
        assert!(differences(&[42.0]).is_empty());
    }

    #[test]
    fn subtracts_neighbours() {
        assert_eq!(differences(&[0.0, 500.0, 1200.0]), vec![500.0, 700.0]);
    }

    #[test]
    fn length_is_one_less_than_input() {
        let seq: Vec<f64> = (0..17).map(|i| f64::from(i) * 3.0).collect();
        assert_eq!(differences(&seq).len(), seq.len() - 1);
    }

    #[test]
    fn keeps_input_order() {
        let ordered = differences(&[0.0, 100.0, 400.0]);
        let permuted = differences(&[100.0, 0.0, 400.0]);

        assert_eq!(ordered, vec![100.0, 300.0]);
        assert_eq!(permuted, vec![-100.0, 400.0]);
        assert_ne!(ordered, permuted);
    }
}
