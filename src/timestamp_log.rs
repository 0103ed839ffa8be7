/// Ordered tap times in milliseconds, append-only until [`TimestampLog::reset`].
///
/// The log trusts its single input source to deliver non-decreasing values
/// and does not check ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimestampLog {
    timestamps: Vec<f64>,
}

impl TimestampLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one tap time.
    pub fn record(&mut self, now_ms: f64) {
        self.timestamps.push(now_ms);
    }

    /// Drop every recorded tap.
    pub fn reset(&mut self) {
        self.timestamps.clear();
    }

    pub fn size(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.timestamps
    }
}

#[cfg(test)]
mod tests {
    use super::TimestampLog;

    #[test]
    fn record_appends_in_order() {
        let mut log = TimestampLog::new();
        log.record(10.0);
        log.record(25.5);
        log.record(25.5);

        assert_eq!(log.size(), 3);
        assert_eq!(log.as_slice(), &[10.0, 25.5, 25.5]);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut log = TimestampLog::new();
        log.record(1.0);
        log.record(2.0);

        log.reset();
        let once = log.clone();
        log.reset();

        assert_eq!(log, once);
        assert_eq!(log.size(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn records_again_after_reset() {
        let mut log = TimestampLog::new();
        log.record(1.0);
        log.reset();
        log.record(7.0);

        assert_eq!(log.as_slice(), &[7.0]);
    }
}
