//! Session statistics
//!
//! Advisory counters mutated by the transcoder and read by callers for
//! ratio reporting. They are not required for correctness; dropping them
//! changes nothing about the byte stream.

/// Counters for one encode or decode session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionMetrics {
    /// Bytes pulled from the source
    pub bytes_in: u64,
    /// Bytes pushed to the sink
    pub bytes_out: u64,
    /// Runs processed (one control byte each)
    pub runs: u64,
    /// Positions where the prediction held
    pub predicted: u64,
    /// Positions carried as literals
    pub literals: u64,
}

impl SessionMetrics {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Input bytes per output byte (higher = better, encode direction)
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_out == 0 {
            return 1.0;
        }
        self.bytes_in as f64 / self.bytes_out as f64
    }

    /// Output size relative to input, as a percentage.
    ///
    /// This is the figure the CLI reports: under 100% the stream shrank,
    /// over 100% it expanded (worst case 112.5%).
    pub fn output_percent(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        100.0 * self.bytes_out as f64 / self.bytes_in as f64
    }

    /// Fraction of positions where the prediction held (0.0 - 1.0)
    pub fn prediction_accuracy(&self) -> f64 {
        let total = self.predicted + self.literals;
        if total == 0 {
            return 0.0;
        }
        self.predicted as f64 / total as f64
    }

    /// Zero all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a human-readable report
    pub fn report(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!("in  bytes {}\n", self.bytes_in));
        report.push_str(&format!("out bytes {}\n", self.bytes_out));
        report.push_str(&format!("ratio     {:.3}%\n", self.output_percent()));
        report.push_str(&format!("runs      {}\n", self.runs));

        let total = self.predicted + self.literals;
        if total > 0 {
            report.push_str(&format!(
                "predicted {:.1}% ({}/{})\n",
                self.prediction_accuracy() * 100.0,
                self.predicted,
                total
            ));
        }

        report
    }
}
