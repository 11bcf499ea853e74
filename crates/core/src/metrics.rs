//! Metrics collection and reporting for a transmission run.
//!
//! This module provides observable insights into system behavior:
//! - Payload shape (bytes, bits, matrix rows)
//! - Channel damage (bits flipped in transit)
//! - Detection (mismatched rows/columns) and correction activity
//! - Residual bit errors after correction
//! - Timing information
//!
//! # Design
//!
//! Metrics are collected in a plain struct, updated at each pipeline
//! stage. The pipeline is single-threaded, so no synchronization is
//! needed; one `RunMetrics` belongs to one run.

use std::time::{Duration, Instant};

/// Metrics for one simulated transmission run.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Payload shape ===
    /// Message length in bytes
    pub message_bytes: u64,

    /// Payload length in bits
    pub payload_bits: u64,

    /// Parity matrix rows (payload_bits / 8)
    pub matrix_rows: u64,

    /// Parity code length (rows + 8)
    pub parity_code_bits: u64,

    // === Channel ===
    /// Bits the channel flipped in transit
    pub bits_flipped_in_transit: u64,

    // === Detection ===
    /// Rows whose parity disagreed after transit
    pub mismatched_rows: u64,

    /// Columns whose parity disagreed after transit
    pub mismatched_cols: u64,

    // === Correction ===
    /// Bits the corrector flipped back
    pub bits_corrected: u64,

    /// Flagged rows/columns that found no partner
    pub unpaired_mismatches: u64,

    // === Outcome ===
    /// Bit positions still differing from the original payload after
    /// correction
    pub residual_bit_errors: u64,
}

impl RunMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            message_bytes: 0,
            payload_bits: 0,
            matrix_rows: 0,
            parity_code_bits: 0,
            bits_flipped_in_transit: 0,
            mismatched_rows: 0,
            mismatched_cols: 0,
            bits_corrected: 0,
            unpaired_mismatches: 0,
            residual_bit_errors: 0,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Fraction of payload bits the channel damaged.
    pub fn transit_error_rate(&self) -> f64 {
        if self.payload_bits == 0 {
            0.0
        } else {
            self.bits_flipped_in_transit as f64 / self.payload_bits as f64
        }
    }

    /// True if the decoded payload matched the original exactly.
    pub fn is_restored(&self) -> bool {
        self.residual_bit_errors == 0
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_us={}\n\
             message_bytes={}\n\
             payload_bits={}\n\
             matrix_rows={}\n\
             parity_code_bits={}\n\
             bits_flipped_in_transit={}\n\
             transit_error_rate={:.4}\n\
             mismatched_rows={}\n\
             mismatched_cols={}\n\
             bits_corrected={}\n\
             unpaired_mismatches={}\n\
             residual_bit_errors={}\n",
            self.duration().as_micros(),
            self.message_bytes,
            self.payload_bits,
            self.matrix_rows,
            self.parity_code_bits,
            self.bits_flipped_in_transit,
            self.transit_error_rate(),
            self.mismatched_rows,
            self.mismatched_cols,
            self.bits_corrected,
            self.unpaired_mismatches,
            self.residual_bit_errors,
        )
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = RunMetrics::new();
        assert!(metrics.end_time.is_none());
        assert!(metrics.duration().as_millis() < 100); // Should be recent
        assert!(metrics.is_restored());
    }

    #[test]
    fn test_transit_error_rate() {
        let mut metrics = RunMetrics::new();
        metrics.payload_bits = 40;
        metrics.bits_flipped_in_transit = 4;

        assert_eq!(metrics.transit_error_rate(), 0.1);
    }

    #[test]
    fn test_transit_error_rate_empty_payload() {
        let metrics = RunMetrics::new();
        assert_eq!(metrics.transit_error_rate(), 0.0);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = RunMetrics::new();
        metrics.message_bytes = 5;
        metrics.payload_bits = 40;
        metrics.residual_bit_errors = 2;

        let text = metrics.export_text();
        assert!(text.contains("message_bytes=5"));
        assert!(text.contains("payload_bits=40"));
        assert!(text.contains("residual_bit_errors=2"));
    }
}
