//! End-to-end transmission pipeline.
//!
//! One run walks a [`Frame`] through five linear stages with no branching
//! back:
//!
//! ```text
//! BUILD -> TRANSMIT -> CHECK -> CORRECT -> DECODE
//! ```
//!
//! BUILD frames the message and derives the parity code; TRANSMIT pushes
//! the payload through the noisy channel; CHECK re-derives parity on the
//! receiving side; CORRECT applies the pairing heuristic; DECODE turns the
//! (hopefully repaired) payload back into bytes.
//!
//! Residual damage is never fatal: detection and correction results are
//! reported through [`RunReport`], and the pipeline always decodes and
//! returns a message, right or wrong. Only malformed input (empty message,
//! unsupported mode, invalid channel config) aborts a run.
//!
//! The frame has exactly one owner for its whole lifetime; nothing is
//! shared across runs except the configuration values.

use crate::bitstream::{self, Bitstream};
use crate::channel::{ChannelConfig, NoisyChannel};
use crate::correct::{self, Correction};
use crate::error::{Error, Result};
use crate::metrics::RunMetrics;
use crate::parity::{self, ParityMode, ParityReport};

/// The transmissible entity: a payload plus its parity metadata.
///
/// Built once by the BUILD stage; the payload is then mutated in place by
/// the channel and the corrector. The mode and parity code never change
/// after construction.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Payload bits, always a whole number of 8-bit rows
    pub payload: Bitstream,

    /// Parity mode both ends agreed on out-of-band
    pub mode: ParityMode,

    /// Row parities followed by column parities, `rows + 8` bits
    pub parity_code: Vec<bool>,
}

impl Frame {
    /// Frame a message: convert it to bits and derive its parity code.
    ///
    /// # Errors
    /// - `Error::Config` for an empty message
    /// - `Error::UnsupportedMode` for `ParityMode::Crc`
    pub fn build(message: &[u8], mode: ParityMode) -> Result<Self> {
        if message.is_empty() {
            return Err(Error::Config("message must not be empty".to_string()));
        }

        let payload = bitstream::encode(message);
        let parity_code = parity::build(&payload, mode)?;

        Ok(Self {
            payload,
            mode,
            parity_code,
        })
    }

    /// Re-derive parity over the current payload and compare against the
    /// stored code. Read-only.
    pub fn check(&self) -> Result<ParityReport> {
        parity::check(&self.payload, &self.parity_code, self.mode)
    }
}

/// Everything one run produced, as structured data.
///
/// Presentation (matrix rendering, mismatch reports, summaries) lives in
/// the callers; this struct only carries facts.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Payload as built, before the channel touched it
    pub sent_payload: Bitstream,

    /// Payload as it came out of the channel, before correction
    pub received_payload: Bitstream,

    /// The frame after correction (payload possibly repaired)
    pub frame: Frame,

    /// Mismatches the receiving side detected
    pub parity_report: ParityReport,

    /// What the corrector did about them
    pub correction: Correction,

    /// The decoded message, possibly still wrong
    pub decoded: Vec<u8>,

    /// Run statistics
    pub metrics: RunMetrics,
}

impl RunReport {
    /// True if the decoded message equals what was sent.
    pub fn is_restored(&self) -> bool {
        self.metrics.is_restored()
    }
}

/// Drive one message through the full pipeline.
///
/// # Errors
/// - `Error::Config` for an empty message or invalid channel config
/// - `Error::UnsupportedMode` for `ParityMode::Crc`
pub fn run(message: &[u8], mode: ParityMode, channel_config: ChannelConfig) -> Result<RunReport> {
    let mut metrics = RunMetrics::new();

    // BUILD
    let mut frame = Frame::build(message, mode)?;
    let sent_payload = frame.payload.clone();
    metrics.message_bytes = message.len() as u64;
    metrics.payload_bits = frame.payload.len() as u64;
    metrics.matrix_rows = frame.payload.rows() as u64;
    metrics.parity_code_bits = frame.parity_code.len() as u64;
    log::debug!(
        "built frame: {} bits in {} rows, {:?} mode",
        frame.payload.len(),
        frame.payload.rows(),
        mode
    );

    // TRANSMIT
    let mut channel = NoisyChannel::new(channel_config)?;
    frame.payload = channel.transmit(&frame.payload);
    let received_payload = frame.payload.clone();
    metrics.bits_flipped_in_transit = channel.stats().bits_flipped;

    // CHECK
    let parity_report = frame.check()?;
    metrics.mismatched_rows = parity_report.mismatched_rows.len() as u64;
    metrics.mismatched_cols = parity_report.mismatched_cols.len() as u64;

    // CORRECT
    let correction = correct::correct(&mut frame.payload, &parity_report);
    metrics.bits_corrected = correction.flipped.len() as u64;
    metrics.unpaired_mismatches =
        (correction.unpaired_rows.len() + correction.unpaired_cols.len()) as u64;

    // DECODE
    let decoded = bitstream::decode(&frame.payload)?;
    metrics.residual_bit_errors = sent_payload.distance(&frame.payload) as u64;
    metrics.complete();

    if metrics.residual_bit_errors > 0 {
        log::info!(
            "run finished with {} residual bit error(s)",
            metrics.residual_bit_errors
        );
    }

    Ok(RunReport {
        sent_payload,
        received_payload,
        frame,
        parity_report,
        correction,
        decoded,
        metrics,
    })
}
