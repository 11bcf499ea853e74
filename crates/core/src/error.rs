//! Error types for the parity-sim system.
//!
//! All operations return structured errors rather than panicking.
//! Detected-but-uncorrectable bit damage is NOT an error: the pipeline
//! reports residual errors through [`crate::pipeline::RunReport`] and
//! always proceeds to decode.

use crate::parity::ParityMode;
use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Framing: byte/bit conversion failures
/// - Consistency: malformed frame metadata (wrong-length parity code)
/// - UnsupportedMode: a parity mode the codec does not implement
/// - Config: invalid run parameters
#[derive(Debug, Error)]
pub enum Error {
    /// Bit framing failed (e.g., bitstream not byte-aligned at decode)
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// Frame metadata is internally inconsistent
    #[error("consistency error: {0}")]
    Consistency(#[from] ConsistencyError),

    /// The requested parity mode has no codec implementation.
    ///
    /// `ParityMode::Crc` is reserved and always lands here.
    #[error("unsupported parity mode: {0:?}")]
    UnsupportedMode(ParityMode),

    /// Configuration error (invalid probability, empty message, ...)
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit framing errors.
#[derive(Debug, Error)]
pub enum FramingError {
    /// Bitstream length is not a multiple of the row width, so it
    /// cannot be sliced back into bytes.
    #[error("bitstream length {bits} is not a multiple of 8")]
    NotByteAligned { bits: usize },
}

/// Frame consistency errors.
#[derive(Debug, Error)]
pub enum ConsistencyError {
    /// The parity code does not have `rows + 8` entries for its payload.
    /// Checking such a frame would read out of bounds, so we fail fast.
    #[error("parity code length mismatch: expected {expected}, got {actual}")]
    ParityCodeLength { expected: usize, actual: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
