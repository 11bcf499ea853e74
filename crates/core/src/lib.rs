//! parity-sim-core: Two-dimensional parity error detection over a simulated noisy link
//!
//! This library provides the core components for a learning-focused system that:
//! - Frames a byte message as a bitstream with 8-bit matrix rows
//! - Derives row and column parity bits (even or odd variant)
//! - Simulates transmission errors with a seeded per-bit flip channel
//! - Detects mismatched rows/columns and applies best-effort single-bit correction
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bitstream`: byte-to-bit framing and the `Bitstream` type
//! - `parity`: row/column parity build and check
//! - `channel`: noisy channel with seeded randomness
//! - `correct`: positional row/column pairing correction
//! - `pipeline`: BUILD -> TRANSMIT -> CHECK -> CORRECT -> DECODE
//! - `metrics`: observable run behavior
//!
//! # Design Principles
//!
//! - **No panics**: all fallible operations return structured errors
//! - **Deterministic**: seeded randomness makes runs reproducible
//! - **Structured output**: detection and correction results are data,
//!   not pre-formatted strings, so presentation lives with the caller
//! - **Best-effort correction**: residual damage is reported, never fatal

pub mod bitstream;
pub mod channel;
pub mod correct;
pub mod error;
pub mod metrics;
pub mod parity;
pub mod pipeline;

// Re-export commonly used types
pub use error::{Error, Result};
pub use parity::ParityMode;
pub use pipeline::{run, Frame, RunReport};
