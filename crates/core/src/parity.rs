//! Two-dimensional parity codec.
//!
//! The payload is framed as a matrix with [`ROW_WIDTH`] (8) columns. The
//! sender derives one parity bit per row followed by one per column; the
//! receiver re-derives both sets over the (possibly corrupted) payload and
//! reports every disagreement.
//!
//! # Parity Code Layout
//!
//! ```text
//! +------------------+
//! | row parity (n)   |  one bit per 8-bit row, in row order
//! +------------------+
//! | col parity (8)   |  one bit per column, in column order
//! +------------------+
//! ```
//!
//! For a payload of `8n` bits the code always has `n + 8` entries.
//!
//! # Polarity Convention
//!
//! A parity bit is `1` when the group's set-bit count already satisfies the
//! mode's predicate: Even mode emits `1` for an even count, Odd mode emits
//! `1` for an odd count. Builder and checker share one predicate, so the
//! convention holds end to end; both ends of a link must agree on the mode
//! out-of-band.

use crate::bitstream::{Bitstream, ROW_WIDTH};
use crate::error::{ConsistencyError, Error, FramingError, Result};

/// Error-detecting-code selector for a frame.
///
/// Matched exhaustively everywhere so a new mode cannot be silently
/// ignored. `Crc` is reserved: the codec rejects it with
/// [`Error::UnsupportedMode`] instead of no-opping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityMode {
    /// Parity bit is `1` when the group has an even number of set bits.
    Even,
    /// Parity bit is `1` when the group has an odd number of set bits.
    Odd,
    /// Reserved, unimplemented.
    Crc,
}

impl ParityMode {
    /// The parity bit this mode emits for a group with `count` set bits.
    ///
    /// # Errors
    /// `UnsupportedMode` for `Crc`.
    fn parity_bit(self, count: usize) -> Result<bool> {
        match self {
            ParityMode::Even => Ok(count % 2 == 0),
            ParityMode::Odd => Ok(count % 2 == 1),
            ParityMode::Crc => Err(Error::UnsupportedMode(self)),
        }
    }
}

/// Mismatches found by [`check`]: every row and column whose re-derived
/// parity bit disagrees with the stored code, each in ascending index
/// order. The ordering is a committed contract — correction pairs entries
/// positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParityReport {
    /// Row indices whose parity disagrees, ascending.
    pub mismatched_rows: Vec<usize>,
    /// Column indices whose parity disagrees, ascending.
    pub mismatched_cols: Vec<usize>,
}

impl ParityReport {
    /// True if no row or column disagreed.
    pub fn is_clean(&self) -> bool {
        self.mismatched_rows.is_empty() && self.mismatched_cols.is_empty()
    }

    /// Total number of flagged rows and columns.
    pub fn mismatch_count(&self) -> usize {
        self.mismatched_rows.len() + self.mismatched_cols.len()
    }
}

/// Count set bits in row `row` of the payload.
fn row_count(payload: &Bitstream, row: usize) -> usize {
    (0..ROW_WIDTH)
        .filter(|&col| payload.get(row * ROW_WIDTH + col))
        .count()
}

/// Count set bits in column `col` across all rows of the payload.
fn col_count(payload: &Bitstream, col: usize) -> usize {
    (0..payload.rows())
        .filter(|&row| payload.get(row * ROW_WIDTH + col))
        .count()
}

fn require_row_aligned(payload: &Bitstream) -> Result<()> {
    if payload.len() % ROW_WIDTH != 0 {
        return Err(FramingError::NotByteAligned {
            bits: payload.len(),
        }
        .into());
    }
    Ok(())
}

/// Length a parity code must have for `payload`.
pub fn code_len(payload: &Bitstream) -> usize {
    payload.rows() + ROW_WIDTH
}

/// Build the parity code for a payload: `rows` row-parity bits in row
/// order, then 8 column-parity bits in column order.
///
/// # Errors
/// - `UnsupportedMode` for `ParityMode::Crc`
/// - `FramingError` if the payload is not a whole number of rows
pub fn build(payload: &Bitstream, mode: ParityMode) -> Result<Vec<bool>> {
    require_row_aligned(payload)?;

    let mut code = Vec::with_capacity(code_len(payload));
    for row in 0..payload.rows() {
        code.push(mode.parity_bit(row_count(payload, row))?);
    }
    for col in 0..ROW_WIDTH {
        code.push(mode.parity_bit(col_count(payload, col))?);
    }
    Ok(code)
}

/// Re-derive parity over a received payload and compare it against the
/// stored code. Read-only: the payload is never mutated here.
///
/// Rows are compared first (0..rows), then columns (0..8), and flagged
/// indices are appended in that ascending order of discovery.
///
/// # Errors
/// - `UnsupportedMode` for `ParityMode::Crc`
/// - `FramingError` if the payload is not a whole number of rows
/// - `ConsistencyError` if the code length is not `rows + 8` (fail fast
///   rather than index out of bounds)
pub fn check(payload: &Bitstream, parity_code: &[bool], mode: ParityMode) -> Result<ParityReport> {
    require_row_aligned(payload)?;

    let expected = code_len(payload);
    if parity_code.len() != expected {
        return Err(ConsistencyError::ParityCodeLength {
            expected,
            actual: parity_code.len(),
        }
        .into());
    }

    let mut report = ParityReport::default();
    for row in 0..payload.rows() {
        if mode.parity_bit(row_count(payload, row))? != parity_code[row] {
            report.mismatched_rows.push(row);
        }
    }
    for col in 0..ROW_WIDTH {
        if mode.parity_bit(col_count(payload, col))? != parity_code[payload.rows() + col] {
            report.mismatched_cols.push(col);
        }
    }

    if !report.is_clean() {
        log::debug!(
            "parity check flagged {} row(s) {:?} and {} column(s) {:?}",
            report.mismatched_rows.len(),
            report.mismatched_rows,
            report.mismatched_cols.len(),
            report.mismatched_cols,
        );
    }

    Ok(report)
}
