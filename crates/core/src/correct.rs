//! Best-effort single-bit error correction.
//!
//! A single flipped bit disturbs exactly one row parity and one column
//! parity, so its position is the intersection of the flagged row and
//! column. This module generalizes that observation into a deterministic
//! heuristic: pair flagged rows with flagged columns positionally, in
//! ascending index order, and flip the bit at each intersection.
//!
//! The heuristic is only reliable for the single-error case. Multi-error
//! patterns may be partially or even incorrectly "corrected"; excess
//! flagged rows or columns that find no partner are reported unpaired and
//! left untouched. Correction never fails.

use crate::bitstream::{Bitstream, ROW_WIDTH};
use crate::parity::ParityReport;

/// Outcome of a correction pass, for rendering and metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correction {
    /// Flat payload indices that were flipped back, in pairing order.
    pub flipped: Vec<usize>,
    /// Flagged rows that had no column partner.
    pub unpaired_rows: Vec<usize>,
    /// Flagged columns that had no row partner.
    pub unpaired_cols: Vec<usize>,
}

impl Correction {
    /// True if every flagged row and column was consumed by a pair.
    pub fn is_complete(&self) -> bool {
        self.unpaired_rows.is_empty() && self.unpaired_cols.is_empty()
    }
}

/// Apply the pairing heuristic to a payload in place.
///
/// The i-th flagged row pairs with the i-th flagged column (both lists
/// arrive in ascending index order from the parity check); each pair flips
/// the single bit at `row * 8 + col`. The longer list's tail is left
/// unpaired and uncorrected.
pub fn correct(payload: &mut Bitstream, report: &ParityReport) -> Correction {
    let pairs = report
        .mismatched_rows
        .len()
        .min(report.mismatched_cols.len());

    let mut outcome = Correction::default();
    for i in 0..pairs {
        let row = report.mismatched_rows[i];
        let col = report.mismatched_cols[i];
        let index = row * ROW_WIDTH + col;
        payload.flip(index);
        outcome.flipped.push(index);
    }

    outcome.unpaired_rows = report.mismatched_rows[pairs..].to_vec();
    outcome.unpaired_cols = report.mismatched_cols[pairs..].to_vec();

    if !outcome.is_complete() {
        log::debug!(
            "correction left {} row(s) and {} column(s) unpaired",
            outcome.unpaired_rows.len(),
            outcome.unpaired_cols.len()
        );
    }

    outcome
}
