//! Byte-to-bit framing for the parity matrix.
//!
//! A message enters the system as bytes and travels the link as a flat
//! [`Bitstream`]. Each byte contributes exactly 8 bits, MSB-first, so the
//! stream length is always a multiple of [`ROW_WIDTH`] and slices cleanly
//! into the 8-column parity matrix.
//!
//! # Example
//! ```
//! use parity_sim_core::bitstream::{decode, encode};
//!
//! let bits = encode(b"h");
//! assert_eq!(bits.len(), 8);
//! assert_eq!(decode(&bits).unwrap(), b"h");
//! ```

use crate::error::{FramingError, Result};

/// Number of columns in the parity matrix: every payload row is one byte.
pub const ROW_WIDTH: usize = 8;

/// An ordered sequence of bits, the transmissible payload form.
///
/// # Invariants
/// - Streams produced by [`encode`] always have `len() % ROW_WIDTH == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream {
    bits: Vec<bool>,
}

impl Bitstream {
    /// Wrap a raw bit vector.
    ///
    /// Alignment is not enforced here; [`decode`] and the parity codec
    /// validate it where it matters.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Number of bits in the stream.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if the stream holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of complete 8-bit rows in the stream.
    pub fn rows(&self) -> usize {
        self.bits.len() / ROW_WIDTH
    }

    /// Read the bit at a flat index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds; all internal callers index
    /// within `0..len()`.
    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Invert the bit at a flat index (0 becomes 1, 1 becomes 0).
    pub fn flip(&mut self, index: usize) {
        self.bits[index] = !self.bits[index];
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// The bits of row `row`, in column order.
    ///
    /// Returns an empty slice for a row past the end of the stream.
    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * ROW_WIDTH;
        let end = (start + ROW_WIDTH).min(self.bits.len());
        if start >= end {
            &[]
        } else {
            &self.bits[start..end]
        }
    }

    /// Count how many bit positions differ from `other`.
    ///
    /// Streams of different lengths count every surplus bit as a difference.
    pub fn distance(&self, other: &Bitstream) -> usize {
        let shared = self.bits.len().min(other.bits.len());
        let differing = (0..shared)
            .filter(|&i| self.bits[i] != other.bits[i])
            .count();
        differing + self.bits.len().abs_diff(other.bits.len())
    }
}

/// Convert bytes into a bitstream, MSB-first per byte.
///
/// The result has exactly `8 * bytes.len()` bits.
pub fn encode(bytes: &[u8]) -> Bitstream {
    let mut bits = Vec::with_capacity(bytes.len() * ROW_WIDTH);
    for &byte in bytes {
        for shift in (0..ROW_WIDTH).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    Bitstream::from_bits(bits)
}

/// Convert a bitstream back into bytes.
///
/// Slices the stream into 8-bit groups in order, interpreting each group
/// as one unsigned byte, MSB-first.
///
/// # Errors
/// Returns `FramingError::NotByteAligned` if the stream length is not a
/// multiple of 8.
pub fn decode(stream: &Bitstream) -> Result<Vec<u8>> {
    if stream.len() % ROW_WIDTH != 0 {
        return Err(FramingError::NotByteAligned { bits: stream.len() }.into());
    }

    let mut bytes = Vec::with_capacity(stream.rows());
    for row in 0..stream.rows() {
        let mut byte = 0u8;
        for col in 0..ROW_WIDTH {
            byte = (byte << 1) | stream.get(row * ROW_WIDTH + col) as u8;
        }
        bytes.push(byte);
    }
    Ok(bytes)
}
