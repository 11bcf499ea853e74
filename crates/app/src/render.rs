//! Human-readable rendering of a transmission run.
//!
//! The core hands back structured data ([`RunReport`]); everything printed
//! here is derived from it, so alternate presentations can be built
//! without touching the codec.

use parity_sim_core::bitstream::{Bitstream, ROW_WIDTH};
use parity_sim_core::pipeline::RunReport;

fn bits_string(bits: impl Iterator<Item = bool>) -> String {
    bits.map(|b| if b { '1' } else { '0' }).collect()
}

/// One line per message byte: `h = 01101000`.
pub fn print_message_table(message: &[u8], payload: &Bitstream) {
    for (i, &byte) in message.iter().enumerate() {
        let row = bits_string(payload.row(i).iter().copied());
        if byte.is_ascii_graphic() || byte == b' ' {
            println!("{} = {}", byte as char, row);
        } else {
            println!("0x{:02x} = {}", byte, row);
        }
    }
    println!();
}

/// The parity matrix: each payload row with its row parity bit, then the
/// column parity line underneath.
pub fn print_parity_matrix(payload: &Bitstream, parity_code: &[bool]) {
    let rows = payload.rows();
    for row in 0..rows {
        let bits = bits_string(payload.row(row).iter().copied());
        let parity = if parity_code[row] { '1' } else { '0' };
        println!("{} {}", bits, parity);
    }
    println!("{}", bits_string(parity_code[rows..].iter().copied()));
    println!();
}

/// Mismatch and correction diagnostics for one run.
pub fn print_diagnostics(report: &RunReport) {
    if report.parity_report.is_clean() {
        println!("Parity check: clean, no mismatches detected");
        println!();
        return;
    }

    for &row in &report.parity_report.mismatched_rows {
        println!(
            "Mismatch in row {}: received parity disagrees with the frame's parity code",
            row
        );
    }
    for &col in &report.parity_report.mismatched_cols {
        println!(
            "Mismatch in column {}: received parity disagrees with the frame's parity code",
            col
        );
    }
    println!();

    for &index in &report.correction.flipped {
        println!(
            "Corrected bit at row {}, column {} (flat index {})",
            index / ROW_WIDTH,
            index % ROW_WIDTH,
            index
        );
    }
    for &row in &report.correction.unpaired_rows {
        println!("Row {} flagged but left uncorrected (no column partner)", row);
    }
    for &col in &report.correction.unpaired_cols {
        println!("Column {} flagged but left uncorrected (no row partner)", col);
    }
    println!();
}

/// Full run narration: sent matrix, received matrix, diagnostics, decode.
pub fn print_run(message: &[u8], report: &RunReport) {
    print_message_table(message, &report.sent_payload);

    println!("--- Sent frame ---");
    print_parity_matrix(&report.sent_payload, &report.frame.parity_code);

    println!("{} (original payload)", bits_string(report.sent_payload.iter()));
    println!("{} (received payload)", bits_string(report.received_payload.iter()));
    println!();

    println!("--- Received frame ---");
    print_parity_matrix(&report.received_payload, &report.frame.parity_code);

    print_diagnostics(report);

    match String::from_utf8(report.decoded.clone()) {
        Ok(text) => println!("Decoded message: {:?}", text),
        Err(_) => println!("Decoded message (non-UTF-8): {:?}", report.decoded),
    }
    if report.is_restored() {
        println!("Verification: PASSED (decoded message matches input)");
    } else {
        println!(
            "Verification: FAILED ({} residual bit errors)",
            report.metrics.residual_bit_errors
        );
    }
    println!();
}

/// Metrics summary block.
pub fn print_metrics(report: &RunReport) {
    let m = &report.metrics;
    println!("=== Run Summary ===");
    println!("Duration: {} us", m.duration().as_micros());
    println!(
        "Payload: {} bytes, {} bits, {} matrix rows",
        m.message_bytes, m.payload_bits, m.matrix_rows
    );
    println!("Parity code: {} bits", m.parity_code_bits);
    println!(
        "Channel damage: {} bits flipped ({:.2}%)",
        m.bits_flipped_in_transit,
        m.transit_error_rate() * 100.0
    );
    println!(
        "Detection: {} row mismatch(es), {} column mismatch(es)",
        m.mismatched_rows, m.mismatched_cols
    );
    println!(
        "Correction: {} bit(s) flipped back, {} mismatch(es) unpaired",
        m.bits_corrected, m.unpaired_mismatches
    );
    println!("Residual bit errors: {}", m.residual_bit_errors);
    println!();
}
