//! parity-sim: demonstrate two-dimensional parity error detection and
//! single-bit correction over a simulated noisy link.
//!
//! Pipeline: message -> bitstream -> parity build -> noisy channel ->
//! parity check -> correction -> decode, with the matrix and every
//! detected/corrected mismatch printed along the way.

mod config;
mod render;

use std::io::Read;

use config::Config;
use parity_sim_core::pipeline;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("try --help for usage");
            std::process::exit(2);
        }
    };

    if config.print_config {
        config.print();
    }

    let message = match read_message(&config) {
        Ok(message) => message,
        Err(error) => {
            eprintln!("error reading message: {}", error);
            std::process::exit(2);
        }
    };

    log::info!(
        "transmitting {} byte(s) with {:?} parity, noise {} (seed {})",
        message.len(),
        config.mode,
        config.channel.flip_probability,
        config.channel.seed
    );

    let report = match pipeline::run(&message, config.mode, config.channel) {
        Ok(report) => report,
        Err(error) => {
            eprintln!("error: {}", error);
            std::process::exit(1);
        }
    };

    render::print_run(&message, &report);

    if config.print_metrics {
        render::print_metrics(&report);
    }
}

/// Resolve the message bytes: stdin when requested, the configured text
/// otherwise.
fn read_message(config: &Config) -> std::io::Result<Vec<u8>> {
    if config.read_stdin {
        let mut buffer = Vec::new();
        std::io::stdin().read_to_end(&mut buffer)?;
        // A trailing newline would otherwise become a payload row.
        while buffer.last() == Some(&b'\n') || buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
        Ok(buffer)
    } else {
        Ok(config.message.clone().into_bytes())
    }
}
