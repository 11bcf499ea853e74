//! Configuration for the parity-sim application.
//!
//! Handles parsing command-line arguments and generating sensible
//! defaults. The tool works with ZERO arguments: it transmits "hello"
//! through a 20% noisy channel, the classic classroom demonstration.
//! The seed is always printed so any run can be reproduced exactly.

use parity_sim_core::channel::ChannelConfig;
use parity_sim_core::parity::ParityMode;

/// Default message, matching the canonical demonstration input.
const DEFAULT_MESSAGE: &str = "hello";

/// Default per-bit flip probability.
const DEFAULT_NOISE: f64 = 0.2;

/// Complete configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Message to transmit
    pub message: String,

    /// Read the message from stdin instead of `message`
    pub read_stdin: bool,

    /// Parity mode for build and check
    pub mode: ParityMode,

    /// Channel configuration (flip probability + seed)
    pub channel: ChannelConfig,

    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If no `--seed` is provided, a time-based seed is used (and printed,
    /// so the run stays reproducible).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut message: Option<String> = None;
        let mut read_stdin = false;
        let mut mode = ParityMode::Even;
        let mut noise: Option<f64> = None;
        let mut seed: Option<u64> = None;
        let mut print_config = false;
        let mut print_metrics = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--message" | "-m" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--message requires text".to_string());
                    }
                    message = Some(args[i].clone());
                }
                "--stdin" => {
                    read_stdin = true;
                }
                "--mode" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--mode requires even|odd".to_string());
                    }
                    mode = match args[i].as_str() {
                        "even" => ParityMode::Even,
                        "odd" => ParityMode::Odd,
                        "crc" => ParityMode::Crc,
                        other => return Err(format!("unknown mode: {}", other)),
                    };
                }
                "--noise" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--noise requires a probability".to_string());
                    }
                    noise = Some(args[i].parse().map_err(|_| "invalid noise probability")?);
                }
                "--no-noise" => {
                    noise = Some(0.0);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            message: message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            read_stdin,
            mode,
            channel: ChannelConfig {
                flip_probability: noise.unwrap_or(DEFAULT_NOISE),
                seed,
            },
            print_config,
            print_metrics,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        if self.read_stdin {
            println!("Message: (stdin)");
        } else {
            println!("Message: {:?}", self.message);
        }
        println!("Parity mode: {:?}", self.mode);
        println!("Noise: {:.2}%", self.channel.flip_probability * 100.0);
        println!("Seed: {}", self.channel.seed);
        println!();
    }
}

fn print_help() {
    println!("parity-sim: two-dimensional parity over a simulated noisy link");
    println!();
    println!("USAGE:");
    println!("    parity-sim [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --message, -m <TEXT>  Message to transmit (default: \"hello\")");
    println!("    --stdin               Read the message from standard input");
    println!("    --mode <even|odd>     Parity variant (default: even)");
    println!("    --noise <P>           Per-bit flip probability 0.0-<1.0 (default: 0.2)");
    println!("    --no-noise            Disable noise (same as --noise 0)");
    println!("    --seed <N>            Random seed for determinism (default: time-based)");
    println!();
    println!("    --print-config        Print resolved configuration");
    println!("    --no-metrics          Don't print the metrics summary");
    println!("    --help, -h            Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    parity-sim                          # \"hello\" through a 20% channel");
    println!("    parity-sim --seed 42                # deterministic run");
    println!("    parity-sim -m \"hi there\" --no-noise # clean transmission");
    println!("    parity-sim --mode odd --noise 0.05  # odd parity, light noise");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_args(&[]).unwrap();
        assert_eq!(config.message, "hello");
        assert_eq!(config.mode, ParityMode::Even);
        assert_eq!(config.channel.flip_probability, 0.2);
        assert!(config.print_metrics);
        assert!(!config.print_config);
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_args(&args(&[
            "--message", "hi", "--mode", "odd", "--noise", "0.05", "--seed", "7",
        ]))
        .unwrap();
        assert_eq!(config.message, "hi");
        assert_eq!(config.mode, ParityMode::Odd);
        assert_eq!(config.channel.flip_probability, 0.05);
        assert_eq!(config.channel.seed, 7);
    }

    #[test]
    fn test_no_noise_flag() {
        let config = Config::from_args(&args(&["--no-noise"])).unwrap();
        assert_eq!(config.channel.flip_probability, 0.0);
    }

    #[test]
    fn test_crc_mode_parses_but_core_rejects_it() {
        // The flag parser accepts "crc" so the core can surface its own
        // UnsupportedMode error instead of the CLI masking it.
        let config = Config::from_args(&args(&["--mode", "crc"])).unwrap();
        assert_eq!(config.mode, ParityMode::Crc);
    }

    #[test]
    fn test_unknown_argument_rejected() {
        assert!(Config::from_args(&args(&["--bogus"])).is_err());
        assert!(Config::from_args(&args(&["--mode", "hamming"])).is_err());
        assert!(Config::from_args(&args(&["--noise"])).is_err());
    }
}
