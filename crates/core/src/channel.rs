//! Simulated noisy transmission channel.
//!
//! The channel flips each payload bit independently with a configured
//! probability, modeling random transmission errors. There is no real
//! transport: transmission is a local, total transformation that always
//! returns a stream of the same length.
//!
//! # Determinism
//!
//! All randomness comes from a seeded ChaCha8 RNG owned by the channel.
//! Given the same seed and input, the corruption pattern is bit-identical,
//! so every run is reproducible and independently testable.

use crate::bitstream::Bitstream;
use crate::error::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration for the simulated channel.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    /// Independent per-bit flip probability, in [0.0, 1.0)
    pub flip_probability: f64,

    /// Random seed for determinism
    pub seed: u64,
}

impl ChannelConfig {
    /// A channel with no impairments (identity channel).
    pub fn noiseless(seed: u64) -> Self {
        Self {
            flip_probability: 0.0,
            seed,
        }
    }

    /// The default moderately noisy channel (20% flip rate, the classic
    /// classroom setting).
    pub fn default_with_seed(seed: u64) -> Self {
        Self {
            flip_probability: 0.2,
            seed,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// `Error::Config` if the flip probability is outside [0.0, 1.0).
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.flip_probability) {
            return Err(Error::Config(format!(
                "flip probability must be in [0.0, 1.0), got {}",
                self.flip_probability
            )));
        }
        Ok(())
    }
}

/// Simulated channel that corrupts bitstreams with seeded randomness.
///
/// # Thread Safety
/// Not thread-safe; use one instance per run.
pub struct NoisyChannel {
    config: ChannelConfig,
    rng: ChaCha8Rng,

    // Statistics
    bits_sent: u64,
    bits_flipped: u64,
}

impl NoisyChannel {
    /// Create a channel from a validated configuration.
    ///
    /// # Errors
    /// `Error::Config` if the configuration is invalid.
    pub fn new(config: ChannelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            bits_sent: 0,
            bits_flipped: 0,
        })
    }

    /// Transmit a bitstream, flipping each bit independently with the
    /// configured probability.
    ///
    /// Always succeeds and always returns a stream of the same length.
    /// A probability of 0 passes the stream through unchanged (though the
    /// RNG is still advanced once per bit, keeping runs comparable across
    /// probabilities at the same seed).
    pub fn transmit(&mut self, stream: &Bitstream) -> Bitstream {
        let mut corrupted = Vec::with_capacity(stream.len());
        let mut flipped_here = 0u64;

        for bit in stream.iter() {
            let roll: f64 = self.rng.gen();
            if roll < self.config.flip_probability {
                corrupted.push(!bit);
                flipped_here += 1;
            } else {
                corrupted.push(bit);
            }
        }

        self.bits_sent += stream.len() as u64;
        self.bits_flipped += flipped_here;

        if flipped_here > 0 {
            log::debug!(
                "channel flipped {} of {} bits (p = {})",
                flipped_here,
                stream.len(),
                self.config.flip_probability
            );
        }

        Bitstream::from_bits(corrupted)
    }

    /// Get statistics about channel behavior.
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            bits_sent: self.bits_sent,
            bits_flipped: self.bits_flipped,
        }
    }
}

/// Statistics about channel behavior.
#[derive(Debug, Clone, Copy)]
pub struct ChannelStats {
    /// Total bits passed through the channel
    pub bits_sent: u64,

    /// Bits the channel inverted
    pub bits_flipped: u64,
}

impl ChannelStats {
    /// Observed flip rate (flipped / sent).
    pub fn flip_rate(&self) -> f64 {
        if self.bits_sent == 0 {
            0.0
        } else {
            self.bits_flipped as f64 / self.bits_sent as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream::encode;

    #[test]
    fn test_noiseless_channel_is_identity() {
        let mut channel = NoisyChannel::new(ChannelConfig::noiseless(42)).unwrap();
        let stream = encode(b"hello world");

        let received = channel.transmit(&stream);
        assert_eq!(received, stream);

        let stats = channel.stats();
        assert_eq!(stats.bits_sent, 88);
        assert_eq!(stats.bits_flipped, 0);
        assert_eq!(stats.flip_rate(), 0.0);
    }

    #[test]
    fn test_length_preserved() {
        let config = ChannelConfig {
            flip_probability: 0.5,
            seed: 7,
        };
        let mut channel = NoisyChannel::new(config).unwrap();
        let stream = encode(b"some message of moderate length");

        let received = channel.transmit(&stream);
        assert_eq!(received.len(), stream.len());
    }

    #[test]
    fn test_flip_rate_roughly_matches_probability() {
        let config = ChannelConfig {
            flip_probability: 0.25,
            seed: 42,
        };
        let mut channel = NoisyChannel::new(config).unwrap();

        // 8000 bits: enough for the observed rate to settle near p.
        let stream = encode(&vec![0xA5u8; 1000]);
        let received = channel.transmit(&stream);

        let rate = channel.stats().flip_rate();
        assert!(rate > 0.18 && rate < 0.32, "flip rate {} far from 0.25", rate);
        assert_eq!(
            stream.distance(&received) as u64,
            channel.stats().bits_flipped
        );
    }

    #[test]
    fn test_determinism() {
        let config = ChannelConfig {
            flip_probability: 0.3,
            seed: 12345,
        };
        let stream = encode(b"determinism check");

        let mut channel1 = NoisyChannel::new(config).unwrap();
        let mut channel2 = NoisyChannel::new(config).unwrap();

        assert_eq!(channel1.transmit(&stream), channel2.transmit(&stream));
    }

    #[test]
    fn test_different_seeds_differ() {
        let stream = encode(&vec![0x42u8; 64]);

        let mut channel1 = NoisyChannel::new(ChannelConfig {
            flip_probability: 0.3,
            seed: 1,
        })
        .unwrap();
        let mut channel2 = NoisyChannel::new(ChannelConfig {
            flip_probability: 0.3,
            seed: 2,
        })
        .unwrap();

        assert_ne!(channel1.transmit(&stream), channel2.transmit(&stream));
    }

    #[test]
    fn test_invalid_probability_rejected() {
        for p in [1.0, 1.5, -0.1] {
            let config = ChannelConfig {
                flip_probability: p,
                seed: 0,
            };
            assert!(NoisyChannel::new(config).is_err(), "p = {} accepted", p);
        }
    }
}
