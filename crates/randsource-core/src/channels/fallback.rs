//! FallbackChannel — non-cryptographic PRNG of last resort.
//!
//! Used only when the build selects no OS device. Each output byte is the low
//! 8 bits of a fresh 32-bit generator value. The generator is fast and
//! statistically reasonable, but predictable to anyone who learns its state:
//! never use it for key material.

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::channel::{ChannelInfo, EntropyChannel, Strength};
use crate::error::InitError;

static FALLBACK_INFO: ChannelInfo = ChannelInfo {
    name: "fallback",
    description: "Non-cryptographic PRNG seeded by the runtime (last resort)",
    strength: Strength::NonCryptographic,
};

/// Entropy channel backed by a seeded non-cryptographic generator.
pub struct FallbackChannel {
    rng: SmallRng,
    warned: bool,
}

impl FallbackChannel {
    /// Seed from the runtime (OS random if reachable, clock and pid otherwise).
    pub fn new() -> Self {
        Self::with_seed(runtime_seed())
    }

    /// Fixed seed, for reproducible tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            warned: false,
        }
    }
}

impl Default for FallbackChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FallbackChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Generator state stays out of logs.
        f.debug_struct("FallbackChannel").finish_non_exhaustive()
    }
}

impl EntropyChannel for FallbackChannel {
    fn info(&self) -> &ChannelInfo {
        &FALLBACK_INFO
    }

    fn open(&mut self) -> Result<(), InitError> {
        if !self.warned {
            log::warn!(
                "using fallback PRNG as entropy source: output is NOT cryptographically strong"
            );
            self.warned = true;
        }
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn read(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        for b in dest.iter_mut() {
            *b = (self.rng.next_u32() & 0xff) as u8;
        }
        Ok(dest.len())
    }

    fn close(&mut self) -> bool {
        true
    }
}

/// Seed for the fallback generator.
///
/// Prefers the OS CSPRNG via `getrandom`; if that is unreachable, mixes the
/// wall clock with the process id so separate runs still diverge.
pub fn runtime_seed() -> u64 {
    match getrandom::u64() {
        Ok(seed) => seed,
        Err(e) => {
            log::debug!("getrandom unavailable for fallback seed ({e}); using clock and pid");
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos() as u64;
            nanos ^ (u64::from(std::process::id()) << 32)
        }
    }
}
