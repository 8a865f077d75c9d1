//! The entropy source lifecycle.
//!
//! [`EntropySource`] owns exactly one [`EntropyChannel`] (or none, when no
//! strategy is available) and drives it through
//! `Uninitialized → Open → Closed`. Instances are explicitly owned and passed
//! to whatever needs randomness; there is no process-wide global, so real and
//! mock sources can coexist in one process.

use serde::Serialize;
use zeroize::Zeroize;

use crate::channel::{EntropyChannel, Strength};
use crate::channels::{DeviceChannel, FallbackChannel};
use crate::config::{ReadPolicy, SourceConfig};
use crate::error::{InitError, ReadCause, ReadError, ShutdownError};

/// Lifecycle state of an [`EntropySource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceState {
    Uninitialized,
    Open,
    Closed,
    Failed,
}

impl std::fmt::Display for SourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// An entropy source bound to one strategy for its whole life.
///
/// Not internally synchronized. Lifecycle calls take `&mut self`; to share an
/// instance across threads wrap it in a `Mutex`.
pub struct EntropySource<C = Box<dyn EntropyChannel>> {
    channel: Option<C>,
    state: SourceState,
    policy: ReadPolicy,
}

impl<C: EntropyChannel> EntropySource<C> {
    /// Source over the given channel, in the `Uninitialized` state.
    pub fn new(channel: C) -> Self {
        Self {
            channel: Some(channel),
            state: SourceState::Uninitialized,
            policy: ReadPolicy::default(),
        }
    }

    /// Replace the read retry policy.
    pub fn with_policy(mut self, policy: ReadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn policy(&self) -> ReadPolicy {
        self.policy
    }

    pub fn channel(&self) -> Option<&C> {
        self.channel.as_ref()
    }

    /// Strategy name, or `"none"` when no strategy is available.
    pub fn strategy_name(&self) -> &'static str {
        self.channel.as_ref().map_or("none", |c| c.name())
    }

    /// Strength of the bound channel, `None` when no strategy is available.
    pub fn strength(&self) -> Option<Strength> {
        self.channel.as_ref().map(|c| c.strength())
    }

    /// Acquire the entropy channel.
    ///
    /// Calling this on an `Open` source is a no-op. A `Closed` or `Failed`
    /// source cannot be reopened and reports [`InitError::Retired`].
    pub fn initialize(&mut self) -> Result<(), InitError> {
        match self.state {
            SourceState::Open => {
                log::debug!("entropy source already open");
                return Ok(());
            }
            SourceState::Closed | SourceState::Failed => return Err(InitError::Retired),
            SourceState::Uninitialized => {}
        }

        let Some(channel) = self.channel.as_mut() else {
            self.state = SourceState::Failed;
            return Err(InitError::SourceUnavailable);
        };

        match channel.open() {
            Ok(()) => {
                self.state = SourceState::Open;
                Ok(())
            }
            Err(e) => {
                self.state = SourceState::Failed;
                Err(e)
            }
        }
    }

    /// Fill `dest[..length]` with entropy.
    ///
    /// Either all `length` bytes are written and `Ok(())` is returned, or an
    /// error is returned and the requested region is wiped. `length == 0`
    /// always succeeds without touching `dest` or the channel.
    pub fn get_octet_string(&mut self, dest: &mut [u8], length: u32) -> Result<(), ReadError> {
        let requested = length as usize;
        if requested == 0 {
            return Ok(());
        }
        if dest.len() < requested {
            return Err(ReadError::BufferTooSmall {
                requested,
                capacity: dest.len(),
            });
        }
        self.fill(&mut dest[..requested])
    }

    /// Fill all of `dest`. Same guarantees as [`get_octet_string`](Self::get_octet_string).
    pub fn fill(&mut self, dest: &mut [u8]) -> Result<(), ReadError> {
        if dest.is_empty() {
            return Ok(());
        }
        let channel = self.channel.as_mut().ok_or(ReadError::SourceUnavailable)?;
        if !channel.is_ready() {
            return Err(ReadError::NotOpen);
        }
        read_exact_bounded(channel, dest, self.policy)
    }

    /// Release the entropy channel.
    ///
    /// If nothing was ever opened this returns the informational
    /// [`ShutdownError::DeallocationFailure`]; nothing is released twice.
    pub fn shutdown(&mut self) -> Result<(), ShutdownError> {
        let released = self.channel.as_mut().is_some_and(|c| c.close());
        if !released {
            log::debug!("shutdown on entropy source in state {}: nothing to release", self.state);
            return Err(ShutdownError::DeallocationFailure);
        }
        if self.state == SourceState::Open {
            self.state = SourceState::Closed;
        }
        Ok(())
    }
}

impl EntropySource {
    /// Source with no strategy. `initialize` fails with `SourceUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            channel: None,
            state: SourceState::Uninitialized,
            policy: ReadPolicy::default(),
        }
    }

    /// Build a source for an explicit configuration.
    pub fn from_config(config: &SourceConfig) -> Self {
        match config {
            SourceConfig::Device { path } => Self::new(Box::new(DeviceChannel::new(path))),
            SourceConfig::Fallback { seed: Some(seed) } => {
                Self::new(Box::new(FallbackChannel::with_seed(*seed)))
            }
            SourceConfig::Fallback { seed: None } => Self::new(Box::new(FallbackChannel::new())),
            SourceConfig::Unavailable => Self::unavailable(),
        }
    }

    /// Build the source selected by this build's cargo features.
    pub fn compiled() -> Self {
        Self::from_config(&SourceConfig::compiled())
    }
}

impl<C> std::fmt::Debug for EntropySource<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntropySource")
            .field("has_channel", &self.channel.is_some())
            .field("state", &self.state)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Read exactly `dest.len()` bytes, retrying short and interrupted reads
/// within the policy's attempt budget. Wipes `dest` on failure.
fn read_exact_bounded<C: EntropyChannel + ?Sized>(
    channel: &mut C,
    dest: &mut [u8],
    policy: ReadPolicy,
) -> Result<(), ReadError> {
    let requested = dest.len();
    let mut filled = 0usize;
    let mut attempts = 0u32;

    let outcome = loop {
        if filled == requested {
            break Ok(());
        }
        if attempts == policy.max_attempts() {
            break Err(ReadCause::AttemptsExhausted { attempts });
        }
        attempts += 1;

        match channel.read(&mut dest[filled..]) {
            Ok(0) => break Err(ReadCause::Exhausted),
            Ok(n) => {
                filled += n.min(requested - filled);
                if filled < requested {
                    log::debug!("short entropy read: {filled}/{requested} after {attempts} attempt(s)");
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                log::debug!("entropy read interrupted at {filled}/{requested}, retrying");
            }
            Err(e) => break Err(ReadCause::Io(e)),
        }
    };

    outcome.map_err(|cause| {
        dest.zeroize();
        ReadError::ReadFailure {
            requested,
            filled,
            cause,
        }
    })
}
