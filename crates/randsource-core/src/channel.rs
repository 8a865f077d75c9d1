//! The capability every entropy strategy implements.
//!
//! An [`EntropyChannel`] is a raw byte producer with an open/close lifecycle.
//! It knows nothing about retries or lifecycle states; those live in
//! [`EntropySource`](crate::EntropySource), which drives a channel.

use std::io;

use serde::Serialize;

use crate::error::InitError;

/// How much an entropy channel can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    /// Suitable for key material and nonces.
    Cryptographic,
    /// Source of last resort. Fine for non-adversarial testing, never for keys.
    NonCryptographic,
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cryptographic => write!(f, "cryptographic"),
            Self::NonCryptographic => write!(f, "non-cryptographic"),
        }
    }
}

/// Metadata about an entropy channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelInfo {
    /// Unique identifier (e.g. `"device"`).
    pub name: &'static str,
    /// One-line human-readable description.
    pub description: &'static str,
    /// Trust level of the bytes this channel produces.
    pub strength: Strength,
}

/// Trait that every entropy strategy must implement.
pub trait EntropyChannel: Send {
    /// Channel metadata.
    fn info(&self) -> &ChannelInfo;

    /// Acquire the underlying resource. Must not acquire a second one if
    /// already open.
    fn open(&mut self) -> Result<(), InitError>;

    /// Whether [`read`](Self::read) may be called right now.
    fn is_ready(&self) -> bool;

    /// Read up to `dest.len()` bytes, like [`std::io::Read::read`].
    ///
    /// Short reads and `ErrorKind::Interrupted` are allowed; `Ok(0)` for a
    /// non-empty `dest` means the channel is exhausted.
    fn read(&mut self, dest: &mut [u8]) -> io::Result<usize>;

    /// Release the underlying resource. Returns `false` if nothing was open.
    fn close(&mut self) -> bool;

    /// Convenience: name from info.
    fn name(&self) -> &'static str {
        self.info().name
    }

    /// Convenience: strength from info.
    fn strength(&self) -> Strength {
        self.info().strength
    }
}

impl<C: EntropyChannel + ?Sized> EntropyChannel for Box<C> {
    fn info(&self) -> &ChannelInfo {
        (**self).info()
    }

    fn open(&mut self) -> Result<(), InitError> {
        (**self).open()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn read(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        (**self).read(dest)
    }

    fn close(&mut self) -> bool {
        (**self).close()
    }
}
