//! # randsource-core
//!
//! Pluggable entropy source for cryptographic code: acquire a randomness
//! channel, read exactly N bytes from it, release it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use randsource_core::EntropySource;
//!
//! // The strategy selected by this build's cargo features.
//! let mut source = EntropySource::compiled();
//! source.initialize()?;
//!
//! let mut key = [0u8; 32];
//! source.get_octet_string(&mut key, 32)?;
//!
//! source.shutdown()?;
//! # Ok::<(), randsource_core::Error>(())
//! ```
//!
//! ## Strategies
//!
//! Exactly one strategy backs a source, chosen at build or construction time
//! and never switched at runtime:
//! - **Device** ([`DeviceChannel`]): reads an OS entropy device such as
//!   `/dev/urandom`. Cryptographically strong.
//! - **Fallback** ([`FallbackChannel`]): a seeded non-cryptographic PRNG, the
//!   source of last resort. Check [`EntropySource::strength`] before using its
//!   output for anything adversarial.
//!
//! A failed read never hands back partial output: the requested region is
//! wiped and an error returned.

pub mod channel;
pub mod channels;
pub mod config;
pub mod error;
pub mod source;

pub use channel::{ChannelInfo, EntropyChannel, Strength};
pub use channels::{ChannelHandle, DeviceChannel, FallbackChannel, HandleState};
pub use config::{DEFAULT_DEVICE_PATH, DEFAULT_MAX_ATTEMPTS, ReadPolicy, SourceConfig};
pub use error::{Error, ErrorKind, InitError, ReadCause, ReadError, Result, ShutdownError};
pub use source::{EntropySource, SourceState};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
