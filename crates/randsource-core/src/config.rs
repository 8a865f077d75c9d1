//! Strategy selection and read policy.
//!
//! The strategy is fixed when the crate is compiled: the `device` feature
//! (default) selects the OS entropy device, `fallback` selects the PRNG of
//! last resort when `device` is off, and with neither there is no source.
//! The device path can be overridden at build time with `RANDSOURCE_DEVICE`.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::Error;

/// Device path compiled into this build.
pub const DEFAULT_DEVICE_PATH: &str = match option_env!("RANDSOURCE_DEVICE") {
    Some(path) => path,
    None => "/dev/urandom",
};

/// Default bound on read calls per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

/// Which entropy strategy an [`EntropySource`](crate::EntropySource) uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Read from an OS entropy device.
    Device { path: PathBuf },
    /// Non-cryptographic PRNG. `seed: None` seeds from the runtime.
    Fallback { seed: Option<u64> },
    /// No strategy; initialization fails with `SourceUnavailable`.
    Unavailable,
}

impl SourceConfig {
    /// The selection made by this build's cargo features.
    pub fn compiled() -> Self {
        if cfg!(feature = "device") {
            Self::Device {
                path: PathBuf::from(DEFAULT_DEVICE_PATH),
            }
        } else if cfg!(feature = "fallback") {
            Self::Fallback { seed: None }
        } else {
            Self::Unavailable
        }
    }

    /// Short name of the strategy, matching the channel names.
    pub fn strategy_name(&self) -> &'static str {
        match self {
            Self::Device { .. } => "device",
            Self::Fallback { .. } => "fallback",
            Self::Unavailable => "none",
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::compiled()
    }
}

/// How hard a read tries before giving up.
///
/// A request may issue at most `max_attempts` read calls. Short reads and
/// `Interrupted` continue with the remainder; end of stream and other I/O
/// errors fail immediately regardless of remaining attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadPolicy {
    max_attempts: u32,
}

impl ReadPolicy {
    pub fn new(max_attempts: u32) -> Result<Self, Error> {
        if max_attempts == 0 {
            return Err(Error::InvalidPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self { max_attempts })
    }

    /// Fail on the first short read, with no retry.
    pub fn strict() -> Self {
        Self { max_attempts: 1 }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for ReadPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_matches_features() {
        let cfg = SourceConfig::compiled();
        if cfg!(feature = "device") {
            assert_eq!(
                cfg,
                SourceConfig::Device {
                    path: PathBuf::from(DEFAULT_DEVICE_PATH)
                }
            );
        } else if cfg!(feature = "fallback") {
            assert_eq!(cfg, SourceConfig::Fallback { seed: None });
        } else {
            assert_eq!(cfg, SourceConfig::Unavailable);
        }
        assert_eq!(SourceConfig::default(), cfg);
    }

    #[test]
    fn strategy_names() {
        assert_eq!(SourceConfig::Unavailable.strategy_name(), "none");
        assert_eq!(
            SourceConfig::Fallback { seed: Some(1) }.strategy_name(),
            "fallback"
        );
        assert_eq!(
            SourceConfig::Device {
                path: PathBuf::from("/dev/random")
            }
            .strategy_name(),
            "device"
        );
    }

    #[test]
    fn zero_attempts_rejected() {
        assert!(ReadPolicy::new(0).is_err());
        assert_eq!(ReadPolicy::new(3).unwrap().max_attempts(), 3);
        assert_eq!(ReadPolicy::default().max_attempts(), DEFAULT_MAX_ATTEMPTS);
        assert_eq!(ReadPolicy::strict().max_attempts(), 1);
    }

    #[test]
    fn config_serializes_with_strategy_tag() {
        let json = serde_json::to_value(SourceConfig::Fallback { seed: Some(5) }).unwrap();
        assert_eq!(json["strategy"], "fallback");
        assert_eq!(json["seed"], 5);

        let json = serde_json::to_value(SourceConfig::Unavailable).unwrap();
        assert_eq!(json["strategy"], "unavailable");
    }
}
