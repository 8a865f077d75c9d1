pub mod bytes;
pub mod check;
pub mod info;

use randsource_core::{EntropySource, ReadPolicy, SourceConfig};

use crate::StrategyArgs;

/// Resolve the configuration a command should use.
///
/// An explicit `--device`/`--fallback` wins; otherwise the build-time
/// selection applies. Never falls back silently from one to the other.
pub fn resolve_config(args: &StrategyArgs) -> SourceConfig {
    if let Some(path) = &args.device {
        SourceConfig::Device { path: path.into() }
    } else if args.fallback {
        SourceConfig::Fallback { seed: args.seed }
    } else {
        SourceConfig::compiled()
    }
}

/// Build a source for the command, or exit on an invalid policy.
pub fn make_source(args: &StrategyArgs) -> EntropySource {
    let config = resolve_config(args);
    let mut source = EntropySource::from_config(&config);
    if let Some(n) = args.max_attempts {
        match ReadPolicy::new(n) {
            Ok(policy) => source = source.with_policy(policy),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        }
    }
    source
}
