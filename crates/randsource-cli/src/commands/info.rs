use randsource_core::{EntropySource, ReadPolicy, SourceConfig, Strength};
use serde::Serialize;

#[derive(Serialize)]
struct InfoReport {
    version: &'static str,
    config: SourceConfig,
    strategy: &'static str,
    strength: Option<Strength>,
    description: Option<&'static str>,
    max_attempts: u32,
}

fn build_report() -> InfoReport {
    let config = SourceConfig::compiled();
    let source = EntropySource::from_config(&config);
    InfoReport {
        version: randsource_core::VERSION,
        strategy: source.strategy_name(),
        strength: source.strength(),
        description: source.channel().map(|c| c.info().description),
        max_attempts: ReadPolicy::default().max_attempts(),
        config,
    }
}

pub fn run(json: bool) -> i32 {
    let report = build_report();

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: failed to encode report: {e}");
                return 1;
            }
        }
        return 0;
    }

    println!("randsource {}", report.version);
    println!();
    println!("  Strategy:     {}", report.strategy);
    match &report.config {
        SourceConfig::Device { path } => println!("  Device:       {}", path.display()),
        SourceConfig::Fallback { .. } => println!("  Device:       (none, fallback PRNG)"),
        SourceConfig::Unavailable => println!("  Device:       (none)"),
    }
    match report.strength {
        Some(strength) => println!("  Strength:     {strength}"),
        None => println!("  Strength:     n/a (no entropy source compiled in)"),
    }
    if let Some(desc) = report.description {
        println!("  Description:  {desc}");
    }
    println!("  Max attempts: {}", report.max_attempts);

    if report.strength == Some(Strength::NonCryptographic) {
        println!();
        println!("  \u{26A0}\u{FE0F}  Fallback output is NOT suitable for key material.");
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_matches_compiled_config() {
        let report = build_report();
        assert_eq!(report.config, SourceConfig::compiled());
        assert_eq!(report.strategy, report.config.strategy_name());
        assert_eq!(report.max_attempts, randsource_core::DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn report_serializes() {
        let json = serde_json::to_value(build_report()).unwrap();
        assert_eq!(json["version"], randsource_core::VERSION);
        assert!(json["config"]["strategy"].is_string());
    }
}
