use randsource_core::{EntropySource, ErrorKind};

use crate::StrategyArgs;

/// Outcome of one lifecycle step.
#[derive(Debug)]
pub struct StepResult {
    pub step: &'static str,
    pub kind: Option<ErrorKind>,
    pub detail: String,
}

impl StepResult {
    fn ok(step: &'static str, detail: String) -> Self {
        Self {
            step,
            kind: None,
            detail,
        }
    }

    fn failed(step: &'static str, kind: ErrorKind, detail: String) -> Self {
        Self {
            step,
            kind: Some(kind),
            detail,
        }
    }

    /// A real fault, as opposed to success or an informational result.
    pub fn is_fatal(&self) -> bool {
        self.kind.is_some_and(|k| !k.is_informational())
    }
}

/// Run initialize → get_octet_string → shutdown, recording every step.
///
/// Steps after a fatal initialize are still attempted so their failure mode
/// is visible.
pub fn run_steps(source: &mut EntropySource, count: u32) -> Vec<StepResult> {
    let mut steps = Vec::with_capacity(3);

    steps.push(match source.initialize() {
        Ok(()) => StepResult::ok("initialize", format!("state {}", source.state())),
        Err(e) => StepResult::failed("initialize", e.kind(), e.to_string()),
    });

    let mut buf = vec![0u8; count as usize];
    steps.push(match source.get_octet_string(&mut buf, count) {
        Ok(()) => StepResult::ok("get_octet_string", format!("{count} bytes")),
        Err(e) => StepResult::failed("get_octet_string", e.kind(), e.to_string()),
    });

    steps.push(match source.shutdown() {
        Ok(()) => StepResult::ok("shutdown", format!("state {}", source.state())),
        Err(e) => StepResult::failed("shutdown", e.kind(), e.to_string()),
    });

    steps
}

pub fn run(count: u32, strategy: &StrategyArgs) -> i32 {
    let mut source = super::make_source(strategy);
    println!(
        "Checking '{}' entropy source ({})\n",
        source.strategy_name(),
        source
            .strength()
            .map_or_else(|| "no strength".to_string(), |s| s.to_string())
    );

    let steps = run_steps(&mut source, count);
    for s in &steps {
        let (mark, kind) = match s.kind {
            None => ("\u{2713}", String::new()),
            Some(k) if k.is_informational() => ("i", format!(" [{k}]")),
            Some(k) => ("\u{2717}", format!(" [{k}]")),
        };
        println!("  {mark} {:<18}{kind} {}", s.step, s.detail);
    }

    if steps.iter().any(StepResult::is_fatal) { 1 } else { 0 }
}
