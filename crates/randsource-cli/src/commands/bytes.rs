use std::io::Write;

use randsource_core::EntropySource;

use crate::StrategyArgs;

pub fn run(count: u32, format: &str, strategy: &StrategyArgs) -> i32 {
    let mut source = super::make_source(strategy);
    match draw(&mut source, count) {
        Ok(data) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let result = match format {
                "raw" => out.write_all(&data),
                _ => writeln!(out, "{}", to_hex(&data)),
            };
            if result.is_err() {
                return 1; // Broken pipe
            }
            let _ = out.flush();
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Full lifecycle: initialize, read `count` bytes, shut down.
pub fn draw(source: &mut EntropySource, count: u32) -> randsource_core::Result<Vec<u8>> {
    source.initialize()?;
    let mut data = vec![0u8; count as usize];
    source.get_octet_string(&mut data, count)?;
    if let Err(e) = source.shutdown() {
        // Only reachable for channels that had nothing to release.
        log::debug!("shutdown: {e}");
    }
    Ok(data)
}

pub fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{b:02x}")).collect()
}
