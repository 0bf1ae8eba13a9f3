//! Logging utilities
//!
//! env_logger setup plus one-line summaries for the pipeline stages
//! (load, derive, fit, render).

use std::path::Path;
use std::time::Duration;

/// Initialize env_logger with info as the default level
///
/// Respects `RUST_LOG` when set.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// One-line stage summary shared by the helpers below
fn stage_line(stage: &str, detail: &str) -> String {
    format!("[{stage}] {detail}")
}

/// Log the start of a stage that reads from a path
pub fn stage_start(stage: &str, path: &Path) {
    log::info!("{}", stage_line(stage, &path.display().to_string()));
}

/// Log a completed stage with its record count and duration
pub fn stage_complete(stage: &str, records: usize, elapsed: Duration) {
    log::info!(
        "{}",
        stage_line(stage, &format!("{records} records in {elapsed:?}"))
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_line_format() {
        assert_eq!(stage_line("load", "extract.parquet"), "[load] extract.parquet");
        assert_eq!(
            stage_line("load", &format!("{} records in {:?}", 12, Duration::from_millis(5))),
            "[load] 12 records in 5ms"
        );
    }
}
