mod bootstrap;

use anyhow::Result;
use clap::Parser;
use sessions_core::settings::Settings;
use sessions_data::analysis::process_path;
use sessions_data::report::{write_sessions_csv, write_skipped_csv};

fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("event-sessions v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Input: {}", settings.input.display());

    // Run-level failures (unreadable path, non-text input) exit nonzero here;
    // malformed records land in the skipped CSV instead.
    let result = process_path(&settings.input)?;

    write_sessions_csv(&settings.out, &result.sessions)?;
    write_skipped_csv(&settings.skips_out, &result.skipped, settings.raw_preview)?;

    tracing::info!(
        "Wrote {} sessions to {} and {} skipped records to {}",
        result.sessions.len(),
        settings.out.display(),
        result.skipped.len(),
        settings.skips_out.display()
    );

    let stats = &result.stats;
    println!("total_events: {}", stats.total_events);
    println!("valid_events: {}", stats.valid_events);
    println!("skipped_events: {}", stats.skipped_events);
    println!("duplicates_removed: {}", stats.duplicates_removed);
    println!("unique_users: {}", stats.unique_users);

    Ok(())
}
