use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Build per-user session summaries from a raw user-event stream
#[derive(Parser, Debug, Clone)]
#[command(
    name = "event-sessions",
    about = "Validate, deduplicate, and sessionize user-event records",
    version
)]
pub struct Settings {
    /// Path to the events input: a file (JSON Lines, concatenated objects,
    /// or a JSON array), or a directory of .json/.jsonl files
    #[arg(long)]
    pub input: PathBuf,

    /// Output CSV for the per-user session summary
    #[arg(long, default_value = "sessions.csv")]
    pub out: PathBuf,

    /// Output CSV for skipped records
    #[arg(long = "skips_out", default_value = "skipped.csv")]
    pub skips_out: PathBuf,

    /// Include the raw-record preview column in the skipped CSV
    #[arg(long)]
    pub raw_preview: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
