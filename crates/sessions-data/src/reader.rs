//! Input loading for the pipeline.
//!
//! Accepts a single file or a directory; directories are scanned recursively
//! for `.json` / `.jsonl` files whose contents are concatenated into one
//! input text.

use std::path::{Path, PathBuf};

use sessions_core::error::{EventsError, Result};
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.json` / `.jsonl` files recursively under `dir`, sorted by path.
pub fn find_event_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json" || ext == "jsonl")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Read the raw input text for one run.
///
/// * file path → the file's contents;
/// * directory path → every discovered event file, newline-joined in sorted
///   order, or [`EventsError::NoInputFiles`] when none match.
///
/// Unreadable paths and non-UTF-8 contents are fatal; everything past this
/// point is record-level and recoverable.
pub fn read_input(path: &Path) -> Result<String> {
    if !path.is_dir() {
        return read_text_file(path);
    }

    let files = find_event_files(path);
    if files.is_empty() {
        return Err(EventsError::NoInputFiles(path.to_path_buf()));
    }
    debug!("Reader: {} event files under {}", files.len(), path.display());

    let mut combined = String::new();
    for file in &files {
        combined.push_str(&read_text_file(file)?);
        combined.push('\n');
    }
    Ok(combined)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn read_text_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| EventsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| EventsError::InvalidEncoding(path.to_path_buf()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
