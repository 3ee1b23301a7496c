use std::path::PathBuf;
use thiserror::Error;

/// Run-level errors for the event-sessions pipeline.
///
/// Record-level problems never appear here: a malformed record becomes a
/// `SkippedEvent` and the run continues.
#[derive(Error, Debug)]
pub enum EventsError {
    /// The input file could not be opened or read.
    #[error("Failed to read input {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be created or written.
    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input bytes are not valid UTF-8 text.
    #[error("Input is not text (invalid UTF-8): {0}")]
    InvalidEncoding(PathBuf),

    /// A directory input contained no `.json` / `.jsonl` files.
    #[error("No event files found in {0}")]
    NoInputFiles(PathBuf),

    /// Pass-through for raw I/O errors that do not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EventsError>;
