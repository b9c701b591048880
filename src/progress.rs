//! Per-record sync events.
//!
//! A sync reports what it does to each record (added, updated, removed, ...)
//! through a [`SyncReporter`]. Events go to **stderr** so the summary printed
//! on stdout stays parseable for scripts.

use std::io::Write;

use crate::models::Category;

/// A single thing that happened (or would happen, on a dry run) during a sync.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncEvent {
    /// Store could not be loaded; the sync starts from an empty store.
    StoreReset { reason: String },
    /// Backing file is gone; the record is deleted.
    Removed { filename: String },
    /// First time this file is seen.
    Added {
        filename: String,
        category: Category,
        folder: String,
    },
    /// An unprotected record had empty or generated fields refilled.
    Updated {
        filename: String,
        category: Category,
        fields: Vec<&'static str>,
    },
    /// Record is protected and was left alone.
    Preserved { filename: String },
    /// Same filename found again in a later folder; ignored.
    Duplicate {
        filename: String,
        folder: String,
        first_folder: String,
    },
}

/// Receives sync events. Implementations write to stderr (human or JSON).
pub trait SyncReporter: Send + Sync {
    fn report(&self, event: SyncEvent);
}

/// Human-friendly lines on stderr: "added  M42.jpg  (astrophotography in astrophotography/featured)".
pub struct StderrProgress;

impl SyncReporter for StderrProgress {
    fn report(&self, event: SyncEvent) {
        let line = match &event {
            SyncEvent::StoreReset { reason } => {
                format!("store    could not load existing metadata, starting fresh ({})\n", reason)
            }
            SyncEvent::Removed { filename } => format!("removed  {}  (file no longer exists)\n", filename),
            SyncEvent::Added {
                filename,
                category,
                folder,
            } => format!("added    {}  ({} in {})\n", filename, category, folder),
            SyncEvent::Updated {
                filename,
                category,
                fields,
            } => format!("updated  {}  ({}: {})\n", filename, category, fields.join(", ")),
            SyncEvent::Preserved { filename } => format!("kept     {}  (protected)\n", filename),
            SyncEvent::Duplicate {
                filename,
                folder,
                first_folder,
            } => format!(
                "skipped  {}  (in {}, already seen in {})\n",
                filename, folder, first_folder
            ),
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable events: one JSON object per line on stderr.
pub struct JsonProgress;

impl SyncReporter for JsonProgress {
    fn report(&self, event: SyncEvent) {
        let obj = match &event {
            SyncEvent::StoreReset { reason } => serde_json::json!({
                "event": "store_reset",
                "reason": reason
            }),
            SyncEvent::Removed { filename } => serde_json::json!({
                "event": "removed",
                "filename": filename
            }),
            SyncEvent::Added {
                filename,
                category,
                folder,
            } => serde_json::json!({
                "event": "added",
                "filename": filename,
                "category": category.label(),
                "folder": folder
            }),
            SyncEvent::Updated {
                filename,
                category,
                fields,
            } => serde_json::json!({
                "event": "updated",
                "filename": filename,
                "category": category.label(),
                "fields": fields
            }),
            SyncEvent::Preserved { filename } => serde_json::json!({
                "event": "preserved",
                "filename": filename
            }),
            SyncEvent::Duplicate {
                filename,
                folder,
                first_folder,
            } => serde_json::json!({
                "event": "duplicate",
                "filename": filename,
                "folder": folder,
                "first_folder": first_folder
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl SyncReporter for NoProgress {
    fn report(&self, _event: SyncEvent) {}
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Parse a `--progress` value; `auto` defers to [`ProgressMode::default_for_tty`].
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "auto" => Ok(Self::default_for_tty()),
            "human" => Ok(ProgressMode::Human),
            "json" => Ok(ProgressMode::Json),
            "off" => Ok(ProgressMode::Off),
            other => Err(format!(
                "unknown progress mode '{}': expected auto, human, json or off",
                other
            )),
        }
    }

    pub fn reporter(&self) -> Box<dyn SyncReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
