//! File timestamp capture.
//!
//! The gallery sorts "latest captures" by when each image file was last
//! modified, which is lost once the site is built. This writes a JSON map of
//! image path (relative to the media root) to its file times.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileTimes {
    pub mtime: String,
    pub mtime_ms: i64,
    pub ctime: String,
    pub ctime_ms: i64,
    pub filename: String,
}

/// Walk `root` recursively and collect times for files with one of `extensions`.
///
/// Entries that cannot be read are reported on stderr and skipped.
pub fn capture(root: &Path, extensions: &[String]) -> BTreeMap<String, FileTimes> {
    let mut out = BTreeMap::new();

    for entry in WalkDir::new(root).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Warning: skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let wanted = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false);
        if !wanted {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Warning: cannot stat {}: {}", path.display(), e);
                continue;
            }
        };
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = metadata.created().unwrap_or(modified);

        let relative = path
            .strip_prefix(root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        out.insert(
            relative,
            FileTimes {
                mtime: iso_millis(modified),
                mtime_ms: epoch_millis(modified),
                ctime: iso_millis(created),
                ctime_ms: epoch_millis(created),
                filename: entry.file_name().to_string_lossy().to_string(),
            },
        );
    }

    out
}

fn iso_millis(t: SystemTime) -> String {
    DateTime::<Utc>::from(t).to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn epoch_millis(t: SystemTime) -> i64 {
    DateTime::<Utc>::from(t).timestamp_millis()
}

pub fn run_timestamps(config: &Config, output: Option<&Path>) -> Result<()> {
    let root = &config.media.root;
    if !root.is_dir() {
        anyhow::bail!("Media root does not exist: {}", root.display());
    }

    let times = capture(root, &config.timestamps.extensions);
    let path = output.unwrap_or(config.timestamps.output.as_path());

    let json = serde_json::to_string_pretty(&times)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write timestamps: {}", path.display()))?;

    println!("timestamps");
    println!("  files captured: {}", times.len());
    println!("  output: {}", path.display());
    println!("ok");
    Ok(())
}
