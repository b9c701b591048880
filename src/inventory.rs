//! Store inventory and health overview.
//!
//! Summarizes what the store holds and how it lines up with the media tree:
//! per-folder file counts, per-category records, protection and video
//! coverage, and anything a sync would create or delete. Read-only.

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog;
use crate::config::Config;
use crate::models::{MediaFile, MetadataRecord};
use crate::scan;
use crate::store::{self, MetadataStore};

/// Everything the report prints, computed without touching stdout.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub files_by_folder: Vec<(String, usize)>,
    pub records_by_category: BTreeMap<&'static str, usize>,
    /// Astrophotography records per catalog object class.
    pub astro_by_kind: BTreeMap<&'static str, usize>,
    pub protected: usize,
    pub with_video: usize,
    pub astro_missing_designation: Vec<String>,
    /// Live files with no record yet.
    pub unsynced: Vec<String>,
    /// Records whose file is gone.
    pub orphaned: Vec<String>,
}

pub fn build_inventory(files: &[MediaFile], store: &MetadataStore) -> Inventory {
    let mut inv = Inventory::default();

    // Scan output is grouped by folder already.
    for file in files {
        let same_folder = inv
            .files_by_folder
            .last()
            .map(|(folder, _)| *folder == file.folder)
            .unwrap_or(false);
        if same_folder {
            if let Some((_, count)) = inv.files_by_folder.last_mut() {
                *count += 1;
            }
        } else {
            inv.files_by_folder.push((file.folder.clone(), 1));
        }
    }

    for (filename, record) in &store.records {
        let label = record.category().map(|c| c.label()).unwrap_or("unrecognized");
        *inv.records_by_category.entry(label).or_insert(0) += 1;

        if record.is_protected() {
            inv.protected += 1;
        }
        if !record.video().link.is_empty() {
            inv.with_video += 1;
        }
        if let MetadataRecord::Astro(r) = record {
            if r.catalog_designation.is_empty() {
                inv.astro_missing_designation.push(filename.clone());
            }
            let kind = catalog::kind_of(&r.catalog_designation)
                .map(|k| k.label())
                .unwrap_or("uncataloged");
            *inv.astro_by_kind.entry(kind).or_insert(0) += 1;
        }
    }

    let live: BTreeSet<&str> = files.iter().map(|f| f.filename.as_str()).collect();
    inv.unsynced = live
        .iter()
        .filter(|f| !store.contains(f))
        .map(|f| f.to_string())
        .collect();
    inv.orphaned = store
        .records
        .keys()
        .filter(|k| !live.contains(k.as_str()))
        .cloned()
        .collect();

    inv
}

/// Run the inventory command: scan, load and print a summary.
pub fn run_inventory(config: &Config) -> Result<()> {
    let files = scan::scan_media(config)?;
    let path = &config.store.path;
    let store = if path.exists() {
        store::load(path)?
    } else {
        MetadataStore::default()
    };
    let inv = build_inventory(&files, &store);

    let meta = std::fs::metadata(path).ok();
    let size = meta.as_ref().map(|m| m.len()).unwrap_or(0);
    let written = meta
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| format_ts_relative(d.as_secs() as i64))
        .unwrap_or_else(|| "never".to_string());

    println!("Gallery metadata inventory");
    println!("==========================");
    println!();
    println!("  Store:       {}", path.display());
    println!("  Size:        {}", format_bytes(size));
    println!("  Written:     {}", written);
    println!("  Media root:  {}", config.media.root.display());
    println!();
    println!("  Files:       {}", files.len());
    println!("  Entries:     {}", store.len());
    println!("  Protected:   {}", inv.protected);
    println!("  With video:  {}", inv.with_video);

    if !inv.files_by_folder.is_empty() {
        println!();
        println!("  By folder:");
        println!("  {:<56} {:>6}", "FOLDER", "FILES");
        println!("  {}", "-".repeat(63));
        for (folder, count) in &inv.files_by_folder {
            println!("  {:<56} {:>6}", folder, count);
        }
    }

    if !inv.records_by_category.is_empty() {
        println!();
        println!("  By category:");
        for (label, count) in &inv.records_by_category {
            println!("  {:<24} {:>6}", label, count);
        }
    }

    if !inv.astro_by_kind.is_empty() {
        println!();
        println!("  By object type:");
        for (label, count) in &inv.astro_by_kind {
            println!("  {:<24} {:>6}", label, count);
        }
    }

    print_list("Astrophotography without catalog designation", &inv.astro_missing_designation);
    print_list("Files without an entry (run sync)", &inv.unsynced);
    print_list("Entries without a file (sync will remove)", &inv.orphaned);

    println!();
    Ok(())
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("  {} ({}):", heading, items.len());
    for item in items {
        println!("    {}", item);
    }
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_ts_relative(ts: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let delta = now - ts;

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_ts_iso(ts)
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
