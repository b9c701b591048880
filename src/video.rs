//! Companion video links.
//!
//! Each record can carry one YouTube link and title, shown as a "watch"
//! button next to the image. These commands edit a single record and write
//! the store back. They work on protected records too: the edit is itself a
//! manual one.

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::models::{MetadataRecord, VideoLink};
use crate::store::{self, MetadataStore};

/// A single video edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoEdit {
    Add {
        filename: String,
        url: String,
        title: Option<String>,
    },
    Remove {
        filename: String,
    },
    Move {
        from: String,
        to: String,
        force: bool,
    },
}

/// Apply `edit` to the store in place; returns a one-line description.
pub fn apply(store: &mut MetadataStore, edit: &VideoEdit) -> Result<String> {
    match edit {
        VideoEdit::Add {
            filename,
            url,
            title,
        } => {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                bail!("Video link must be an http(s) URL, got '{}'", url);
            }
            let record = record_mut(store, filename)?;
            let mut video = record.video();
            video.link = url.clone();
            if let Some(title) = title {
                video.title = title.clone();
            }
            record.set_video(video);
            Ok(format!("linked {} -> {}", filename, url))
        }
        VideoEdit::Remove { filename } => {
            let record = record_mut(store, filename)?;
            if record.video().link.is_empty() {
                bail!("'{}' has no video link", filename);
            }
            record.set_video(VideoLink::default());
            Ok(format!("unlinked {}", filename))
        }
        VideoEdit::Move { from, to, force } => {
            if from == to {
                bail!("Source and target are the same record: '{}'", from);
            }
            let video = record_mut(store, from)?.video();
            if video.link.is_empty() {
                bail!("'{}' has no video link to move", from);
            }
            let target = record_mut(store, to)?;
            let existing = target.video();
            if !existing.link.is_empty() && !force {
                bail!(
                    "'{}' already links {}; pass --force to replace it",
                    to,
                    existing.link
                );
            }
            let link = video.link.clone();
            target.set_video(video);
            record_mut(store, from)?.set_video(VideoLink::default());
            Ok(format!("moved {} from {} to {}", link, from, to))
        }
    }
}

fn record_mut<'a>(
    store: &'a mut MetadataStore,
    filename: &str,
) -> Result<&'a mut MetadataRecord> {
    store
        .get_mut(filename)
        .with_context(|| format!("No metadata entry for '{}' (run a sync first?)", filename))
}

/// Load the store strictly, apply the edit, write it back.
pub fn run_video(config: &Config, edit: &VideoEdit) -> Result<()> {
    let path = &config.store.path;
    let mut store = store::load(path)?;
    let message = apply(&mut store, edit)?;
    store::save(path, &store)?;
    println!("{}", message);
    println!("ok");
    Ok(())
}
