use anyhow::Result;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::{ClassifyConfig, Config};
use crate::models::{Category, MediaFile};

/// Decide a file's category from its folder relative to the media root.
pub fn classify(folder: &str, classify: &ClassifyConfig) -> Category {
    let prefix = classify.terrestrial_prefix.trim_matches('/');
    let under_prefix = folder
        .strip_prefix(prefix)
        .map(|rest| rest.is_empty() || rest.starts_with('/'))
        .unwrap_or(false);

    if under_prefix {
        Category::Terrestrial
    } else if folder == classify.equipment_folder.trim_matches('/') {
        Category::Equipment
    } else {
        Category::Astrophotography
    }
}

/// List media files under every configured folder.
///
/// Folders that do not exist are skipped, as are entries that cannot be
/// read (with a warning on stderr). Results follow the configured folder
/// order, then filename order within a folder. The same filename may appear
/// more than once if it lives in several folders.
pub fn scan_media(config: &Config) -> Result<Vec<MediaFile>> {
    let media = &config.media;
    let root = &media.root;
    let exclude_set = media.exclude_set()?;
    let max_depth = if media.recursive { usize::MAX } else { 1 };

    let mut files = Vec::new();

    for folder in &media.folders {
        let dir = root.join(folder);
        if !dir.is_dir() {
            continue;
        }

        let walker = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name();
        for entry in walker {
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
            let is_media = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| media.is_media_extension(e))
                .unwrap_or(false);
            if !is_media {
                continue;
            }

            let relative = slash_path(path.strip_prefix(root).unwrap_or(path));
            if exclude_set.is_match(&relative) {
                continue;
            }

            let parent = path.parent().unwrap_or(root);
            let folder = slash_path(parent.strip_prefix(root).unwrap_or(parent));
            let filename = entry.file_name().to_string_lossy().to_string();

            files.push(MediaFile {
                category: classify(&folder, &config.classify),
                filename,
                folder,
                path: path.to_path_buf(),
            });
        }
    }

    Ok(files)
}

/// Relative path with `/` separators on every platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
