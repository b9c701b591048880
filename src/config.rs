//! TOML configuration.
//!
//! Only `[store].path` and `[media].root` are required; every other section
//! falls back to the site's standard folder layout.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub media: MediaConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Extra terrestrial folder slug → display location mappings.
    #[serde(default)]
    pub locations: BTreeMap<String, String>,
    #[serde(default)]
    pub timestamps: TimestampsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    pub root: PathBuf,
    #[serde(default = "default_folders")]
    pub folders: Vec<String>,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default = "default_media_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
}

fn default_folders() -> Vec<String> {
    [
        "astrophotography/featured",
        "astrophotography/deep-sky/galaxies",
        "astrophotography/deep-sky/nebulas",
        "astrophotography/deep-sky/star-clusters",
        "astrophotography/deep-sky/wide-field",
        "astrophotography/deep-sky/Hubble-Palette",
        "astrophotography/solar-system/solar",
        "astrophotography/solar-system/lunar",
        "astrophotography/solar-system/planets",
        "astrophotography/solar-system/events",
        "astrophotography/solar-system/events/total-eclipse-2017",
        "terrestrial/yellowstone",
        "terrestrial/grand-tetons",
        "equipment",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_media_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "avif", "webp", "mp4", "mov", "avi", "webm"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifyConfig {
    #[serde(default = "default_terrestrial_prefix")]
    pub terrestrial_prefix: String,
    #[serde(default = "default_equipment_folder")]
    pub equipment_folder: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            terrestrial_prefix: default_terrestrial_prefix(),
            equipment_folder: default_equipment_folder(),
        }
    }
}

fn default_terrestrial_prefix() -> String {
    "terrestrial".to_string()
}
fn default_equipment_folder() -> String {
    "equipment".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefaultsConfig {
    /// Observing site written into new astrophotography records.
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

fn default_location() -> String {
    "Maple Valley, WA".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimestampsConfig {
    #[serde(default = "default_timestamps_output")]
    pub output: PathBuf,
    #[serde(default = "default_timestamp_extensions")]
    pub extensions: Vec<String>,
}

impl Default for TimestampsConfig {
    fn default() -> Self {
        Self {
            output: default_timestamps_output(),
            extensions: default_timestamp_extensions(),
        }
    }
}

fn default_timestamps_output() -> PathBuf {
    PathBuf::from("src/data/file-timestamps.json")
}

fn default_timestamp_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif", "webp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl MediaConfig {
    /// Case-insensitive extension check (`"JPG"` matches `"jpg"`).
    pub fn is_media_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    pub fn exclude_set(&self) -> Result<GlobSet> {
        build_globset(&self.exclude_globs)
    }
}

pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            Glob::new(pattern).with_context(|| format!("Invalid exclude glob: '{}'", pattern))?,
        );
    }
    Ok(builder.build()?)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.store.path.as_os_str().is_empty() {
        anyhow::bail!("store.path must not be empty");
    }

    if config.media.folders.is_empty() {
        anyhow::bail!("media.folders must list at least one folder");
    }

    if config.media.extensions.is_empty() {
        anyhow::bail!("media.extensions must list at least one extension");
    }

    if config.classify.terrestrial_prefix.trim_matches('/').is_empty() {
        anyhow::bail!("classify.terrestrial_prefix must not be empty");
    }

    config.media.exclude_set()?;

    Ok(config)
}
