//! Core data models.
//!
//! [`MediaFile`] is what a scan discovers; [`MetadataRecord`] is what the store
//! persists per filename. The JSON shape of each record variant is consumed by
//! the gallery site and must stay stable.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// Which record shape a file gets, decided once from its scan folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Astrophotography,
    Terrestrial,
    Equipment,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Astrophotography => "astrophotography",
            Category::Terrestrial => "terrestrial",
            Category::Equipment => "equipment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A media file found under one of the scan folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub filename: String,
    /// Scan folder relative to the media root, `/`-separated.
    pub folder: String,
    pub path: PathBuf,
    pub category: Category,
}

impl MediaFile {
    /// Last segment of the scan folder (`"terrestrial/yellowstone"` → `"yellowstone"`).
    pub fn folder_leaf(&self) -> &str {
        self.folder.rsplit('/').next().unwrap_or(&self.folder)
    }
}

/// Metadata for a deep-sky or solar-system image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstroRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub catalog_designation: String,
    #[serde(deserialize_with = "lenient_string")]
    pub object_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub equipment: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub exposure: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub protected: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub youtube_link: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub youtube_title: String,
    /// Keys added by hand that this tool does not know about.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata for a gear photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub equipment_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub equipment_info: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub protected: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub youtube_link: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub youtube_title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata for a landscape/travel photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrestrialRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub protected: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub youtube_link: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub youtube_title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Hand-edited stores sometimes carry `"exposure": 300` or `"equipment": null`.
/// Read scalars as their string form and null as empty so such a record keeps
/// its shape instead of falling through to [`MetadataRecord::Other`].
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string, got {}",
            other
        ))),
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) => Ok(s.trim().eq_ignore_ascii_case("true")),
        Value::Number(n) => Ok(n.as_f64().map(|v| v != 0.0).unwrap_or(false)),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean, got {}",
            other
        ))),
    }
}

/// One entry of the metadata store.
///
/// The variant is recognized from the keys present: `catalogDesignation`
/// means astrophotography, `equipmentName` equipment, `name` terrestrial.
/// Anything else is carried through untouched as [`MetadataRecord::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataRecord {
    Astro(AstroRecord),
    Equipment(EquipmentRecord),
    Terrestrial(TerrestrialRecord),
    Other(Map<String, Value>),
}

/// Companion YouTube video attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoLink {
    pub link: String,
    pub title: String,
}

impl VideoLink {
    pub fn is_empty(&self) -> bool {
        self.link.is_empty() && self.title.is_empty()
    }
}

impl MetadataRecord {
    /// The category this record's shape belongs to, if it has a known shape.
    pub fn category(&self) -> Option<Category> {
        match self {
            MetadataRecord::Astro(_) => Some(Category::Astrophotography),
            MetadataRecord::Equipment(_) => Some(Category::Equipment),
            MetadataRecord::Terrestrial(_) => Some(Category::Terrestrial),
            MetadataRecord::Other(_) => None,
        }
    }

    pub fn is_protected(&self) -> bool {
        match self {
            MetadataRecord::Astro(r) => r.protected,
            MetadataRecord::Equipment(r) => r.protected,
            MetadataRecord::Terrestrial(r) => r.protected,
            MetadataRecord::Other(map) => map
                .get("protected")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }

    pub fn video(&self) -> VideoLink {
        let (link, title) = match self {
            MetadataRecord::Astro(r) => (r.youtube_link.as_str(), r.youtube_title.as_str()),
            MetadataRecord::Equipment(r) => (r.youtube_link.as_str(), r.youtube_title.as_str()),
            MetadataRecord::Terrestrial(r) => (r.youtube_link.as_str(), r.youtube_title.as_str()),
            MetadataRecord::Other(map) => (
                map.get("youtubeLink").and_then(Value::as_str).unwrap_or(""),
                map.get("youtubeTitle").and_then(Value::as_str).unwrap_or(""),
            ),
        };
        VideoLink {
            link: link.to_string(),
            title: title.to_string(),
        }
    }

    pub fn set_video(&mut self, video: VideoLink) {
        let (link, title) = match self {
            MetadataRecord::Astro(r) => (&mut r.youtube_link, &mut r.youtube_title),
            MetadataRecord::Equipment(r) => (&mut r.youtube_link, &mut r.youtube_title),
            MetadataRecord::Terrestrial(r) => (&mut r.youtube_link, &mut r.youtube_title),
            MetadataRecord::Other(map) => {
                map.insert("youtubeLink".to_string(), Value::String(video.link));
                map.insert("youtubeTitle".to_string(), Value::String(video.title));
                return;
            }
        };
        *link = video.link;
        *title = video.title;
    }
}
