//! Display-name helpers shared by the resolver and the reconciler.
//!
//! Everything here is a pure string transform over a filename or folder slug.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Fallback display name when cleaning leaves nothing behind.
pub const UNTITLED: &str = "Untitled";

/// Known national-park folder slugs and their display names.
const PARK_LOCATIONS: &[(&str, &str)] = &[
    ("yellowstone", "Yellowstone National Park"),
    ("grand-tetons", "Grand Teton National Park"),
    ("grand-teton", "Grand Teton National Park"),
    ("yosemite", "Yosemite National Park"),
    ("glacier", "Glacier National Park"),
    ("zion", "Zion National Park"),
    ("bryce", "Bryce Canyon National Park"),
    ("arches", "Arches National Park"),
    ("death-valley", "Death Valley National Park"),
    ("joshua-tree", "Joshua Tree National Park"),
    ("crater-lake", "Crater Lake National Park"),
    ("olympic", "Olympic National Park"),
    ("mount-rainier", "Mount Rainier National Park"),
    ("north-cascades", "North Cascades National Park"),
];

static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.[^/.]+$").unwrap());
static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_.]").unwrap());
static DEVICE_PREFIX_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:IMG|DSCN|DSC|PHOTO|PIC|IMAGE|P)(?:\s+|$)").unwrap());
static DEVICE_PREFIX_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:IMG|DSCN|DSC|PIC|P)(\d)").unwrap());
static FORMAT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|\s+)(?:JPG|JPEG|PNG|AVIF|WEBP|IOS)$").unwrap());
static TIMESTAMP_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{8,}").unwrap());
static TRAILING_SPACED_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\d+\s*$").unwrap());
static TRAILING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+$").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip the final extension (`"M42-Done.jpg"` → `"M42-Done"`).
pub fn strip_extension(filename: &str) -> &str {
    match EXTENSION.find(filename) {
        Some(m) => &filename[..m.start()],
        None => filename,
    }
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Capitalize each space-separated word.
pub fn title_case(text: &str) -> String {
    text.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Turn a photo filename into a human display name.
///
/// `"IMG_20230815_OldFaithful-2.jpg"` → `"Old Faithful"`,
/// `"Basin10.jpg"` → `"Basin"`. Returns [`UNTITLED`] when nothing survives.
pub fn clean_name(filename: &str) -> String {
    let name = strip_extension(filename);
    let name = SEPARATORS.replace_all(name, " ");
    // Suffix first so "iOS" is not split into "i OS" below.
    let name = FORMAT_SUFFIX.replace(&name, "");
    let name = CAMEL_BOUNDARY.replace_all(&name, "$1 $2");
    // Again, for glued suffixes like "GeyserJPG".
    let name = FORMAT_SUFFIX.replace(&name, "");
    let name = DEVICE_PREFIX_WORD.replace(&name, "");
    let name = DEVICE_PREFIX_DIGITS.replace(&name, "$1");
    let name = TIMESTAMP_RUN.replace_all(&name, " ");
    let name = TRAILING_SPACED_DIGITS.replace(&name, "");
    let name = TRAILING_DIGITS.replace(&name, "");
    let name = WHITESPACE.replace_all(&name, " ");
    let name = name.trim();

    if name.is_empty() {
        UNTITLED.to_string()
    } else {
        title_case(name)
    }
}

/// The uncurated name a filename maps to: separators become spaces and the
/// result is uppercased (`"m42-done.jpg"` → `"M42 DONE"`).
pub fn raw_object_name(filename: &str) -> String {
    SEPARATORS
        .replace_all(strip_extension(filename), " ")
        .to_uppercase()
}

/// Display location for a terrestrial folder slug.
///
/// `overrides` (from the `[locations]` config table) wins over the built-in
/// park map; unknown slugs are title-cased.
pub fn location_for(slug: &str, overrides: &BTreeMap<String, String>) -> String {
    if let Some(name) = overrides.get(slug) {
        return name.clone();
    }
    if let Some((_, name)) = PARK_LOCATIONS.iter().find(|(s, _)| *s == slug) {
        return name.to_string();
    }
    title_case(&slug.replace(['-', '_'], " "))
}
