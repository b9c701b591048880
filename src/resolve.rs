//! Filename → astronomical object resolver.
//!
//! Astrophotography files are usually named after their target
//! (`NGC7000-Pelican-1.jpg`, `SH2-132-The-LobsterClaw.jpg`, `Wizard-Lr-PI.jpg`).
//! [`resolve`] recovers a catalog designation and a display name from such a
//! name using the [`crate::catalog`] table, a set of catalog-number formats, and
//! a title-cased fallback. It is total: every input produces a result.
//!
//! Resolution runs in stages and the first hit wins at each stage:
//!
//! 1. per token, exact table lookup;
//! 2. per token, catalog-number formats (Messier, NGC, IC, Sharpless,
//!    Caldwell, Barnard, Abell, van den Bergh), synthesizing a designation
//!    when the number is not in the table;
//! 3. substring search of the joined tokens for a common-name key;
//! 4. a `The <Word>` phrase in the base name;
//! 5. the surviving tokens, title-cased.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::catalog::{self, CatalogEntry, ObjectKind};
use crate::names::{capitalize, strip_extension};

/// Post-processing revision markers that never identify the object.
const PROCESSING_MARKERS: &[&str] = &[
    "DONE", "FINISHED", "FINAL", "PROCESSED", "LR", "PI", "PS", "1", "2", "3",
];

/// Camera/phone filename prefixes dropped from the title-cased fallback.
const DEVICE_PREFIXES: &[&str] = &["IMG", "DSC", "DSCN", "PHOTO", "PIC", "IMAGE"];

static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_\s]+").unwrap());
static THE_PHRASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[-_]The[-_]([A-Za-z]+)").unwrap());

/// Prefixed catalog numbers that fit in a single token.
static MESSIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^M(\d+)$").unwrap());
static NGC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^NGC(\d+)$").unwrap());
static IC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^IC(\d+)$").unwrap());
static SHARPLESS_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^SH2-(\d+)$").unwrap());
static SHARPLESS_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^SH(\d+)$").unwrap());
static CALDWELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^C(\d+)$").unwrap());
static BARNARD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^B(\d+)$").unwrap());
static ABELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:ABELL|A)(\d+)$").unwrap());
static VAN_DEN_BERGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^VDB(\d+)$").unwrap());

/// Best-effort identification of a photographed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Catalog designation (`M42`, `Sh2-132`, `Abell 21`), or empty.
    pub catalog_designation: String,
    pub object_name: String,
    /// Object class when the match came from the reference table.
    #[serde(skip)]
    pub kind: Option<ObjectKind>,
}

impl Resolution {
    fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            catalog_designation: entry.designation.to_string(),
            object_name: entry.name.to_string(),
            kind: Some(entry.kind),
        }
    }

    fn synthesized(designation: String, name: String) -> Self {
        Self {
            catalog_designation: designation,
            object_name: name,
            kind: None,
        }
    }

    fn named(name: String) -> Self {
        Self::synthesized(String::new(), name)
    }
}

/// Resolve a filename to a catalog designation and display name.
pub fn resolve(filename: &str) -> Resolution {
    let base = strip_extension(filename);
    let tokens: Vec<&str> = TOKEN_SPLIT
        .split(base)
        .filter(|t| !t.is_empty() && !is_processing_marker(t))
        .collect();

    if let Some(found) = match_tokens(&tokens) {
        return found;
    }

    if let Some(found) = match_common_name(&tokens) {
        return found;
    }

    if let Some(caps) = THE_PHRASE.captures(base) {
        return Resolution::named(format!("The {}", &caps[1]));
    }

    let name = tokens
        .iter()
        .filter(|t| !is_all_digits(t))
        .filter(|t| !DEVICE_PREFIXES.contains(&t.to_uppercase().as_str()))
        .map(|t| capitalize(t))
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        Resolution::named(base.to_string())
    } else {
        Resolution::named(name)
    }
}

fn is_processing_marker(token: &str) -> bool {
    PROCESSING_MARKERS.contains(&token.to_uppercase().as_str())
}

fn is_all_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Look up `key`, or build a designation for a number the table lacks.
fn lookup_or(key: &str, designation: String, name: String) -> Resolution {
    match catalog::lookup(key) {
        Some(entry) => Resolution::from_entry(entry),
        None => Resolution::synthesized(designation, name),
    }
}

/// Stages 1 and 2: table lookup, then catalog-number formats, token by token.
fn match_tokens(tokens: &[&str]) -> Option<Resolution> {
    for (i, token) in tokens.iter().enumerate() {
        let upper = token.to_uppercase();

        if let Some(entry) = catalog::lookup(&upper) {
            return Some(Resolution::from_entry(entry));
        }

        // Number split into the following token, e.g. "NGC 7000" or "SH2-132".
        let next_number = tokens.get(i + 1).copied().filter(|t| is_all_digits(t));

        if let Some(n) = number(&MESSIER, &upper) {
            return Some(lookup_or(&upper, format!("M{}", n), format!("Messier {}", n)));
        }

        if let Some(n) = number(&NGC, &upper) {
            let id = format!("NGC{}", n);
            return Some(lookup_or(&upper, id.clone(), id));
        }
        if let ("NGC", Some(n)) = (upper.as_str(), next_number) {
            let id = format!("NGC{}", n);
            return Some(lookup_or(&id, id.clone(), id.clone()));
        }

        if let Some(n) = number(&IC, &upper) {
            let id = format!("IC{}", n);
            return Some(lookup_or(&upper, id.clone(), id));
        }
        if let ("IC", Some(n)) = (upper.as_str(), next_number) {
            let id = format!("IC{}", n);
            return Some(lookup_or(&id, id.clone(), id.clone()));
        }

        let sharpless = match (upper.as_str(), next_number) {
            ("SH2", Some(n)) => Some(n),
            _ => number(&SHARPLESS_DASH, &upper).or_else(|| number(&SHARPLESS_BARE, &upper)),
        };
        if let Some(n) = sharpless {
            let id = format!("Sh2-{}", n);
            return Some(lookup_or(&format!("SH2-{}", n), id.clone(), id));
        }

        if let Some(n) = number(&CALDWELL, &upper) {
            return Some(lookup_or(&upper, format!("C{}", n), format!("Caldwell {}", n)));
        }

        if let Some(n) = number(&BARNARD, &upper) {
            return Some(lookup_or(&upper, format!("B{}", n), format!("Barnard {}", n)));
        }

        if let Some(n) = number(&ABELL, &upper) {
            let id = format!("Abell {}", n);
            return Some(lookup_or(&format!("A{}", n), id.clone(), id));
        }

        if let Some(n) = number(&VAN_DEN_BERGH, &upper) {
            let id = format!("vdB {}", n);
            return Some(lookup_or(&format!("VDB{}", n), id.clone(), id));
        }
    }
    None
}

/// Stage 3: looser substring match against common-name keys.
fn match_common_name(tokens: &[&str]) -> Option<Resolution> {
    let joined = tokens.join(" ").to_uppercase();
    catalog::common_names()
        .find(|entry| joined.contains(entry.key))
        .map(Resolution::from_entry)
}

fn number<'a>(pattern: &Regex, token: &'a str) -> Option<&'a str> {
    pattern
        .captures(token)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
