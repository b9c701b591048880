//! Metadata reconciliation.
//!
//! Keeps the store consistent with the media tree: scan → plan → apply →
//! persist. Planning is a three-way diff between the live files, the stored
//! keys and the protected subset of those keys:
//!
//! | live file | record     | action                                  |
//! |-----------|------------|-----------------------------------------|
//! | no        | any        | delete (protection does not matter)     |
//! | yes       | none       | create from filename and folder         |
//! | yes       | protected  | leave untouched                         |
//! | yes       | unprotected| refill empty or generated fields        |
//!
//! The rules deciding whether an unprotected field counts as "generated" are
//! heuristic: a hand-written value that happens to equal what the generator
//! produces is indistinguishable from generated text.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;

use crate::config::Config;
use crate::models::{
    AstroRecord, Category, EquipmentRecord, MediaFile, MetadataRecord, TerrestrialRecord,
};
use crate::names::{clean_name, location_for, raw_object_name};
use crate::progress::{SyncEvent, SyncReporter};
use crate::resolve::resolve;
use crate::scan;
use crate::store::{self, MetadataStore};

/// Display names treated as "never filled in" (compared case-insensitively).
const PLACEHOLDER_NAMES: &[&str] = &["untitled", "unknown", "tbd"];

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub discovered: usize,
    pub created: usize,
    pub updated: usize,
    pub preserved: usize,
    pub unchanged: usize,
    pub deleted: usize,
    pub duplicates: usize,
    pub total: usize,
}

impl ReconcileReport {
    /// True when the store differs from what was loaded.
    pub fn has_changes(&self) -> bool {
        self.created > 0 || self.updated > 0 || self.deleted > 0
    }
}

/// The diff between live files and stored records, before anything changes.
#[derive(Debug, Default)]
pub struct SyncPlan<'a> {
    /// Stored filenames with no live file, in key order.
    pub stale: Vec<String>,
    /// Live files without a record.
    pub fresh: Vec<&'a MediaFile>,
    /// Live files whose record is protected.
    pub protected: Vec<&'a MediaFile>,
    /// Live files whose record may be refilled.
    pub unprotected: Vec<&'a MediaFile>,
    /// `(ignored, first seen)` pairs sharing a filename.
    pub duplicates: Vec<(&'a MediaFile, &'a MediaFile)>,
}

pub fn plan<'a>(files: &'a [MediaFile], store: &MetadataStore) -> SyncPlan<'a> {
    let mut plan = SyncPlan::default();
    let mut seen: HashMap<&str, &MediaFile> = HashMap::new();

    for file in files {
        if let Some(first) = seen.get(file.filename.as_str()) {
            plan.duplicates.push((file, *first));
            continue;
        }
        seen.insert(&file.filename, file);

        match store.get(&file.filename) {
            None => plan.fresh.push(file),
            Some(record) if record.is_protected() => plan.protected.push(file),
            Some(_) => plan.unprotected.push(file),
        }
    }

    plan.stale = store
        .records
        .keys()
        .filter(|k| !seen.contains_key(k.as_str()))
        .cloned()
        .collect();

    plan
}

/// Bring `store` in line with `files`, reporting every change.
pub fn reconcile(
    files: &[MediaFile],
    store: &mut MetadataStore,
    config: &Config,
    reporter: &dyn SyncReporter,
) -> ReconcileReport {
    let plan = plan(files, store);
    let mut report = ReconcileReport {
        discovered: files.len(),
        duplicates: plan.duplicates.len(),
        preserved: plan.protected.len(),
        ..Default::default()
    };

    for (file, first) in &plan.duplicates {
        reporter.report(SyncEvent::Duplicate {
            filename: file.filename.clone(),
            folder: file.folder.clone(),
            first_folder: first.folder.clone(),
        });
    }

    for filename in &plan.stale {
        store.remove(filename);
        report.deleted += 1;
        reporter.report(SyncEvent::Removed {
            filename: filename.clone(),
        });
    }

    for file in &plan.fresh {
        store.insert(file.filename.clone(), new_record(file, config));
        report.created += 1;
        reporter.report(SyncEvent::Added {
            filename: file.filename.clone(),
            category: file.category,
            folder: file.folder.clone(),
        });
    }

    for file in &plan.protected {
        reporter.report(SyncEvent::Preserved {
            filename: file.filename.clone(),
        });
    }

    for file in &plan.unprotected {
        let Some(record) = store.get_mut(&file.filename) else {
            continue;
        };
        let fields = refresh(file, record, config);
        if fields.is_empty() {
            report.unchanged += 1;
        } else {
            report.updated += 1;
            reporter.report(SyncEvent::Updated {
                filename: file.filename.clone(),
                category: file.category,
                fields,
            });
        }
    }

    report.total = store.len();
    report
}

/// Record for a file seen for the first time.
pub fn new_record(file: &MediaFile, config: &Config) -> MetadataRecord {
    match file.category {
        Category::Terrestrial => MetadataRecord::Terrestrial(TerrestrialRecord {
            location: location_for(file.folder_leaf(), &config.locations),
            name: clean_name(&file.filename),
            protected: false,
            youtube_link: String::new(),
            youtube_title: String::new(),
            extra: Default::default(),
        }),
        Category::Equipment => MetadataRecord::Equipment(EquipmentRecord {
            equipment_name: clean_name(&file.filename),
            equipment_info: String::new(),
            protected: false,
            youtube_link: String::new(),
            youtube_title: String::new(),
            extra: Default::default(),
        }),
        Category::Astrophotography => {
            let resolved = resolve(&file.filename);
            MetadataRecord::Astro(AstroRecord {
                catalog_designation: resolved.catalog_designation,
                object_name: resolved.object_name,
                location: config.defaults.location.clone(),
                equipment: String::new(),
                exposure: String::new(),
                protected: false,
                youtube_link: String::new(),
                youtube_title: String::new(),
                extra: Default::default(),
            })
        }
    }
}

/// Refill generated fields of an unprotected record. Returns the JSON names of
/// the fields that changed; empty means the record is already up to date.
fn refresh(file: &MediaFile, record: &mut MetadataRecord, config: &Config) -> Vec<&'static str> {
    let mut changed = Vec::new();

    let Some(category) = record.category() else {
        // Unrecognized shape: nothing here is known to be generated.
        return changed;
    };

    if category != file.category {
        // File moved between categories: regenerate, keep the video.
        let video = record.video();
        let mut fresh = new_record(file, config);
        fresh.set_video(video);
        *record = fresh;
        changed.push("record");
        return changed;
    }

    match record {
        MetadataRecord::Astro(r) => {
            if !astro_is_generated(r, &file.filename) {
                return changed;
            }
            let resolved = resolve(&file.filename);
            // Never trade a designation for none.
            if resolved.catalog_designation.is_empty() && !r.catalog_designation.is_empty() {
                return changed;
            }
            set_field(&mut r.catalog_designation, resolved.catalog_designation, "catalogDesignation", &mut changed);
            set_field(&mut r.object_name, resolved.object_name, "objectName", &mut changed);
        }
        MetadataRecord::Terrestrial(r) => {
            if r.location.trim().is_empty() {
                let location = location_for(file.folder_leaf(), &config.locations);
                set_field(&mut r.location, location, "location", &mut changed);
            }
            if is_placeholder(&r.name) {
                set_field(&mut r.name, clean_name(&file.filename), "name", &mut changed);
            }
        }
        MetadataRecord::Equipment(r) => {
            if r.equipment_info.trim().is_empty() && is_placeholder(&r.equipment_name) {
                let name = clean_name(&file.filename);
                set_field(&mut r.equipment_name, name, "equipmentName", &mut changed);
            }
        }
        MetadataRecord::Other(_) => {}
    }

    changed
}

/// An astrophotography record still carries resolver output rather than a
/// curated name.
fn astro_is_generated(r: &AstroRecord, filename: &str) -> bool {
    r.catalog_designation.is_empty()
        || r.object_name == r.catalog_designation
        || r.object_name == raw_object_name(filename)
}

fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || PLACEHOLDER_NAMES.iter().any(|p| value.eq_ignore_ascii_case(p))
}

fn set_field(slot: &mut String, value: String, name: &'static str, changed: &mut Vec<&'static str>) {
    if *slot != value {
        *slot = value;
        changed.push(name);
    }
}

/// Outcome of [`run_sync`].
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub report: ReconcileReport,
    pub written: bool,
}

/// Scan, load, reconcile and persist. The store is only written when
/// something changed and this is not a dry run.
pub fn run_sync(config: &Config, dry_run: bool, reporter: &dyn SyncReporter) -> Result<SyncOutcome> {
    let files = scan::scan_media(config)?;

    let mut store = match store::load(&config.store.path) {
        Ok(store) => store,
        Err(e) => {
            if config.store.path.exists() {
                eprintln!("Warning: metadata store is unreadable, rebuilding it: {:#}", e);
            }
            reporter.report(SyncEvent::StoreReset {
                reason: format!("{:#}", e),
            });
            MetadataStore::default()
        }
    };

    let report = reconcile(&files, &mut store, config, reporter);

    let written = report.has_changes() && !dry_run;
    if written {
        store::save(&config.store.path, &store)?;
    }

    Ok(SyncOutcome { report, written })
}

pub fn print_summary(outcome: &SyncOutcome, dry_run: bool) {
    let r = &outcome.report;
    if dry_run {
        println!("sync media (dry-run)");
    } else {
        println!("sync media");
    }
    println!("  files found: {}", r.discovered);
    println!("  entries created: {}", r.created);
    println!("  entries updated: {}", r.updated);
    println!("  entries preserved: {}", r.preserved);
    println!("  entries removed: {}", r.deleted);
    if r.duplicates > 0 {
        println!("  duplicate filenames skipped: {}", r.duplicates);
    }
    println!("  total entries: {}", r.total);
    if outcome.written {
        println!("  store: written");
    } else if r.has_changes() {
        println!("  store: not written (dry-run)");
    } else {
        println!("  store: unchanged");
    }
    println!("ok");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::progress::NoProgress;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<SyncEvent>>);

    impl SyncReporter for Recorder {
        fn report(&self, event: SyncEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    fn config() -> Config {
        parse_config("[store]\npath = \"m.json\"\n[media]\nroot = \"images\"\n").unwrap()
    }

    fn file(folder: &str, filename: &str) -> MediaFile {
        MediaFile {
            filename: filename.to_string(),
            folder: folder.to_string(),
            path: PathBuf::from(format!("images/{}/{}", folder, filename)),
            category: scan::classify(folder, &config().classify),
        }
    }

    fn store_from(value: serde_json::Value) -> MetadataStore {
        MetadataStore::from_json(&value.to_string()).unwrap()
    }

    #[test]
    fn test_creates_per_category() {
        let files = vec![
            file("astrophotography/featured", "M42.jpg"),
            file("terrestrial/yellowstone", "GrandPrismatic-3.jpg"),
            file("equipment", "Seestar-S50.jpg"),
        ];
        let mut store = MetadataStore::default();
        let report = reconcile(&files, &mut store, &config(), &NoProgress);

        assert_eq!(report.created, 3);
        assert_eq!(report.total, 3);

        match store.get("M42.jpg").unwrap() {
            MetadataRecord::Astro(r) => {
                assert_eq!(r.catalog_designation, "M42");
                assert_eq!(r.object_name, "Orion Nebula");
                assert_eq!(r.location, "Maple Valley, WA");
                assert!(!r.protected);
            }
            other => panic!("unexpected {:?}", other),
        }
        match store.get("GrandPrismatic-3.jpg").unwrap() {
            MetadataRecord::Terrestrial(r) => {
                assert_eq!(r.location, "Yellowstone National Park");
                assert_eq!(r.name, "Grand Prismatic");
            }
            other => panic!("unexpected {:?}", other),
        }
        match store.get("Seestar-S50.jpg").unwrap() {
            MetadataRecord::Equipment(r) => {
                assert_eq!(r.equipment_name, "Seestar S");
                assert_eq!(r.equipment_info, "");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_second_pass_is_noop() {
        let files = vec![
            file("astrophotography/featured", "NGC9999.jpg"),
            file("astrophotography/featured", "Sunset.jpg"),
            file("terrestrial/grand-tetons", "IMG_1234.jpg"),
            file("equipment", "DSC_0001.jpg"),
        ];
        let mut store = MetadataStore::default();
        reconcile(&files, &mut store, &config(), &NoProgress);
        let snapshot = store.clone();

        let report = reconcile(&files, &mut store, &config(), &NoProgress);
        assert!(!report.has_changes(), "{:?}", report);
        assert_eq!(report.unchanged, 4);
        assert_eq!(store, snapshot);
    }

    #[test]
    fn test_stale_records_deleted_even_if_protected() {
        let mut store = store_from(json!({
            "gone.jpg": { "catalogDesignation": "M1", "objectName": "Crab Nebula", "protected": true },
            "also-gone.jpg": { "location": "Zion", "name": "Narrows" },
            "M42.jpg": { "catalogDesignation": "M42", "objectName": "Orion Nebula" }
        }));
        let files = vec![file("astrophotography/featured", "M42.jpg")];
        let report = reconcile(&files, &mut store, &config(), &NoProgress);

        assert_eq!(report.deleted, 2);
        assert_eq!(report.total, 1);
        assert!(!store.contains("gone.jpg"));
        assert!(!store.contains("also-gone.jpg"));
    }

    #[test]
    fn test_protected_records_untouched() {
        let mut store = store_from(json!({
            "M42.jpg": { "catalogDesignation": "", "objectName": "", "protected": true },
            "Geyser.jpg": { "location": "", "name": "", "protected": true },
            "equipment-moved.jpg": { "location": "Somewhere", "name": "Odd", "protected": true }
        }));
        let before = store.clone();
        let files = vec![
            file("astrophotography/featured", "M42.jpg"),
            file("terrestrial/yellowstone", "Geyser.jpg"),
            file("equipment", "equipment-moved.jpg"),
        ];
        let recorder = Recorder(Mutex::new(Vec::new()));
        let report = reconcile(&files, &mut store, &config(), &recorder);

        assert_eq!(report.preserved, 3);
        assert!(!report.has_changes());
        assert_eq!(store, before);
        let events = recorder.0.lock().unwrap();
        assert!(events.iter().all(|e| matches!(e, SyncEvent::Preserved { .. })));
    }

    #[test]
    fn test_astro_refill_rules() {
        let mut store = store_from(json!({
            "M31.jpg": { "catalogDesignation": "", "objectName": "whatever" },
            "M33-Done.jpg": { "catalogDesignation": "M33", "objectName": "M33 DONE" },
            "NGC7000.jpg": { "catalogDesignation": "NGC7000", "objectName": "NGC7000" },
            "M45.jpg": { "catalogDesignation": "M45", "objectName": "Seven Sisters" },
            "widefield.jpg": { "catalogDesignation": "M8", "objectName": "M8" }
        }));
        let files: Vec<MediaFile> = ["M31.jpg", "M33-Done.jpg", "NGC7000.jpg", "M45.jpg", "widefield.jpg"]
            .iter()
            .map(|f| file("astrophotography/featured", f))
            .collect();
        let report = reconcile(&files, &mut store, &config(), &NoProgress);
        assert_eq!(report.updated, 3);

        let astro = |name: &str| match store.get(name).unwrap() {
            MetadataRecord::Astro(r) => format!("{}|{}", r.catalog_designation, r.object_name),
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(astro("M31.jpg"), "M31|Andromeda Galaxy");
        assert_eq!(astro("M33-Done.jpg"), "M33|Triangulum Galaxy");
        assert_eq!(astro("NGC7000.jpg"), "NGC7000|North America Nebula");
        // Curated name kept.
        assert_eq!(astro("M45.jpg"), "M45|Seven Sisters");
        // Resolver finds nothing; the existing designation wins.
        assert_eq!(astro("widefield.jpg"), "M8|M8");
    }

    #[test]
    fn test_terrestrial_and_equipment_fill_only_empty() {
        let mut store = store_from(json!({
            "Geyser.jpg": { "location": "", "name": "Untitled" },
            "Lake.jpg": { "location": "Family trip", "name": "Our lake" },
            "Mount.jpg": { "equipmentName": "", "equipmentInfo": "" },
            "Scope.jpg": { "equipmentName": "", "equipmentInfo": "80mm refractor" }
        }));
        let files = vec![
            file("terrestrial/yellowstone", "Geyser.jpg"),
            file("terrestrial/yellowstone", "Lake.jpg"),
            file("equipment", "Mount.jpg"),
            file("equipment", "Scope.jpg"),
        ];
        let report = reconcile(&files, &mut store, &config(), &NoProgress);
        assert_eq!(report.updated, 2);
        assert_eq!(report.unchanged, 2);

        match store.get("Geyser.jpg").unwrap() {
            MetadataRecord::Terrestrial(r) => {
                assert_eq!(r.location, "Yellowstone National Park");
                assert_eq!(r.name, "Geyser");
            }
            other => panic!("unexpected {:?}", other),
        }
        match store.get("Lake.jpg").unwrap() {
            MetadataRecord::Terrestrial(r) => assert_eq!(r.name, "Our lake"),
            other => panic!("unexpected {:?}", other),
        }
        match store.get("Scope.jpg").unwrap() {
            MetadataRecord::Equipment(r) => assert_eq!(r.equipment_name, ""),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_moved_between_categories_keeps_video() {
        let mut store = store_from(json!({
            "Tripod.jpg": {
                "catalogDesignation": "",
                "objectName": "Tripod",
                "youtubeLink": "https://youtu.be/xyz",
                "youtubeTitle": "Setup"
            }
        }));
        let files = vec![file("equipment", "Tripod.jpg")];
        let report = reconcile(&files, &mut store, &config(), &NoProgress);
        assert_eq!(report.updated, 1);

        match store.get("Tripod.jpg").unwrap() {
            MetadataRecord::Equipment(r) => {
                assert_eq!(r.equipment_name, "Tripod");
                assert_eq!(r.youtube_link, "https://youtu.be/xyz");
                assert_eq!(r.youtube_title, "Setup");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_curated_record_with_loose_types_untouched() {
        let mut store = store_from(json!({
            "M42.jpg": {
                "catalogDesignation": "M42",
                "objectName": "My Orion",
                "location": "Backyard",
                "equipment": "EdgeHD 8",
                "exposure": 300
            },
            "M31.jpg": {
                "catalogDesignation": "M31",
                "objectName": "Andromeda",
                "equipment": null
            }
        }));
        let files = vec![
            file("astrophotography/featured", "M42.jpg"),
            file("astrophotography/featured", "M31.jpg"),
        ];
        let report = reconcile(&files, &mut store, &config(), &NoProgress);
        assert_eq!(report.updated, 0);
        assert_eq!(report.unchanged, 2);

        match store.get("M42.jpg").unwrap() {
            MetadataRecord::Astro(r) => {
                assert_eq!(r.object_name, "My Orion");
                assert_eq!(r.location, "Backyard");
                assert_eq!(r.equipment, "EdgeHD 8");
                assert_eq!(r.exposure, "300");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_record_left_alone() {
        let mut store = store_from(json!({
            "Odd.jpg": { "caption": "hand written", "location": "Somewhere" }
        }));
        let before = store.clone();
        let files = vec![file("astrophotography/featured", "Odd.jpg")];
        let report = reconcile(&files, &mut store, &config(), &NoProgress);

        assert!(!report.has_changes());
        assert_eq!(report.unchanged, 1);
        assert_eq!(store, before);
    }

    #[test]
    fn test_duplicate_filenames() {
        let files = vec![
            file("astrophotography/featured", "M42.jpg"),
            file("astrophotography/deep-sky/nebulas", "M42.jpg"),
        ];
        let mut store = MetadataStore::default();
        let recorder = Recorder(Mutex::new(Vec::new()));
        let report = reconcile(&files, &mut store, &config(), &recorder);

        assert_eq!(report.discovered, 2);
        assert_eq!(report.created, 1);
        assert_eq!(report.duplicates, 1);
        let events = recorder.0.lock().unwrap();
        assert!(events.contains(&SyncEvent::Duplicate {
            filename: "M42.jpg".to_string(),
            folder: "astrophotography/deep-sky/nebulas".to_string(),
            first_folder: "astrophotography/featured".to_string(),
        }));
    }

    #[test]
    fn test_plan_partitions() {
        let store = store_from(json!({
            "a.jpg": { "catalogDesignation": "", "objectName": "A", "protected": true },
            "b.jpg": { "catalogDesignation": "", "objectName": "B" },
            "z.jpg": { "catalogDesignation": "", "objectName": "Z" }
        }));
        let files = vec![
            file("astrophotography/featured", "a.jpg"),
            file("astrophotography/featured", "b.jpg"),
            file("astrophotography/featured", "c.jpg"),
        ];
        let plan = plan(&files, &store);
        assert_eq!(plan.stale, vec!["z.jpg".to_string()]);
        assert_eq!(plan.fresh.len(), 1);
        assert_eq!(plan.protected.len(), 1);
        assert_eq!(plan.unprotected.len(), 1);
    }
}
