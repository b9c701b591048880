use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

struct Env {
    _tmp: TempDir,
    root: PathBuf,
    config_path: PathBuf,
}

impl Env {
    fn store_path(&self) -> PathBuf {
        self.root.join("data/metadata.json")
    }

    fn image(&self, rel: &str) -> PathBuf {
        self.root.join("images").join(rel)
    }

    fn touch(&self, rel: &str) {
        let path = self.image(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"not really an image").unwrap();
    }

    fn store(&self) -> Value {
        let raw = fs::read_to_string(self.store_path()).unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn write_store(&self, value: &Value) {
        let path = self.store_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }
}

fn setup_test_env() -> Env {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[store]
path = "{root}/data/metadata.json"

[media]
root = "{root}/images"
folders = ["astrophotography/featured", "terrestrial/yellowstone", "terrestrial/mount-hood", "equipment"]

[locations]
"mount-hood" = "Mount Hood National Forest"

[timestamps]
output = "{root}/data/file-timestamps.json"
"#,
        root = root.display()
    );

    let config_path = config_dir.join("gallery.toml");
    fs::write(&config_path, config_content).unwrap();

    let env = Env {
        _tmp: tmp,
        root,
        config_path,
    };
    env.touch("astrophotography/featured/M42.jpg");
    env.touch("astrophotography/featured/NGC6888_final.jpg");
    env.touch("terrestrial/yellowstone/OldFaithful.jpg");
    env.touch("equipment/SeestarS50.jpg");
    env
}

fn run(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_gallery-sync");
    let output = Command::new(binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .arg("--progress")
        .arg("off")
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run gallery-sync binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_sync_creates_store() {
    let env = setup_test_env();

    let (stdout, stderr, success) = run(&env.config_path, &["sync"]);
    assert!(success, "sync failed: {}", stderr);
    assert!(stdout.contains("files found: 4"));
    assert!(stdout.contains("entries created: 4"));
    assert!(stdout.contains("store: written"));

    let store = env.store();
    assert_eq!(store["M42.jpg"]["catalogDesignation"], "M42");
    assert_eq!(store["M42.jpg"]["objectName"], "Orion Nebula");
    assert_eq!(store["M42.jpg"]["location"], "Maple Valley, WA");
    assert_eq!(store["NGC6888_final.jpg"]["objectName"], "Crescent Nebula");
    assert_eq!(store["OldFaithful.jpg"]["name"], "Old Faithful");
    assert_eq!(store["OldFaithful.jpg"]["location"], "Yellowstone National Park");
    assert!(store["SeestarS50.jpg"]["equipmentName"].is_string());
}

#[test]
fn test_default_command_is_sync() {
    let env = setup_test_env();

    let (stdout, stderr, success) = run(&env.config_path, &[]);
    assert!(success, "sync failed: {}", stderr);
    assert!(stdout.contains("entries created: 4"));
    assert!(env.store_path().exists());
}

#[test]
fn test_second_sync_is_noop() {
    let env = setup_test_env();

    let (_, stderr, success) = run(&env.config_path, &["sync"]);
    assert!(success, "first sync failed: {}", stderr);
    let first = fs::read(env.store_path()).unwrap();

    let (stdout, stderr, success) = run(&env.config_path, &["sync"]);
    assert!(success, "second sync failed: {}", stderr);
    assert!(stdout.contains("entries created: 0"));
    assert!(stdout.contains("entries updated: 0"));
    assert!(stdout.contains("store: unchanged"));

    let second = fs::read(env.store_path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_keys_are_sorted() {
    let env = setup_test_env();
    run(&env.config_path, &["sync"]);

    let raw = fs::read_to_string(env.store_path()).unwrap();
    let positions: Vec<usize> = ["\"M42.jpg\"", "\"NGC6888_final.jpg\"", "\"OldFaithful.jpg\"", "\"SeestarS50.jpg\""]
        .iter()
        .map(|k| raw.find(k).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn test_protected_record_preserved() {
    let env = setup_test_env();
    env.write_store(&serde_json::json!({
        "M42.jpg": {
            "catalogDesignation": "M42",
            "objectName": "My Orion",
            "location": "Backyard",
            "equipment": "Custom rig",
            "exposure": "",
            "protected": true,
            "notes": "hand written"
        }
    }));

    let (stdout, stderr, success) = run(&env.config_path, &["sync"]);
    assert!(success, "sync failed: {}", stderr);
    assert!(stdout.contains("entries preserved: 1"));

    let store = env.store();
    assert_eq!(store["M42.jpg"]["objectName"], "My Orion");
    assert_eq!(store["M42.jpg"]["location"], "Backyard");
    assert_eq!(store["M42.jpg"]["notes"], "hand written");
}

#[test]
fn test_protected_record_removed_with_its_file() {
    let env = setup_test_env();
    env.write_store(&serde_json::json!({
        "Gone.jpg": { "catalogDesignation": "", "objectName": "Gone", "protected": true }
    }));

    let (stdout, stderr, success) = run(&env.config_path, &["sync"]);
    assert!(success, "sync failed: {}", stderr);
    assert!(stdout.contains("entries removed: 1"));
    assert!(env.store().get("Gone.jpg").is_none());
}

#[test]
fn test_location_override_from_config() {
    let env = setup_test_env();
    env.touch("terrestrial/mount-hood/TrilliumLake.jpg");

    run(&env.config_path, &["sync"]);
    let store = env.store();
    assert_eq!(store["TrilliumLake.jpg"]["location"], "Mount Hood National Forest");
    assert_eq!(store["TrilliumLake.jpg"]["name"], "Trillium Lake");
}

#[test]
fn test_dry_run_never_writes() {
    let env = setup_test_env();

    let (stdout, stderr, success) = run(&env.config_path, &["sync", "--dry-run"]);
    assert!(success, "dry run failed: {}", stderr);
    assert!(stdout.contains("entries created: 4"));
    assert!(stdout.contains("not written (dry-run)"));
    assert!(!env.store_path().exists());
}

#[test]
fn test_corrupt_store_recovered() {
    let env = setup_test_env();
    fs::create_dir_all(env.store_path().parent().unwrap()).unwrap();
    fs::write(env.store_path(), "{ this is not json").unwrap();

    let (stdout, stderr, success) = run(&env.config_path, &["sync"]);
    assert!(success, "sync failed: {}", stderr);
    assert!(stderr.contains("unreadable"));
    assert!(stdout.contains("entries created: 4"));
    assert_eq!(env.store()["M42.jpg"]["objectName"], "Orion Nebula");
}

#[test]
fn test_store_write_failure_is_fatal() {
    let env = setup_test_env();
    // A directory where the store file should be makes the write fail.
    fs::create_dir_all(env.store_path()).unwrap();

    let (stdout, stderr, success) = run(&env.config_path, &["sync"]);
    assert!(!success, "sync should fail: {}", stdout);
    assert!(stderr.contains("Failed to write metadata store"), "stderr: {}", stderr);
    assert!(!stdout.contains("ok"));
    assert!(env.store_path().is_dir());
}

#[test]
fn test_video_add_remove_move() {
    let env = setup_test_env();
    run(&env.config_path, &["sync"]);

    let (_, stderr, success) = run(
        &env.config_path,
        &["video", "add", "M42.jpg", "https://youtu.be/orion", "--title", "Orion timelapse"],
    );
    assert!(success, "video add failed: {}", stderr);
    let store = env.store();
    assert_eq!(store["M42.jpg"]["youtubeLink"], "https://youtu.be/orion");
    assert_eq!(store["M42.jpg"]["youtubeTitle"], "Orion timelapse");

    let (_, stderr, success) = run(
        &env.config_path,
        &["video", "move", "M42.jpg", "NGC6888_final.jpg"],
    );
    assert!(success, "video move failed: {}", stderr);
    let store = env.store();
    assert_eq!(store["M42.jpg"]["youtubeLink"], "");
    assert_eq!(store["NGC6888_final.jpg"]["youtubeLink"], "https://youtu.be/orion");

    let (_, stderr, success) = run(
        &env.config_path,
        &["video", "remove", "NGC6888_final.jpg"],
    );
    assert!(success, "video remove failed: {}", stderr);
    assert_eq!(env.store()["NGC6888_final.jpg"]["youtubeLink"], "");
}

#[test]
fn test_sync_keeps_video_links() {
    let env = setup_test_env();
    run(&env.config_path, &["sync"]);
    run(&env.config_path, &["video", "add", "OldFaithful.jpg", "https://youtu.be/geyser"]);

    let (stdout, _, success) = run(&env.config_path, &["sync"]);
    assert!(success);
    assert!(stdout.contains("store: unchanged"));
    assert_eq!(env.store()["OldFaithful.jpg"]["youtubeLink"], "https://youtu.be/geyser");
}

#[test]
fn test_video_unknown_record_fails() {
    let env = setup_test_env();
    run(&env.config_path, &["sync"]);
    let before = fs::read(env.store_path()).unwrap();

    let (_, stderr, success) = run(
        &env.config_path,
        &["video", "add", "Nope.jpg", "https://youtu.be/x"],
    );
    assert!(!success);
    assert!(stderr.contains("Nope.jpg"));
    assert_eq!(fs::read(env.store_path()).unwrap(), before);
}

#[test]
fn test_invalid_args_touch_nothing() {
    let env = setup_test_env();
    run(&env.config_path, &["sync"]);
    let before = fs::read(env.store_path()).unwrap();

    let (_, _, success) = run(&env.config_path, &["video", "add", "M42.jpg"]);
    assert!(!success);
    let (_, _, success) = run(&env.config_path, &["sync", "--bogus"]);
    assert!(!success);

    assert_eq!(fs::read(env.store_path()).unwrap(), before);
}

#[test]
fn test_missing_config_fails() {
    let env = setup_test_env();
    let missing = env.root.join("config/nope.toml");

    let (_, stderr, success) = run(&missing, &["sync"]);
    assert!(!success);
    assert!(stderr.contains("config"));
    assert!(!env.store_path().exists());
}

#[test]
fn test_resolve_needs_no_config() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");

    let (stdout, stderr, success) = run(&missing, &["resolve", "M42.jpg", "IMG_20230815_Sunset.jpg"]);
    assert!(success, "resolve failed: {}", stderr);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "M42.jpg\tM42\tOrion Nebula\tnebula");
    assert_eq!(lines[1], "IMG_20230815_Sunset.jpg\t-\tSunset\t-");
}

#[test]
fn test_inventory_reports_drift() {
    let env = setup_test_env();
    run(&env.config_path, &["sync"]);
    env.touch("astrophotography/featured/M31.jpg");
    fs::remove_file(env.image("equipment/SeestarS50.jpg")).unwrap();

    let (stdout, stderr, success) = run(&env.config_path, &["inventory"]);
    assert!(success, "inventory failed: {}", stderr);
    assert!(stdout.contains("Gallery metadata inventory"));
    assert!(stdout.contains("astrophotography/featured"));
    assert!(stdout.contains("By object type:"));
    assert!(stdout.contains("Files without an entry (run sync) (1)"));
    assert!(stdout.contains("M31.jpg"));
    assert!(stdout.contains("Entries without a file (sync will remove) (1)"));
    assert!(stdout.contains("SeestarS50.jpg"));
}

#[test]
fn test_timestamps_written() {
    let env = setup_test_env();

    let (stdout, stderr, success) = run(&env.config_path, &["timestamps"]);
    assert!(success, "timestamps failed: {}", stderr);
    assert!(stdout.contains("files captured: 4"));

    let raw = fs::read_to_string(env.root.join("data/file-timestamps.json")).unwrap();
    let times: Value = serde_json::from_str(&raw).unwrap();
    let m42 = &times["astrophotography/featured/M42.jpg"];
    assert_eq!(m42["filename"], "M42.jpg");
    assert!(m42["mtimeMs"].as_i64().unwrap() > 0);
    assert!(m42["mtime"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_timestamps_output_flag() {
    let env = setup_test_env();
    let out = env.root.join("elsewhere/times.json");

    let (_, stderr, success) = run(
        &env.config_path,
        &["timestamps", "--output", out.to_str().unwrap()],
    );
    assert!(success, "timestamps failed: {}", stderr);
    assert!(out.exists());
    assert!(!env.root.join("data/file-timestamps.json").exists());
}
