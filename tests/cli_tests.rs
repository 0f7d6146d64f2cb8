use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    _dir: TempDir,
    cache_path: PathBuf,
    payload_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let cache_path = dir.path().join("cache.json");
        let payload_path = dir.path().join("response.json");

        let payload = json!({
            "message": "SUCCESS",
            "data": {
                "race": {"black": 0.1, "east asian": 0.7, "white": 0.2},
                "age": {"20-29": 0.45, "30-39": 0.5, "40-49": 0.05},
                "gender": {"female": 0.35, "male": 0.65}
            }
        });
        fs::write(&payload_path, payload.to_string()).unwrap();

        Self {
            _dir: dir,
            cache_path,
            payload_path,
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_skinstric"))
            .args(args)
            .arg("--cache")
            .arg(&self.cache_path)
            .output()
            .expect("Failed to execute binary")
    }

    fn review_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["review", "--json"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(
            output.status.success(),
            "review failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("review --json prints JSON")
    }
}

#[test]
fn test_review_without_cache_shows_defaults() {
    let ctx = TestContext::new();
    let view = ctx.review_json(&[]);
    assert_eq!(view["outcome"]["kind"], "cacheMiss");
    assert_eq!(view["confirmedValues"]["race"], "East asian");
    assert_eq!(view["activePercent"], 96);
}

#[test]
fn test_store_then_review_flow() {
    let ctx = TestContext::new();
    let output = ctx.run(&["store", "--payload", ctx.payload_path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(ctx.cache_path.exists());

    let view = ctx.review_json(&[]);
    assert_eq!(view["dominantDisplay"], "East Asian");
    assert_eq!(view["outcome"]["kind"], "parsed");

    let view = ctx.review_json(&["-a", "age", "-a", "row:1", "-a", "confirm"]);
    assert_eq!(view["selectedCategory"], "age");
    assert_eq!(view["confirmedValues"]["age"], "20-29");
    assert_eq!(view["originalValues"]["age"], "30-39");
    assert_eq!(view["pendingReset"], true);
    assert_eq!(view["pendingConfirm"], false);

    // Review state is not persisted between runs.
    let view = ctx.review_json(&["-a", "age"]);
    assert_eq!(view["confirmedValues"]["age"], "30-39");
}

#[test]
fn test_review_flag_overrides_fallback() {
    let ctx = TestContext::new();
    let view = ctx.review_json(&["--fallback-race", "Indian"]);
    assert_eq!(view["confirmedValues"]["race"], "Indian");
}

#[test]
fn test_settings_file_with_cli_override() {
    let ctx = TestContext::new();
    let settings = ctx.cache_path.with_file_name("settings.json");
    fs::write(
        &settings,
        r#"{"fallback_race": "White", "fallback_age": "50-59"}"#,
    )
    .unwrap();

    let view = ctx.review_json(&[
        "--settings",
        settings.to_str().unwrap(),
        "--fallback-age",
        "60-69",
    ]);
    assert_eq!(view["confirmedValues"]["race"], "White");
    assert_eq!(view["confirmedValues"]["age"], "60-69");
}

#[test]
fn test_review_rejects_bad_row() {
    let ctx = TestContext::new();
    let output = ctx.run(&["review", "-a", "row:7"]);
    assert!(!output.status.success());
}

#[test]
fn test_review_table_output() {
    let ctx = TestContext::new();
    ctx.run(&["store", "--payload", ctx.payload_path.to_str().unwrap()]);
    let output = ctx.run(&["review", "-a", "sex"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("A.I. Confidence"));
    assert!(stdout.contains("65%"));
}

#[test]
fn test_intake_records_name_and_location() {
    let ctx = TestContext::new();
    let output = ctx.run(&["intake", "--name", "Ada", "--location", "London"]);
    assert!(output.status.success());

    let submission: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(submission, json!({"name": "Ada", "location": "London"}));

    let cache: Value = serde_json::from_str(&fs::read_to_string(&ctx.cache_path).unwrap()).unwrap();
    assert_eq!(cache["entries"]["skinstric_name"], "Ada");
}

#[test]
fn test_intake_rejects_invalid_name() {
    let ctx = TestContext::new();
    let output = ctx.run(&["intake", "--name", "R2D2", "--location", "Tatooine"]);
    assert!(!output.status.success());
    assert!(!ctx.cache_path.exists());
}

#[test]
fn test_inspect_reports_origin() {
    let ctx = TestContext::new();
    let output = ctx.run(&["inspect", "--payload", ctx.payload_path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("data.gender"));
    assert!(stdout.contains("keyed"));
}

#[test]
fn test_store_capture_preview() {
    let ctx = TestContext::new();
    let data_url = "data:image/jpeg;base64,QUJDRA==";
    let output = ctx.run(&["store", "--capture", data_url]);
    assert!(output.status.success());

    let cache: Value = serde_json::from_str(&fs::read_to_string(&ctx.cache_path).unwrap()).unwrap();
    assert_eq!(cache["entries"]["skinstric_captured_photo_preview"], data_url);
}

#[test]
fn test_store_rejects_empty_capture() {
    let ctx = TestContext::new();
    let output = ctx.run(&["store", "--capture", "data:image/jpeg;base64,"]);
    assert!(!output.status.success());
    assert!(!ctx.cache_path.exists());
}

#[test]
fn test_review_survives_corrupt_cache() {
    let ctx = TestContext::new();
    fs::write(&ctx.cache_path, "{ not json").unwrap();
    let view = ctx.review_json(&[]);
    assert_eq!(view["outcome"]["kind"], "cacheMiss");
    assert_eq!(view["confirmedValues"]["sex"], "Female");
}
