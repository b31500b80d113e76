use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path =
            std::env::temp_dir().join(format!("inkglyph_cli_{tag}_{}_{}", std::process::id(), ts));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_inkglyph(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_inkglyph"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run inkglyph")
}

/// Two eight-sample strokes: one rightward, one downward.
fn strokes_json() -> String {
    let mut out = String::from("[[");
    for i in 0..8 {
        let sep = if i == 0 { "" } else { "," };
        let _ = write!(out, "{sep}{{\"x\":{},\"y\":100,\"t\":{},\"pressure\":0.6}}", 100 + i * 20, i * 16);
    }
    out.push_str("],[");
    for i in 0..8 {
        let sep = if i == 0 { "" } else { "," };
        let _ = write!(out, "{sep}{{\"x\":200,\"y\":{},\"t\":{}}}", 140 + i * 15, 400 + i * 16);
    }
    out.push_str("]]");
    out
}

fn write_strokes(dir: &TestDir, name: &str) {
    fs::write(dir.path.join(name), strokes_json()).expect("write stroke file");
}

#[test]
fn stroke_file_renders_svg_to_output_dir() {
    let dir = TestDir::new("render");
    write_strokes(&dir, "sample.json");

    let output = run_inkglyph(&["sample.json", "-o", "out"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    let svg_path = dir.path.join("out").join("sample.svg");
    assert!(svg_path.is_file(), "expected output file at {svg_path:?}");
    let svg = fs::read_to_string(svg_path).expect("read svg output");
    assert!(svg.contains("<svg"), "expected svg root element");
    assert!(svg.contains("viewBox=\"0 0 600 600\""), "expected canvas viewBox: {svg}");
    assert!(svg.contains("<ellipse") || svg.contains("Z\""), "expected the circle: {svg}");
    assert!(svg.contains("stroke-linecap=\"square\""));
}

#[test]
fn replay_writes_one_svg_per_preview_frame() {
    let dir = TestDir::new("replay");
    write_strokes(&dir, "two.json");

    let output = run_inkglyph(&["two.json", "--replay", "--every", "4"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");

    for i in 1..=4 {
        let frame = dir.path.join(format!("two_{i:03}.svg"));
        assert!(frame.is_file(), "missing preview frame {frame:?}");
    }
    assert!(!dir.path.join("two_005.svg").exists());
    assert!(dir.path.join("two.svg").is_file());
}

#[test]
fn stable_mode_writes_no_previews() {
    let dir = TestDir::new("stable");
    write_strokes(&dir, "two.json");
    fs::write(dir.path.join("cfg.json"), r#"{"mode": "stable"}"#).expect("write config");

    let output = run_inkglyph(&["two.json", "--replay", "--config", "cfg.json"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");
    assert!(!dir.path.join("two_001.svg").exists());
    assert!(dir.path.join("two.svg").is_file());
}

#[test]
fn panel_dump_lists_both_tables() {
    let dir = TestDir::new("panel");
    write_strokes(&dir, "sample.json");

    let output = run_inkglyph(&["sample.json", "--panel"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("GESTURE (INPUT)"), "got: {stdout}");
    assert!(stdout.contains("FORM (OUTPUT)"), "got: {stdout}");
    assert!(stdout.contains("stroke_count"), "got: {stdout}");
    assert!(stdout.contains("target_gap"), "got: {stdout}");
}

#[test]
fn counter_file_advances_per_run() {
    let dir = TestDir::new("counter");
    write_strokes(&dir, "sample.json");

    for expected in ["glyph #1", "glyph #2"] {
        let output = run_inkglyph(&["sample.json", "--counter", "visits.txt"], &dir.path);
        assert!(output.status.success(), "process failed: {output:?}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(expected), "expected {expected}, got: {stdout}");
    }
    let stored = fs::read_to_string(dir.path.join("visits.txt")).expect("read counter");
    assert_eq!(stored.trim(), "2");
}

#[test]
fn corrupt_counter_still_writes_glyph() {
    let dir = TestDir::new("bad_counter");
    write_strokes(&dir, "sample.json");
    fs::write(dir.path.join("visits.txt"), "not a number").expect("write counter");

    let output = run_inkglyph(&["sample.json", "--counter", "visits.txt"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");
    assert!(dir.path.join("sample.svg").is_file());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("counter"), "expected a counter warning, got: {stderr}");
}

#[test]
fn empty_stroke_file_is_an_error() {
    let dir = TestDir::new("empty");
    fs::write(dir.path.join("empty.json"), "[[], []]").expect("write stroke file");

    let output = run_inkglyph(&["empty.json"], &dir.path);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("empty.json"), "got: {stderr}");
    assert!(!dir.path.join("empty.svg").exists());
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TestDir::new("bad_config");
    write_strokes(&dir, "sample.json");
    fs::write(dir.path.join("cfg.json"), r#"{"render": {"scale": 0}}"#).expect("write config");

    let output = run_inkglyph(&["sample.json", "--config", "cfg.json"], &dir.path);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("render.scale"), "got: {stderr}");
}
