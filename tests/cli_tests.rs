// Tests for the serialgen binary: exit codes, diagnostics, artifacts on disk

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("serialgen-cli-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

fn serialgen(dir: &PathBuf, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_serialgen"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to launch serialgen")
}

#[test]
fn test_no_arguments_is_usage_error() {
    let dir = scratch_dir("noargs");
    let output = serialgen(&dir, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_two_arguments_is_usage_error() {
    let dir = scratch_dir("twoargs");
    let output = serialgen(&dir, &["a.h", "b.h"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_point_written_to_working_directory() {
    let dir = scratch_dir("point");
    fs::write(
        dir.join("point.h"),
        "//!serialize\nstruct Point {\n  int32_t x;\n  int32_t y;\n};\n",
    )
    .unwrap();

    let output = serialgen(&dir, &["point.h"]);
    assert_eq!(output.status.code(), Some(0));

    let header = fs::read_to_string(dir.join("point_serializers.h")).expect("Header missing");
    let source = fs::read_to_string(dir.join("point_serializers.c")).expect("Source missing");
    assert!(header.contains("int Point_serialize(const struct Point *s, char *dst, int size);"));
    assert!(header.contains("int Point_deserialize(const char *src, int size, struct Point *s);"));
    assert!(source.contains("#include \"point_serializers.h\""));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_invalid_member_exits_one_without_artifacts() {
    let dir = scratch_dir("invalid");
    fs::write(
        dir.join("stats.h"),
        "//!serialize\nstruct Stats {\n  long count;\n};\n//!serialize\nstruct Extra { int x; };\n",
    )
    .unwrap();

    let output = serialgen(&dir, &["stats.h"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("[ERROR] Struct \"Stats\""));
    assert!(stderr.contains("[ERROR] Struct \"Extra\""));
    assert!(stderr.contains("\n\nALLOWED_TYPES:\n"));
    assert!(stderr.contains("  uint32_t\n"));
    assert!(!dir.join("stats_serializers.h").exists());
    assert!(!dir.join("stats_serializers.c").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_unreadable_input_exits_one() {
    let dir = scratch_dir("missing");
    let output = serialgen(&dir, &["missing.h"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.h"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_help_flag_is_just_a_path() {
    let dir = scratch_dir("help");
    let output = serialgen(&dir, &["--help"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read --help"));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_path_starting_with_hyphen() {
    let dir = scratch_dir("hyphen");
    fs::write(dir.join("-data.h"), "//!serialize\nstruct D { uint8_t b; };\n").unwrap();

    let output = serialgen(&dir, &["-data.h"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(dir.join("-data_serializers.h").exists());
    assert!(dir.join("-data_serializers.c").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_c_input_exits_one_without_artifacts() {
    let dir = scratch_dir("cfile");
    fs::write(dir.join("app.c"), "//!serialize\nstruct A { char c; };\n").unwrap();

    let output = serialgen(&dir, &["app.c"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("app.c"));
    assert!(!dir.join("app_serializers.c").exists());

    let _ = fs::remove_dir_all(&dir);
}
