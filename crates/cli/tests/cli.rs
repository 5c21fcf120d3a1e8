#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use id3::{Tag, TagLike, Version};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn tagmover_cmd() -> Command {
    Command::new(cargo_bin("tagmover"))
}

fn write_mp3(dir: &Path, name: &str, artist: Option<&str>, album: Option<&str>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"fake audio frames").unwrap();
    let mut tag = Tag::new();
    if let Some(artist) = artist {
        tag.set_artist(artist);
    }
    if let Some(album) = album {
        tag.set_album(album);
    }
    tag.set_title("Untitled");
    tag.write_to_path(&path, Version::Id3v24).unwrap();
    path
}

struct Dirs {
    _temp: TempDir,
    base: PathBuf,
    target: PathBuf,
}

fn dirs() -> Dirs {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("incoming");
    let target = temp.path().join("library");
    fs::create_dir_all(&base).unwrap();
    fs::create_dir_all(&target).unwrap();
    Dirs {
        _temp: temp,
        base,
        target,
    }
}

#[test]
fn moves_file_into_artist_album_tree() {
    let dirs = dirs();
    let source = write_mp3(
        &dirs.base,
        "01 Song.mp3",
        Some("Queen"),
        Some("News of the World"),
    );

    tagmover_cmd()
        .arg("--base-dir")
        .arg(&dirs.base)
        .arg("--target-dir")
        .arg(&dirs.target)
        .assert()
        .success();

    assert!(!source.exists());
    assert!(dirs
        .target
        .join("Queen")
        .join("News of the World")
        .join("01 Song.mp3")
        .exists());
}

#[test]
fn copy_with_replaced_spaces_keeps_source_and_file_name() {
    let dirs = dirs();
    let source = write_mp3(
        &dirs.base,
        "02 Another Brick.mp3",
        Some("Pink Floyd"),
        Some("The Wall"),
    );

    tagmover_cmd()
        .arg("--base-dir")
        .arg(&dirs.base)
        .arg("--target-dir")
        .arg(&dirs.target)
        .args(["--use-copy", "--replace-spaces"])
        .assert()
        .success();

    assert!(source.exists());
    let copied = dirs
        .target
        .join("Pink_Floyd")
        .join("The_Wall")
        .join("02 Another Brick.mp3");
    assert_eq!(fs::read(&copied).unwrap(), fs::read(&source).unwrap());
}

#[test]
fn missing_album_lands_in_artist_directory() {
    let dirs = dirs();
    write_mp3(&dirs.base, "song.mp3", Some("Queen"), None);

    tagmover_cmd()
        .arg("--base-dir")
        .arg(&dirs.base)
        .arg("--target-dir")
        .arg(&dirs.target)
        .arg("--allow_missing_album_info")
        .assert()
        .success();

    assert!(dirs.target.join("Queen").join("song.mp3").exists());
}

#[test]
fn require_album_skips_file() {
    let dirs = dirs();
    let source = write_mp3(&dirs.base, "song.mp3", Some("Queen"), None);

    tagmover_cmd()
        .arg("--base-dir")
        .arg(&dirs.base)
        .arg("--target-dir")
        .arg(&dirs.target)
        .arg("--require-album")
        .assert()
        .success()
        .stderr(predicate::str::contains("album info missing"));

    assert!(source.exists());
}

#[test]
fn missing_artist_is_reported_and_skipped() {
    let dirs = dirs();
    let source = write_mp3(&dirs.base, "song.mp3", None, Some("Jazz"));

    tagmover_cmd()
        .arg("--base-dir")
        .arg(&dirs.base)
        .arg("--target-dir")
        .arg(&dirs.target)
        .assert()
        .success()
        .stdout(predicate::str::contains("artist info missing").not())
        .stderr(predicate::str::contains("artist info missing"))
        .stderr(predicate::str::contains("\x1b[").not());

    assert!(source.exists());
    assert_eq!(fs::read_dir(&dirs.target).unwrap().count(), 0);
}

#[test]
fn dry_run_logs_mapping_without_changes() {
    let dirs = dirs();
    let source = write_mp3(&dirs.base, "song.mp3", Some("Queen"), Some("Jazz"));

    tagmover_cmd()
        .arg("--base-dir")
        .arg(&dirs.base)
        .arg("--target-dir")
        .arg(&dirs.target)
        .args(["--dry-run", "-vv"])
        .assert()
        .success()
        .stderr(predicate::str::contains("song.mp3 ->"))
        .stderr(predicate::str::contains("Creating directory"));

    assert!(source.exists());
    assert!(!dirs.target.join("Queen").exists());
}

#[test]
fn malformed_tag_is_reported_as_unreadable() {
    let dirs = dirs();
    let source = dirs.base.join("broken.mp3");
    fs::write(&source, b"ID3\x04\x00\x00\xff\xff\xff\xff").unwrap();

    tagmover_cmd()
        .arg("--base-dir")
        .arg(&dirs.base)
        .arg("--target-dir")
        .arg(&dirs.target)
        .assert()
        .success()
        .stderr(predicate::str::contains("broken.mp3 is not readable."));

    assert!(source.exists());
    assert_eq!(fs::read_dir(&dirs.target).unwrap().count(), 0);
}

#[test]
fn missing_target_directory_exits_with_status_one() {
    let dirs = dirs();
    let source = write_mp3(&dirs.base, "song.mp3", Some("Queen"), Some("Jazz"));

    tagmover_cmd()
        .arg("--base-dir")
        .arg(&dirs.base)
        .arg("--target-dir")
        .arg(dirs.target.join("does-not-exist"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("target directory does not exist"));

    assert!(source.exists());
}

#[test]
fn json_output_reports_summary() {
    let dirs = dirs();
    write_mp3(&dirs.base, "a.mp3", Some("Queen"), Some("Jazz"));
    write_mp3(&dirs.base, "b.mp3", None, None);

    let output = tagmover_cmd()
        .arg("--base-dir")
        .arg(&dirs.base)
        .arg("--target-dir")
        .arg(&dirs.target)
        .args(["--output", "json", "-v"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["scanned"], 2);
    assert_eq!(summary["placed"], 1);
    assert_eq!(summary["skipped"], 1);
}

#[test]
fn help_and_version_exit_zero() {
    tagmover_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--template"));

    tagmover_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tagmover"));
}
