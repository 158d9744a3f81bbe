use assert_fs::TempDir;
use assert_fs::prelude::*;
use chrono::{Local, TimeZone};
use filetime::{FileTime, set_file_mtime};
use std::path::Path;
use std::process::Command;

/// Config file for the binary under test, so it never reads or writes the user's real one.
fn isolated_config(dir: &TempDir) -> std::path::PathBuf {
    let cfg = dir.child("config.xml");
    cfg.write_str(&format!(
        "<config><prefer_creation_time>false</prefer_creation_time><log_file>{}</log_file></config>",
        dir.child("date_sort.log").path().display()
    ))
    .unwrap();
    cfg.to_path_buf()
}

fn date_sort(cfg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("date_sort"));
    cmd.env("DATE_SORT_CONFIG", cfg);
    cmd
}

#[test]
fn binary_print_config_succeeds() {
    let home = TempDir::new().unwrap();
    let cfg = isolated_config(&home);
    let out = date_sort(&cfg).arg("--print-config").output().expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
    assert!(String::from_utf8_lossy(&out.stdout).contains("DATE_SORT_CONFIG"));
}

#[test]
fn binary_sorts_a_folder_and_prints_summary() {
    let home = TempDir::new().unwrap();
    let cfg = isolated_config(&home);
    let root = TempDir::new().unwrap();
    root.child("a.txt").write_str("a").unwrap();
    let t = Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
    set_file_mtime(root.child("a.txt").path(), FileTime::from_unix_time(t.timestamp(), 0)).unwrap();

    let out = date_sort(&cfg).arg(root.path()).output().expect("spawn binary");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(out.status.success(), "stdout={stdout} stderr={}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout.contains("Moved: a.txt"), "{stdout}");
    assert!(stdout.contains("moved 1 of 1"), "{stdout}");
    root.child("2024_03_05/a.txt").assert("a");
}

#[test]
fn binary_list_does_not_move() {
    let home = TempDir::new().unwrap();
    let cfg = isolated_config(&home);
    let root = TempDir::new().unwrap();
    root.child("b.txt").write_str("b").unwrap();

    let out = date_sort(&cfg).arg("--list").arg(root.path()).output().expect("spawn binary");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("b.txt"));
    root.child("b.txt").assert("b");
}

#[test]
fn binary_fails_for_missing_root() {
    let home = TempDir::new().unwrap();
    let cfg = isolated_config(&home);
    let out = date_sort(&cfg)
        .arg(home.path().join("does-not-exist"))
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
}
