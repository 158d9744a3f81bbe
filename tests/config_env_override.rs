use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use date_sort::config::load_config;
use date_sort::{CONFIG_ENV, default_config_path};

#[test]
#[serial]
fn env_override_points_at_explicit_config() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("custom_config.xml");
    fs::write(&cfg, "<config><recurse>true</recurse><log_level>debug</log_level></config>").unwrap();

    // Set env for this process; serialize to avoid cross-test interference
    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg);
    }

    let resolved = default_config_path();
    let loaded = load_config();

    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    assert_eq!(resolved.as_deref(), Some(cfg.as_path()));
    let loaded = loaded.expect("explicit config should load");
    assert!(loaded.policy.recurse);
    assert_eq!(loaded.log_level, date_sort::LogLevel::Debug);
}

#[test]
#[serial]
fn missing_explicit_config_is_an_error() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("nowhere.xml");
    unsafe {
        std::env::set_var(CONFIG_ENV, &cfg);
    }
    let loaded = load_config();
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    let err = loaded.expect_err("a missing explicit config must not fall back to defaults");
    assert!(err.to_string().contains(CONFIG_ENV));
}
