//! Verify XML config is parsed and used without touching user state.

use std::fs;
use tempfile::tempdir;

use date_sort::config::load_config_from_xml_path;
use date_sort::{DateFormat, LogLevel};

#[test]
fn reads_config_xml_and_applies_values() {
    let td = tempdir().expect("create tempdir");

    let cfg_path = td.path().join("config.xml");
    let root = td.path().join("photos");
    let log_file = td.path().join("date_sort.log");

    let xml = format!(
        r#"
<config>
  <root>{}</root>
  <date_format>DD_MM_YYYY</date_format>
  <group_by_size>true</group_by_size>
  <log_level>info</log_level>
  <log_file>{}</log_file>
</config>
"#,
        root.display(),
        log_file.display()
    );
    fs::write(&cfg_path, xml).expect("write config.xml");

    let cfg = load_config_from_xml_path(&cfg_path).expect("load_config_from_xml_path");

    assert_eq!(cfg.policy.root, root, "root mismatch");
    assert_eq!(cfg.policy.date_format, DateFormat::DayMonthYear);
    assert!(cfg.policy.group_by_size);
    assert!(!cfg.policy.group_by_extension, "unset flags keep defaults");
    assert_eq!(cfg.log_file.as_deref(), Some(log_file.as_path()), "log_file mismatch");
    assert_eq!(cfg.log_level, LogLevel::Info, "log_level mismatch");
}

#[test]
fn whitespace_around_values_is_ignored() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config>\n  <date_format>\n    ymd\n  </date_format>\n  <log_level>  quiet </log_level>\n  <root>   </root>\n</config>",
    )
    .unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg.policy.date_format, DateFormat::YearMonthDay);
    assert_eq!(cfg.log_level, LogLevel::Quiet);
    assert!(cfg.policy.root.as_os_str().is_empty(), "blank root means unset");
}

#[test]
fn malformed_xml_is_an_error_with_path() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("broken.xml");
    fs::write(&cfg_path, "<config><recurse>true</config>").unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.xml"));
}
