//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - This module only reads/writes the config file; root validation happens elsewhere.
//! - Unknown XML fields are a hard error so typos never silently fall back to defaults.

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{CONFIG_ENV, default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, DateFormat, LogLevel};
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    root: Option<String>,
    recurse: Option<bool>,
    date_format: Option<String>,
    group_by_extension: Option<bool>,
    group_by_size: Option<bool>,
    delete_empty_dirs: Option<bool>,
    prefer_creation_time: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();
    let policy = &mut cfg.policy;

    if let Some(root) = parsed.root.as_deref().and_then(non_empty) {
        policy.root = PathBuf::from(root);
    }
    if let Some(fmt) = parsed.date_format.as_deref().and_then(non_empty) {
        policy.date_format = fmt.parse::<DateFormat>().map_err(|e| anyhow!(e))?;
    }
    if let Some(v) = parsed.recurse {
        policy.recurse = v;
    }
    if let Some(v) = parsed.group_by_extension {
        policy.group_by_extension = v;
    }
    if let Some(v) = parsed.group_by_size {
        policy.group_by_size = v;
    }
    if let Some(v) = parsed.delete_empty_dirs {
        policy.delete_empty_dirs = v;
    }
    if let Some(v) = parsed.prefer_creation_time {
        policy.prefer_creation_time = v;
    }

    if let Some(s) = parsed.log_level.as_deref().and_then(non_empty) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = parsed.log_file.as_deref().and_then(non_empty) {
        cfg.log_file = Some(PathBuf::from(s));
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Load the effective Config.
///
/// - `$DATE_SORT_CONFIG` set: that file must exist and parse.
/// - Otherwise the OS default path is used when present; a missing file means defaults.
pub fn load_config() -> Result<Config> {
    let explicit = env::var_os(CONFIG_ENV).is_some();
    let Some(path) = default_config_path() else {
        debug!("no config path could be determined; using defaults");
        return Ok(Config::default());
    };

    if !path.exists() {
        if explicit {
            bail!(
                "{} points to '{}', which does not exist",
                CONFIG_ENV,
                path.display()
            );
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(Config::default());
    }

    debug!(path = %path.display(), "loading config");
    load_config_from_xml_path(&path)
}

/// Write a commented template config to `path` (refuses to clobber or follow symlinked ancestors).
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/date_sort.log".into());

    let content = format!(
        "<!--\n  date_sort configuration (XML)\n\n  root                  -> folder to organize (the positional CLI argument overrides it)\n  recurse               -> also sort files found in subfolders (true/false)\n  date_format           -> YYYY_MM_DD | DD_MM_YYYY\n  group_by_extension    -> add a JPG/PNG/... folder inside each date folder\n  group_by_size         -> add a size folder (\"1 MB\", \"10 MB\", ...) inside each date folder\n  delete_empty_dirs     -> remove folders left empty after the run\n  prefer_creation_time  -> use creation time where available, else modification time\n  log_level             -> quiet | normal | info | debug\n  log_file              -> path to log file (optional; stdout/stderr still used)\n\n  CLI flags override XML values.\n-->\n<config>\n  <root></root>\n  <recurse>false</recurse>\n  <date_format>{}</date_format>\n  <group_by_extension>false</group_by_extension>\n  <group_by_size>false</group_by_size>\n  <delete_empty_dirs>true</delete_empty_dirs>\n  <prefer_creation_time>true</prefer_creation_time>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        DateFormat::default(),
        suggested_log,
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}
