//! User settings (catalog and rules directories).
//!
//! The settings file is `~/.config/salsheli/settings.toml`:
//!
//! ```toml
//! [catalog]
//! dir = "/path/to/assets/data/list_types/categories"
//!
//! [rules]
//! dir = "/path/to/rules"
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// Catalog directory used when neither the CLI nor the settings name one.
pub const DEFAULT_CATALOG_DIR: &str = "assets/data/list_types/categories";

/// Canonical path to the settings file: `~/.config/salsheli/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("salsheli").join("settings.toml")
}

/// Resolve the catalog directory using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `catalog.dir` in `settings.toml`
/// 3. [`DEFAULT_CATALOG_DIR`], relative to the working directory
pub fn resolve_catalog_dir(cli_override: Option<PathBuf>) -> PathBuf {
    cli_override
        .or_else(|| read_setting_from(&settings_path(), "catalog", "dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_DIR))
}

/// Resolve the rules directory. `None` means the built-in rules only.
pub fn resolve_rules_dir(cli_override: Option<PathBuf>) -> Option<PathBuf> {
    cli_override.or_else(|| read_setting_from(&settings_path(), "rules", "dir").map(PathBuf::from))
}

/// Save (or clear) the catalog directory in `settings.toml`.
pub fn save_catalog_dir(dir: Option<&Path>) -> io::Result<()> {
    save_setting_to(
        &settings_path(),
        "catalog",
        "dir",
        dir.map(|d| d.to_string_lossy().into_owned()).as_deref(),
    )
}

/// Save (or clear) the rules directory in `settings.toml`.
pub fn save_rules_dir(dir: Option<&Path>) -> io::Result<()> {
    save_setting_to(
        &settings_path(),
        "rules",
        "dir",
        dir.map(|d| d.to_string_lossy().into_owned()).as_deref(),
    )
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

/// Read `[section] key` from a settings file. Empty values count as unset.
pub fn read_setting_from(path: &Path, section: &str, key: &str) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    let value = doc.get(section)?.get(key)?.as_str()?;
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Set or remove `[section] key` in a settings file, keeping every other
/// entry. The file is replaced atomically.
pub fn save_setting_to(
    path: &Path,
    section: &str,
    key: &str,
    value: Option<&str>,
) -> io::Result<()> {
    let mut doc: toml::Value = match std::fs::read_to_string(path) {
        Ok(contents) => contents
            .parse()
            .unwrap_or_else(|_| toml::Value::Table(Default::default())),
        Err(_) => toml::Value::Table(Default::default()),
    };

    let root = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let entry = root
        .entry(section)
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let table = entry
        .as_table_mut()
        .ok_or_else(|| io::Error::other(format!("[{section}] is not a table")))?;

    match value {
        Some(v) => {
            table.insert(key.to_string(), toml::Value::String(v.to_string()));
        }
        None => {
            table.remove(key);
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;

    log::debug!("Updated [{}] {} in {}", section, key, path.display());
    Ok(())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
