//! JSON I/O for catalog partitions.
//!
//! Each partition is a single `<key>.json` file holding an array of
//! [`Product`] records. Files are written pretty-printed with two-space
//! indentation and unescaped UTF-8, matching what the app bundles.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Product;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("I/O error writing {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("JSON serialize error for {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

/// A partition loaded from disk.
#[derive(Debug, Clone)]
pub struct Partition {
    /// File stem, e.g. `dairy`.
    pub key: String,
    pub products: Vec<Product>,
}

/// Path of the partition file for `key` inside `dir`.
pub fn partition_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

/// Load a partition file. A missing file is an error.
pub fn load_partition(path: &Path) -> Result<Vec<Product>, JsonError> {
    let contents = std::fs::read_to_string(path).map_err(|e| JsonError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_products(&contents, path)
}

/// Load a partition file, treating a missing file as an empty partition.
pub fn load_partition_or_empty(path: &Path) -> Result<Vec<Product>, JsonError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    load_partition(path)
}

/// Parse a JSON array of products. `path` is only used for error messages.
pub fn parse_products(contents: &str, path: &Path) -> Result<Vec<Product>, JsonError> {
    serde_json::from_str(contents).map_err(|e| JsonError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Serialize products the way partition files are stored.
pub fn to_partition_string(products: &[Product]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(products)
}

/// Write a partition file.
///
/// The data goes to a temporary sibling first and is renamed into place, so an
/// interrupted write leaves the previous file intact.
pub fn save_partition(path: &Path, products: &[Product]) -> Result<(), JsonError> {
    let serialized = to_partition_string(products).map_err(|e| JsonError::Serialize {
        path: path.display().to_string(),
        source: e,
    })?;

    let write_err = |e| JsonError::Write {
        path: path.display().to_string(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serialized).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(write_err)?;

    log::debug!("Wrote {} products to {}", products.len(), path.display());
    Ok(())
}

/// List partition keys (file stems of `*.json`) in a directory, sorted.
pub fn list_partitions(dir: &Path) -> Result<Vec<String>, JsonError> {
    if !dir.is_dir() {
        return Err(JsonError::DirNotFound(dir.display().to_string()));
    }

    let mut keys: Vec<String> = std::fs::read_dir(dir)
        .map_err(|e| JsonError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    keys.sort();
    Ok(keys)
}

/// Load every partition in a directory, sorted by key.
pub fn load_catalog_dir(dir: &Path) -> Result<Vec<Partition>, JsonError> {
    list_partitions(dir)?
        .into_iter()
        .map(|key| {
            let products = load_partition(&partition_path(dir, &key))?;
            Ok(Partition { key, products })
        })
        .collect()
}
