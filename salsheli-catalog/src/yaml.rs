//! YAML loading for human-curated rule tables.
//!
//! The built-in rule set is compiled into the crate from `rules/`. A rules
//! directory with the same layout can replace any section:
//! ```text
//! rules_dir/
//!   normalize.yaml
//!   sort.yaml
//!   icons.yaml
//!   split.yaml
//!   cleanup.yaml
//!   reclassify/
//!     alcohol.yaml
//!     other.yaml
//!   prune/
//!     dairy.yaml
//! ```
//! Single-file sections replace the built-in section. Plans in `reclassify/`
//! and `prune/` replace built-in plans with the same `id` and add new ones.

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{
    CleanupRules, IconTable, NormalizeRules, PrunePlan, ReclassifyPlan, RuleSet, SortRules,
    SplitRules,
};

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("YAML serialize error: {0}")]
    Serialize(#[source] serde_yml::Error),
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

const BUILTIN_NORMALIZE: &str = include_str!("../rules/normalize.yaml");
const BUILTIN_SORT: &str = include_str!("../rules/sort.yaml");
const BUILTIN_ICONS: &str = include_str!("../rules/icons.yaml");
const BUILTIN_SPLIT: &str = include_str!("../rules/split.yaml");
const BUILTIN_CLEANUP: &str = include_str!("../rules/cleanup.yaml");
const BUILTIN_RECLASSIFY: &[(&str, &str)] = &[
    (
        "reclassify/alcohol.yaml",
        include_str!("../rules/reclassify/alcohol.yaml"),
    ),
    (
        "reclassify/other.yaml",
        include_str!("../rules/reclassify/other.yaml"),
    ),
];
const BUILTIN_PRUNE: &[(&str, &str)] =
    &[("prune/dairy.yaml", include_str!("../rules/prune/dairy.yaml"))];

/// The rule set shipped with the tools.
pub fn builtin_rules() -> Result<RuleSet, YamlError> {
    Ok(RuleSet {
        normalize: parse_builtin::<NormalizeRules>("normalize.yaml", BUILTIN_NORMALIZE)?,
        sort: parse_builtin::<SortRules>("sort.yaml", BUILTIN_SORT)?,
        icons: parse_builtin::<Vec<IconTable>>("icons.yaml", BUILTIN_ICONS)?,
        split: parse_builtin::<SplitRules>("split.yaml", BUILTIN_SPLIT)?,
        cleanup: parse_builtin::<CleanupRules>("cleanup.yaml", BUILTIN_CLEANUP)?,
        reclassify: BUILTIN_RECLASSIFY
            .iter()
            .map(|(name, src)| parse_builtin::<ReclassifyPlan>(name, src))
            .collect::<Result<_, _>>()?,
        prune: BUILTIN_PRUNE
            .iter()
            .map(|(name, src)| parse_builtin::<PrunePlan>(name, src))
            .collect::<Result<_, _>>()?,
    })
}

/// Load the effective rule set: built-in rules, overlaid with `dir` if given.
pub fn load_rules(dir: Option<&Path>) -> Result<RuleSet, YamlError> {
    let mut rules = builtin_rules()?;
    let Some(dir) = dir else {
        return Ok(rules);
    };
    if !dir.is_dir() {
        return Err(YamlError::DirNotFound(dir.display().to_string()));
    }

    if let Some(normalize) = load_optional(&dir.join("normalize.yaml"))? {
        rules.normalize = normalize;
    }
    if let Some(sort) = load_optional(&dir.join("sort.yaml"))? {
        rules.sort = sort;
    }
    if let Some(icons) = load_optional(&dir.join("icons.yaml"))? {
        rules.icons = icons;
    }
    if let Some(split) = load_optional(&dir.join("split.yaml"))? {
        rules.split = split;
    }
    if let Some(cleanup) = load_optional(&dir.join("cleanup.yaml"))? {
        rules.cleanup = cleanup;
    }

    for plan in load_yaml_dir::<ReclassifyPlan>(&dir.join("reclassify"))? {
        upsert_by_id(&mut rules.reclassify, plan, |p| &p.id);
    }
    for plan in load_yaml_dir::<PrunePlan>(&dir.join("prune"))? {
        upsert_by_id(&mut rules.prune, plan, |p| &p.id);
    }

    Ok(rules)
}

fn upsert_by_id<T>(items: &mut Vec<T>, item: T, id: impl Fn(&T) -> &String) {
    match items.iter().position(|existing| id(existing) == id(&item)) {
        Some(pos) => items[pos] = item,
        None => items.push(item),
    }
}

fn parse_builtin<T: DeserializeOwned>(name: &str, contents: &str) -> Result<T, YamlError> {
    serde_yml::from_str(contents).map_err(|e| YamlError::Parse {
        path: format!("builtin:{name}"),
        source: e,
    })
}

/// Load a single YAML file if it exists.
fn load_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, YamlError> {
    if !path.exists() {
        return Ok(None);
    }
    load_yaml_file(path).map(Some)
}

fn load_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T, YamlError> {
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Generic helper: load all YAML files in a directory, each containing a single `T`.
fn load_yaml_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, YamlError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(YamlError::DirNotFound(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| YamlError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    entries
        .into_iter()
        .map(|entry| load_yaml_file(&entry.path()))
        .collect()
}

/// Render a rule set back to YAML for display.
pub fn rules_to_string(rules: &RuleSet) -> Result<String, YamlError> {
    serde_yml::to_string(rules).map_err(YamlError::Serialize)
}
