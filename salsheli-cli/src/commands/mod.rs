pub(crate) mod add;
pub(crate) mod check;
pub(crate) mod cleanup;
pub(crate) mod config;
pub(crate) mod prune;
pub(crate) mod reclassify;
pub(crate) mod rules;
pub(crate) mod sort;
pub(crate) mod split;

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use salsheli_catalog::{RuleSet, load_rules};
use salsheli_lib::settings::{resolve_catalog_dir, resolve_rules_dir};

use crate::CliError;

/// Resolved directories and rules shared by every catalog command.
pub(crate) struct Context {
    pub catalog_dir: PathBuf,
    pub rules_dir: Option<PathBuf>,
    pub rules: RuleSet,
    pub dry_run: bool,
}

impl Context {
    pub(crate) fn load(
        catalog_dir: Option<PathBuf>,
        rules_dir: Option<PathBuf>,
        dry_run: bool,
    ) -> Result<Self, CliError> {
        let catalog_dir = resolve_catalog_dir(catalog_dir);
        let rules_dir = resolve_rules_dir(rules_dir);
        let rules = load_rules(rules_dir.as_deref())?;
        log::debug!("Catalog directory: {}", catalog_dir.display());
        if let Some(dir) = &rules_dir {
            log::debug!("Rules directory: {}", dir.display());
        }
        Ok(Self {
            catalog_dir,
            rules_dir,
            rules,
            dry_run,
        })
    }

    /// Fail early with a clear message when the catalog directory is missing.
    pub(crate) fn require_catalog_dir(&self) -> Result<&Path, CliError> {
        if self.catalog_dir.is_dir() {
            Ok(&self.catalog_dir)
        } else {
            Err(CliError::config(format!(
                "Catalog directory not found: {} (use --catalog-dir or 'salsheli config set-dir')",
                self.catalog_dir.display()
            )))
        }
    }
}

/// Log at most `limit` items, then a count of the rest.
pub(crate) fn log_limited<T: AsRef<str>>(items: &[T], limit: usize) {
    for line in limited_lines(items, limit) {
        log::info!("{line}");
    }
}

fn limited_lines<T: AsRef<str>>(items: &[T], limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = items
        .iter()
        .take(limit)
        .map(|item| format!("  - {}", item.as_ref()))
        .collect();
    if items.len() > limit {
        lines.push(format!("  ... and {} more", items.len() - limit));
    }
    lines
}

/// Closing note for runs that wrote nothing.
pub(crate) fn log_dry_run(ctx: &Context) {
    if ctx.dry_run {
        crate::log_blank();
        log::info!(
            "{}",
            "Dry run: no files were written.".if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}

#[cfg(test)]
#[path = "../tests/commands_tests.rs"]
mod tests;
