use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use salsheli_lib::settings::{
    load_settings_string, resolve_catalog_dir, resolve_rules_dir, save_catalog_dir,
    save_rules_dir, settings_path,
};

use crate::CliError;

/// Show resolved directories and the raw settings file.
pub(crate) fn run_config_show(catalog_dir: Option<PathBuf>, rules_dir: Option<PathBuf>) {
    let path = settings_path();

    log::info!(
        "{}",
        "Salsheli Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let catalog = resolve_catalog_dir(catalog_dir);
    let status = if catalog.is_dir() { "" } else { " (missing)" };
    log::info!("  Catalog dir:   {}{}", catalog.display(), status);
    match resolve_rules_dir(rules_dir) {
        Some(dir) => log::info!("  Rules dir:     {}", dir.display()),
        None => log::info!(
            "  Rules dir:     {}",
            "built-in".if_supports_color(Stdout, |t| t.dimmed())
        ),
    }

    if let Some(contents) = load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {line}");
        }
    }
}

pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

pub(crate) fn run_config_set_dir(dir: &Path, rules: bool) -> Result<(), CliError> {
    if !dir.is_dir() {
        log::warn!("{} does not exist (saving anyway)", dir.display());
    }
    let absolute = std::path::absolute(dir)?;
    if rules {
        save_rules_dir(Some(&absolute))?;
        log::info!("Rules directory set to {}", absolute.display());
    } else {
        save_catalog_dir(Some(&absolute))?;
        log::info!("Catalog directory set to {}", absolute.display());
    }
    Ok(())
}
