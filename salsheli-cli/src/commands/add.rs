use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use salsheli_catalog::{load_partition, partition_path, save_partition};
use salsheli_import::{ImportError, MergeOutcome, merge};
use salsheli_lib::sort_products;

use crate::CliError;

use super::{Context, log_dry_run, log_limited};

/// Skipped names listed before the rest are summarized.
pub(super) const SKIPPED_SHOWN: usize = 10;

pub(crate) fn run_add(
    ctx: &Context,
    partition: &str,
    from: &Path,
    sort: bool,
) -> Result<(), CliError> {
    let dir = ctx.require_catalog_dir()?;
    let path = partition_path(dir, partition);
    if !path.exists() {
        return Err(ImportError::PartitionNotFound(path.display().to_string()).into());
    }

    let candidates = load_partition(from)?;
    let existing = load_partition(&path)?;
    log::debug!(
        "Merging {} candidates into {} ({} records)",
        candidates.len(),
        partition,
        existing.len()
    );

    let mut outcome = merge(existing, candidates);
    if sort {
        sort_products(&mut outcome.merged, &ctx.rules.sort);
    }

    log::info!(
        "{}",
        format!("Adding to {partition}").if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!(
        "  Added:   {}",
        outcome
            .added
            .len()
            .if_supports_color(Stdout, |t| t.green())
    );
    log::info!(
        "  Skipped: {}",
        outcome
            .skipped
            .len()
            .if_supports_color(Stdout, |t| t.yellow())
    );
    log::info!("  Total:   {}", outcome.merged.len());

    if !outcome.skipped.is_empty() {
        crate::log_blank();
        log::info!("Skipped (already present):");
        log_limited(&skipped_lines(&outcome), SKIPPED_SHOWN);
    }

    if !ctx.dry_run && (!outcome.added.is_empty() || sort) {
        save_partition(&path, &outcome.merged)?;
        log::debug!("Wrote {}", path.display());
    }
    log_dry_run(ctx);

    Ok(())
}

pub(super) fn skipped_lines(outcome: &MergeOutcome) -> Vec<String> {
    outcome
        .skipped
        .iter()
        .map(|s| format!("{} ({})", s.name, s.reason))
        .collect()
}
