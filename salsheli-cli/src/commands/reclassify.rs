use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use salsheli_import::{ReclassifyOutcome, reclassify_in_dir};
use salsheli_lib::RuleError;

use crate::CliError;

use super::{Context, log_dry_run};

pub(crate) fn run_reclassify(ctx: &Context, plan_id: &str) -> Result<(), CliError> {
    let dir = ctx.require_catalog_dir()?;
    let plan = ctx
        .rules
        .reclassify_plan(plan_id)
        .ok_or_else(|| RuleError::unknown_plan(plan_id))?;

    if let Some(description) = &plan.description {
        log::info!("{}", description.if_supports_color(Stdout, |t| t.bold()));
        crate::log_blank();
    }

    let outcome = reclassify_in_dir(dir, plan, ctx.dry_run)?;
    log_reclassify(&outcome);
    log_dry_run(ctx);
    Ok(())
}

/// Print counts, moved records and skipped records of a reclassify run.
pub(crate) fn log_reclassify(outcome: &ReclassifyOutcome) {
    for count in &outcome.counts {
        log::info!(
            "  {:<20} {:>5} -> {:>5}",
            count.partition,
            count.before,
            count.after
        );
    }

    if !outcome.moved.is_empty() {
        crate::log_blank();
        log::info!(
            "{}",
            format!("Moved ({})", outcome.moved.len()).if_supports_color(Stdout, |t| t.green()),
        );
        for moved in &outcome.moved {
            log::info!("  {} {} -> {}", moved.icon, moved.name, moved.partition);
        }
    }

    if !outcome.skipped.is_empty() {
        crate::log_blank();
        log::info!(
            "{}",
            format!("Already present ({})", outcome.skipped.len())
                .if_supports_color(Stdout, |t| t.yellow()),
        );
        for skipped in &outcome.skipped {
            log::info!(
                "  {} ({} in {})",
                skipped.skipped.name,
                skipped.skipped.reason,
                skipped.partition
            );
        }
    }

    if !outcome.deduped.is_empty() {
        crate::log_blank();
        log::info!("Duplicates removed from targets: {}", outcome.deduped.len());
        for dropped in &outcome.deduped {
            log::debug!("  {} ({})", dropped.skipped.name, dropped.partition);
        }
    }
}
