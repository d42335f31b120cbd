use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use salsheli_import::{CleanupSummary, FieldFix, cleanup_dir, fix_partitions_in_dir};

use crate::CliError;

use super::reclassify::log_reclassify;
use super::{Context, log_dry_run, log_limited};

/// Name fixes listed in full before the rest are summarized.
const NAME_FIXES_SHOWN: usize = 50;

pub(crate) fn run_fix(ctx: &Context, partitions: &[String]) -> Result<(), CliError> {
    let dir = ctx.require_catalog_dir()?;
    let summary = fix_partitions_in_dir(dir, partitions, &ctx.rules, ctx.dry_run)?;
    log_summary(&summary);
    log_dry_run(ctx);
    Ok(())
}

pub(crate) fn run_cleanup(ctx: &Context) -> Result<(), CliError> {
    let dir = ctx.require_catalog_dir()?;
    let summary = cleanup_dir(dir, &ctx.rules, ctx.dry_run)?;

    if let Some(outcome) = &summary.reclassified {
        log_reclassify(outcome);
        crate::log_blank();
    }
    log_summary(&summary);
    log_dry_run(ctx);
    Ok(())
}

fn log_summary(summary: &CleanupSummary) {
    let report = &summary.report;

    if !report.name_fixes.is_empty() {
        log::info!(
            "{}",
            "Name fixes".if_supports_color(Stdout, |t| t.bold())
        );
        let lines: Vec<String> = report.name_fixes.iter().map(format_fix).collect();
        log_limited(&lines, NAME_FIXES_SHOWN);
        crate::log_blank();
    }
    if !report.brand_fixes.is_empty() {
        log::info!(
            "{}",
            "Brand fixes".if_supports_color(Stdout, |t| t.bold())
        );
        let lines: Vec<String> = report
            .brand_fixes
            .iter()
            .map(|f| format!("{}: {:?} -> {:?}", f.name, f.before, f.after))
            .collect();
        log_limited(&lines, lines.len());
        crate::log_blank();
    }
    if !report.icon_fixes.is_empty() {
        log::info!(
            "{}",
            "Icon fixes".if_supports_color(Stdout, |t| t.bold())
        );
        let lines: Vec<String> = report
            .icon_fixes
            .iter()
            .map(|f| format!("{}: {} -> {}", f.name, f.before, f.after))
            .collect();
        log_limited(&lines, lines.len());
        crate::log_blank();
    }

    log::info!("Total products before: {}", summary.total_before);
    log::info!("Total products after:  {}", summary.total_after);
    log::info!("Name fixes:  {}", report.name_fixes.len());
    log::info!("Brand fixes: {}", report.brand_fixes.len());
    log::info!("Icon fixes:  {}", report.icon_fixes.len());
    if !summary.duplicates.is_empty() {
        log::info!(
            "{} {} (see 'salsheli check')",
            "Duplicates after fixes:".if_supports_color(Stdout, |t| t.yellow()),
            summary.duplicates.len()
        );
    }
    if summary.changed.is_empty() {
        log::info!(
            "{}",
            "Nothing to change.".if_supports_color(Stdout, |t| t.green())
        );
    } else {
        log::info!("Changed partitions: {}", summary.changed.join(", "));
    }
}

fn format_fix(fix: &FieldFix) -> String {
    format!("[{}] {} -> {}", fix.partition, fix.before, fix.after)
}
