use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use salsheli_import::split_into_dir;

use crate::CliError;

use super::{Context, log_dry_run};

pub(crate) fn run_split(ctx: &Context, master: &Path) -> Result<(), CliError> {
    let report = split_into_dir(master, &ctx.catalog_dir, &ctx.rules.split, ctx.dry_run)?;

    let mut partitions = report.partitions.clone();
    partitions.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.partition.cmp(&b.partition)));

    log::info!(
        "{}",
        format!("Wrote {} category files:", partitions.len())
            .if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    for p in &partitions {
        let added = if p.before == 0 {
            "new".to_string()
        } else {
            format!("+{}", p.added)
        };
        log::info!(
            "  {:<24} {:>5} products ({})",
            format!("{}.json", p.partition),
            p.total,
            added
        );
        if !p.skipped.is_empty() {
            log::debug!("    {} already present", p.skipped.len());
        }
    }

    for (label, (partition, count)) in &report.labels {
        log::debug!("  {label} -> {partition} ({count})");
    }

    if !report.skipped_labels.is_empty() {
        crate::log_blank();
        log::info!("Skipped:");
        for (label, count) in &report.skipped_labels {
            log::info!("  {label}: {count}");
        }
    }

    log_dry_run(ctx);
    Ok(())
}
