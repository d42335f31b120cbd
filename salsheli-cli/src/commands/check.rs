use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use salsheli_catalog::{list_partitions, load_partition, partition_path};
use salsheli_import::audit;

use crate::CliError;

use super::Context;

pub(crate) fn run_check(ctx: &Context, partitions: &[String]) -> Result<(), CliError> {
    let dir = ctx.require_catalog_dir()?;
    let keys = if partitions.is_empty() {
        list_partitions(dir)?
    } else {
        partitions.to_vec()
    };

    let mut total_findings = 0usize;
    let mut failing = 0usize;

    for key in &keys {
        let products = load_partition(&partition_path(dir, key))?;
        let findings = audit(&products);

        if findings.is_empty() {
            log::info!(
                "  {} {} ({} products)",
                "OK".if_supports_color(Stdout, |t| t.green()),
                key,
                products.len()
            );
            continue;
        }

        failing += 1;
        total_findings += findings.len();
        log::info!(
            "  {} {} ({} products, {} problems)",
            "FAIL".if_supports_color(Stdout, |t| t.red()),
            key,
            products.len(),
            findings.len()
        );
        for finding in &findings {
            log::info!("      {finding}");
        }
    }

    crate::log_blank();
    if total_findings == 0 {
        log::info!("Checked {} partitions, no problems found.", keys.len());
        Ok(())
    } else {
        Err(CliError::check(format!(
            "{} problems in {} of {} partitions",
            total_findings,
            failing,
            keys.len()
        )))
    }
}
