use salsheli_catalog::{load_partition, partition_path, save_partition};
use salsheli_import::ImportError;
use salsheli_lib::{sort_by_name, sort_products};

use crate::CliError;

use super::{Context, log_dry_run};

pub(crate) fn run_sort(ctx: &Context, partition: &str, by_name: bool) -> Result<(), CliError> {
    let dir = ctx.require_catalog_dir()?;
    let path = partition_path(dir, partition);
    if !path.exists() {
        return Err(ImportError::PartitionNotFound(path.display().to_string()).into());
    }

    let mut products = load_partition(&path)?;
    let before = products.clone();
    if by_name {
        sort_by_name(&mut products);
    } else {
        sort_products(&mut products, &ctx.rules.sort);
    }

    if products == before {
        log::info!("{} is already sorted ({} products)", partition, products.len());
        return Ok(());
    }

    let moved = products
        .iter()
        .zip(&before)
        .filter(|(a, b)| a.name != b.name)
        .count();
    log::info!(
        "Sorted {} ({} products, {} changed position)",
        partition,
        products.len(),
        moved
    );

    if !ctx.dry_run {
        save_partition(&path, &products)?;
    }
    log_dry_run(ctx);
    Ok(())
}
