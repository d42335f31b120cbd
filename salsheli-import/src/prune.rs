//! Remove records whose names match any of a set of patterns.

use std::path::Path;

use salsheli_catalog::{Product, PrunePlan, load_partition, partition_path, save_partition};

use crate::error::ImportError;

#[derive(Debug, Default)]
pub struct PruneOutcome {
    pub kept: Vec<Product>,
    /// Names of the removed records, in partition order.
    pub removed: Vec<String>,
    pub before: usize,
}

/// Split `products` into kept and removed by case-insensitive substring match.
/// Empty patterns are ignored.
pub fn prune(products: Vec<Product>, patterns: &[String]) -> PruneOutcome {
    let patterns: Vec<String> = patterns
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.to_lowercase())
        .collect();
    let mut outcome = PruneOutcome {
        before: products.len(),
        ..Default::default()
    };

    for product in products {
        let name = product.name.to_lowercase();
        if patterns.iter().any(|p| name.contains(p.as_str())) {
            outcome.removed.push(product.name);
        } else {
            outcome.kept.push(product);
        }
    }

    outcome
}

/// Apply `plan` to its partition in `dir`. With `dry_run` nothing is written.
pub fn prune_in_dir(dir: &Path, plan: &PrunePlan, dry_run: bool) -> Result<PruneOutcome, ImportError> {
    let path = partition_path(dir, &plan.partition);
    if !path.exists() {
        return Err(ImportError::PartitionNotFound(path.display().to_string()));
    }
    let outcome = prune(load_partition(&path)?, &plan.patterns);
    log::info!(
        "Plan '{}': removing {} of {} records from {}",
        plan.id,
        outcome.removed.len(),
        outcome.before,
        plan.partition
    );

    if !dry_run && !outcome.removed.is_empty() {
        save_partition(&path, &outcome.kept)?;
    }
    Ok(outcome)
}
