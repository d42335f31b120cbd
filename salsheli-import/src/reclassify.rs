//! Move records between partitions by keyword evidence in their names.

use std::collections::BTreeMap;
use std::path::Path;

use salsheli_catalog::{
    Product, ReclassifyPlan, load_partition, load_partition_or_empty, partition_path,
    save_partition,
};
use salsheli_lib::{assigned_icon, classify, sort_by_name};

use crate::error::ImportError;
use crate::merge::{DedupIndex, Skipped, dedupe};

/// A record that moved to another partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Moved {
    pub name: String,
    pub partition: String,
    pub icon: String,
}

/// A matched record dropped because its target already had it.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedMove {
    pub partition: String,
    pub skipped: Skipped,
}

/// Record counts of one partition before and after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionCount {
    pub partition: String,
    pub before: usize,
    pub after: usize,
}

#[derive(Debug, Default)]
pub struct ReclassifyOutcome {
    /// Source records that no rule claimed.
    pub remaining: Vec<Product>,
    pub moved: Vec<Moved>,
    pub skipped: Vec<SkippedMove>,
    /// Records dropped from targets by the post-run dedupe.
    pub deduped: Vec<SkippedMove>,
    /// Source first, then every target in rule order.
    pub counts: Vec<PartitionCount>,
}

/// Run `plan` over `source`, moving claimed records into `targets`.
///
/// Claimed records are relabelled and re-iconed, then merged into their
/// target partition. A claimed record the target already holds is dropped
/// from the source as well. Targets missing from `targets` start empty.
pub fn reclassify(
    source: Vec<Product>,
    targets: &mut BTreeMap<String, Vec<Product>>,
    plan: &ReclassifyPlan,
) -> ReclassifyOutcome {
    let target_keys: Vec<String> = plan
        .target_partitions()
        .into_iter()
        .filter(|key| *key != plan.source)
        .map(str::to_string)
        .collect();

    let mut outcome = ReclassifyOutcome::default();
    let source_before = source.len();
    let mut before = Vec::with_capacity(target_keys.len());
    let mut indexes: BTreeMap<String, DedupIndex> = BTreeMap::new();
    for key in &target_keys {
        let records = targets.entry(key.clone()).or_default();
        before.push(records.len());
        indexes.insert(key.clone(), DedupIndex::from_products(records));
    }

    for mut product in source {
        let Some(rule) = classify(&product.name, &plan.rules) else {
            outcome.remaining.push(product);
            continue;
        };
        let (Some(index), Some(target)) = (
            indexes.get_mut(&rule.partition),
            targets.get_mut(&rule.partition),
        ) else {
            // Rule points back at the source partition.
            outcome.remaining.push(product);
            continue;
        };

        if let Some(label) = &rule.label {
            product.category = label.clone();
        }
        if let Some(icon) = rule.icon.as_ref().and_then(|a| assigned_icon(&product, a)) {
            product.icon = icon.to_string();
        }

        if let Some(reason) = index.check(&product) {
            log::debug!(
                "Not moving '{}' to {}: {}",
                product.name,
                rule.partition,
                reason
            );
            outcome.skipped.push(SkippedMove {
                partition: rule.partition.clone(),
                skipped: Skipped {
                    name: product.name,
                    reason,
                },
            });
            continue;
        }

        index.insert(&product);
        outcome.moved.push(Moved {
            name: product.name.clone(),
            partition: rule.partition.clone(),
            icon: product.icon.clone(),
        });
        target.push(product);
    }

    for key in &target_keys {
        let Some(records) = targets.get_mut(key) else {
            continue;
        };
        if plan.dedupe_targets {
            let result = dedupe(std::mem::take(records));
            *records = result.kept;
            outcome
                .deduped
                .extend(result.dropped.into_iter().map(|skipped| SkippedMove {
                    partition: key.clone(),
                    skipped,
                }));
        }
        if plan.sort_by_name {
            sort_by_name(records);
        }
    }
    if plan.sort_by_name {
        sort_by_name(&mut outcome.remaining);
    }

    outcome.counts.push(PartitionCount {
        partition: plan.source.clone(),
        before: source_before,
        after: outcome.remaining.len(),
    });
    for (key, before) in target_keys.iter().zip(before) {
        outcome.counts.push(PartitionCount {
            partition: key.clone(),
            before,
            after: targets.get(key).map_or(0, Vec::len),
        });
    }

    outcome
}

/// Run `plan` against the partitions in `dir` and write the results back.
///
/// The source partition must exist; targets are created when absent. With
/// `dry_run` nothing is written.
pub fn reclassify_in_dir(
    dir: &Path,
    plan: &ReclassifyPlan,
    dry_run: bool,
) -> Result<ReclassifyOutcome, ImportError> {
    let source_path = partition_path(dir, &plan.source);
    if !source_path.exists() {
        return Err(ImportError::PartitionNotFound(
            source_path.display().to_string(),
        ));
    }
    let source = load_partition(&source_path)?;

    let mut targets = BTreeMap::new();
    for key in plan.target_partitions() {
        if key == plan.source {
            continue;
        }
        let records = load_partition_or_empty(&partition_path(dir, key))?;
        targets.insert(key.to_string(), records);
    }

    let outcome = reclassify(source, &mut targets, plan);
    log::info!(
        "Plan '{}': {} moved, {} already present",
        plan.id,
        outcome.moved.len(),
        outcome.skipped.len()
    );

    if dry_run {
        return Ok(outcome);
    }

    for count in outcome.counts.iter().skip(1) {
        let path = partition_path(dir, &count.partition);
        if count.before == count.after && count.after == 0 && !path.exists() {
            continue;
        }
        if let Some(records) = targets.get(&count.partition) {
            save_partition(&path, records)?;
        }
    }
    save_partition(&source_path, &outcome.remaining)?;

    Ok(outcome)
}
