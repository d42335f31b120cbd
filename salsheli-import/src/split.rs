//! Split one master product file into per-category partitions.

use std::collections::BTreeMap;
use std::path::Path;

use salsheli_catalog::{
    Product, SplitRules, load_partition, load_partition_or_empty, partition_path, save_partition,
};

use crate::error::ImportError;
use crate::merge::{Skipped, merge};

/// Master records grouped by target partition.
#[derive(Debug, Default)]
pub struct SplitPlan {
    /// Partition key → records, in master order.
    pub groups: BTreeMap<String, Vec<Product>>,
    /// Category label → (partition key, record count).
    pub labels: BTreeMap<String, (String, usize)>,
    /// Labels left out of the split, with their record counts.
    pub skipped_labels: Vec<(String, usize)>,
}

/// Group `master` by category label and map each label to a partition.
///
/// A record without a category counts under the rules' missing label. The
/// records themselves are not changed.
pub fn split_by_category(master: Vec<Product>, rules: &SplitRules) -> SplitPlan {
    let mut plan = SplitPlan::default();
    let mut skipped: BTreeMap<String, usize> = BTreeMap::new();

    for product in master {
        let label = match product.category.trim() {
            "" => rules.missing_label.clone(),
            label => label.to_string(),
        };
        if rules.skip.contains(&label) {
            *skipped.entry(label).or_default() += 1;
            continue;
        }

        let partition = rules.partition_for(&label).to_string();
        plan.labels
            .entry(label)
            .or_insert_with(|| (partition.clone(), 0))
            .1 += 1;
        plan.groups.entry(partition).or_default().push(product);
    }

    plan.skipped_labels = skipped.into_iter().collect();
    plan
}

/// What happened to one partition during a split.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionMerge {
    pub partition: String,
    /// Records in the partition file before the split (0 when new).
    pub before: usize,
    pub added: usize,
    pub skipped: Vec<Skipped>,
    pub total: usize,
}

#[derive(Debug, Default)]
pub struct SplitReport {
    pub partitions: Vec<PartitionMerge>,
    pub labels: BTreeMap<String, (String, usize)>,
    pub skipped_labels: Vec<(String, usize)>,
}

/// Split the master file at `master_path` into partitions under `dir`.
///
/// Each group is merged into the existing partition file, so records already
/// there are kept and duplicates are not added twice. With `dry_run` nothing
/// is written.
pub fn split_into_dir(
    master_path: &Path,
    dir: &Path,
    rules: &SplitRules,
    dry_run: bool,
) -> Result<SplitReport, ImportError> {
    let master = load_partition(master_path)?;
    log::info!(
        "Splitting {} records from {}",
        master.len(),
        master_path.display()
    );
    let plan = split_by_category(master, rules);

    let mut report = SplitReport {
        labels: plan.labels,
        skipped_labels: plan.skipped_labels,
        ..Default::default()
    };
    let mut writes = Vec::with_capacity(plan.groups.len());

    for (partition, records) in plan.groups {
        let path = partition_path(dir, &partition);
        let existing = load_partition_or_empty(&path)?;
        let before = existing.len();
        let outcome = merge(existing, records);
        report.partitions.push(PartitionMerge {
            partition,
            before,
            added: outcome.added.len(),
            skipped: outcome.skipped,
            total: outcome.merged.len(),
        });
        writes.push((path, outcome.merged));
    }

    if !dry_run {
        for (path, records) in &writes {
            save_partition(path, records)?;
        }
    }

    Ok(report)
}
