//! Name, brand and icon cleanup across catalog partitions.

use std::collections::BTreeMap;
use std::path::Path;

use salsheli_catalog::{
    IconTable, Product, RuleSet, list_partitions, load_partition, partition_path, save_partition,
};
use salsheli_lib::{Normalizer, RuleError, clean_brand, generic_icon_fix};

use crate::error::ImportError;
use crate::merge::{Duplicate, find_duplicates};
use crate::reclassify::{ReclassifyOutcome, reclassify};

/// One changed field of one record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFix {
    pub partition: String,
    /// Record name after its own fix.
    pub name: String,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Default)]
pub struct CleanupReport {
    pub name_fixes: Vec<FieldFix>,
    pub brand_fixes: Vec<FieldFix>,
    pub icon_fixes: Vec<FieldFix>,
}

impl CleanupReport {
    pub fn is_empty(&self) -> bool {
        self.name_fixes.is_empty() && self.brand_fixes.is_empty() && self.icon_fixes.is_empty()
    }

    fn extend(&mut self, other: CleanupReport) {
        self.name_fixes.extend(other.name_fixes);
        self.brand_fixes.extend(other.brand_fixes);
        self.icon_fixes.extend(other.icon_fixes);
    }
}

/// Clean every record of one partition in place.
///
/// Per record: fix the name, clean the brand, apply an exact-name icon
/// override, then replace a generic icon from the partition's keyword table.
pub fn clean_partition(
    products: &mut [Product],
    partition: &str,
    normalizer: &Normalizer,
    icons: &[IconTable],
) -> CleanupReport {
    let mut report = CleanupReport::default();
    let fix = |name: &str, before: &str, after: &str| FieldFix {
        partition: partition.to_string(),
        name: name.to_string(),
        before: before.to_string(),
        after: after.to_string(),
    };

    for product in products.iter_mut() {
        let name = normalizer.fix_name(&product.name);
        if name != product.name {
            report.name_fixes.push(fix(&name, &product.name, &name));
            product.name = name;
        }

        let brand = clean_brand(&product.brand);
        if brand != product.brand {
            report
                .brand_fixes
                .push(fix(&product.name, &product.brand, &brand));
            product.brand = brand;
        }

        let icon = normalizer
            .icon_override(&product.name)
            .or_else(|| generic_icon_fix(product, partition, icons))
            .filter(|icon| *icon != product.icon);
        if let Some(icon) = icon {
            report
                .icon_fixes
                .push(fix(&product.name, &product.icon, icon));
            product.icon = icon.to_string();
        }
    }

    report
}

/// A duplicate left in a partition after its names were fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionDuplicate {
    pub partition: String,
    pub duplicate: Duplicate,
}

/// Result of a multi-partition cleanup.
#[derive(Debug, Default)]
pub struct CleanupSummary {
    pub reclassified: Option<ReclassifyOutcome>,
    pub report: CleanupReport,
    pub total_before: usize,
    pub total_after: usize,
    /// Partitions whose contents changed (and were written unless dry run).
    pub changed: Vec<String>,
    /// Duplicates found in changed partitions. Reported, never removed.
    pub duplicates: Vec<PartitionDuplicate>,
}

/// Clean the named partitions of `dir`.
pub fn fix_partitions_in_dir(
    dir: &Path,
    partitions: &[String],
    rules: &RuleSet,
    dry_run: bool,
) -> Result<CleanupSummary, ImportError> {
    let normalizer = Normalizer::new(&rules.normalize)?;
    let mut catalog = BTreeMap::new();
    for key in partitions {
        let path = partition_path(dir, key);
        if !path.exists() {
            return Err(ImportError::PartitionNotFound(path.display().to_string()));
        }
        catalog.insert(key.clone(), load_partition(&path)?);
    }
    let original = catalog.clone();

    let mut summary = CleanupSummary {
        total_before: count(&catalog),
        ..Default::default()
    };
    for (key, products) in catalog.iter_mut() {
        let report = clean_partition(products, key, &normalizer, &rules.icons);
        summary.report.extend(report);
    }
    summary.total_after = count(&catalog);

    summary.changed = write_changed(dir, &original, &catalog, dry_run)?;
    summary.duplicates = duplicates_in(&catalog, &summary.changed);
    Ok(summary)
}

/// Full catalog pass: run the configured reclassify plan, then clean every
/// partition outside the skip list.
pub fn cleanup_dir(dir: &Path, rules: &RuleSet, dry_run: bool) -> Result<CleanupSummary, ImportError> {
    let normalizer = Normalizer::new(&rules.normalize)?;
    let plan = match &rules.cleanup.reclassify {
        Some(id) => Some(
            rules
                .reclassify_plan(id)
                .ok_or_else(|| RuleError::unknown_plan(id))?,
        ),
        None => None,
    };

    let mut catalog = BTreeMap::new();
    for key in list_partitions(dir)? {
        let records = load_partition(&partition_path(dir, &key))?;
        catalog.insert(key, records);
    }
    let original = catalog.clone();

    let mut summary = CleanupSummary {
        total_before: count(&catalog),
        ..Default::default()
    };

    if let Some(plan) = plan {
        match catalog.remove(&plan.source) {
            Some(source) => {
                let outcome = reclassify(source, &mut catalog, plan);
                catalog.insert(plan.source.clone(), outcome.remaining.clone());
                summary.reclassified = Some(outcome);
            }
            None => log::warn!(
                "Skipping plan '{}': no {} partition",
                plan.id,
                plan.source
            ),
        }
    }

    for (key, products) in catalog.iter_mut() {
        if rules.cleanup.skip.contains(key) {
            log::debug!("Leaving {} untouched", key);
            continue;
        }
        let report = clean_partition(products, key, &normalizer, &rules.icons);
        summary.report.extend(report);
    }
    summary.total_after = count(&catalog);

    summary.changed = write_changed(dir, &original, &catalog, dry_run)?;
    summary.duplicates = duplicates_in(&catalog, &summary.changed);
    Ok(summary)
}

/// Fixed names can collide, so changed partitions are checked again.
fn duplicates_in(
    catalog: &BTreeMap<String, Vec<Product>>,
    keys: &[String],
) -> Vec<PartitionDuplicate> {
    let mut found = Vec::new();
    for key in keys {
        let Some(products) = catalog.get(key) else {
            continue;
        };
        for duplicate in find_duplicates(products) {
            log::warn!(
                "{}: '{}' duplicates record #{} ({})",
                key,
                duplicate.name,
                duplicate.first,
                duplicate.reason
            );
            found.push(PartitionDuplicate {
                partition: key.clone(),
                duplicate,
            });
        }
    }
    found
}

fn count(catalog: &BTreeMap<String, Vec<Product>>) -> usize {
    catalog.values().map(Vec::len).sum()
}

/// Save partitions that differ from `original`, returning their keys.
fn write_changed(
    dir: &Path,
    original: &BTreeMap<String, Vec<Product>>,
    catalog: &BTreeMap<String, Vec<Product>>,
    dry_run: bool,
) -> Result<Vec<String>, ImportError> {
    let mut changed = Vec::new();
    for (key, products) in catalog {
        let created = !original.contains_key(key);
        if created && products.is_empty() {
            continue;
        }
        if original.get(key) == Some(products) {
            continue;
        }
        if !dry_run {
            save_partition(&partition_path(dir, key), products)?;
        }
        changed.push(key.clone());
    }
    Ok(changed)
}
