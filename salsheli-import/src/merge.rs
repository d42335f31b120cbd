//! Merge-and-deduplicate for catalog partitions.
//!
//! Two records are duplicates when their trimmed, lower-cased names match or
//! when they share a non-empty barcode. The name check runs first.

use std::collections::{HashMap, HashSet};
use std::fmt;

use salsheli_catalog::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DuplicateName,
    DuplicateBarcode,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DuplicateName => write!(f, "duplicate name"),
            SkipReason::DuplicateBarcode => write!(f, "duplicate barcode"),
        }
    }
}

/// A record left out of a partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub name: String,
    pub reason: SkipReason,
}

/// Result of [`merge`].
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// Existing records in their original order, then the added candidates.
    pub merged: Vec<Product>,
    /// Names of the added candidates, in input order.
    pub added: Vec<String>,
    pub skipped: Vec<Skipped>,
}

/// Name and barcode keys already present in a partition.
#[derive(Debug, Default)]
pub struct DedupIndex {
    names: HashSet<String>,
    barcodes: HashSet<String>,
}

impl DedupIndex {
    pub fn from_products(products: &[Product]) -> Self {
        let mut index = Self::default();
        for product in products {
            index.insert(product);
        }
        index
    }

    /// Why `product` would be a duplicate, if it would.
    pub fn check(&self, product: &Product) -> Option<SkipReason> {
        if self.names.contains(&product.name_key()) {
            return Some(SkipReason::DuplicateName);
        }
        match product.barcode_key() {
            Some(barcode) if self.barcodes.contains(barcode) => Some(SkipReason::DuplicateBarcode),
            _ => None,
        }
    }

    pub fn insert(&mut self, product: &Product) {
        self.names.insert(product.name_key());
        if let Some(barcode) = product.barcode_key() {
            self.barcodes.insert(barcode.to_string());
        }
    }
}

/// Append every candidate not already present in `existing`.
///
/// Candidates are checked in input order against the existing records and
/// against the candidates added before them. Nothing is ever rejected as
/// malformed: a record without a name has the empty name.
pub fn merge(existing: Vec<Product>, candidates: impl IntoIterator<Item = Product>) -> MergeOutcome {
    let mut index = DedupIndex::from_products(&existing);
    let mut outcome = MergeOutcome {
        merged: existing,
        ..Default::default()
    };

    for candidate in candidates {
        if let Some(reason) = index.check(&candidate) {
            log::debug!("Skipping '{}': {}", candidate.name, reason);
            outcome.skipped.push(Skipped {
                name: candidate.name,
                reason,
            });
            continue;
        }
        index.insert(&candidate);
        outcome.added.push(candidate.name.clone());
        outcome.merged.push(candidate);
    }

    outcome
}

/// Result of [`dedupe`].
#[derive(Debug, Default)]
pub struct DedupeOutcome {
    pub kept: Vec<Product>,
    pub dropped: Vec<Skipped>,
}

/// Keep the first record for every name and barcode key, drop the rest.
pub fn dedupe(products: Vec<Product>) -> DedupeOutcome {
    let outcome = merge(Vec::new(), products);
    DedupeOutcome {
        kept: outcome.merged,
        dropped: outcome.skipped,
    }
}

/// A record that duplicates an earlier one in the same partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Duplicate {
    /// Position of the duplicate record.
    pub index: usize,
    /// Position of the first record with the same key.
    pub first: usize,
    pub name: String,
    pub reason: SkipReason,
}

/// Report every duplicate in `products` without changing anything.
///
/// Unlike [`dedupe`], each record is checked against all earlier records,
/// including ones that are themselves duplicates.
pub fn find_duplicates(products: &[Product]) -> Vec<Duplicate> {
    let mut names: HashMap<String, usize> = HashMap::new();
    let mut barcodes: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();

    for (index, product) in products.iter().enumerate() {
        let name_key = product.name_key();
        let barcode_key = product.barcode_key();

        if let Some(&first) = names.get(&name_key) {
            duplicates.push(Duplicate {
                index,
                first,
                name: product.name.clone(),
                reason: SkipReason::DuplicateName,
            });
        } else if let Some(&first) = barcode_key.and_then(|b| barcodes.get(b)) {
            duplicates.push(Duplicate {
                index,
                first,
                name: product.name.clone(),
                reason: SkipReason::DuplicateBarcode,
            });
        }

        names.entry(name_key).or_insert(index);
        if let Some(barcode) = barcode_key {
            barcodes.entry(barcode).or_insert(index);
        }
    }

    duplicates
}
