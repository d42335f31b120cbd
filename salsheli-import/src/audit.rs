//! Invariant checks over a partition.

use std::collections::BTreeSet;
use std::fmt;

use salsheli_catalog::Product;
use salsheli_lib::looks_garbled;

use crate::merge::{Duplicate, find_duplicates};

/// A single invariant violation.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// Name or barcode shared with an earlier record.
    Duplicate(Duplicate),
    /// Record whose key set differs from the first record's.
    KeyDrift {
        index: usize,
        name: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    EmptyName { index: usize },
    /// Field that looks like mis-decoded text.
    Garbled {
        index: usize,
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Duplicate(d) => write!(
                f,
                "#{} '{}': {} of #{}",
                d.index, d.name, d.reason, d.first
            ),
            Finding::KeyDrift {
                index,
                name,
                missing,
                unexpected,
            } => {
                write!(f, "#{index} '{name}': key set differs")?;
                if !missing.is_empty() {
                    write!(f, ", missing {}", missing.join(", "))?;
                }
                if !unexpected.is_empty() {
                    write!(f, ", unexpected {}", unexpected.join(", "))?;
                }
                Ok(())
            }
            Finding::EmptyName { index } => write!(f, "#{index}: empty name"),
            Finding::Garbled {
                index,
                field,
                value,
            } => write!(f, "#{index}: garbled {field} '{value}'"),
        }
    }
}

/// Check `products` for duplicate names and barcodes, key-set drift, empty
/// names and garbled text. Findings come grouped by kind, each group in
/// record order.
pub fn audit(products: &[Product]) -> Vec<Finding> {
    let mut findings: Vec<Finding> = find_duplicates(products)
        .into_iter()
        .map(Finding::Duplicate)
        .collect();

    if let Some(first) = products.first() {
        let expected = extra_keys(first);
        for (index, product) in products.iter().enumerate().skip(1) {
            let keys = extra_keys(product);
            if keys != expected {
                findings.push(Finding::KeyDrift {
                    index,
                    name: product.name.clone(),
                    missing: expected.difference(&keys).cloned().collect(),
                    unexpected: keys.difference(&expected).cloned().collect(),
                });
            }
        }
    }

    for (index, product) in products.iter().enumerate() {
        if product.name.trim().is_empty() {
            findings.push(Finding::EmptyName { index });
        }
    }

    for (index, product) in products.iter().enumerate() {
        let fields = [
            ("name", &product.name),
            ("category", &product.category),
            ("brand", &product.brand),
            ("unit", &product.unit),
        ];
        for (field, value) in fields {
            if looks_garbled(value) {
                findings.push(Finding::Garbled {
                    index,
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    findings
}

/// Keys outside the fixed schema. The fixed fields are always written, so
/// drift can only come from these.
fn extra_keys(product: &Product) -> BTreeSet<String> {
    product.extra.keys().cloned().collect()
}
