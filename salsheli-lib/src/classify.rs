//! Keyword classification.
//!
//! Rules form a decision list: evaluated top to bottom, exclusions veto before
//! inclusions are tested, first match wins. All matching is case-insensitive
//! substring search on the product name.

use salsheli_catalog::{ClassRule, IconAssignment, IconMode, IconRule, IconTable, Product};

/// Find the first rule that claims `name`, or `None` if the record stays put.
pub fn classify<'a>(name: &str, rules: &'a [ClassRule]) -> Option<&'a ClassRule> {
    let lower = name.to_lowercase();
    rules.iter().find(|rule| rule_matches(&lower, rule))
}

/// `lower` must already be lower-cased.
fn rule_matches(lower: &str, rule: &ClassRule) -> bool {
    if contains_any(lower, &rule.exclude) {
        return false;
    }
    contains_any(lower, &rule.include)
}

/// Whether `lower` contains any of `keywords`. Empty keywords never match.
pub(crate) fn contains_any(lower: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .filter(|k| !k.is_empty())
        .any(|k| lower.contains(&k.to_lowercase()))
}

/// First icon rule matching `name`.
pub fn pick_icon<'a>(name: &str, rules: &'a [IconRule]) -> Option<&'a str> {
    let lower = name.to_lowercase();
    rules
        .iter()
        .find(|rule| {
            contains_any(&lower, &rule.any)
                && (rule.also.is_empty() || contains_any(&lower, &rule.also))
        })
        .map(|rule| rule.icon.as_str())
}

/// Icon a moved record should get, or `None` to keep its current icon.
pub fn assigned_icon<'a>(product: &Product, assignment: &'a IconAssignment) -> Option<&'a str> {
    if assignment.mode == IconMode::GenericOnly && !product.has_generic_icon() {
        return None;
    }
    pick_icon(&product.name, &assignment.rules).or(assignment.default.as_deref())
}

/// Replacement for a generic icon from the partition's keyword table.
///
/// Returns `None` when the icon is already specific, the partition has no
/// table, or no keyword matches.
pub fn generic_icon_fix<'a>(
    product: &Product,
    partition: &str,
    tables: &'a [IconTable],
) -> Option<&'a str> {
    if !product.has_generic_icon() {
        return None;
    }
    let table = tables.iter().find(|t| t.partition == partition)?;
    pick_icon(&product.name, &table.rules)
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
