//! Partition ordering by `(brand rank, category rank, name)`.

use salsheli_catalog::{Product, SENTINEL_RANK, SortRules};

/// Rank of a brand label: exact match first, then the first table label
/// contained in the brand. Unknown brands get [`SENTINEL_RANK`].
pub fn brand_rank(brand: &str, rules: &SortRules) -> u32 {
    let brand = brand.trim();
    if let Some(rank) = rules.brands.iter().find(|r| r.label == brand) {
        return rank.rank;
    }
    rules
        .brands
        .iter()
        .find(|r| !r.label.is_empty() && brand.contains(r.label.as_str()))
        .map_or(SENTINEL_RANK, |r| r.rank)
}

/// Rank of the first category keyword found in the lower-cased name.
pub fn category_rank(name: &str, rules: &SortRules) -> u32 {
    let lower = name.to_lowercase();
    rules
        .categories
        .iter()
        .find(|r| !r.label.is_empty() && lower.contains(&r.label.to_lowercase()))
        .map_or(SENTINEL_RANK, |r| r.rank)
}

pub fn sort_key(product: &Product, rules: &SortRules) -> (u32, u32, String) {
    (
        brand_rank(&product.brand, rules),
        category_rank(&product.name, rules),
        product.name.clone(),
    )
}

/// Stable sort by [`sort_key`].
pub fn sort_products(products: &mut [Product], rules: &SortRules) {
    products.sort_by_cached_key(|p| sort_key(p, rules));
}

/// Stable sort by name alone.
pub fn sort_by_name(products: &mut [Product]) {
    products.sort_by(|a, b| a.name.cmp(&b.name));
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
