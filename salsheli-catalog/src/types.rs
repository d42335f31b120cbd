//! Data model types for the product catalog.
//!
//! These types represent the persistent catalog schema (product records kept in
//! per-category JSON partitions) and the human-curated rule tables that drive
//! normalization, sorting, classification and splitting.

use serde::{Deserialize, Deserializer, Serialize};

/// Icon given to products that have no specific icon yet.
pub const GENERIC_ICON: &str = "🛒";

/// Rank given to labels missing from a priority table.
pub const SENTINEL_RANK: u32 = 99;

// ── Product ─────────────────────────────────────────────────────────────────

/// A single product record in a catalog partition.
///
/// Deserialization is tolerant: missing or `null` string fields become empty
/// strings (the icon becomes [`GENERIC_ICON`]), and unknown keys are kept in
/// `extra` so a round trip never drops data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default = "default_icon", deserialize_with = "lenient_icon")]
    pub icon: String,
    /// Kept as the JSON number that was read so `12` is not rewritten as `12.0`.
    #[serde(default)]
    pub price: Option<serde_json::Number>,
    /// External identifier. Empty string means unknown.
    #[serde(default, deserialize_with = "lenient_string")]
    pub barcode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: String,
    /// Keys this schema does not know about, in input order.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            icon: default_icon(),
            price: None,
            barcode: String::new(),
            brand: String::new(),
            unit: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the price. Non-finite values clear it.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = serde_json::Number::from_f64(price);
        self
    }

    pub fn price_value(&self) -> Option<f64> {
        self.price.as_ref().and_then(serde_json::Number::as_f64)
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = barcode.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Name key used for duplicate detection: trimmed and lower-cased.
    pub fn name_key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Barcode key used for duplicate detection, `None` when unknown.
    pub fn barcode_key(&self) -> Option<&str> {
        let barcode = self.barcode.trim();
        if barcode.is_empty() {
            None
        } else {
            Some(barcode)
        }
    }

    /// Whether the icon is still the generic placeholder.
    pub fn has_generic_icon(&self) -> bool {
        self.icon == GENERIC_ICON
    }
}

fn default_icon() -> String {
    GENERIC_ICON.to_string()
}

/// Accept a string, a number (barcodes are sometimes numeric) or `null`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    })
}

fn lenient_icon<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        _ => default_icon(),
    })
}

// ── Normalization rules ─────────────────────────────────────────────────────

/// Text rewriting tables, applied in the order they are listed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeRules {
    /// Literal substring replacements, applied first.
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    /// Regular-expression rewrites, applied after the substitutions.
    #[serde(default)]
    pub rewrites: Vec<Rewrite>,
    /// Whole-name replacements. A hit skips the rest of the pipeline.
    #[serde(default)]
    pub renames: Vec<Rename>,
    /// Icons to force for specific (already fixed) names.
    #[serde(default)]
    pub icon_overrides: Vec<IconOverride>,
}

/// A literal `from` → `to` replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Substitution {
    pub from: String,
    pub to: String,
    /// Only match at the start of the text or right after a space.
    #[serde(default)]
    pub word_start: bool,
}

/// A regex rewrite. `replacement` uses `regex` syntax (`$1`, `${name}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rewrite {
    pub pattern: String,
    pub replacement: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconOverride {
    pub name: String,
    pub icon: String,
}

// ── Sort rules ──────────────────────────────────────────────────────────────

/// Priority tables for the `(brand, category, name)` partition sort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortRules {
    #[serde(default)]
    pub brands: Vec<Rank>,
    /// Keywords matched against the lower-cased name, first match wins.
    #[serde(default)]
    pub categories: Vec<Rank>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rank {
    pub label: String,
    pub rank: u32,
}

// ── Classification rules ────────────────────────────────────────────────────

/// One entry of a classification decision list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRule {
    /// Target partition key (file stem), e.g. `alcohol`.
    pub partition: String,
    /// Category label written into moved records. Left untouched when absent.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub include: Vec<String>,
    /// Any of these vetoes the rule, checked before `include`.
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub icon: Option<IconAssignment>,
}

/// How a moved record's icon is chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconAssignment {
    #[serde(default)]
    pub mode: IconMode,
    #[serde(default)]
    pub rules: Vec<IconRule>,
    /// Used when no rule matches. With neither, the icon is kept.
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Always replace the icon.
    #[default]
    Always,
    /// Only replace the generic placeholder icon.
    GenericOnly,
}

/// Matches when the name contains any of `any` and, if `also` is non-empty,
/// any of `also` as well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconRule {
    pub any: Vec<String>,
    #[serde(default)]
    pub also: Vec<String>,
    pub icon: String,
}

/// Keyword icons used to replace generic icons inside one partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconTable {
    pub partition: String,
    #[serde(default)]
    pub rules: Vec<IconRule>,
}

/// A named move of records out of one partition into others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReclassifyPlan {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Partition records are taken from.
    pub source: String,
    pub rules: Vec<ClassRule>,
    /// Drop name/barcode duplicates from every touched target afterwards.
    #[serde(default)]
    pub dedupe_targets: bool,
    /// Sort the source and touched targets by name afterwards.
    #[serde(default)]
    pub sort_by_name: bool,
}

impl ReclassifyPlan {
    /// Distinct target partitions in rule order.
    pub fn target_partitions(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !targets.contains(&rule.partition.as_str()) {
                targets.push(&rule.partition);
            }
        }
        targets
    }
}

// ── Split, prune and cleanup ────────────────────────────────────────────────

/// How a master file is split into partitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitRules {
    /// Category label → partition key. Several labels may share a partition.
    #[serde(default)]
    pub partitions: Vec<PartitionMapping>,
    /// Partition for labels missing from the map.
    #[serde(default = "default_fallback_partition")]
    pub fallback: String,
    /// Label assumed for records without a category.
    #[serde(default = "default_missing_label")]
    pub missing_label: String,
    /// Labels that are left out of the split entirely.
    #[serde(default)]
    pub skip: Vec<String>,
}

impl Default for SplitRules {
    fn default() -> Self {
        Self {
            partitions: Vec::new(),
            fallback: default_fallback_partition(),
            missing_label: default_missing_label(),
            skip: Vec::new(),
        }
    }
}

impl SplitRules {
    pub fn partition_for(&self, label: &str) -> &str {
        self.partitions
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.partition.as_str())
            .unwrap_or(&self.fallback)
    }
}

fn default_fallback_partition() -> String {
    "other".to_string()
}

fn default_missing_label() -> String {
    "אחר".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionMapping {
    pub label: String,
    pub partition: String,
}

/// Remove records matching any pattern from one partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrunePlan {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub partition: String,
    pub patterns: Vec<String>,
}

/// Settings for the catalog-wide cleanup pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanupRules {
    /// Reclassify plan to run before cleaning.
    #[serde(default)]
    pub reclassify: Option<String>,
    /// Partitions left untouched by the cleanup.
    #[serde(default)]
    pub skip: Vec<String>,
}

// ── Rule set ────────────────────────────────────────────────────────────────

/// Every rule table the tools work with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    pub normalize: NormalizeRules,
    pub sort: SortRules,
    pub icons: Vec<IconTable>,
    pub split: SplitRules,
    pub cleanup: CleanupRules,
    pub reclassify: Vec<ReclassifyPlan>,
    pub prune: Vec<PrunePlan>,
}

impl RuleSet {
    pub fn reclassify_plan(&self, id: &str) -> Option<&ReclassifyPlan> {
        self.reclassify.iter().find(|p| p.id == id)
    }

    pub fn prune_plan(&self, id: &str) -> Option<&PrunePlan> {
        self.prune.iter().find(|p| p.id == id)
    }
}
