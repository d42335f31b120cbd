use std::collections::BTreeMap;

use salsheli_catalog::{
    GENERIC_ICON, Product, ReclassifyPlan, builtin_rules, load_partition, partition_path,
    save_partition,
};
use salsheli_import::*;
use tempfile::TempDir;

fn plan(id: &str) -> ReclassifyPlan {
    builtin_rules().unwrap().reclassify_plan(id).unwrap().clone()
}

fn beverages() -> Vec<Product> {
    vec![
        Product::new("קוקה קולה 1.5 ליטר", "משקאות").with_icon("🥤"),
        Product::new("בירה גולדסטאר 500 מ״ל", "משקאות").with_barcode("100"),
        Product::new("בירה בלונד 0% אלכוהול", "משקאות").with_barcode("101"),
        Product::new("יין אדום קברנה סוביניון", "משקאות").with_barcode("102"),
        Product::new("וודקה סמירנוף 700 מ״ל", "משקאות").with_barcode("103"),
        Product::new("מים מינרליים", "משקאות"),
    ]
}

#[test]
fn alcohol_plan_moves_and_relabels() {
    let mut targets = BTreeMap::new();
    let outcome = reclassify(beverages(), &mut targets, &plan("alcohol"));

    let moved: Vec<(&str, &str)> = outcome
        .moved
        .iter()
        .map(|m| (m.name.as_str(), m.icon.as_str()))
        .collect();
    assert_eq!(
        moved,
        vec![
            ("בירה גולדסטאר 500 מ״ל", "🍺"),
            ("יין אדום קברנה סוביניון", "🍷"),
            ("וודקה סמירנוף 700 מ״ל", "🍸"),
        ]
    );

    let alcohol = &targets["alcohol"];
    assert_eq!(alcohol.len(), 3);
    assert!(alcohol.iter().all(|p| p.category == "משקאות אלכוהוליים"));
    // Sorted by name afterwards.
    assert_eq!(alcohol[0].name, "בירה גולדסטאר 500 מ״ל");
    assert_eq!(alcohol[2].name, "יין אדום קברנה סוביניון");

    let remaining: Vec<&str> = outcome.remaining.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        remaining,
        vec!["בירה בלונד 0% אלכוהול", "מים מינרליים", "קוקה קולה 1.5 ליטר"]
    );

    assert_eq!(
        outcome.counts,
        vec![
            PartitionCount {
                partition: "beverages".to_string(),
                before: 6,
                after: 3,
            },
            PartitionCount {
                partition: "alcohol".to_string(),
                before: 0,
                after: 3,
            },
        ]
    );
}

#[test]
fn duplicates_in_target_are_dropped_from_source() {
    let mut targets = BTreeMap::new();
    targets.insert(
        "alcohol".to_string(),
        vec![Product::new("בירה גולדסטאר בקבוק", "משקאות אלכוהוליים").with_barcode("100")],
    );

    let outcome = reclassify(beverages(), &mut targets, &plan("alcohol"));

    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].partition, "alcohol");
    assert_eq!(outcome.skipped[0].skipped.reason, SkipReason::DuplicateBarcode);
    assert_eq!(outcome.moved.len(), 2);
    assert_eq!(targets["alcohol"].len(), 3);
    assert!(
        outcome
            .remaining
            .iter()
            .all(|p| p.name != "בירה גולדסטאר 500 מ״ל")
    );
}

#[test]
fn post_run_dedupe_cleans_existing_target() {
    let mut targets = BTreeMap::new();
    targets.insert(
        "alcohol".to_string(),
        vec![
            Product::new("ערק", "משקאות אלכוהוליים").with_barcode("7"),
            Product::new("ערק אלית", "משקאות אלכוהוליים").with_barcode("7"),
        ],
    );

    let outcome = reclassify(Vec::new(), &mut targets, &plan("alcohol"));
    assert_eq!(outcome.deduped.len(), 1);
    assert_eq!(outcome.deduped[0].skipped.name, "ערק אלית");
    assert_eq!(targets["alcohol"].len(), 1);
}

#[test]
fn other_plan_routes_by_priority_and_respects_icon_mode() {
    let source = vec![
        Product::new("סיגריות מרלבורו גולד", "אחר"),
        Product::new("שמפו לשיער יבש", "אחר").with_icon("🧼"),
        Product::new("סבון כלים", "אחר"),
        Product::new("מטריה", "אחר"),
    ];
    let mut targets = BTreeMap::new();
    let outcome = reclassify(source, &mut targets, &plan("other"));

    assert_eq!(targets["tobacco"][0].icon, "🚬");
    assert_eq!(targets["tobacco"][0].category, "טבק");
    // Hygiene only replaces a generic icon.
    assert_eq!(targets["hygiene"][0].icon, "🧼");
    assert_eq!(outcome.remaining.len(), 1);
    assert_eq!(outcome.remaining[0].icon, GENERIC_ICON);
}

#[test]
fn reclassify_in_dir_writes_source_and_target() {
    let tmp = TempDir::new().unwrap();
    save_partition(&partition_path(tmp.path(), "beverages"), &beverages()).unwrap();

    let outcome = reclassify_in_dir(tmp.path(), &plan("alcohol"), false).unwrap();
    assert_eq!(outcome.moved.len(), 3);

    let beverages = load_partition(&partition_path(tmp.path(), "beverages")).unwrap();
    let alcohol = load_partition(&partition_path(tmp.path(), "alcohol")).unwrap();
    assert_eq!(beverages.len(), 3);
    assert_eq!(alcohol.len(), 3);
}

#[test]
fn reclassify_in_dir_dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let path = partition_path(tmp.path(), "beverages");
    save_partition(&path, &beverages()).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let outcome = reclassify_in_dir(tmp.path(), &plan("alcohol"), true).unwrap();
    assert_eq!(outcome.moved.len(), 3);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    assert!(!partition_path(tmp.path(), "alcohol").exists());
}

#[test]
fn reclassify_in_dir_requires_source() {
    let tmp = TempDir::new().unwrap();
    let err = reclassify_in_dir(tmp.path(), &plan("alcohol"), false).unwrap_err();
    assert!(matches!(err, ImportError::PartitionNotFound(_)));
}
