use salsheli_catalog::{
    IconOverride, NormalizeRules, Product, RuleSet, builtin_rules, load_partition, partition_path,
    save_partition,
};
use salsheli_import::*;
use salsheli_lib::Normalizer;
use tempfile::TempDir;

fn rules() -> RuleSet {
    builtin_rules().unwrap()
}

#[test]
fn clean_partition_fixes_name_brand_and_generic_icon() {
    let rules = rules();
    let normalizer = Normalizer::new(&rules.normalize).unwrap();
    let mut products = vec![
        Product::new("במבה80 גר", "ממתקים וחטיפים").with_brand(" אסם\n"),
        Product::new("חטיף אנרגיה", "ממתקים וחטיפים").with_icon("🍫"),
    ];

    let report = clean_partition(&mut products, "snacks", &normalizer, &rules.icons);

    assert_eq!(products[0].name, "במבה 80 גרם");
    assert_eq!(products[0].brand, "אסם");
    assert_eq!(products[0].icon, "🥜");
    assert_eq!(products[1].icon, "🍫");

    assert_eq!(report.name_fixes.len(), 1);
    assert_eq!(report.name_fixes[0].before, "במבה80 גר");
    assert_eq!(report.name_fixes[0].after, "במבה 80 גרם");
    assert_eq!(report.brand_fixes.len(), 1);
    assert_eq!(report.icon_fixes.len(), 1);
    assert_eq!(report.icon_fixes[0].name, "במבה 80 גרם");
    assert_eq!(report.icon_fixes[0].partition, "snacks");
}

#[test]
fn clean_partition_is_a_no_op_on_clean_records() {
    let rules = rules();
    let normalizer = Normalizer::new(&rules.normalize).unwrap();
    let mut products = vec![Product::new("במבה 80 גרם", "ממתקים וחטיפים").with_icon("🥜")];
    let before = products.clone();

    let report = clean_partition(&mut products, "snacks", &normalizer, &rules.icons);
    assert!(report.is_empty());
    assert_eq!(products, before);
}

#[test]
fn icon_override_beats_keyword_table() {
    let normalizer = Normalizer::new(&NormalizeRules {
        icon_overrides: vec![IconOverride {
            name: "במבה נוגט".to_string(),
            icon: "🍫".to_string(),
        }],
        ..Default::default()
    })
    .unwrap();
    let mut products = vec![Product::new("במבה נוגט", "ממתקים וחטיפים").with_icon("🥜")];

    clean_partition(&mut products, "snacks", &normalizer, &rules().icons);
    assert_eq!(products[0].icon, "🍫");
}

fn seed_catalog(dir: &std::path::Path) {
    save_partition(
        &partition_path(dir, "other"),
        &[
            Product::new("סיגריות מרלבורו", "אחר"),
            Product::new("מטריה", "אחר"),
        ],
    )
    .unwrap();
    save_partition(
        &partition_path(dir, "dairy"),
        &[Product::new("גב.צהובה 28%", "מוצרי חלב")],
    )
    .unwrap();
    save_partition(
        &partition_path(dir, "snacks"),
        &[Product::new("במבה80 גר", "ממתקים וחטיפים")],
    )
    .unwrap();
}

#[test]
fn cleanup_dir_reclassifies_then_cleans_all_but_skipped() {
    let tmp = TempDir::new().unwrap();
    seed_catalog(tmp.path());

    let summary = cleanup_dir(tmp.path(), &rules(), false).unwrap();

    let moved = &summary.reclassified.as_ref().unwrap().moved;
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].partition, "tobacco");
    assert_eq!(summary.total_before, 4);
    assert_eq!(summary.total_after, 4);
    assert_eq!(summary.changed, vec!["other", "snacks", "tobacco"]);

    let dairy = load_partition(&partition_path(tmp.path(), "dairy")).unwrap();
    assert_eq!(dairy[0].name, "גב.צהובה 28%");
    let snacks = load_partition(&partition_path(tmp.path(), "snacks")).unwrap();
    assert_eq!(snacks[0].name, "במבה 80 גרם");
    let tobacco = load_partition(&partition_path(tmp.path(), "tobacco")).unwrap();
    assert_eq!(tobacco[0].icon, "🚬");
    let other = load_partition(&partition_path(tmp.path(), "other")).unwrap();
    assert_eq!(other.len(), 1);
}

#[test]
fn cleanup_dir_dry_run_reports_without_writing() {
    let tmp = TempDir::new().unwrap();
    seed_catalog(tmp.path());

    let summary = cleanup_dir(tmp.path(), &rules(), true).unwrap();
    assert_eq!(summary.changed.len(), 3);
    assert!(!partition_path(tmp.path(), "tobacco").exists());
    let snacks = load_partition(&partition_path(tmp.path(), "snacks")).unwrap();
    assert_eq!(snacks[0].name, "במבה80 גר");
}

#[test]
fn cleanup_dir_unknown_plan() {
    let tmp = TempDir::new().unwrap();
    seed_catalog(tmp.path());
    let mut rules = rules();
    rules.cleanup.reclassify = Some("nope".to_string());

    let err = cleanup_dir(tmp.path(), &rules, false).unwrap_err();
    assert!(matches!(err, ImportError::Rules(_)));
}

#[test]
fn fix_partitions_in_dir_only_touches_named_partitions() {
    let tmp = TempDir::new().unwrap();
    seed_catalog(tmp.path());

    let summary =
        fix_partitions_in_dir(tmp.path(), &["dairy".to_string()], &rules(), false).unwrap();
    assert_eq!(summary.changed, vec!["dairy"]);
    assert!(summary.duplicates.is_empty());
    assert_eq!(summary.report.name_fixes[0].after, "גבינת צהובה 28%");

    let snacks = load_partition(&partition_path(tmp.path(), "snacks")).unwrap();
    assert_eq!(snacks[0].name, "במבה80 גר");
}

#[test]
fn names_that_collide_after_fixing_are_reported() {
    let tmp = TempDir::new().unwrap();
    save_partition(
        &partition_path(tmp.path(), "snacks"),
        &[
            Product::new("במבה 80 גרם", "ממתקים וחטיפים").with_icon("🥜"),
            Product::new("במבה80 גר", "ממתקים וחטיפים").with_icon("🥜"),
        ],
    )
    .unwrap();

    let summary =
        fix_partitions_in_dir(tmp.path(), &["snacks".to_string()], &rules(), false).unwrap();

    assert_eq!(summary.total_after, 2);
    assert_eq!(summary.duplicates.len(), 1);
    let found = &summary.duplicates[0];
    assert_eq!(found.partition, "snacks");
    assert_eq!(found.duplicate.index, 1);
    assert_eq!(found.duplicate.first, 0);
    assert_eq!(found.duplicate.name, "במבה 80 גרם");
    assert_eq!(found.duplicate.reason, SkipReason::DuplicateName);

    let snacks = load_partition(&partition_path(tmp.path(), "snacks")).unwrap();
    assert_eq!(snacks.len(), 2);
}

#[test]
fn fix_partitions_in_dir_missing_partition() {
    let tmp = TempDir::new().unwrap();
    let err =
        fix_partitions_in_dir(tmp.path(), &["frozen".to_string()], &rules(), false).unwrap_err();
    assert!(matches!(err, ImportError::PartitionNotFound(_)));
}
